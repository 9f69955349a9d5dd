use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::error;

const MAX_REQUEST_AGE_SECS: u64 = 300;
const MAX_CLOCK_SKEW_SECS: u64 = 60;

pub fn verify_slack_signature(
    request_body: &str,
    timestamp: &str,
    signature: &str,
    signing_secret: &str,
) -> bool {
    let Ok(ts) = timestamp.parse::<u64>() else {
        error!("Slack request timestamp is not a number");
        return false;
    };

    if let Ok(now) = SystemTime::now().duration_since(UNIX_EPOCH) {
        let now_secs = now.as_secs();
        if now_secs.saturating_sub(ts) > MAX_REQUEST_AGE_SECS || ts > now_secs + MAX_CLOCK_SKEW_SECS
        {
            error!("Timestamp out of range, potential replay attack");
            return false;
        }
    }

    let Some(computed_signature) = compute_signature(timestamp, request_body, signing_secret)
    else {
        return false;
    };

    if computed_signature == signature {
        true
    } else {
        error!("Slack signature verification failed");
        false
    }
}

pub fn compute_signature(
    timestamp: &str,
    request_body: &str,
    signing_secret: &str,
) -> Option<String> {
    let base_string = format!("v0:{timestamp}:{request_body}");
    let mut mac = match Hmac::<Sha256>::new_from_slice(signing_secret.as_bytes()) {
        Ok(mac) => mac,
        Err(e) => {
            error!("Failed to create HMAC: {}", e);
            return None;
        }
    };
    mac.update(base_string.as_bytes());
    Some(format!("v0={}", hex::encode(mac.finalize().into_bytes())))
}
