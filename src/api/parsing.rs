use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::errors::RelayError;

/// Fields Slack sends for a slash command or an outgoing webhook.
///
/// Slash commands leave `trigger_word` empty; outgoing webhooks leave
/// `command` and `response_url` empty.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SlackInboundPayload {
    pub token: String,
    pub team_id: String,
    pub team_domain: String,
    pub channel_id: String,
    pub channel_name: String,
    pub user_id: String,
    pub user_name: String,
    pub command: String,
    pub text: String,
    pub trigger_word: String,
    pub response_url: String,
}

/// Decodes a URL-encoded form component, mapping `+` to a space.
///
/// # Examples
///
/// ```
/// use habitica_slack::api::parsing::decode_url_component;
///
/// assert_eq!(decode_url_component("hello%20world").unwrap(), "hello world");
/// assert_eq!(decode_url_component("hello+world").unwrap(), "hello world");
/// ```
pub fn decode_url_component(input: &str) -> Result<String, String> {
    let spaced = input.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|s| s.to_string())
        .map_err(|e| format!("Failed to decode URL component: {}", e))
}

/// Parses an `application/x-www-form-urlencoded` body from Slack.
///
/// Missing fields default to empty strings.
///
/// # Examples
///
/// ```
/// use habitica_slack::api::parsing::parse_form_data;
///
/// let event = parse_form_data("user_name=Joe&text=Hello%21").unwrap();
/// assert_eq!(event.user_name, "Joe");
/// assert_eq!(event.text, "Hello!");
/// ```
pub fn parse_form_data(form_data: &str) -> Result<SlackInboundPayload, RelayError> {
    let mut map: HashMap<String, String> = HashMap::new();

    for pair in form_data.split('&') {
        if let Some(idx) = pair.find('=') {
            let key = decode_url_component(&pair[..idx])
                .map_err(|e| RelayError::ParseError(format!("Failed to decode key: {}", e)))?;
            let value = decode_url_component(&pair[idx + 1..])
                .map_err(|e| RelayError::ParseError(format!("Failed to decode value: {}", e)))?;
            map.insert(key, value);
        }
    }

    let mut take = |name: &str| map.remove(name).unwrap_or_default();

    Ok(SlackInboundPayload {
        token: take("token"),
        team_id: take("team_id"),
        team_domain: take("team_domain"),
        channel_id: take("channel_id"),
        channel_name: take("channel_name"),
        user_id: take("user_id"),
        user_name: take("user_name"),
        command: take("command"),
        text: take("text"),
        trigger_word: take("trigger_word"),
        response_url: take("response_url"),
    })
}

/// Extracts the raw request body, undoing API Gateway base64 encoding.
pub fn extract_body(payload: &Value) -> Result<String, RelayError> {
    let body = payload
        .get("body")
        .and_then(Value::as_str)
        .ok_or_else(|| RelayError::ParseError("Missing body".to_string()))?;

    let encoded = payload
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    if !encoded {
        return Ok(body.to_string());
    }

    let bytes = STANDARD
        .decode(body)
        .map_err(|e| RelayError::ParseError(format!("Invalid base64 body: {e}")))?;
    String::from_utf8(bytes).map_err(|e| RelayError::ParseError(format!("Body is not UTF-8: {e}")))
}

pub fn request_path(payload: &Value) -> Option<&str> {
    payload
        .get("rawPath")
        .and_then(Value::as_str)
        .or_else(|| payload.get("path").and_then(Value::as_str))
}

pub fn get_header_value<'a>(headers: &'a Value, name: &str) -> Option<&'a str> {
    if let Some(v) = headers.get(name).and_then(|s| s.as_str()) {
        return Some(v);
    }
    headers.as_object().and_then(|map| {
        map.iter().find_map(|(k, v)| {
            if k.eq_ignore_ascii_case(name) {
                v.as_str()
            } else {
                None
            }
        })
    })
}
