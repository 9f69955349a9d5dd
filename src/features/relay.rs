//! Slack → Habitica relay.

use tracing::info;

use crate::clients::HabiticaClient;
use crate::core::models::PostOutcome;
use crate::errors::RelayError;

/// Forwards a Slack message to the Habitica group chat unchanged.
///
/// # Errors
///
/// Propagates the Habitica client error; callers decide whether to surface it.
pub async fn relay_to_habitica(
    client: &HabiticaClient,
    user: &str,
    text: &str,
) -> Result<PostOutcome, RelayError> {
    let outcome = client.post_message(user, text).await?;
    info!(user = %user, outcome = ?outcome, "Inbound relay finished");
    Ok(outcome)
}
