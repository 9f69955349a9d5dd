pub mod relay;
pub mod sync;

pub use relay::relay_to_habitica;
pub use sync::{ChatSource, MessagePublisher, sync_messages_to_slack};
