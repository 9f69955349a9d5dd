// Lambda entry point for the scheduled Habitica → Slack sync

use lambda_runtime::{Error, run, service_fn};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing, explicitly setting the max level to INFO
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    run(service_fn(habitica_slack::worker::handler)).await
}
