pub use habitica_slack::api::handler;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    habitica_slack::setup_logging();
    lambda_runtime::run(lambda_runtime::service_fn(handler)).await
}
