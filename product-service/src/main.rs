use product_service::config::ProductConfig;
use product_service::services::init_metrics;
use product_service::Application;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,product_service=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Initialize metrics recorder (must be before any metrics are recorded)
    init_metrics();

    let config = ProductConfig::load()?;
    let application = Application::build(config).await?;
    application.run_until_stopped().await?;

    Ok(())
}
