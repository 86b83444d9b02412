use std::sync::Arc;

use air_insight::api::{ApiServer, AppState};
use air_insight::config::AppConfig;
use air_insight::service::QueryService;
use air_insight::{dataset, logging, panic_hook};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env();

    let _log_guard = logging::init_logging(config.log_dir.as_deref())?;
    panic_hook::install();

    // A missing or malformed dataset is fatal.
    let store = dataset::load_from_path(&config.dataset_path).await?;
    let state = AppState::new(QueryService::new(Arc::new(store)));

    let server = ApiServer::new(config.server, state);
    let cancel_token = server.cancel_token();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Received Ctrl-C");
                cancel_token.cancel();
            }
            Err(e) => tracing::warn!(error = %e, "Unable to listen for Ctrl-C"),
        }
    });

    server.run().await?;
    Ok(())
}
