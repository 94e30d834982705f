use anyhow::Context;
use booktutor::{
    api::ApiClient,
    config::initialize_config,
    logging::{init_logging, log_directory},
    ui::run_ui,
};
use dotenv::dotenv;
use log::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = initialize_config().context("failed to load configuration")?;
    let _logger = init_logging(&config)
        .with_context(|| format!("failed to start logging in {}", log_directory().display()))?;
    info!("Starting booktutor against {}", config.base_url);

    let client = ApiClient::from_config(&config);

    if config.health_check_on_start {
        let probe = client.clone();
        tokio::spawn(async move {
            match probe.check_health().await {
                Some(status) => info!("Backend health: {}", status),
                None => warn!("Backend at {} did not answer the health check", probe.base_url()),
            }
        });
    }

    run_ui(client).await?;
    info!("Shutting down");
    Ok(())
}
