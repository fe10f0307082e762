use std::sync::Arc;

use common::config::Settings;
use common::logger;
use dotenvy::dotenv;
use market_data::GridFetcher;
use market_data::remote::TwelveDataClient;
use strategy::{SignalService, load_classifier};
use tracing::{debug, info};

mod server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    logger::setup_logger();
    debug!("System starting up...");

    let settings = Settings::from_env()?;
    info!(
        "Tracking {} instruments x {} timeframes",
        settings.instruments.len(),
        settings.timeframes.len()
    );

    let classifier = load_classifier(&settings.model_path, settings.model_input_width);

    let client = TwelveDataClient::new(&settings.provider)?;
    let fetcher = GridFetcher::new(
        Arc::new(client),
        settings.instruments.clone(),
        settings.timeframes.clone(),
    )
    .with_request_delay(settings.fetch_delay);

    let service = Arc::new(SignalService::new(fetcher, classifier));
    info!(
        "Signal service ready ({})",
        if service.has_classifier() {
            "classifier loaded"
        } else {
            "degraded mode"
        }
    );

    let listener = server::bind(&settings.host, settings.port).await?;
    server::run(service, listener).await
}
