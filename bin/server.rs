// HealthBot - Web Server
// REST API + single-page dashboard with Axum

use anyhow::{Context, Result};
use healthbot::api::{router, AppState};
use healthbot::config::{init_logging, Config};
use healthbot::HealthDataset;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let mut config = Config::from_env()?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    config.apply_args(&args)?;

    tracing::info!("🌐 HealthBot - Web Server");

    let dataset = HealthDataset::load(&config.data_path)
        .with_context(|| format!("Failed to load dataset {:?}", config.data_path))?;

    let app = router(AppState::new(dataset));

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.addr))?;

    tracing::info!("🚀 Server running on http://{}", config.addr);
    tracing::info!("   API: http://{}/api/conditions", config.addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
