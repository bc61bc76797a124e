use std::time::Duration;

use quizsettle::api::router::create_router;
use quizsettle::config::AppConfig;
use quizsettle::{db, metrics, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);

    tracing::info!("Connecting to database...");
    let db = db::init_pool(&config.database_url).await?;
    tracing::info!("Database connected");

    // Gateway calls must never hang an invocation; timeouts surface as
    // gateway errors and the affected match is retried next run.
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.sports_api_timeout_secs))
        .build()?;

    let metrics_handle = metrics::init_metrics();

    if config.admin_api_token.is_none() {
        tracing::warn!("ADMIN_API_TOKEN not set — admin settlement routes will refuse requests");
    }
    if config.cron_secret.is_none() {
        tracing::warn!("CRON_SECRET not set — the cron trigger will refuse requests");
    }

    let state = AppState {
        db,
        config,
        http,
        metrics_handle,
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();
}
