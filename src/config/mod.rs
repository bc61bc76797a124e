use std::env;

pub const DEFAULT_BUFFER_MINUTES: u64 = 10;
const DEFAULT_SPORTS_API_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,

    // Sports-data provider
    pub sports_api_base_url: String,
    pub sports_api_key: String,
    pub sports_api_timeout_secs: u64,

    // Trigger-surface secrets (optional — routes fail with a config
    // error when the matching secret is unset)
    pub admin_api_token: Option<String>,
    pub cron_secret: Option<String>,

    // Grace buffer after a round deadline before auto-settle kicks in
    pub settle_buffer_minutes: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,

            sports_api_base_url: env::var("SPORTS_API_BASE_URL")
                .map_err(|_| anyhow::anyhow!("SPORTS_API_BASE_URL must be set"))?,
            sports_api_key: env::var("SPORTS_API_KEY")
                .map_err(|_| anyhow::anyhow!("SPORTS_API_KEY must be set"))?,
            sports_api_timeout_secs: env_u64(
                "SPORTS_API_TIMEOUT_SECS",
                DEFAULT_SPORTS_API_TIMEOUT_SECS,
            ),

            admin_api_token: env::var("ADMIN_API_TOKEN").ok().filter(|s| !s.is_empty()),
            cron_secret: env::var("CRON_SECRET").ok().filter(|s| !s.is_empty()),

            settle_buffer_minutes: env_u64("SETTLE_BUFFER_MINUTES", DEFAULT_BUFFER_MINUTES),
        })
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
