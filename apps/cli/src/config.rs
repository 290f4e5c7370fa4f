use finlit_market_data::ClientConfig;

pub struct Config {
    pub client: ClientConfig,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let client = ClientConfig::from_env()?;
        let log_format = std::env::var("FINLIT_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
        Ok(Self { client, log_format })
    }
}
