use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub public_base_url: String,
    pub sms_gateway_url: Option<String>,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let public_base_url = env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());
        let sms_gateway_url = env::var("SMS_GATEWAY_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let max_upload_bytes = env::var("MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(1024 * 1024);

        Ok(Self {
            database_url,
            bind_addr,
            public_base_url,
            sms_gateway_url,
            max_upload_bytes,
        })
    }
}
