/// Server configuration, read from the environment.
#[derive(Clone, Debug)]
pub struct Config {
    pub listen_addr: String,
    /// Directory holding the SQLite database file.
    pub data_dir: String,
    /// Base64-encoded 32-byte JWT signing secret.
    pub secret_key: String,
    pub token_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            listen_addr: std::env::var("NE_LISTEN_ADDR")
                .unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
            data_dir: std::env::var("NE_DATA_DIR").unwrap_or_else(|_| "./data".to_string()),
            secret_key: std::env::var("NE_SECRET_KEY").unwrap_or_default(),
            token_ttl_secs: std::env::var("NE_TOKEN_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(86_400),
        }
    }
}
