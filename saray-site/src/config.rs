use saray_client::ClientConfig;

/// Public site service configuration
///
/// # Environment
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_PORT | 3000 | listen port |
/// | WORK_DIR | ./saray-site | log directory root |
/// | LOG_LEVEL | info | default log filter when `RUST_LOG` is unset |
/// | LOG_JSON | false | JSON console logs |
/// | SUPABASE_URL | - | hosted database URL |
/// | SUPABASE_ANON_KEY | - | hosted database API key |
/// | REQUEST_TIMEOUT_MS | 30000 | remote request timeout |
#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub work_dir: String,
    pub log_level: String,
    pub log_json: bool,
    pub client: Option<ClientConfig>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./saray-site".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            client: ClientConfig::from_env(),
        }
    }

    pub fn log_dir(&self) -> String {
        format!("{}/logs", self.work_dir.trim_end_matches('/'))
    }
}
