use saray_client::ClientConfig;

use crate::error::{AdminError, AdminResult};
use crate::session::PasswordCheck;

/// Admin console configuration
///
/// # Environment
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./saray-admin | session file and logs |
/// | LOG_LEVEL | info | default log filter when `RUST_LOG` is unset |
/// | LOG_JSON | false | JSON console logs |
/// | ADMIN_PASSWORD | - | plain admin password |
/// | ADMIN_PASSWORD_HASH | - | argon2 PHC hash, preferred over `ADMIN_PASSWORD` |
/// | SUPABASE_URL | - | hosted database URL |
/// | SUPABASE_ANON_KEY | - | hosted database API key |
/// | REQUEST_TIMEOUT_MS | 30000 | remote request timeout |
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub log_level: String,
    pub log_json: bool,
    pub password: Option<PasswordCheck>,
    pub client: Option<ClientConfig>,
}

impl Config {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let password = std::env::var("ADMIN_PASSWORD_HASH")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PasswordCheck::Argon2)
            .or_else(|| {
                std::env::var("ADMIN_PASSWORD")
                    .ok()
                    .filter(|v| !v.is_empty())
                    .map(PasswordCheck::Plain)
            });

        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./saray-admin".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            password,
            client: ClientConfig::from_env(),
        }
    }

    /// Logs live under the work directory
    pub fn log_dir(&self) -> String {
        format!("{}/logs", self.work_dir.trim_end_matches('/'))
    }

    pub fn password_check(&self) -> AdminResult<PasswordCheck> {
        self.password.clone().ok_or_else(|| {
            AdminError::Config("set ADMIN_PASSWORD or ADMIN_PASSWORD_HASH".into())
        })
    }

    pub fn client_config(&self) -> AdminResult<ClientConfig> {
        self.client
            .clone()
            .ok_or_else(|| AdminError::Config("set SUPABASE_URL and SUPABASE_ANON_KEY".into()))
    }
}
