//! Client configuration

/// Connection settings for the hosted database API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Project URL (e.g. "https://abcd.supabase.co")
    pub base_url: String,

    /// Public (anon) API key, sent as `apikey` and bearer token
    pub api_key: String,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout_ms: 30_000,
        }
    }

    /// Load from `SUPABASE_URL`, `SUPABASE_ANON_KEY` and `REQUEST_TIMEOUT_MS`
    ///
    /// Returns `None` when the URL or key is missing.
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("SUPABASE_URL").ok().filter(|v| !v.is_empty())?;
        let api_key = std::env::var("SUPABASE_ANON_KEY")
            .ok()
            .filter(|v| !v.is_empty())?;
        let timeout_ms = std::env::var("REQUEST_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30_000);
        Some(Self {
            base_url,
            api_key,
            timeout_ms,
        })
    }
}
