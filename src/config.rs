//! Service configuration and environment variable handling.

use std::env;

/// Configuration loaded once at startup and immutable thereafter.
#[derive(Debug, Clone)]
pub struct ItcConfig {
    /// Base URL of the legacy calculator deployment
    pub legacy_url: String,
    /// Cache store URL; `None` selects the in-memory store
    pub cache_url: Option<String>,
    /// Server bind host
    pub host: String,
    /// Server bind port
    pub port: u16,
}

impl ItcConfig {
    /// Create a new configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `ITC_LEGACY_URL` (required): base URL of the legacy calculator
    /// - `ITC_CACHE_URL` (optional): cache store URL (`redis://...`);
    ///   unset means the in-memory store
    /// - `HOST` (optional, default: 0.0.0.0): server bind host
    /// - `PORT` (optional, default: 8080): server bind port
    ///
    /// # Errors
    /// Returns an error if required variables are not set or malformed.
    pub fn from_env() -> Result<Self, String> {
        let legacy_url = env::var("ITC_LEGACY_URL")
            .map_err(|_| "ITC_LEGACY_URL environment variable not set".to_string())?;
        if legacy_url.trim().is_empty() {
            return Err("ITC_LEGACY_URL must not be empty".to_string());
        }

        let cache_url = env::var("ITC_CACHE_URL").ok().filter(|url| !url.trim().is_empty());

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| "PORT must be a valid port number".to_string())?;

        Ok(Self { legacy_url, cache_url, host, port })
    }
}
