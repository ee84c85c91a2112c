//! Configuration module
//!
//! Reads everything from the process environment once at startup. A local
//! `.env` file, when present, is loaded by `main` before this runs and
//! never overrides variables that are already set.

use std::time::Duration;

use crate::models::errors::{AppError, AppResult};
use crate::utils::constants::{
    DEFAULT_HOST, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_PORT, ENV_SERVER_URL, ENV_UI_HOST,
    ENV_UI_PORT,
};

/// Configuration for the query UI
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the deployed MCP server
    pub server_url: String,

    /// Host to bind the local UI on
    pub host: String,

    /// Port to bind the local UI on
    pub port: u16,

    /// Timeout for requests to the MCP server
    pub http_timeout: Duration,
}

impl AppConfig {
    /// Build the configuration from the process environment.
    ///
    /// Fails with `CFG_MISSING_ENV` when `BWAI_MCP_SERVER_URL` is unset or
    /// empty; everything else has a default.
    pub fn from_env() -> AppResult<Self> {
        let server_url = std::env::var(ENV_SERVER_URL)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::missing_env(ENV_SERVER_URL))?;

        if !(server_url.starts_with("http://") || server_url.starts_with("https://")) {
            return Err(AppError::invalid_value(format!(
                "{} must be an http(s) URL, got '{}'",
                ENV_SERVER_URL, server_url
            )));
        }

        Ok(Self {
            server_url,
            host: Self::host_from_env(),
            port: Self::port_from_env(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        })
    }

    /// Listen host from the environment
    fn host_from_env() -> String {
        std::env::var(ENV_UI_HOST).unwrap_or_else(|_| DEFAULT_HOST.to_string())
    }

    /// Listen port from the environment. Hosting platforms inject PORT;
    /// the app-specific variable covers local runs.
    fn port_from_env() -> u16 {
        std::env::var("PORT")
            .or_else(|_| std::env::var(ENV_UI_PORT))
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT)
    }

    /// MCP endpoint of the remote server. The trailing slash is required
    /// by the server's router, do not remove it.
    pub fn mcp_endpoint(&self) -> String {
        format!("{}/mcp/", self.server_url.trim_end_matches('/'))
    }

    /// Health check endpoint of the remote server
    pub fn health_endpoint(&self) -> String {
        format!("{}/health", self.server_url.trim_end_matches('/'))
    }

    /// Socket address string for the local listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// URL a user can open in a browser. Wildcard binds are rewritten to
    /// localhost since 0.0.0.0 is not routable from a browser.
    pub fn display_url(&self) -> String {
        let host = if self.host == "0.0.0.0" {
            "localhost"
        } else {
            &self.host
        };
        format!("http://{}:{}", host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(url: &str) -> AppConfig {
        AppConfig {
            server_url: url.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }

    #[test]
    fn test_endpoints_preserve_trailing_slash_on_mcp() {
        let config = config_for("https://server.example.com");
        assert_eq!(config.mcp_endpoint(), "https://server.example.com/mcp/");
        assert_eq!(config.health_endpoint(), "https://server.example.com/health");
    }

    #[test]
    fn test_endpoints_strip_existing_trailing_slash() {
        let config = config_for("https://server.example.com/");
        assert_eq!(config.mcp_endpoint(), "https://server.example.com/mcp/");
        assert_eq!(config.health_endpoint(), "https://server.example.com/health");
    }

    #[test]
    fn test_display_url_rewrites_wildcard_host() {
        let mut config = config_for("https://server.example.com");
        config.host = "0.0.0.0".to_string();
        config.port = 5001;
        assert_eq!(config.display_url(), "http://localhost:5001");
    }

    #[test]
    fn test_listen_address_env_precedence() {
        // Single test walks every branch so parallel tests never race on
        // the shared process environment. Only the listen variables are
        // touched here; the server URL test owns its own variable.
        std::env::remove_var("PORT");
        std::env::remove_var(ENV_UI_PORT);
        std::env::remove_var(ENV_UI_HOST);
        assert_eq!(AppConfig::port_from_env(), DEFAULT_PORT);
        assert_eq!(AppConfig::host_from_env(), DEFAULT_HOST);

        std::env::set_var(ENV_UI_PORT, "6001");
        assert_eq!(AppConfig::port_from_env(), 6001);

        std::env::set_var("PORT", "7001");
        assert_eq!(
            AppConfig::port_from_env(),
            7001,
            "PORT wins over BWAI_UI_PORT when both are set"
        );

        std::env::set_var(ENV_UI_HOST, "0.0.0.0");
        assert_eq!(AppConfig::host_from_env(), "0.0.0.0");

        std::env::remove_var("PORT");
        std::env::remove_var(ENV_UI_PORT);
        std::env::remove_var(ENV_UI_HOST);
    }

    #[test]
    fn test_from_env_requires_server_url() {
        // Single test covers both branches so parallel tests never race on
        // the shared process environment.
        std::env::remove_var(ENV_SERVER_URL);
        let err = AppConfig::from_env().unwrap_err();
        assert_eq!(err.code_str(), "CFG_MISSING_ENV");

        std::env::set_var(ENV_SERVER_URL, "server.example.com");
        let err = AppConfig::from_env().unwrap_err();
        assert_eq!(err.code_str(), "CFG_INVALID_VALUE");

        std::env::set_var(ENV_SERVER_URL, "https://server.example.com");
        let config = AppConfig::from_env().expect("config should load once the URL is set");
        assert_eq!(config.server_url, "https://server.example.com");
        assert_eq!(config.mcp_endpoint(), "https://server.example.com/mcp/");
        std::env::remove_var(ENV_SERVER_URL);
    }
}
