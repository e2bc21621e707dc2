//! Configuration module for the OG image service.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::AppError;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Base URL of the upstream repository API
    pub api_base_url: String,
    /// Public URL of the image endpoint, referenced from og:image tags
    pub og_image_base_url: String,
    /// Site name appended to page titles
    pub site_name: String,
    /// Domain printed in the card footer
    pub site_domain: String,
    /// Path to the PNG logo embedded in every card
    pub logo_path: PathBuf,
    /// Path to the built SPA shell
    pub index_path: PathBuf,
    /// Chromium executable (auto-detected when unset)
    pub chrome_path: Option<PathBuf>,
    /// Maximum number of browser processes alive at once
    pub max_concurrent_renders: usize,
    /// Upper bound for launching a browser and capturing one card
    pub render_timeout: Duration,
    /// Upper bound for each upstream API call
    pub upstream_timeout: Duration,
    /// Replacement crawler signature list, if configured
    pub crawler_signatures: Option<Vec<String>>,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let string_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let bind_addr = parse_or(&lookup, "OG_BIND_ADDR", "0.0.0.0:3000")?;
        let max_concurrent_renders = parse_or(&lookup, "OG_MAX_CONCURRENT_RENDERS", "4")?;
        let render_timeout_secs: u64 = parse_or(&lookup, "OG_RENDER_TIMEOUT_SECS", "30")?;
        let upstream_timeout_secs: u64 = parse_or(&lookup, "OG_UPSTREAM_TIMEOUT_SECS", "10")?;

        let crawler_signatures = lookup("OG_CRAWLER_SIGNATURES").map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        });

        Ok(Self {
            bind_addr,
            api_base_url: string_or("OG_API_BASE_URL", "http://api-server:8080"),
            og_image_base_url: string_or("OG_IMAGE_BASE_URL", "https://api.gitfinder.dev/api/og"),
            site_name: string_or("OG_SITE_NAME", "GitFinder"),
            site_domain: string_or("OG_SITE_DOMAIN", "app.gitfinder.dev"),
            logo_path: string_or("OG_LOGO_PATH", "./assets/logo.png").into(),
            index_path: string_or("OG_INDEX_PATH", "./index.html").into(),
            chrome_path: lookup("OG_CHROME_PATH").map(PathBuf::from),
            max_concurrent_renders,
            render_timeout: Duration::from_secs(render_timeout_secs),
            upstream_timeout: Duration::from_secs(upstream_timeout_secs),
            crawler_signatures,
            log_level: string_or("OG_LOG_LEVEL", "info"),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: &str) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    raw.parse()
        .map_err(|e| AppError::Configuration(format!("Invalid {} value {:?}: {}", key, raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Result<Config, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_config() {
        let config = config_with(&[]).unwrap();

        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(config.api_base_url, "http://api-server:8080");
        assert_eq!(config.og_image_base_url, "https://api.gitfinder.dev/api/og");
        assert_eq!(config.site_name, "GitFinder");
        assert_eq!(config.site_domain, "app.gitfinder.dev");
        assert_eq!(config.logo_path, PathBuf::from("./assets/logo.png"));
        assert_eq!(config.index_path, PathBuf::from("./index.html"));
        assert!(config.chrome_path.is_none());
        assert_eq!(config.max_concurrent_renders, 4);
        assert_eq!(config.render_timeout, Duration::from_secs(30));
        assert_eq!(config.upstream_timeout, Duration::from_secs(10));
        assert!(config.crawler_signatures.is_none());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_overrides() {
        let config = config_with(&[
            ("OG_BIND_ADDR", "127.0.0.1:9000"),
            ("OG_CHROME_PATH", "/usr/bin/chromium"),
            ("OG_MAX_CONCURRENT_RENDERS", "2"),
            ("OG_CRAWLER_SIGNATURES", "Foobot, ,barcrawler"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:9000");
        assert_eq!(config.chrome_path, Some(PathBuf::from("/usr/bin/chromium")));
        assert_eq!(config.max_concurrent_renders, 2);
        assert_eq!(
            config.crawler_signatures,
            Some(vec!["Foobot".to_string(), "barcrawler".to_string()])
        );
    }

    #[test]
    fn test_invalid_value_is_configuration_error() {
        let err = config_with(&[("OG_RENDER_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
        assert!(err.message().contains("OG_RENDER_TIMEOUT_SECS"));
    }
}
