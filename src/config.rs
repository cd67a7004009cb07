use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the content service (no trailing slash).
    pub content_api_url: String,

    /// Public site origin used for sitemap URLs (no trailing slash).
    pub site_base_url: String,

    /// Bearer token for admin write operations. Reads work without it.
    pub admin_api_token: Option<String>,

    /// CDN prefix collaborators use to resolve stored media paths. The
    /// client itself never rewrites paths; this is carried for consumers.
    pub media_cdn_base: Option<String>,

    /// Per-request timeout for content service calls.
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            content_api_url: std::env::var("CONTENT_API_URL")
                .context("CONTENT_API_URL not set")?
                .trim_end_matches('/')
                .to_string(),
            site_base_url: std::env::var("SITE_BASE_URL")
                .context("SITE_BASE_URL not set")?
                .trim_end_matches('/')
                .to_string(),
            admin_api_token: std::env::var("ADMIN_API_TOKEN").ok(),
            media_cdn_base: std::env::var("MEDIA_CDN_BASE")
                .ok()
                .map(|base| base.trim_end_matches('/').to_string()),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "CONTENT_API_URL",
            "SITE_BASE_URL",
            "ADMIN_API_TOKEN",
            "MEDIA_CDN_BASE",
            "REQUEST_TIMEOUT_SECS",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_requires_api_url() {
        clear_env();
        std::env::set_var("SITE_BASE_URL", "https://example.com");

        let err = Config::from_env().expect_err("missing CONTENT_API_URL");
        assert!(err.to_string().contains("CONTENT_API_URL"));
    }

    #[test]
    #[serial]
    fn test_from_env_defaults_and_normalization() {
        clear_env();
        std::env::set_var("CONTENT_API_URL", "https://content.example.com/");
        std::env::set_var("SITE_BASE_URL", "https://example.com/");

        let config = Config::from_env().expect("config loads");
        assert_eq!(config.content_api_url, "https://content.example.com");
        assert_eq!(config.site_base_url, "https://example.com");
        assert!(config.admin_api_token.is_none());
        assert!(config.media_cdn_base.is_none());
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    #[serial]
    fn test_from_env_reads_optional_values() {
        clear_env();
        std::env::set_var("CONTENT_API_URL", "https://content.example.com");
        std::env::set_var("SITE_BASE_URL", "https://example.com");
        std::env::set_var("ADMIN_API_TOKEN", "secret");
        std::env::set_var("MEDIA_CDN_BASE", "https://cdn.example.com/");
        std::env::set_var("REQUEST_TIMEOUT_SECS", "30");

        let config = Config::from_env().expect("config loads");
        assert_eq!(config.admin_api_token.as_deref(), Some("secret"));
        assert_eq!(
            config.media_cdn_base.as_deref(),
            Some("https://cdn.example.com")
        );
        assert_eq!(config.request_timeout_secs, 30);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_timeout_falls_back_to_default() {
        clear_env();
        std::env::set_var("CONTENT_API_URL", "https://content.example.com");
        std::env::set_var("SITE_BASE_URL", "https://example.com");
        std::env::set_var("REQUEST_TIMEOUT_SECS", "not-a-number");

        let config = Config::from_env().expect("config loads");
        assert_eq!(config.request_timeout_secs, 10);

        clear_env();
    }
}
