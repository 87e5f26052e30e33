use crate::error::DoraError;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const DEFAULT_CONFIG_FILE: &str = "dora-metrics";

/// GitHub caps `per_page` at 100 for every listing endpoint we use.
pub const MAX_PAGE_SIZE: u8 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub github_token: Option<String>,
    pub github_api_url: String,
    pub max_concurrent_repos: usize,
    pub page_size: u8,
    pub commit_limit: u8,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            github_token: None,
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            max_concurrent_repos: 4,
            page_size: MAX_PAGE_SIZE,
            commit_limit: MAX_PAGE_SIZE,
        }
    }
}

impl AppConfig {
    /// Load configuration from `dora-metrics.toml` (if present) and `DORA_*`
    /// environment variables.
    pub fn load() -> Result<Self, DoraError> {
        Self::load_from(None)
    }

    /// Layering: defaults, then the config file, then the environment.
    pub fn load_from(path: Option<&Path>) -> Result<Self, DoraError> {
        let defaults = Self::default();

        let file_source = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = config::Config::builder()
            .set_default("github_api_url", defaults.github_api_url)?
            .set_default("max_concurrent_repos", defaults.max_concurrent_repos as i64)?
            .set_default("page_size", defaults.page_size as i64)?
            .set_default("commit_limit", defaults.commit_limit as i64)?
            .add_source(file_source)
            .add_source(config::Environment::with_prefix("DORA"))
            .build()?;

        let mut config: AppConfig = settings.try_deserialize()?;

        if config.github_token.is_none() {
            config.github_token = env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DoraError> {
        if self.max_concurrent_repos == 0 {
            return Err(DoraError::ConfigError(
                "max_concurrent_repos must be at least 1".to_string(),
            ));
        }

        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(DoraError::ConfigError(format!(
                "page_size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, self.page_size
            )));
        }

        if self.commit_limit == 0 || self.commit_limit > MAX_PAGE_SIZE {
            return Err(DoraError::ConfigError(format!(
                "commit_limit must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, self.commit_limit
            )));
        }

        if self.github_api_url.trim().is_empty() {
            return Err(DoraError::ConfigError(
                "github_api_url must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// The upstream credential is required before any GitHub call is made.
    pub fn require_token(&self) -> Result<&str, DoraError> {
        self.github_token
            .as_deref()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                DoraError::ConfigError(
                    "GITHUB_TOKEN (or DORA_GITHUB_TOKEN) environment variable is required"
                        .to_string(),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.github_api_url, "https://api.github.com");
        assert_eq!(config.page_size, 100);
    }

    #[test]
    fn test_validate_rejects_zero_concurrency() {
        let config = AppConfig {
            max_concurrent_repos: 0,
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(DoraError::ConfigError(_))));
    }

    #[test]
    fn test_validate_rejects_oversized_page() {
        let config = AppConfig {
            page_size: 101,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_token_is_config_error() {
        let config = AppConfig::default();
        assert!(matches!(config.require_token(), Err(DoraError::ConfigError(_))));

        let config = AppConfig {
            github_token: Some(String::new()),
            ..AppConfig::default()
        };
        assert!(config.require_token().is_err());
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dora.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "github_token = \"ghp_test\"").unwrap();
        writeln!(file, "max_concurrent_repos = 8").unwrap();
        writeln!(file, "page_size = 50").unwrap();

        let config = AppConfig::load_from(Some(&path)).unwrap();
        assert_eq!(config.github_token.as_deref(), Some("ghp_test"));
        assert_eq!(config.max_concurrent_repos, 8);
        assert_eq!(config.page_size, 50);
        assert_eq!(config.commit_limit, 100);
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let result = AppConfig::load_from(Some(Path::new("/nonexistent/dora.toml")));
        assert!(matches!(result, Err(DoraError::ConfigError(_))));
    }
}
