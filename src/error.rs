use thiserror::Error;

impl From<config::ConfigError> for DoraError {
    fn from(err: config::ConfigError) -> Self {
        Self::ConfigError(err.to_string())
    }
}

impl From<octocrab::Error> for DoraError {
    fn from(err: octocrab::Error) -> Self {
        match &err {
            octocrab::Error::GitHub { source, .. } if source.status_code.as_u16() == 404 => {
                Self::NotFound(source.message.clone())
            }
            _ => Self::GitHubError(err.to_string()),
        }
    }
}

#[derive(Error, Debug)]
pub enum DoraError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("GitHub API error: {0}")]
    GitHubError(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl DoraError {
    pub fn missing_field(field: &str) -> Self {
        Self::ValidationError(format!("Missing required field: {}", field))
    }

    pub fn invalid_date(value: &str) -> Self {
        Self::ValidationError(format!(
            "Invalid date '{}': expected YYYY-MM-DD",
            value
        ))
    }

    pub fn inverted_range(from: &str, to: &str) -> Self {
        Self::ValidationError(format!(
            "Invalid date range: from ({}) is after to ({})",
            from, to
        ))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
