use thiserror::Error;

/// All the ways things can go wrong in RepoReel
///
/// The first three are the fetch failures the feed recovers from; the rest
/// only show up around config loading and the CLI.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("GitHub API error: {status}")]
    ApiError { status: u16 },

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl Error {
    /// Text suitable for showing to a person rather than a log
    pub fn user_message(&self) -> String {
        match self {
            Error::RateLimited => "Rate limit exceeded. Please try again later.".to_string(),
            Error::ApiError { status } => format!("GitHub API error: {}", status),
            Error::NetworkError(_) | Error::SerializationError(_) | Error::IoError(_) => {
                "Check your connection and try again.".to_string()
            }
            Error::ConfigError(msg) => format!("Configuration error: {}", msg),
        }
    }
}

impl From<reporeel_api::GitHubError> for Error {
    fn from(err: reporeel_api::GitHubError) -> Self {
        use reporeel_api::GitHubError;

        match err {
            GitHubError::RateLimitExceeded => Error::RateLimited,
            GitHubError::Status { status, .. } => Error::ApiError { status },
            GitHubError::NetworkError(e) => Error::NetworkError(e.to_string()),
            GitHubError::ParseError(e) => Error::SerializationError(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_errors_map_to_feed_taxonomy() {
        let err: Error = reporeel_api::GitHubError::RateLimitExceeded.into();
        assert!(matches!(err, Error::RateLimited));

        let err: Error = reporeel_api::GitHubError::Status {
            status: 500,
            body: "boom".into(),
        }
        .into();
        assert!(matches!(err, Error::ApiError { status: 500 }));
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            Error::RateLimited.user_message(),
            "Rate limit exceeded. Please try again later."
        );
        assert_eq!(
            Error::ApiError { status: 422 }.user_message(),
            "GitHub API error: 422"
        );
        assert_eq!(
            Error::NetworkError("dns".into()).user_message(),
            "Check your connection and try again."
        );
    }
}
