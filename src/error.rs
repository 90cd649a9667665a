use thiserror::Error;

/// Format accepted for version strings, shown in validation errors.
pub const VERSION_FORMAT_HINT: &str = "[v]major[.minor[.patch]][-tweak[-extrainfo]]";

/// Unified error type for buildstamp operations
#[derive(Error, Debug)]
pub enum BuildstampError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}. Please use the following format: {hint}", hint = VERSION_FORMAT_HINT)]
    Version(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience type alias for Results in buildstamp
pub type Result<T> = std::result::Result<T, BuildstampError>;

impl BuildstampError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        BuildstampError::Config(msg.into())
    }

    /// Create a version validation error with context
    pub fn version(msg: impl Into<String>) -> Self {
        BuildstampError::Version(msg.into())
    }

    /// Whether the error comes from a malformed version string
    pub fn is_validation(&self) -> bool {
        matches!(self, BuildstampError::Version(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BuildstampError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_version_error_carries_format_hint() {
        let err = BuildstampError::version("Invalid version string '1.0-abc'");
        let msg = err.to_string();
        assert!(msg.starts_with("Invalid version string '1.0-abc'"));
        assert!(msg.ends_with(VERSION_FORMAT_HINT));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BuildstampError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
        assert!(!err.is_validation());
    }

    #[test]
    fn test_error_from_toml() {
        let toml_err = toml::from_str::<toml::Value>("not = = toml").unwrap_err();
        let err: BuildstampError = toml_err.into();
        assert!(err.to_string().starts_with("Invalid configuration file"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error_pairs = vec![
            (BuildstampError::config("x"), "Configuration error"),
            (BuildstampError::from(io_err), "I/O error"),
            (
                BuildstampError::Git(git2::Error::from_str("x")),
                "Git operation failed",
            ),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_only_version_errors_are_validation() {
        assert!(BuildstampError::version("bad").is_validation());
        assert!(!BuildstampError::config("bad").is_validation());
    }
}
