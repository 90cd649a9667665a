use std::fmt;
use std::path::PathBuf;

/// Non-fatal conditions met while rendering a version template.
/// These are reported to the user on stderr; the run still succeeds.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Version control lookup failed and the fallback version is used
    VersionLookupFailed {
        root: PathBuf,
        fallback: String,
        reason: String,
    },
    /// A placeholder with the configured prefix survived rendering
    UnresolvedPlaceholder { token: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::VersionLookupFailed {
                root,
                fallback,
                reason,
            } => {
                write!(
                    f,
                    "git not found or not a git repository at '{}' ({}); using fallback version {}",
                    root.display(),
                    reason,
                    fallback
                )
            }
            BoundaryWarning::UnresolvedPlaceholder { token } => {
                write!(f, "Template placeholder '{}' was left unresolved", token)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_failed_mentions_fallback() {
        let warning = BoundaryWarning::VersionLookupFailed {
            root: PathBuf::from("/src/project"),
            fallback: "v1.0".to_string(),
            reason: "could not find repository".to_string(),
        };
        let msg = warning.to_string();
        assert!(msg.contains("/src/project"));
        assert!(msg.ends_with("using fallback version v1.0"));
    }

    #[test]
    fn test_unresolved_placeholder() {
        let warning = BoundaryWarning::UnresolvedPlaceholder {
            token: "${TAISEI_FOO}".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "Template placeholder '${TAISEI_FOO}' was left unresolved"
        );
    }
}
