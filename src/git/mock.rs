use crate::error::{BuildstampError, Result};
use crate::git::{glob_to_regex, TagSource};
use std::path::Path;

/// Mock tag source for testing without a repository
pub struct MockTagSource {
    /// Tags reachable from HEAD, nearest first
    tags: Vec<String>,
    /// Commits between HEAD and the nearest tag
    distance: usize,
    unavailable: Option<String>,
}

impl MockTagSource {
    /// Create a source whose HEAD carries the given tags
    pub fn with_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MockTagSource {
            tags: tags.into_iter().map(Into::into).collect(),
            distance: 0,
            unavailable: None,
        }
    }

    /// Create a source that fails every lookup, like a missing repository
    pub fn unavailable(reason: impl Into<String>) -> Self {
        MockTagSource {
            tags: Vec::new(),
            distance: 0,
            unavailable: Some(reason.into()),
        }
    }

    /// Place HEAD `distance` commits after the nearest tag
    pub fn at_distance(mut self, distance: usize) -> Self {
        self.distance = distance;
        self
    }
}

impl TagSource for MockTagSource {
    fn describe(&self, _root: &Path, pattern: &str) -> Result<String> {
        if let Some(reason) = &self.unavailable {
            return Err(BuildstampError::Git(git2::Error::from_str(reason)));
        }

        let re = glob_to_regex(pattern)?;
        let tag = self
            .tags
            .iter()
            .find(|tag| re.is_match(tag))
            .ok_or_else(|| {
                BuildstampError::Git(git2::Error::from_str(&format!(
                    "No tag matching '{}'",
                    pattern
                )))
            })?;

        if self.distance == 0 {
            Ok(tag.clone())
        } else {
            Ok(format!("{}-{}-g0000000", tag, self.distance))
        }
    }
}
