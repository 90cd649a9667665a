//! Tag lookup abstraction layer
//!
//! The version renderer only needs one question answered by version control:
//! "what is the nearest tag matching this pattern, described relative to
//! HEAD?". The [TagSource] trait captures that question so that the renderer
//! can be driven by a real repository or by a mock in tests.
//!
//! - [repository::Git2TagSource]: real lookup through the `git2` crate
//! - [mock::MockTagSource]: canned tags for testing
//!
//! ```rust
//! # use buildstamp::git::{MockTagSource, TagSource};
//! # use std::path::Path;
//! let source = MockTagSource::with_tags(["v1.2.3"]);
//! let described = source.describe(Path::new("."), "v[0-9]*[!asz]").unwrap();
//! assert_eq!(described, "v1.2.3");
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockTagSource;
pub use repository::Git2TagSource;

use crate::error::{BuildstampError, Result};
use regex::Regex;
use std::path::Path;

/// Source of tag descriptions
///
/// Implementations return the equivalent of
/// `git describe --tags --match <pattern>` run inside `root`: the nearest
/// reachable tag matching the glob, suffixed with `-<distance>-g<hash>` when
/// HEAD is not the tagged commit.
pub trait TagSource {
    /// Describe HEAD of the repository containing `root`
    ///
    /// # Returns
    /// * `Ok(String)` - The description, possibly with surrounding whitespace
    /// * `Err` - If `root` is not inside a repository or no tag matches
    fn describe(&self, root: &Path, pattern: &str) -> Result<String>;
}

/// Converts a git wildmatch glob (`*`, `?`, `[...]`, `[!...]`) into an
/// anchored regular expression.
pub fn glob_to_regex(pattern: &str) -> Result<Regex> {
    let mut out = String::from("^");
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '[' => {
                out.push('[');
                if chars.peek() == Some(&'!') {
                    chars.next();
                    out.push('^');
                }
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == ']' {
                        closed = true;
                        break;
                    }
                    if c == '\\' || c == '[' {
                        out.push('\\');
                    }
                    out.push(c);
                }
                if !closed {
                    return Err(BuildstampError::config(format!(
                        "Unterminated character class in tag pattern '{}'",
                        pattern
                    )));
                }
                out.push(']');
            }
            c => out.push_str(&regex::escape(&c.to_string())),
        }
    }
    out.push('$');

    Regex::new(&out).map_err(|e| {
        BuildstampError::config(format!("Invalid tag pattern '{}': {}", pattern, e))
    })
}
