use crate::error::{BuildstampError, Result};
use std::fmt;

/// Maximum number of dot-separated numeric components.
pub const MAX_COMPONENTS: usize = 3;

/// Version parsed from a tag description or fallback string.
///
/// Grammar: `[v]major[.minor[.patch]][-tweak[-extrainfo]]`, where `+` may
/// stand in for the first `-`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTag {
    components: Vec<u64>,
    pub tweak: u64,
    pub extra: Option<String>,
    version: String,
}

impl VersionTag {
    /// Parse a version string (e.g., "v1.2.3-4-extra")
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let version = trimmed.strip_prefix('v').unwrap_or(trimmed);

        let numeric = version.split(['-', '+']).next().unwrap_or_default();
        let parts: Vec<&str> = numeric.split('.').collect();

        if parts.len() > MAX_COMPONENTS {
            return Err(BuildstampError::version(format!(
                "Too many dot-separated elements in version string '{}'",
                version
            )));
        }

        let normalized = version.replace('+', "-");
        let mut segments = normalized.splitn(3, '-');
        segments.next();
        let tweak_str = segments.next().unwrap_or("0");
        let extra = segments.next().map(str::to_string);

        let invalid =
            || BuildstampError::version(format!("Invalid version string '{}'", version));

        if parts[0].is_empty() || !is_numeric(tweak_str) {
            return Err(invalid());
        }

        let components = parts
            .iter()
            .map(|part| {
                if is_numeric(part) {
                    parse_bounded(part, version)
                } else {
                    Err(invalid())
                }
            })
            .collect::<Result<Vec<u64>>>()?;
        let tweak = parse_bounded(tweak_str, version)?;

        Ok(VersionTag {
            components,
            tweak,
            extra,
            version: version.to_string(),
        })
    }

    /// Numeric components that were present in the string, in order
    pub fn components(&self) -> &[u64] {
        &self.components
    }

    pub fn major(&self) -> u64 {
        self.component(0)
    }

    pub fn minor(&self) -> u64 {
        self.component(1)
    }

    pub fn patch(&self) -> u64 {
        self.component(2)
    }

    fn component(&self, index: usize) -> u64 {
        self.components.get(index).copied().unwrap_or(0)
    }

    /// The version string without the leading `v`
    pub fn as_str(&self) -> &str {
        &self.version
    }

    /// Human-readable form, e.g. "Taisei v1.2.3"
    pub fn display_string(&self, product_name: &str) -> String {
        format!("{} v{}", product_name, self.version)
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.version)
    }
}

/// Parses an all-digit component, reporting values beyond `u64::MAX`.
fn parse_bounded(digits: &str, version: &str) -> Result<u64> {
    digits.parse::<u64>().map_err(|_| {
        BuildstampError::version(format!(
            "Version component '{}' in '{}' exceeds the maximum of {}",
            digits,
            version,
            u64::MAX
        ))
    })
}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
