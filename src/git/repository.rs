use crate::error::{BuildstampError, Result};
use git2::{DescribeFormatOptions, DescribeOptions, Repository};
use std::path::Path;

/// Shortest hash length git uses for abbreviations.
pub const MIN_ABBREV: u32 = 7;

/// Length of a full hex object id.
pub const FULL_ABBREV: u32 = 40;

/// Abbreviation length git picks automatically for `object_count` objects:
/// half the bit length of the count, rounded up, and at least [`MIN_ABBREV`].
pub fn auto_abbrev(object_count: u64) -> u32 {
    let bits = u64::BITS - object_count.leading_zeros();
    ((bits + 1) / 2).clamp(MIN_ABBREV, FULL_ABBREV)
}

/// Hash length for describe output, honoring `core.abbrev`.
///
/// Numeric values are clamped to 4..=40, `no` means the full id, and
/// `auto` (or no setting) scales with the object count like git does.
fn abbrev_length(repo: &Repository) -> Result<u32> {
    let setting = repo
        .config()?
        .get_string("core.abbrev")
        .ok()
        .map(|value| value.trim().to_ascii_lowercase());

    match setting.as_deref() {
        Some("no") | Some("false") | Some("off") => return Ok(FULL_ABBREV),
        Some(value) => {
            if let Ok(len) = value.parse::<u32>() {
                return Ok(len.clamp(4, FULL_ABBREV));
            }
        }
        None => {}
    }

    let mut count: u64 = 0;
    repo.odb()?.foreach(|_| {
        count += 1;
        true
    })?;
    Ok(auto_abbrev(count))
}

/// Tag lookup backed by libgit2
#[derive(Debug, Default, Clone, Copy)]
pub struct Git2TagSource;

impl Git2TagSource {
    pub fn new() -> Self {
        Git2TagSource
    }
}

impl super::TagSource for Git2TagSource {
    fn describe(&self, root: &Path, pattern: &str) -> Result<String> {
        let repo = Repository::discover(root)?;

        let mut options = DescribeOptions::new();
        options.describe_tags().pattern(pattern);

        let describe = repo.describe(&options).map_err(|e| {
            BuildstampError::Git(git2::Error::from_str(&format!(
                "No tag matching '{}' in {}: {}",
                pattern,
                root.display(),
                e.message()
            )))
        })?;

        let mut format = DescribeFormatOptions::new();
        format.abbreviated_size(abbrev_length(&repo)?);
        let described = describe.format(Some(&format))?;

        log::debug!("described {} as {}", root.display(), described);
        Ok(described)
    }
}
