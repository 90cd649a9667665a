//! Version template rendering.
//!
//! Resolves the project version from the nearest matching tag (or a fallback),
//! validates it and substitutes the version placeholders of a template.

use std::fs;
use std::path::{Path, PathBuf};

use crate::boundary::BoundaryWarning;
use crate::config::VersionConfig;
use crate::domain::substitution::unresolved_placeholders;
use crate::domain::{SubstitutionTable, VersionTag};
use crate::error::Result;
use crate::git::TagSource;
use crate::ui;

/// Inputs of one render run, mirroring the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Repository root used for the tag lookup
    pub root: PathBuf,
    /// Template file to render
    pub template: PathBuf,
    /// Build type label (e.g. "release")
    pub build_type: String,
    /// Version used when the tag lookup fails
    pub fallback: String,
}

/// Version string chosen for a run.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedVersion {
    pub version: String,
    /// Set when the fallback was used
    pub warning: Option<BoundaryWarning>,
}

/// Result of a successful render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutcome {
    pub version: VersionTag,
    pub rendered: String,
    pub warnings: Vec<BoundaryWarning>,
}

/// Looks up the version through `source`, falling back to `fallback`.
pub fn resolve_version<S: TagSource + ?Sized>(
    source: &S,
    root: &Path,
    fallback: &str,
    pattern: &str,
) -> ResolvedVersion {
    match source.describe(root, pattern) {
        Ok(described) => {
            log::info!("using version {} from tags", described.trim());
            ResolvedVersion {
                version: described.trim().to_string(),
                warning: None,
            }
        }
        Err(e) => {
            let fallback = fallback.trim().to_string();
            log::debug!("tag lookup failed: {}", e);
            ResolvedVersion {
                warning: Some(BoundaryWarning::VersionLookupFailed {
                    root: root.to_path_buf(),
                    fallback: fallback.clone(),
                    reason: e.to_string(),
                }),
                version: fallback,
            }
        }
    }
}

/// Renders `template` for an already resolved version string.
pub fn render_version(
    version: &str,
    template: &str,
    build_type: &str,
    config: &VersionConfig,
) -> Result<RenderOutcome> {
    let version = VersionTag::parse(version)?;
    let table = SubstitutionTable::for_version(&version, build_type, config);
    let rendered = table.render(template);

    let warnings = unresolved_placeholders(&rendered, &config.token_prefix)
        .into_iter()
        .map(|token| BoundaryWarning::UnresolvedPlaceholder { token })
        .collect();

    Ok(RenderOutcome {
        version,
        rendered,
        warnings,
    })
}

/// Full pipeline: resolve, validate, read the template and render it.
///
/// Warnings are shown on stderr as soon as they occur, so a fallback warning
/// is visible even when the fallback itself fails validation.
pub fn render_file<S: TagSource + ?Sized>(
    options: &RenderOptions,
    config: &VersionConfig,
    source: &S,
) -> Result<RenderOutcome> {
    let resolved = resolve_version(
        source,
        &options.root,
        &options.fallback,
        &config.tag_pattern,
    );
    if let Some(warning) = &resolved.warning {
        ui::display_boundary_warning(warning);
    }

    let template = fs::read_to_string(&options.template)?;
    let mut outcome = render_version(
        &resolved.version,
        &template,
        &options.build_type,
        config,
    )?;

    for warning in &outcome.warnings {
        ui::display_boundary_warning(warning);
    }
    if let Some(warning) = resolved.warning {
        outcome.warnings.insert(0, warning);
    }

    Ok(outcome)
}

/// Writes `content` to `path` unless the file already holds it.
///
/// # Returns
/// * `Ok(true)` - The file was written
/// * `Ok(false)` - The file was already up to date
pub fn write_if_changed(path: &Path, content: &str) -> Result<bool> {
    if fs::read_to_string(path).is_ok_and(|existing| existing == content) {
        log::info!("{} is up to date", path.display());
        return Ok(false);
    }
    fs::write(path, content)?;
    log::info!("wrote {}", path.display());
    Ok(true)
}
