//! License header stamping.
//!
//! Rewrites the prologue of every C source under the configured source
//! directory to the canonical header:
//!
//! ```text
//! [#if 0 ... #endif]      preserved
//! /* license */
//! [#pragma once]          preserved, up to two
//! #include "..."
//!
//! <body>
//! ```

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use walkdir::WalkDir;

use crate::config::HeaderConfig;
use crate::domain::prologue::{Prologue, PRAGMA_ONCE};
use crate::error::Result;

/// Outcome of stamping a source tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StampSummary {
    /// Number of source files examined
    pub scanned: usize,
    /// Files whose content changed (or would change, in a dry run)
    pub changed: Vec<PathBuf>,
}

/// Whether `path` names a source file handled by the stamper.
pub fn is_source_file(path: &Path, config: &HeaderConfig) -> bool {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return false;
    };
    let name = if config.template_suffix.is_empty() {
        name
    } else {
        name.strip_suffix(&format!(".{}", config.template_suffix))
            .unwrap_or(name)
    };

    config
        .extensions
        .iter()
        .filter(|ext| !ext.is_empty())
        .any(|ext| {
            name.strip_suffix(ext.as_str())
                .and_then(|stem| stem.strip_suffix('.'))
                .is_some_and(|stem| !stem.is_empty())
        })
}

/// Recursively lists the source files under `<root>/<source_dir>`, sorted by name.
pub fn discover_sources(root: &Path, config: &HeaderConfig) -> Result<Vec<PathBuf>> {
    let source_dir = root.join(&config.source_dir);
    let mut files = Vec::new();

    for entry in WalkDir::new(&source_dir).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file() && is_source_file(entry.path(), config) {
            files.push(entry.into_path());
        }
    }

    log::debug!(
        "found {} source files under {}",
        files.len(),
        source_dir.display()
    );
    Ok(files)
}

/// Replaces the prologue of `text` with the canonical header.
pub fn stamp_text(text: &str, config: &HeaderConfig) -> String {
    let prologue = Prologue::parse(text, &config.include);
    let body = prologue.body(text);

    let mut out = String::with_capacity(config.license.len() + text.len() + 64);
    if let Some(block) = prologue.if_zero {
        out.push_str(block);
    }
    out.push_str(&config.license);
    out.push('\n');
    for _ in &prologue.pragmas {
        out.push('\n');
        out.push_str(PRAGMA_ONCE);
    }
    out.push('\n');
    out.push_str(&config.include);
    out.push_str("\n\n");
    out.push_str(body);
    out
}

/// Stamps one file in place.
///
/// The file is only rewritten when its content changes; the new content is
/// written to a sibling temporary file and renamed over the original.
///
/// # Returns
/// * `Ok(true)` - The file changed (or would change, when `dry_run` is set)
/// * `Ok(false)` - The file already carries the canonical header
pub fn stamp_file(path: &Path, config: &HeaderConfig, dry_run: bool) -> Result<bool> {
    let original = fs::read_to_string(path)?;
    let stamped = stamp_text(&original, config);

    if stamped == original {
        return Ok(false);
    }
    if dry_run {
        log::info!("would update {}", path.display());
        return Ok(true);
    }

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(stamped.as_bytes())?;
    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(tmp.path(), metadata.permissions())?;
    }
    tmp.persist(path).map_err(|e| e.error)?;

    log::info!("updated {}", path.display());
    Ok(true)
}

/// Stamps every source file under `root`.
pub fn stamp_tree(root: &Path, config: &HeaderConfig, dry_run: bool) -> Result<StampSummary> {
    let files = discover_sources(root, config)?;
    let mut summary = StampSummary {
        scanned: files.len(),
        changed: Vec::new(),
    };

    for path in files {
        if stamp_file(&path, config, dry_run)? {
            summary.changed.push(path);
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> HeaderConfig {
        HeaderConfig {
            license: "/*\n * License\n */".to_string(),
            include: "#include \"app.h\"".to_string(),
            ..HeaderConfig::default()
        }
    }

    #[test]
    fn test_stamp_bare_file() {
        let out = stamp_text("int x;\n", &config());
        assert_eq!(out, "/*\n * License\n */\n\n#include \"app.h\"\n\nint x;\n");
    }

    #[test]
    fn test_stamp_replaces_old_header_and_keeps_pragma() {
        let text = "/* old license */\n\n#pragma once\n#include \"app.h\"\n\nint x;\n";
        let out = stamp_text(text, &config());
        assert_eq!(
            out,
            "/*\n * License\n */\n\n#pragma once\n#include \"app.h\"\n\nint x;\n"
        );
    }

    #[test]
    fn test_stamp_keeps_if_zero_block() {
        let text = "#if 0\nbuild notes\n#endif\n/* old */\nint x;\n";
        let out = stamp_text(text, &config());
        assert!(out.starts_with("#if 0\nbuild notes\n#endif\n/*\n * License\n */\n"));
        assert!(out.ends_with("#include \"app.h\"\n\nint x;\n"));
    }

    #[test]
    fn test_stamp_two_pragmas() {
        let text = "/* c */\n#pragma once\n#include \"app.h\"\n#pragma once\nint x;";
        let out = stamp_text(text, &config());
        assert_eq!(
            out,
            "/*\n * License\n */\n\n#pragma once\n#pragma once\n#include \"app.h\"\n\nint x;"
        );
    }

    #[test]
    fn test_stamp_is_idempotent() {
        let samples = [
            "",
            "int x;\n",
            "/* a */\n#pragma once\n#include \"app.h\"\n\nint x;\n",
            "#if 0\n#endif\n#pragma once\nint x;",
            "#pragma once\nstruct S;\n",
            "#include \"app.h\"\n#pragma once\n#pragma once\n#pragma once\nint x;",
            "/** doc */\n/* more */\nint x;",
            "  \n\n#if 0\nx\n#endif\n",
        ];

        for sample in samples {
            let once = stamp_text(sample, &config());
            let twice = stamp_text(&once, &config());
            assert_eq!(once, twice, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_is_source_file() {
        let config = config();
        assert!(is_source_file(Path::new("src/a.c"), &config));
        assert!(is_source_file(Path::new("src/a.h"), &config));
        assert!(is_source_file(Path::new("src/a.h.in"), &config));
        assert!(!is_source_file(Path::new("src/a.cpp"), &config));
        assert!(!is_source_file(Path::new("src/a.in"), &config));
        assert!(!is_source_file(Path::new("src/.c"), &config));
        assert!(!is_source_file(Path::new("src/meson.build"), &config));
    }
}
