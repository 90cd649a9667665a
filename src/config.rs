use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{BuildstampError, Result};

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "buildstamp.toml";

/// Represents the complete configuration for buildstamp.
///
/// Contains the header stamping settings and the version rendering settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub header: HeaderConfig,

    #[serde(default)]
    pub version: VersionConfig,
}

fn default_source_dir() -> String {
    "src".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["c".to_string(), "h".to_string()]
}

fn default_template_suffix() -> String {
    "in".to_string()
}

/// Returns the canonical license header.
fn default_license() -> String {
    "/*
 * This software is licensed under the terms of the MIT-License
 * See COPYING for further information.
 * ---
 * Copyright (c) 2011-2017, Lukas Weber <laochailan@web.de>.
 * Copyright (c) 2012-2017, Andrei Alexeyev <akari@alienslab.net>.
 */"
    .to_string()
}

fn default_include() -> String {
    "#include \"taisei.h\"".to_string()
}

/// Configuration for license header stamping.
///
/// `license` must be exactly one block comment; it is what the stamper
/// recognizes as an existing header on later runs.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct HeaderConfig {
    /// Directory scanned for sources, relative to the project root
    #[serde(default = "default_source_dir")]
    pub source_dir: String,

    /// Source file extensions, without the leading dot
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Suffix of templated sources (`foo.h.in`)
    #[serde(default = "default_template_suffix")]
    pub template_suffix: String,

    #[serde(default = "default_license")]
    pub license: String,

    /// Include directive emitted right after the header
    #[serde(default = "default_include")]
    pub include: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        HeaderConfig {
            source_dir: default_source_dir(),
            extensions: default_extensions(),
            template_suffix: default_template_suffix(),
            license: default_license(),
            include: default_include(),
        }
    }
}

fn default_product_name() -> String {
    "Taisei".to_string()
}

fn default_token_prefix() -> String {
    "TAISEI".to_string()
}

fn default_build_type_token() -> String {
    "MESON_BUILD_TYPE".to_string()
}

fn default_tag_pattern() -> String {
    "v[0-9]*[!asz]".to_string()
}

/// Configuration for version template rendering.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VersionConfig {
    /// Product name used in the full display string
    #[serde(default = "default_product_name")]
    pub product_name: String,

    /// Prefix of the version placeholders (`${TAISEI_VERSION_MAJOR}`)
    #[serde(default = "default_token_prefix")]
    pub token_prefix: String,

    /// Name of the build type placeholder, without delimiters
    #[serde(default = "default_build_type_token")]
    pub build_type_token: String,

    /// Glob passed to the tag lookup
    #[serde(default = "default_tag_pattern")]
    pub tag_pattern: String,
}

impl Default for VersionConfig {
    fn default() -> Self {
        VersionConfig {
            product_name: default_product_name(),
            token_prefix: default_token_prefix(),
            build_type_token: default_build_type_token(),
            tag_pattern: default_tag_pattern(),
        }
    }
}

impl Config {
    /// Checks the settings that the tools rely on for correctness.
    pub fn validate(&self) -> Result<()> {
        let license = self.header.license.trim();
        if !license.starts_with("/*") || !license.ends_with("*/") {
            return Err(BuildstampError::config(
                "header.license must be a single /* ... */ block comment",
            ));
        }
        if license.matches("*/").count() != 1 {
            return Err(BuildstampError::config(
                "header.license must not contain nested comment terminators",
            ));
        }
        if self.header.include.trim().is_empty() {
            return Err(BuildstampError::config("header.include must not be empty"));
        }
        if self.header.extensions.iter().all(|ext| ext.is_empty()) {
            return Err(BuildstampError::config(
                "header.extensions must list at least one extension",
            ));
        }
        if self.version.product_name.trim().is_empty() {
            return Err(BuildstampError::config(
                "version.product_name must not be empty",
            ));
        }
        if self.version.token_prefix.trim().is_empty() {
            return Err(BuildstampError::config(
                "version.token_prefix must not be empty",
            ));
        }
        if self.version.tag_pattern.trim().is_empty() {
            return Err(BuildstampError::config(
                "version.tag_pattern must not be empty",
            ));
        }
        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `buildstamp.toml` in current directory
/// 3. `.buildstamp.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// The loaded configuration is validated before it is returned.
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    config.validate()?;
    log::debug!("loaded configuration: {:?}", config);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
[version]
product_name = "Demo"
"#,
        )
        .unwrap();
        assert_eq!(config.version.product_name, "Demo");
        assert_eq!(config.version.token_prefix, "TAISEI");
        assert_eq!(config.header, HeaderConfig::default());
    }

    #[test]
    fn test_rejects_license_without_comment() {
        let mut config = Config::default();
        config.header.license = "// MIT".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_license_with_two_comments() {
        let mut config = Config::default();
        config.header.license = "/* a */ /* b */".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_prefix() {
        let mut config = Config::default();
        config.version.token_prefix = " ".to_string();
        assert!(config.validate().is_err());
    }
}
