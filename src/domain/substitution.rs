use std::fmt;

use regex::Regex;

use crate::config::VersionConfig;
use crate::domain::VersionTag;

/// Value bound to a placeholder token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(u64),
    Text(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
        }
    }
}

/// Wraps a placeholder name in template delimiters: `NAME` -> `${NAME}`
pub fn token(name: &str) -> String {
    format!("${{{}}}", name)
}

/// Placeholder names derived from the version configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens {
    pub major: String,
    pub minor: String,
    pub patch: String,
    pub tweak: String,
    pub version: String,
    pub full_str: String,
    pub build_type: String,
    pub name: String,
}

impl Tokens {
    pub fn new(config: &VersionConfig) -> Self {
        let prefix = &config.token_prefix;
        Tokens {
            major: token(&format!("{}_VERSION_MAJOR", prefix)),
            minor: token(&format!("{}_VERSION_MINOR", prefix)),
            patch: token(&format!("{}_VERSION_PATCH", prefix)),
            tweak: token(&format!("{}_VERSION_TWEAK", prefix)),
            version: token(&format!("{}_VERSION", prefix)),
            full_str: token(&format!("{}_VERSION_FULL_STR", prefix)),
            build_type: token(&config.build_type_token),
            name: token(&format!("{}_NAME", prefix)),
        }
    }
}

/// Ordered mapping from placeholder token to value.
///
/// Numeric slots come first so that version components can fill them
/// positionally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionTable {
    entries: Vec<(String, Value)>,
}

impl SubstitutionTable {
    /// Builds the table for a parsed version.
    pub fn for_version(tag: &VersionTag, build_type: &str, config: &VersionConfig) -> Self {
        let tokens = Tokens::new(config);
        let mut table = SubstitutionTable {
            entries: vec![
                (tokens.major, Value::Int(0)),
                (tokens.minor, Value::Int(0)),
                (tokens.patch, Value::Int(0)),
                (tokens.tweak, Value::Int(tag.tweak)),
                (tokens.version, Value::Text(tag.as_str().to_string())),
                (
                    tokens.full_str,
                    Value::Text(tag.display_string(&config.product_name)),
                ),
                (tokens.build_type, Value::Text(build_type.trim().to_string())),
                (tokens.name, Value::Text(config.product_name.clone())),
            ],
        };
        table.fill_numeric(tag.components());
        table
    }

    /// Overwrites the leading entries with `components`, one slot each.
    fn fill_numeric(&mut self, components: &[u64]) {
        for (entry, component) in self.entries.iter_mut().zip(components) {
            entry.1 = Value::Int(*component);
        }
    }

    pub fn get(&self, token: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(key, _)| key == token)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replaces every token literally with its value.
    pub fn render(&self, template: &str) -> String {
        self.entries
            .iter()
            .fold(template.to_string(), |text, (key, value)| {
                text.replace(key.as_str(), &value.to_string())
            })
    }
}

/// Placeholders with the given prefix still present in `rendered`.
pub fn unresolved_placeholders(rendered: &str, prefix: &str) -> Vec<String> {
    let pattern = format!(r"\$\{{{}_[A-Za-z0-9_]*\}}", regex::escape(prefix));
    let Ok(re) = Regex::new(&pattern) else {
        return Vec::new();
    };

    let mut found: Vec<String> = re
        .find_iter(rendered)
        .map(|m| m.as_str().to_string())
        .collect();
    found.sort();
    found.dedup();
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(version: &str) -> SubstitutionTable {
        let tag = VersionTag::parse(version).unwrap();
        SubstitutionTable::for_version(&tag, "release", &VersionConfig::default())
    }

    #[test]
    fn test_token_delimiters() {
        assert_eq!(token("FOO"), "${FOO}");
    }

    #[test]
    fn test_components_fill_numeric_slots() {
        let table = table("v1.2-5");
        assert_eq!(table.get("${TAISEI_VERSION_MAJOR}"), Some(&Value::Int(1)));
        assert_eq!(table.get("${TAISEI_VERSION_MINOR}"), Some(&Value::Int(2)));
        assert_eq!(table.get("${TAISEI_VERSION_PATCH}"), Some(&Value::Int(0)));
        assert_eq!(table.get("${TAISEI_VERSION_TWEAK}"), Some(&Value::Int(5)));
    }

    #[test]
    fn test_text_entries() {
        let table = table("v1.2.3-4-extra");
        assert_eq!(
            table.get("${TAISEI_VERSION}"),
            Some(&Value::Text("1.2.3-4-extra".to_string()))
        );
        assert_eq!(
            table.get("${TAISEI_VERSION_FULL_STR}"),
            Some(&Value::Text("Taisei v1.2.3-4-extra".to_string()))
        );
        assert_eq!(
            table.get("${MESON_BUILD_TYPE}"),
            Some(&Value::Text("release".to_string()))
        );
        assert_eq!(
            table.get("${TAISEI_NAME}"),
            Some(&Value::Text("Taisei".to_string()))
        );
    }

    #[test]
    fn test_order_is_positional() {
        let table = table("1");
        let keys: Vec<&str> = table.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "${TAISEI_VERSION_MAJOR}",
                "${TAISEI_VERSION_MINOR}",
                "${TAISEI_VERSION_PATCH}",
                "${TAISEI_VERSION_TWEAK}",
                "${TAISEI_VERSION}",
                "${TAISEI_VERSION_FULL_STR}",
                "${MESON_BUILD_TYPE}",
                "${TAISEI_NAME}",
            ]
        );
    }

    #[test]
    fn test_render_replaces_every_occurrence() {
        let rendered = table("2.1")
            .render("${TAISEI_VERSION_MAJOR}.${TAISEI_VERSION_MINOR} ${TAISEI_VERSION_MAJOR}");
        assert_eq!(rendered, "2.1 2");
    }

    #[test]
    fn test_render_is_literal() {
        let rendered = table("1").render("$1 ${TAISEI_VERSION} .* ${OTHER}");
        assert_eq!(rendered, "$1 1 .* ${OTHER}");
    }

    #[test]
    fn test_custom_prefix() {
        let config = VersionConfig {
            product_name: "Demo".to_string(),
            token_prefix: "DEMO".to_string(),
            ..VersionConfig::default()
        };
        let tag = VersionTag::parse("3.0").unwrap();
        let table = SubstitutionTable::for_version(&tag, "debug", &config);
        assert_eq!(table.render("${DEMO_VERSION_FULL_STR}"), "Demo v3.0");
    }

    #[test]
    fn test_unresolved_placeholders() {
        let found = unresolved_placeholders(
            "${TAISEI_UNKNOWN} ${OTHER} ${TAISEI_UNKNOWN} ${TAISEI_X}",
            "TAISEI",
        );
        assert_eq!(found, vec!["${TAISEI_UNKNOWN}", "${TAISEI_X}"]);
        assert!(unresolved_placeholders("plain text", "TAISEI").is_empty());
    }
}
