//! Type → mock-expression rule store.
//!
//! Maps a type identifier (fully-qualified class name or primitive keyword)
//! to the expression that stands in for "a mocked value" of that type.
//! Built-in defaults cover the primitives and `java.lang.String`; user rules
//! may add to or override them, never silently the other way around.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// Java primitive type keywords recognized as rule types.
pub const PRIMITIVE_TYPES: [&str; 8] = [
    "boolean", "byte", "short", "int", "long", "float", "double", "char",
];

/// Whether a type identifier is one of the recognized primitive keywords.
pub fn is_primitive(type_name: &str) -> bool {
    PRIMITIVE_TYPES.contains(&type_name)
}

/// One (type, mock expression) mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockRule {
    /// Fully-qualified type name, or a primitive keyword.
    pub type_name: String,
    /// Expression producing a mock value of that type.
    pub expression: String,
}

impl MockRule {
    pub fn new(type_name: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            expression: expression.into(),
        }
    }
}

/// Built-in defaults: a fresh random value for strings, the zero value for
/// each primitive.
pub fn default_rules() -> Vec<MockRule> {
    vec![
        MockRule::new("java.lang.String", "UUID.randomUUID().toString()"),
        MockRule::new("boolean", "false"),
        MockRule::new("byte", "(byte) 0"),
        MockRule::new("short", "(short) 0"),
        MockRule::new("int", "0"),
        MockRule::new("long", "0L"),
        MockRule::new("float", "0.0f"),
        MockRule::new("double", "0.0d"),
        MockRule::new("char", "'\\u0000'"),
    ]
}

/// On-disk form of the rule list.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RuleDocument {
    #[serde(default)]
    rules: Vec<MockRule>,
}

/// Process-scoped, ordered rule set.
///
/// Mutated only through [`set_rules`](Self::set_rules) (the settings editor
/// validates first), read on every transform. Defaults are backfilled
/// lazily: a built-in is appended whenever no rule for its type is present,
/// so user overrides always win.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockRuleStore {
    rules: Vec<MockRule>,
}

impl Default for MockRuleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRuleStore {
    /// A store seeded with the built-in defaults.
    pub fn new() -> Self {
        Self {
            rules: default_rules(),
        }
    }

    /// A store holding exactly the given rules. Defaults missing from the
    /// list surface on the next [`rules`](Self::rules) call.
    pub fn from_rules(rules: Vec<MockRule>) -> Self {
        Self { rules }
    }

    /// Current rules, with any absent built-in default appended.
    pub fn rules(&mut self) -> &[MockRule] {
        self.ensure_defaults();
        &self.rules
    }

    /// Replaces the rule set verbatim. Callers validate first; see
    /// [`crate::validation::validate_rules`].
    pub fn set_rules(&mut self, rules: Vec<MockRule>) {
        self.rules = rules;
    }

    /// The expression of the first rule whose type matches exactly
    /// (case-sensitive, canonical form). `None` when no rule or default
    /// matches, or the matched expression is blank.
    pub fn resolve_expression(&self, type_name: &str) -> Option<String> {
        // A default applies only while no explicit rule shadows its type,
        // matching the lazy backfill order of `rules`.
        let expression = match self.rules.iter().find(|rule| rule.type_name == type_name) {
            Some(rule) => rule.expression.clone(),
            None => {
                default_rules()
                    .into_iter()
                    .find(|rule| rule.type_name == type_name)?
                    .expression
            }
        };
        if expression.trim().is_empty() {
            None
        } else {
            Some(expression)
        }
    }

    fn ensure_defaults(&mut self) {
        for default in default_rules() {
            if !self.rules.iter().any(|r| r.type_name == default.type_name) {
                self.rules.push(default);
            }
        }
    }

    /// Loads the rule document, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => match toml::from_str::<RuleDocument>(&text) {
                Ok(doc) => {
                    debug!(path = %path.display(), rules = doc.rules.len(), "Loaded mock rules");
                    Self::from_rules(doc.rules)
                }
                Err(error) => {
                    warn!(path = %path.display(), %error, "Malformed rule document, using defaults");
                    Self::new()
                }
            },
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Self::new(),
            Err(error) => {
                warn!(path = %path.display(), %error, "Failed to read rule document, using defaults");
                Self::new()
            }
        }
    }

    /// Saves the current rules as a TOML document.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let doc = RuleDocument {
            rules: self.rules.clone(),
        };
        let text = toml::to_string_pretty(&doc)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, text).map_err(ConfigError::Io)?;
        debug!(path = %path.display(), rules = self.rules.len(), "Saved mock rules");
        Ok(())
    }
}
