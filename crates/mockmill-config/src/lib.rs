//! Rule configuration for mockmill
//!
//! Holds the type → mock-expression rule store, its built-in defaults and
//! TOML persistence, the validation applied at settings-commit time, and the
//! editor protocol the host's settings surface drives. The store is plain
//! owned state: hosts construct it at startup and pass `&`/`&mut`
//! references down; there is no ambient singleton.

pub mod editor;
pub mod error;
pub mod logging;
pub mod store;
pub mod validation;

pub use editor::RuleSetEditor;
pub use error::{ConfigError, ConfigResult};
pub use store::{default_rules, is_primitive, MockRule, MockRuleStore, PRIMITIVE_TYPES};
pub use validation::validate_rules;

/// Conventional file name for the persisted rule document.
pub const SETTINGS_FILE_NAME: &str = "mockmill.toml";
