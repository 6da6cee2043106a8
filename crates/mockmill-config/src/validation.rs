//! Rule validation, applied at settings-commit time.

use crate::error::{ConfigError, ConfigResult};
use crate::store::{is_primitive, MockRule};
use std::collections::BTreeSet;

/// Validates a rule list before it replaces the saved set.
///
/// Every rule needs a non-blank type that is either a primitive keyword or
/// looks fully-qualified, a non-blank expression, and a type no other rule
/// in the list claims. The first violation fails the whole commit.
pub fn validate_rules(rules: &[MockRule]) -> ConfigResult<()> {
    let mut seen = BTreeSet::new();
    for rule in rules {
        if rule.type_name.trim().is_empty() {
            return Err(ConfigError::BlankType);
        }
        if !rule.type_name.contains('.') && !is_primitive(&rule.type_name) {
            return Err(ConfigError::malformed_type(&rule.type_name));
        }
        if rule.expression.trim().is_empty() {
            return Err(ConfigError::blank_expression(&rule.type_name));
        }
        if !seen.insert(rule.type_name.as_str()) {
            return Err(ConfigError::duplicate_type(&rule.type_name));
        }
    }
    Ok(())
}
