//! Settings-commit protocol for the rule table.
//!
//! The host's settings surface is a thin table over this editor: it mutates
//! draft rows freely, and [`apply`](RuleSetEditor::apply) is the only path
//! by which drafts reach the store and disk. Validation failures leave the
//! saved set untouched.

use crate::error::ConfigResult;
use crate::store::{MockRule, MockRuleStore};
use crate::validation::validate_rules;
use std::path::PathBuf;
use tracing::info;

/// Draft rule rows plus the commit protocol: trim, validate, replace,
/// persist.
pub struct RuleSetEditor<'a> {
    store: &'a mut MockRuleStore,
    settings_path: Option<PathBuf>,
    rows: Vec<MockRule>,
}

impl<'a> RuleSetEditor<'a> {
    /// Opens an editor over the store, seeded with the saved rules. When a
    /// settings path is given, a successful apply also writes the document.
    pub fn new(store: &'a mut MockRuleStore, settings_path: Option<PathBuf>) -> Self {
        let rows = store.rules().to_vec();
        Self {
            store,
            settings_path,
            rows,
        }
    }

    pub fn rows(&self) -> &[MockRule] {
        &self.rows
    }

    pub fn add_row(&mut self) {
        self.rows.push(MockRule::new("", ""));
    }

    pub fn remove_row(&mut self, index: usize) {
        if index < self.rows.len() {
            self.rows.remove(index);
        }
    }

    pub fn set_row(&mut self, index: usize, type_name: &str, expression: &str) {
        if let Some(row) = self.rows.get_mut(index) {
            row.type_name = type_name.to_string();
            row.expression = expression.to_string();
        }
    }

    /// Whether the drafts differ from the saved rules. Fully blank rows do
    /// not count as changes.
    pub fn is_modified(&mut self) -> bool {
        self.read_rows() != self.store.rules()
    }

    /// Commits the drafts: blank rows are dropped, the remainder validated,
    /// then the store is replaced and, when configured, persisted. On a
    /// validation error nothing is replaced or written.
    pub fn apply(&mut self) -> ConfigResult<()> {
        let rules = self.read_rows();
        validate_rules(&rules)?;
        info!(rules = rules.len(), "Applying mock rule settings");
        self.store.set_rules(rules);
        if let Some(path) = &self.settings_path {
            self.store.save(path)?;
        }
        Ok(())
    }

    /// Discards the drafts and reloads the saved rules.
    pub fn reset(&mut self) {
        self.rows = self.store.rules().to_vec();
    }

    /// Draft rows with cells trimmed and fully blank rows skipped, the form
    /// in which drafts are compared and committed.
    fn read_rows(&self) -> Vec<MockRule> {
        self.rows
            .iter()
            .map(|row| MockRule::new(row.type_name.trim(), row.expression.trim()))
            .filter(|row| !(row.type_name.is_empty() && row.expression.is_empty()))
            .collect()
    }
}
