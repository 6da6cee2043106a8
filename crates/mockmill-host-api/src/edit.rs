//! Edit plans handed back to the host editor.
//!
//! The engine never mutates source itself: every transform produces an
//! [`EditScript`] that the host applies as one grouped, undoable edit.

use crate::model::StatementId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One edit operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum EditOp {
    /// Replace a statement, as a unit, with an ordered sequence of
    /// statement texts.
    ReplaceStatement {
        statement: StatementId,
        replacements: Vec<String>,
    },
    /// Add `import <classFqn>;` to the containing file.
    AddImport { class_fqn: String },
    /// Add `import static <classFqn>.<member>;` to the containing file.
    AddStaticImport { class_fqn: String, member: String },
    /// Create a new source file. Hosts must refuse to overwrite an
    /// existing file.
    CreateFile { path: PathBuf, content: String },
}

/// Ordered edits produced by one transform invocation.
///
/// Application is all-or-nothing from the user's point of view: the host
/// groups the whole script into a single undo step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditScript {
    pub edits: Vec<EditOp>,
}

impl EditScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: EditOp) {
        self.edits.push(op);
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }
}
