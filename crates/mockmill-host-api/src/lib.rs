//! Host API for mockmill
//!
//! This crate defines the capability traits through which the engine consumes
//! the host code editor (parse-tree views, type resolution, import
//! inspection) and the edit plan types it hands back. The engine stays
//! implementable against any host editor model; nothing here parses source
//! or touches the filesystem.

pub mod edit;
pub mod model;

pub use edit::{EditOp, EditScript};
pub use model::{CallShape, ExpressionId, LocalDeclaration, Qualifier, StatementId, TypeRef};

use std::collections::BTreeSet;
use std::path::PathBuf;

/// Read-only view of the source file under the caret, as resolved by the
/// host editor.
///
/// All methods are synchronous: one transform invocation runs to completion
/// over an immutable snapshot of the source before any further edit is
/// accepted.
pub trait SourceModel {
    /// Candidate statements: every statement properly contained in the
    /// active selection, or the single statement containing the caret when
    /// there is no selection.
    fn selection_targets(&self) -> Vec<StatementId>;

    /// The statement containing the caret, ignoring any selection.
    fn caret_statement(&self) -> Option<StatementId>;

    /// Local variables declared by a statement, in declaration order.
    /// Empty when the statement is not a local-variable declaration.
    fn local_declarations(&self, statement: StatementId) -> Vec<LocalDeclaration>;

    /// The expression of a bare expression statement (`foo.bar();`).
    fn expression_statement(&self, statement: StatementId) -> Option<ExpressionId>;

    /// Call-expression view of an expression, when it is a method call.
    fn call_shape(&self, expression: ExpressionId) -> Option<CallShape>;

    /// Full source text of an expression.
    fn expression_text(&self, expression: ExpressionId) -> String;

    /// Resolved static type of an expression.
    fn type_of(&self, expression: ExpressionId) -> Option<TypeRef>;

    /// Whether the method a call resolves to is declared `static`.
    /// `false` when the call does not resolve.
    fn is_static_method(&self, call: ExpressionId) -> bool;

    /// Qualified name of the class containing the method a call resolves
    /// to, when resolution succeeds.
    fn resolved_method_class(&self, call: ExpressionId) -> Option<String>;

    /// Names already bound in the scope enclosing a statement.
    fn existing_local_names(&self, statement: StatementId) -> BTreeSet<String>;

    /// Start offset of a statement in its file. Used only for apply
    /// ordering; the engine never interprets the value.
    fn statement_offset(&self, statement: StatementId) -> usize;

    /// Whether the file imports the given class specifically
    /// (`import java.util.UUID;`).
    fn has_import(&self, class_fqn: &str) -> bool;

    /// Whether the file has an on-demand import of the given package
    /// (`import java.util.*;`).
    fn has_on_demand_import(&self, package_fqn: &str) -> bool;

    /// Whether the file has a static on-demand import of the given class
    /// (`import static org.mockito.Mockito.*;`).
    fn has_static_on_demand_import(&self, class_fqn: &str) -> bool;

    /// Whether the file has a static import of one specific member
    /// (`import static org.mockito.Mockito.when;`).
    fn has_static_member_import(&self, class_fqn: &str, member: &str) -> bool;

    /// Test source roots of the containing module, preferred first.
    fn test_source_roots(&self) -> Vec<PathBuf>;
}
