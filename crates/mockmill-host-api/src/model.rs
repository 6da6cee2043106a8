//! Handle and view types for the host editor's source model.

use serde::{Deserialize, Serialize};

/// Opaque handle to a statement in the host editor's parse tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StatementId(pub u32);

/// Opaque handle to an expression in the host editor's parse tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExpressionId(pub u32);

/// A type as resolved by the host.
///
/// The host performs all type resolution; the engine only ever compares and
/// prints the two textual forms carried here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    /// Canonical form, e.g. `java.util.Optional<com.acme.User>`.
    pub canonical: String,
    /// Simple class name, e.g. `Optional`. Empty when the type has none
    /// (primitives resolve with their keyword as both forms).
    pub simple: String,
}

impl TypeRef {
    pub fn new(canonical: impl Into<String>, simple: impl Into<String>) -> Self {
        Self {
            canonical: canonical.into(),
            simple: simple.into(),
        }
    }

    /// A primitive type, whose canonical and simple names coincide.
    pub fn primitive(keyword: &str) -> Self {
        Self::new(keyword, keyword)
    }
}

/// Direct qualifier of a method call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Qualifier {
    /// The qualifier is itself a method call, as in `a.b().c()`.
    Call(ExpressionId),
    /// A plain reference such as a field or local variable, with its name.
    Reference(String),
    /// Anything else: constructor call, implicit receiver, no qualifier.
    Other,
}

/// Call-expression view of an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallShape {
    /// Resolved method name; empty when the host cannot resolve one.
    pub method_name: String,
    /// Argument list text including parentheses, e.g. `("key", 3)`.
    pub argument_list: String,
    /// The call's direct qualifier.
    pub qualifier: Qualifier,
    /// Full source text of the qualifier expression, when one is present.
    pub qualifier_text: Option<String>,
}

/// Local-variable view of a declaration statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalDeclaration {
    /// Declared variable name; `None` while the identifier is still missing
    /// (mid-edit source).
    pub name: Option<String>,
    /// The declared (left-hand side) type.
    pub declared_type: TypeRef,
    /// The initializer expression, if any.
    pub initializer: Option<ExpressionId>,
}
