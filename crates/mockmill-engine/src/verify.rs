//! Wrap a qualified call statement in `verify(...)`.
//!
//! `repository.save(user);` becomes `verify(repository)\n.save(user);`.
//! Pure text templating over the call shape, no chain machinery.

use crate::imports::ensure_static_helpers;
use mockmill_host_api::{CallShape, EditOp, EditScript, Qualifier, SourceModel, StatementId};

/// Resolves the caret's statement to a verifiable call: a bare expression
/// statement whose expression is a qualified call, not already wrapped.
fn resolve_target<S: SourceModel>(source: &S) -> Option<(StatementId, CallShape)> {
    let statement = source.caret_statement()?;
    let expression = source.expression_statement(statement)?;
    let shape = source.call_shape(expression)?;
    shape.qualifier_text.as_ref()?;
    if let Qualifier::Call(inner) = shape.qualifier {
        if let Some(inner_shape) = source.call_shape(inner) {
            if inner_shape.method_name == "verify" {
                return None;
            }
        }
    }
    Some((statement, shape))
}

/// Whether the verify action is offered at the caret.
pub fn verify_action_available<S: SourceModel>(source: &S) -> bool {
    resolve_target(source).is_some()
}

/// Edit script replacing `q.m(args);` with `verify(q)\n.m(args);`, adding
/// the static `verify` import when nothing covers it yet.
pub fn plan_verify_wrap<S: SourceModel>(source: &S) -> Option<EditScript> {
    let (statement, shape) = resolve_target(source)?;
    let qualifier = shape.qualifier_text.as_deref()?;
    if shape.method_name.is_empty() {
        return None;
    }

    let mut script = EditScript::new();
    ensure_static_helpers(source, &mut script, &["verify"]);
    script.push(EditOp::ReplaceStatement {
        statement,
        replacements: vec![format!(
            "verify({qualifier})\n.{}{};",
            shape.method_name, shape.argument_list
        )],
    });
    Some(script)
}
