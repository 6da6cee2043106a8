//! Stepwise stub synthesis for a validated call chain.
//!
//! Statements come out inner to outer, so every stub's qualifier mock
//! already exists when referenced. The generator never mutates its inputs;
//! it returns the full ordered statement-text list for the driver to hand
//! to the host.

use crate::chain::{CallLink, Chain};
use crate::error::TransformError;
use crate::naming::{suggest_name, NameRequest, NameTable};
use mockmill_config::MockRuleStore;

/// Expression used when no rule covers a type.
pub const GENERIC_MOCK_EXPRESSION: &str = "mock()";

/// Produces the ordered statement texts replacing `<target> = <chain>;`.
///
/// For an n-link chain exactly 2n statements come back: per link, a
/// declaration binding a mock of the link's result type, then a stub making
/// the link's call return that mock. The final pair binds the target
/// variable itself.
pub fn generate_scaffold(
    chain: &Chain,
    target_name: &str,
    target_type_canonical: &str,
    rules: &MockRuleStore,
    names: &mut NameTable,
) -> Result<Vec<String>, TransformError> {
    let links = chain.links();
    if links.len() < 2 {
        return Err(TransformError::ChainTooShort { links: links.len() });
    }

    let mut statements = Vec::with_capacity(2 * links.len());
    let mut previous_mock_name: Option<String> = None;

    for (index, link) in links[..links.len() - 1].iter().enumerate() {
        let result_type = link
            .result_type
            .as_ref()
            .ok_or_else(|| TransformError::unresolved_type(&link.text))?;

        let mock_name = suggest_name(
            &NameRequest {
                index,
                link,
                result_type,
                target_name,
                previous_mock_name: previous_mock_name.as_deref(),
            },
            names,
        );
        names.insert(mock_name.clone());

        // The innermost call still references its real qualifier; every
        // later call's qualifier has been replaced by a mock by the time
        // its stub runs.
        let call_text = match (index, previous_mock_name.as_deref()) {
            (0, _) => link.text.clone(),
            (_, Some(previous)) => rewrite_qualifier(link, previous),
            (_, None) => return Err(TransformError::missing_qualifier_mock(&link.text)),
        };

        statements.push(format!(
            "{} {} = {};",
            result_type.canonical,
            mock_name,
            resolve_mock_expression(rules, &result_type.canonical)
        ));
        statements.push(format!("when({call_text})\n.thenReturn({mock_name});"));

        previous_mock_name = Some(mock_name);
    }

    let final_link = chain.last();
    let previous = previous_mock_name
        .as_deref()
        .ok_or_else(|| TransformError::missing_qualifier_mock(&final_link.text))?;
    let final_call = rewrite_qualifier(final_link, previous);

    statements.push(format!(
        "{} {} = {};",
        target_type_canonical,
        target_name,
        resolve_mock_expression(rules, target_type_canonical)
    ));
    statements.push(format!("when({final_call})\n.thenReturn({target_name});"));

    Ok(statements)
}

/// `<qualifier>.method(args)` with the real qualifier replaced; falls back
/// to the original call text when the method name is unresolvable.
fn rewrite_qualifier(link: &CallLink, qualifier: &str) -> String {
    if link.method_name.is_empty() {
        link.text.clone()
    } else {
        format!("{qualifier}.{}{}", link.method_name, link.argument_list)
    }
}

fn resolve_mock_expression(rules: &MockRuleStore, type_canonical: &str) -> String {
    rules
        .resolve_expression(type_canonical)
        .unwrap_or_else(|| GENERIC_MOCK_EXPRESSION.to_string())
}
