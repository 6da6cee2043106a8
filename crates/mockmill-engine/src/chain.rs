//! Call-chain extraction.
//!
//! A fluent initializer like `repository.findUser(id).getProfile().getName()`
//! is a singly linked structure: each call's qualifier is its predecessor.
//! The walk discovers it outer→inner and one reverse pass yields evaluation
//! order, index 0 innermost.

use mockmill_host_api::{CallShape, ExpressionId, Qualifier, SourceModel, TypeRef};

/// One call in a qualifier chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallLink {
    /// Handle of the call expression.
    pub expression: ExpressionId,
    /// Resolved method name; empty when the host cannot resolve one.
    pub method_name: String,
    /// Argument list text, parentheses included.
    pub argument_list: String,
    /// The call's direct qualifier.
    pub qualifier: Qualifier,
    /// Full source text of the call.
    pub text: String,
    /// Resolved result type. Absent only for the last link.
    pub result_type: Option<TypeRef>,
}

/// Ordered, non-empty qualifier chain; index 0 is evaluated first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    links: Vec<CallLink>,
}

impl Chain {
    pub fn links(&self) -> &[CallLink] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// The outermost link, whose value the target variable receives.
    pub fn last(&self) -> &CallLink {
        // Construction rejects chains shorter than two links.
        &self.links[self.links.len() - 1]
    }
}

/// Walks the qualifier chain of `root_call` and validates it for multi-step
/// decomposition.
///
/// Leading static-qualified calls are stripped: `Factory.create()` merely
/// constructs the starting value, so mocking begins at the first instance
/// call. Returns `None` (the action is simply not applicable) when fewer
/// than two links remain after stripping, or when a link other than the
/// last has no resolvable result type.
pub fn extract_chain<S: SourceModel>(source: &S, root_call: ExpressionId) -> Option<Chain> {
    let mut discovered: Vec<(ExpressionId, CallShape)> = Vec::new();
    let mut current = root_call;
    loop {
        let shape = source.call_shape(current)?;
        let next = match &shape.qualifier {
            Qualifier::Call(inner) => Some(*inner),
            _ => None,
        };
        discovered.push((current, shape));
        match next {
            Some(inner) => current = inner,
            None => break,
        }
    }
    discovered.reverse();

    let mut from = 0;
    while discovered.len() - from > 1 && source.is_static_method(discovered[from].0) {
        from += 1;
    }

    let links: Vec<CallLink> = discovered[from..]
        .iter()
        .map(|(expression, shape)| CallLink {
            expression: *expression,
            method_name: shape.method_name.clone(),
            argument_list: shape.argument_list.clone(),
            qualifier: shape.qualifier.clone(),
            text: source.expression_text(*expression),
            result_type: source.type_of(*expression),
        })
        .collect();

    if links.len() < 2 {
        return None;
    }
    if links[..links.len() - 1]
        .iter()
        .any(|link| link.result_type.is_none())
    {
        return None;
    }
    Some(Chain { links })
}
