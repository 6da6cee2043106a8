//! Mock-variable name synthesis.
//!
//! Names read as a narrative of the chain (`repositoryFindUser`,
//! `userGetProfile`) rather than opaque temporaries. Synthesis is a pure
//! function over an immutable name table; the caller inserts each accepted
//! name before the next link is named.

use crate::chain::CallLink;
use mockmill_host_api::{Qualifier, TypeRef};
use std::collections::BTreeSet;

/// Name used when neither the qualifier nor the type yields anything.
pub const FALLBACK_NAME: &str = "mockedValue";

/// Identifiers already bound in the enclosing scope, grown monotonically as
/// generated names are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameTable {
    names: BTreeSet<String>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_names<I>(names: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            names: names.into_iter().collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Inputs for naming one link's mock variable.
#[derive(Debug)]
pub struct NameRequest<'a> {
    /// Position of the link in the chain, 0 innermost.
    pub index: usize,
    pub link: &'a CallLink,
    /// The link's result type.
    pub result_type: &'a TypeRef,
    /// Name of the variable the whole chain is assigned to.
    pub target_name: &'a str,
    /// Name chosen for the previous link's mock, absent at index 0.
    pub previous_mock_name: Option<&'a str>,
}

/// Suggests a unique, readable identifier for a link's mock variable.
pub fn suggest_name(request: &NameRequest<'_>, used: &NameTable) -> String {
    let method_name = request.link.method_name.as_str();
    let simple_type = request.result_type.simple.as_str();

    let base = if request.index == 0 && simple_type == "Optional" {
        format!("{}Optional", request.target_name)
    } else if request.index == 0 {
        let qualifier_name = match &request.link.qualifier {
            Qualifier::Reference(name) if !name.trim().is_empty() => Some(name.as_str()),
            _ => None,
        };
        match qualifier_name {
            Some(qualifier) if !method_name.trim().is_empty() => {
                format!("{qualifier}{}", capitalize(method_name))
            }
            _ => decapitalize_type(simple_type),
        }
    } else {
        let previous = request.previous_mock_name.unwrap_or(FALLBACK_NAME);
        if method_name.trim().is_empty() {
            previous.to_string()
        } else {
            format!("{previous}{}", capitalize(method_name))
        }
    };

    disambiguate(base, request.target_name, used)
}

/// Appends increasing integer suffixes until the candidate collides with
/// neither the target name nor any used name.
fn disambiguate(base: String, target_name: &str, used: &NameTable) -> String {
    if !used.contains(&base) && base != target_name {
        return base;
    }
    let mut suffix: usize = 1;
    loop {
        let candidate = format!("{base}{suffix}");
        if !used.contains(&candidate) && candidate != target_name {
            return candidate;
        }
        suffix += 1;
    }
}

fn decapitalize_type(type_name: &str) -> String {
    if type_name.trim().is_empty() {
        return FALLBACK_NAME.to_string();
    }
    decapitalize(type_name)
}

pub(crate) fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

pub(crate) fn decapitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockmill_host_api::{ExpressionId, Qualifier};

    fn link(method: &str, qualifier: Qualifier) -> CallLink {
        CallLink {
            expression: ExpressionId(0),
            method_name: method.to_string(),
            argument_list: "()".to_string(),
            qualifier,
            text: format!("x.{method}()"),
            result_type: None,
        }
    }

    fn request<'a>(
        index: usize,
        link: &'a CallLink,
        result_type: &'a TypeRef,
        previous: Option<&'a str>,
    ) -> NameRequest<'a> {
        NameRequest {
            index,
            link,
            result_type,
            target_name: "result",
            previous_mock_name: previous,
        }
    }

    #[test]
    fn test_first_link_combines_qualifier_and_method() {
        let link = link("findUser", Qualifier::Reference("repository".to_string()));
        let ty = TypeRef::new("com.acme.User", "User");
        let name = suggest_name(&request(0, &link, &ty, None), &NameTable::new());
        assert_eq!(name, "repositoryFindUser");
    }

    #[test]
    fn test_first_link_optional_uses_target_name() {
        let link = link("findUser", Qualifier::Reference("repository".to_string()));
        let ty = TypeRef::new("java.util.Optional<com.acme.User>", "Optional");
        let name = suggest_name(&request(0, &link, &ty, None), &NameTable::new());
        assert_eq!(name, "resultOptional");
    }

    #[test]
    fn test_first_link_without_reference_qualifier_uses_type_name() {
        let link = link("findUser", Qualifier::Other);
        let ty = TypeRef::new("com.acme.User", "User");
        let name = suggest_name(&request(0, &link, &ty, None), &NameTable::new());
        assert_eq!(name, "user");
    }

    #[test]
    fn test_first_link_with_empty_type_falls_back() {
        let link = link("findUser", Qualifier::Other);
        let ty = TypeRef::new("", "");
        let name = suggest_name(&request(0, &link, &ty, None), &NameTable::new());
        assert_eq!(name, FALLBACK_NAME);
    }

    #[test]
    fn test_later_link_extends_previous_name() {
        let link = link("getProfile", Qualifier::Call(ExpressionId(0)));
        let ty = TypeRef::new("com.acme.Profile", "Profile");
        let name = suggest_name(
            &request(1, &link, &ty, Some("repositoryFindUser")),
            &NameTable::new(),
        );
        assert_eq!(name, "repositoryFindUserGetProfile");
    }

    #[test]
    fn test_later_link_with_blank_method_reuses_previous() {
        let link = link("", Qualifier::Call(ExpressionId(0)));
        let ty = TypeRef::new("com.acme.Profile", "Profile");
        let name = suggest_name(&request(1, &link, &ty, Some("userMock")), &NameTable::new());
        assert_eq!(name, "userMock");
    }

    #[test]
    fn test_collision_appends_increasing_suffix() {
        let link = link("findUser", Qualifier::Reference("repository".to_string()));
        let ty = TypeRef::new("com.acme.User", "User");
        let used = NameTable::from_names([
            "repositoryFindUser".to_string(),
            "repositoryFindUser1".to_string(),
        ]);
        let name = suggest_name(&request(0, &link, &ty, None), &used);
        assert_eq!(name, "repositoryFindUser2");
    }

    #[test]
    fn test_candidate_never_equals_target_name() {
        let link = link("findUser", Qualifier::Reference("repository".to_string()));
        let ty = TypeRef::new("com.acme.User", "User");
        let req = NameRequest {
            index: 0,
            link: &link,
            result_type: &ty,
            target_name: "repositoryFindUser",
            previous_mock_name: None,
        };
        let name = suggest_name(&req, &NameTable::new());
        assert_eq!(name, "repositoryFindUser1");
    }

    #[test]
    fn test_suggestion_is_deterministic() {
        let link = link("findUser", Qualifier::Reference("repository".to_string()));
        let ty = TypeRef::new("com.acme.User", "User");
        let used = NameTable::from_names(["repositoryFindUser".to_string()]);
        let first = suggest_name(&request(0, &link, &ty, None), &used);
        let second = suggest_name(&request(0, &link, &ty, None), &used);
        assert_eq!(first, second);
    }
}
