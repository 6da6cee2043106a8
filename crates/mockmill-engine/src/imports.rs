//! Import coverage checks for the statically imported helpers.

use mockmill_host_api::{EditOp, EditScript, SourceModel};

pub(crate) const MOCKITO_CLASS: &str = "org.mockito.Mockito";
pub(crate) const UUID_CLASS: &str = "java.util.UUID";

/// Adds `import static org.mockito.Mockito.<member>;` for each member not
/// already covered by an on-demand or specific static import.
pub(crate) fn ensure_static_helpers<S: SourceModel>(
    source: &S,
    script: &mut EditScript,
    members: &[&str],
) {
    if source.has_static_on_demand_import(MOCKITO_CLASS) {
        return;
    }
    for member in members {
        if !source.has_static_member_import(MOCKITO_CLASS, member) {
            script.push(EditOp::AddStaticImport {
                class_fqn: MOCKITO_CLASS.to_string(),
                member: member.to_string(),
            });
        }
    }
}

/// Adds `import <class>;` unless the class or its package is already
/// imported.
pub(crate) fn ensure_class_import<S: SourceModel>(
    source: &S,
    script: &mut EditScript,
    class_fqn: &str,
) {
    let package = class_fqn.rsplit_once('.').map(|(p, _)| p).unwrap_or("");
    if source.has_import(class_fqn) {
        return;
    }
    if !package.is_empty() && source.has_on_demand_import(package) {
        return;
    }
    script.push(EditOp::AddImport {
        class_fqn: class_fqn.to_string(),
    });
}
