//! Transform driver: candidate selection, availability, and edit planning
//! for the two stub actions.
//!
//! Candidates are processed from the highest source offset to the lowest,
//! so earlier replacements never invalidate the positions of statements
//! still pending. Each candidate is replaced as a unit; a candidate that
//! fails mid-generation is skipped and the rest proceed.

use crate::chain::{extract_chain, Chain};
use crate::error::TransformError;
use crate::imports::{ensure_class_import, ensure_static_helpers, MOCKITO_CLASS, UUID_CLASS};
use crate::naming::NameTable;
use crate::scaffold::{generate_scaffold, GENERIC_MOCK_EXPRESSION};
use mockmill_config::MockRuleStore;
use mockmill_host_api::{
    EditOp, EditScript, ExpressionId, LocalDeclaration, SourceModel, StatementId, TypeRef,
};
use tracing::{debug, warn};

/// Plans the "decompose chain into stepwise stubs" and "stub single
/// declaration" editor actions over one immutable source snapshot.
///
/// The rule store is an explicit dependency; the driver holds shared
/// references only and never mutates either collaborator.
pub struct TransformDriver<'a, S: SourceModel> {
    source: &'a S,
    rules: &'a MockRuleStore,
}

struct ChainCandidate {
    statement: StatementId,
    target_name: String,
    target_type: TypeRef,
    chain: Chain,
}

struct StubCandidate {
    statement: StatementId,
    target_name: String,
    target_type: TypeRef,
    initializer_text: String,
}

impl<'a, S: SourceModel> TransformDriver<'a, S> {
    pub fn new(source: &'a S, rules: &'a MockRuleStore) -> Self {
        Self { source, rules }
    }

    /// Whether the chain action is offered: at least one candidate, and
    /// every candidate decomposable.
    pub fn chain_action_available(&self) -> bool {
        let targets = self.source.selection_targets();
        !targets.is_empty()
            && targets
                .iter()
                .all(|statement| self.resolve_chain_candidate(*statement).is_some())
    }

    /// Edit script for the chain action, or `None` when nothing is selected.
    pub fn plan_chain_decomposition(&self) -> Option<EditScript> {
        let targets = self.source.selection_targets();
        if targets.is_empty() {
            return None;
        }

        let mut script = EditScript::new();
        ensure_static_helpers(self.source, &mut script, &["mock", "when"]);

        for statement in self.by_descending_offset(targets) {
            let Some(candidate) = self.resolve_chain_candidate(statement) else {
                debug!(?statement, "Skipping statement: not a decomposable chain");
                continue;
            };
            match self.chain_replacements(&candidate) {
                Ok(replacements) => script.push(EditOp::ReplaceStatement {
                    statement,
                    replacements,
                }),
                Err(error) => {
                    warn!(?statement, %error, "Skipping chain candidate");
                }
            }
        }
        Some(script)
    }

    /// Whether the single-statement stub action is offered.
    pub fn stub_action_available(&self) -> bool {
        let targets = self.source.selection_targets();
        !targets.is_empty()
            && targets
                .iter()
                .all(|statement| self.resolve_stub_candidate(*statement).is_some())
    }

    /// Edit script for the single-statement stub action: one mock
    /// declaration plus one stub per candidate, no intermediate chain.
    pub fn plan_single_stubs(&self) -> Option<EditScript> {
        let targets = self.source.selection_targets();
        if targets.is_empty() {
            return None;
        }

        let mut script = EditScript::new();
        // The default string rule produces UUID-based values.
        ensure_class_import(self.source, &mut script, UUID_CLASS);
        ensure_static_helpers(self.source, &mut script, &["mock", "when"]);

        for statement in self.by_descending_offset(targets) {
            let Some(candidate) = self.resolve_stub_candidate(statement) else {
                debug!(?statement, "Skipping statement: not a stubbable declaration");
                continue;
            };
            let mock_expression = self
                .rules
                .resolve_expression(&candidate.target_type.canonical)
                .unwrap_or_else(|| GENERIC_MOCK_EXPRESSION.to_string());
            script.push(EditOp::ReplaceStatement {
                statement: candidate.statement,
                replacements: vec![
                    format!(
                        "{} {} = {};",
                        candidate.target_type.canonical, candidate.target_name, mock_expression
                    ),
                    format!(
                        "when({})\n.thenReturn({});",
                        candidate.initializer_text, candidate.target_name
                    ),
                ],
            });
        }
        Some(script)
    }

    fn chain_replacements(&self, candidate: &ChainCandidate) -> Result<Vec<String>, TransformError> {
        let mut names =
            NameTable::from_names(self.source.existing_local_names(candidate.statement));
        names.insert(candidate.target_name.clone());
        generate_scaffold(
            &candidate.chain,
            &candidate.target_name,
            &candidate.target_type.canonical,
            self.rules,
            &mut names,
        )
    }

    fn resolve_chain_candidate(&self, statement: StatementId) -> Option<ChainCandidate> {
        let (declaration, target_name) = self.single_named_declaration(statement)?;
        let initializer = declaration.initializer?;
        self.source.call_shape(initializer)?;
        if self.is_mock_call(initializer) {
            return None;
        }
        let chain = extract_chain(self.source, initializer)?;
        let target_type = self
            .source
            .type_of(initializer)
            .unwrap_or(declaration.declared_type);
        Some(ChainCandidate {
            statement,
            target_name,
            target_type,
            chain,
        })
    }

    fn resolve_stub_candidate(&self, statement: StatementId) -> Option<StubCandidate> {
        let (declaration, target_name) = self.single_named_declaration(statement)?;
        let initializer = declaration.initializer?;
        let initializer_text = self.source.expression_text(initializer);
        if initializer_text.trim().is_empty() {
            return None;
        }
        if self.is_mock_call(initializer) {
            return None;
        }
        let target_type = self
            .source
            .type_of(initializer)
            .unwrap_or(declaration.declared_type);
        Some(StubCandidate {
            statement,
            target_name,
            target_type,
            initializer_text,
        })
    }

    /// The statement's single named local declaration, or `None` when it
    /// declares zero, several, or an unnamed variable.
    fn single_named_declaration(
        &self,
        statement: StatementId,
    ) -> Option<(LocalDeclaration, String)> {
        let mut declarations = self.source.local_declarations(statement);
        if declarations.len() != 1 {
            return None;
        }
        let declaration = declarations.remove(0);
        let name = declaration.name.clone()?;
        Some((declaration, name))
    }

    fn by_descending_offset(&self, mut targets: Vec<StatementId>) -> Vec<StatementId> {
        targets.sort_by_key(|statement| {
            std::cmp::Reverse(self.source.statement_offset(*statement))
        });
        targets
    }

    /// Whether an expression is already the library's own `mock()` call.
    fn is_mock_call(&self, expression: ExpressionId) -> bool {
        let Some(shape) = self.source.call_shape(expression) else {
            return false;
        };
        if shape.method_name != "mock" {
            return false;
        }
        if let Some(class) = self.source.resolved_method_class(expression) {
            return class == MOCKITO_CLASS;
        }
        // Unresolved call: judge by the qualifier text alone.
        matches!(
            shape.qualifier_text.as_deref(),
            None | Some("Mockito") | Some("org.mockito.Mockito")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockmill_test_support::ScriptedSource;
    use pretty_assertions::assert_eq;

    fn ty(canonical: &str, simple: &str) -> TypeRef {
        TypeRef::new(canonical, simple)
    }

    fn chain_declaration(source: &mut ScriptedSource, target: &str) -> StatementId {
        let b = source.reference_call("a", "b", "()", Some(ty("com.acme.X", "X")));
        let c = source.chained_call(b, "c", "()", Some(ty("com.acme.Y", "Y")));
        source.declaration(target, ty("com.acme.Y", "Y"), Some(c))
    }

    #[test]
    fn test_chain_action_available_for_valid_declaration() {
        let mut source = ScriptedSource::new();
        let statement = chain_declaration(&mut source, "result");
        source.place_caret(statement);

        let rules = MockRuleStore::new();
        let driver = TransformDriver::new(&source, &rules);
        assert!(driver.chain_action_available());
    }

    #[test]
    fn test_chain_action_unavailable_without_candidates() {
        let source = ScriptedSource::new();
        let rules = MockRuleStore::new();
        let driver = TransformDriver::new(&source, &rules);
        assert!(!driver.chain_action_available());
        assert!(driver.plan_chain_decomposition().is_none());
    }

    #[test]
    fn test_chain_action_unavailable_for_single_call() {
        let mut source = ScriptedSource::new();
        let call = source.reference_call("x", "getY", "()", Some(ty("com.acme.Y", "Y")));
        let statement = source.declaration("y", ty("com.acme.Y", "Y"), Some(call));
        source.place_caret(statement);

        let rules = MockRuleStore::new();
        let driver = TransformDriver::new(&source, &rules);
        assert!(!driver.chain_action_available());
        // The simpler stub action still applies.
        assert!(driver.stub_action_available());
    }

    #[test]
    fn test_chain_action_unavailable_for_mock_initializer() {
        let mut source = ScriptedSource::new();
        let mock = source.mockito_mock_call(Some(ty("com.acme.Y", "Y")));
        let statement = source.declaration("y", ty("com.acme.Y", "Y"), Some(mock));
        source.place_caret(statement);

        let rules = MockRuleStore::new();
        let driver = TransformDriver::new(&source, &rules);
        assert!(!driver.chain_action_available());
        assert!(!driver.stub_action_available());
    }

    #[test]
    fn test_chain_action_unavailable_for_multi_variable_declaration() {
        let mut source = ScriptedSource::new();
        let b = source.reference_call("a", "b", "()", Some(ty("com.acme.X", "X")));
        let c = source.chained_call(b, "c", "()", Some(ty("com.acme.Y", "Y")));
        let statement = source.declaration_of(vec![
            LocalDeclaration {
                name: Some("y1".to_string()),
                declared_type: ty("com.acme.Y", "Y"),
                initializer: Some(c),
            },
            LocalDeclaration {
                name: Some("y2".to_string()),
                declared_type: ty("com.acme.Y", "Y"),
                initializer: None,
            },
        ]);
        source.place_caret(statement);

        let rules = MockRuleStore::new();
        let driver = TransformDriver::new(&source, &rules);
        assert!(!driver.chain_action_available());
    }

    #[test]
    fn test_availability_requires_every_selected_statement_valid() {
        let mut source = ScriptedSource::new();
        let valid = chain_declaration(&mut source, "first");
        let field = source.raw_expression("this.field", Some(ty("com.acme.Y", "Y")));
        let invalid = source.declaration("second", ty("com.acme.Y", "Y"), Some(field));
        source.select(&[valid, invalid]);

        let rules = MockRuleStore::new();
        let driver = TransformDriver::new(&source, &rules);
        assert!(!driver.chain_action_available());
    }

    #[test]
    fn test_plan_emits_imports_and_replacement() {
        let mut source = ScriptedSource::new();
        let statement = chain_declaration(&mut source, "result");
        source.place_caret(statement);

        let rules = MockRuleStore::new();
        let driver = TransformDriver::new(&source, &rules);
        let script = driver.plan_chain_decomposition().unwrap();

        assert_eq!(
            script.edits[0],
            EditOp::AddStaticImport {
                class_fqn: "org.mockito.Mockito".to_string(),
                member: "mock".to_string(),
            }
        );
        assert_eq!(
            script.edits[1],
            EditOp::AddStaticImport {
                class_fqn: "org.mockito.Mockito".to_string(),
                member: "when".to_string(),
            }
        );
        match &script.edits[2] {
            EditOp::ReplaceStatement {
                statement: replaced,
                replacements,
            } => {
                assert_eq!(*replaced, statement);
                assert_eq!(replacements.len(), 4);
                assert_eq!(replacements[0], "com.acme.X aB = mock();");
                assert_eq!(replacements[1], "when(a.b())\n.thenReturn(aB);");
                assert_eq!(replacements[2], "com.acme.Y result = mock();");
                assert_eq!(replacements[3], "when(aB.c())\n.thenReturn(result);");
            }
            other => panic!("expected ReplaceStatement, got {other:?}"),
        }
    }

    #[test]
    fn test_static_on_demand_import_suppresses_helper_imports() {
        let mut source = ScriptedSource::new();
        let statement = chain_declaration(&mut source, "result");
        source.place_caret(statement);
        source.add_static_on_demand_import("org.mockito.Mockito");

        let rules = MockRuleStore::new();
        let driver = TransformDriver::new(&source, &rules);
        let script = driver.plan_chain_decomposition().unwrap();
        assert!(matches!(&script.edits[0], EditOp::ReplaceStatement { .. }));
    }

    #[test]
    fn test_member_import_suppresses_only_that_member() {
        let mut source = ScriptedSource::new();
        let statement = chain_declaration(&mut source, "result");
        source.place_caret(statement);
        source.add_static_member_import("org.mockito.Mockito", "mock");

        let rules = MockRuleStore::new();
        let driver = TransformDriver::new(&source, &rules);
        let script = driver.plan_chain_decomposition().unwrap();
        assert_eq!(
            script.edits[0],
            EditOp::AddStaticImport {
                class_fqn: "org.mockito.Mockito".to_string(),
                member: "when".to_string(),
            }
        );
    }

    #[test]
    fn test_candidates_apply_highest_offset_first() {
        let mut source = ScriptedSource::new();
        let first = chain_declaration(&mut source, "first");
        let second = chain_declaration(&mut source, "second");
        source.select(&[first, second]);

        let rules = MockRuleStore::new();
        let driver = TransformDriver::new(&source, &rules);
        let script = driver.plan_chain_decomposition().unwrap();

        let replaced: Vec<StatementId> = script
            .edits
            .iter()
            .filter_map(|edit| match edit {
                EditOp::ReplaceStatement { statement, .. } => Some(*statement),
                _ => None,
            })
            .collect();
        assert_eq!(replaced, vec![second, first]);
    }

    #[test]
    fn test_invalid_candidate_is_skipped_others_proceed() {
        let mut source = ScriptedSource::new();
        let valid = chain_declaration(&mut source, "first");
        let field = source.raw_expression("this.field", Some(ty("com.acme.Y", "Y")));
        let invalid = source.declaration("second", ty("com.acme.Y", "Y"), Some(field));
        source.select(&[valid, invalid]);

        let rules = MockRuleStore::new();
        let driver = TransformDriver::new(&source, &rules);
        let script = driver.plan_chain_decomposition().unwrap();

        let replaced: Vec<StatementId> = script
            .edits
            .iter()
            .filter_map(|edit| match edit {
                EditOp::ReplaceStatement { statement, .. } => Some(*statement),
                _ => None,
            })
            .collect();
        assert_eq!(replaced, vec![valid]);
    }

    #[test]
    fn test_single_stub_plan_for_non_call_initializer() {
        let mut source = ScriptedSource::new();
        let field = source.raw_expression(
            "holder.value",
            Some(ty("java.lang.String", "String")),
        );
        let statement = source.declaration("text", ty("java.lang.String", "String"), Some(field));
        source.place_caret(statement);

        let rules = MockRuleStore::new();
        let driver = TransformDriver::new(&source, &rules);
        assert!(driver.stub_action_available());

        let script = driver.plan_single_stubs().unwrap();
        assert_eq!(
            script.edits[0],
            EditOp::AddImport {
                class_fqn: "java.util.UUID".to_string(),
            }
        );
        match script.edits.last().unwrap() {
            EditOp::ReplaceStatement { replacements, .. } => {
                assert_eq!(replacements.len(), 2);
                assert_eq!(
                    replacements[0],
                    "java.lang.String text = UUID.randomUUID().toString();"
                );
                assert_eq!(replacements[1], "when(holder.value)\n.thenReturn(text);");
            }
            other => panic!("expected ReplaceStatement, got {other:?}"),
        }
    }

    #[test]
    fn test_single_stub_uses_declared_type_when_initializer_unresolved() {
        let mut source = ScriptedSource::new();
        let call = source.reference_call("x", "getY", "()", None);
        let statement = source.declaration("y", ty("com.acme.Y", "Y"), Some(call));
        source.place_caret(statement);

        let rules = MockRuleStore::new();
        let driver = TransformDriver::new(&source, &rules);
        let script = driver.plan_single_stubs().unwrap();
        match script.edits.last().unwrap() {
            EditOp::ReplaceStatement { replacements, .. } => {
                assert_eq!(replacements[0], "com.acme.Y y = mock();");
            }
            other => panic!("expected ReplaceStatement, got {other:?}"),
        }
    }

    #[test]
    fn test_unresolved_mock_call_detected_by_qualifier_text() {
        let mut source = ScriptedSource::new();
        let mock = source.unqualified_call("mock", "()", Some(ty("com.acme.Y", "Y")));
        let statement = source.declaration("y", ty("com.acme.Y", "Y"), Some(mock));
        source.place_caret(statement);

        let rules = MockRuleStore::new();
        let driver = TransformDriver::new(&source, &rules);
        assert!(!driver.stub_action_available());
    }

    #[test]
    fn test_mock_named_method_on_other_class_is_not_a_mock_call() {
        let mut source = ScriptedSource::new();
        let mock = source.reference_call("builder", "mock", "()", Some(ty("com.acme.Y", "Y")));
        let statement = source.declaration("y", ty("com.acme.Y", "Y"), Some(mock));
        source.place_caret(statement);

        let rules = MockRuleStore::new();
        let driver = TransformDriver::new(&source, &rules);
        assert!(driver.stub_action_available());
    }

    #[test]
    fn test_empty_selection_short_circuits() {
        let mut source = mockmill_test_support::mock_source_model();
        source.expect_selection_targets().returning(Vec::new);
        source.expect_caret_statement().returning(|| None);

        let rules = MockRuleStore::new();
        let driver = TransformDriver::new(&source, &rules);
        assert!(!driver.chain_action_available());
        assert!(driver.plan_chain_decomposition().is_none());
        assert!(driver.plan_single_stubs().is_none());
    }

    #[test]
    fn test_names_never_collide_across_one_candidate() {
        let mut source = ScriptedSource::new();
        source.add_local("aB");
        source.add_local("aBC");
        let b = source.reference_call("a", "b", "()", Some(ty("com.acme.X", "X")));
        let c = source.chained_call(b, "c", "()", Some(ty("com.acme.Y", "Y")));
        let d = source.chained_call(c, "d", "()", Some(ty("com.acme.Z", "Z")));
        let statement = source.declaration("result", ty("com.acme.Z", "Z"), Some(d));
        source.place_caret(statement);

        let rules = MockRuleStore::new();
        let driver = TransformDriver::new(&source, &rules);
        let script = driver.plan_chain_decomposition().unwrap();
        match script.edits.last().unwrap() {
            EditOp::ReplaceStatement { replacements, .. } => {
                assert_eq!(replacements[0], "com.acme.X aB1 = mock();");
                assert_eq!(replacements[2], "com.acme.Y aB1C = mock();");
            }
            other => panic!("expected ReplaceStatement, got {other:?}"),
        }
    }

    #[test]
    fn test_driver_reads_link_qualifiers_through_chain() {
        // Reference qualifiers flow into naming; a chained qualifier does
        // not. Guard the distinction end to end.
        let mut source = ScriptedSource::new();
        let b = source.reference_call(
            "repository",
            "findUser",
            "(id)",
            Some(ty("com.acme.User", "User")),
        );
        let c = source.chained_call(b, "getProfile", "()", Some(ty("com.acme.Profile", "Profile")));
        let statement = source.declaration("profile", ty("com.acme.Profile", "Profile"), Some(c));
        source.place_caret(statement);

        let rules = MockRuleStore::new();
        let driver = TransformDriver::new(&source, &rules);
        let script = driver.plan_chain_decomposition().unwrap();
        match script.edits.last().unwrap() {
            EditOp::ReplaceStatement { replacements, .. } => {
                assert_eq!(replacements[0], "com.acme.User repositoryFindUser = mock();");
                assert_eq!(
                    replacements[1],
                    "when(repository.findUser(id))\n.thenReturn(repositoryFindUser);"
                );
                assert_eq!(
                    replacements[3],
                    "when(repositoryFindUser.getProfile())\n.thenReturn(profile);"
                );
            }
            other => panic!("expected ReplaceStatement, got {other:?}"),
        }
    }
}
