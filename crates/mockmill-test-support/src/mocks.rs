//! Mock implementations for testing

use mockall::mock;
use mockmill_host_api::{
    CallShape, ExpressionId, LocalDeclaration, SourceModel, StatementId, TypeRef,
};
use std::collections::BTreeSet;
use std::path::PathBuf;

mock! {
    pub SourceModel {}

    impl SourceModel for SourceModel {
        fn selection_targets(&self) -> Vec<StatementId>;
        fn caret_statement(&self) -> Option<StatementId>;
        fn local_declarations(&self, statement: StatementId) -> Vec<LocalDeclaration>;
        fn expression_statement(&self, statement: StatementId) -> Option<ExpressionId>;
        fn call_shape(&self, expression: ExpressionId) -> Option<CallShape>;
        fn expression_text(&self, expression: ExpressionId) -> String;
        fn type_of(&self, expression: ExpressionId) -> Option<TypeRef>;
        fn is_static_method(&self, call: ExpressionId) -> bool;
        fn resolved_method_class(&self, call: ExpressionId) -> Option<String>;
        fn existing_local_names(&self, statement: StatementId) -> BTreeSet<String>;
        fn statement_offset(&self, statement: StatementId) -> usize;
        fn has_import(&self, class_fqn: &str) -> bool;
        fn has_on_demand_import(&self, package_fqn: &str) -> bool;
        fn has_static_on_demand_import(&self, class_fqn: &str) -> bool;
        fn has_static_member_import(&self, class_fqn: &str, member: &str) -> bool;
        fn test_source_roots(&self) -> Vec<PathBuf>;
    }
}

/// Create a mock source model for testing
pub fn mock_source_model() -> MockSourceModel {
    MockSourceModel::new()
}
