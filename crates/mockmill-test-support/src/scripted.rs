//! Scripted, immutable source snapshots for engine tests.
//!
//! Tests declare expressions and statements up front through the builder
//! methods; handles are plain indices into the scripted nodes. Expression
//! text is synthesized from the declared structure, so a chained call's
//! text reads exactly like the source it stands for.

use mockmill_host_api::{
    CallShape, ExpressionId, LocalDeclaration, Qualifier, SourceModel, StatementId, TypeRef,
};
use std::collections::BTreeSet;
use std::path::PathBuf;

#[derive(Debug, Clone)]
enum ExprNode {
    Call {
        method_name: String,
        argument_list: String,
        qualifier: Qualifier,
        qualifier_text: Option<String>,
        is_static: bool,
        resolved_class: Option<String>,
        ty: Option<TypeRef>,
    },
    Raw {
        text: String,
        ty: Option<TypeRef>,
    },
}

#[derive(Debug, Clone)]
struct StmtNode {
    declarations: Vec<LocalDeclaration>,
    expression: Option<ExpressionId>,
    offset: usize,
}

/// An in-memory [`SourceModel`] built from declarative descriptions.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    expressions: Vec<ExprNode>,
    statements: Vec<StmtNode>,
    selection: Vec<StatementId>,
    caret: Option<StatementId>,
    locals: BTreeSet<String>,
    imports: BTreeSet<String>,
    on_demand_imports: BTreeSet<String>,
    static_on_demand_imports: BTreeSet<String>,
    static_member_imports: BTreeSet<(String, String)>,
    test_roots: Vec<PathBuf>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// `qualifier.method(args)` where the qualifier is a plain reference.
    pub fn reference_call(
        &mut self,
        qualifier: &str,
        method: &str,
        arguments: &str,
        result: Option<TypeRef>,
    ) -> ExpressionId {
        self.push_call(
            method,
            arguments,
            Qualifier::Reference(qualifier.to_string()),
            Some(qualifier.to_string()),
            false,
            None,
            result,
        )
    }

    /// Same as [`reference_call`](Self::reference_call), but the resolved
    /// method is static (`Factory.create()`).
    pub fn static_reference_call(
        &mut self,
        qualifier: &str,
        method: &str,
        arguments: &str,
        result: Option<TypeRef>,
    ) -> ExpressionId {
        self.push_call(
            method,
            arguments,
            Qualifier::Reference(qualifier.to_string()),
            Some(qualifier.to_string()),
            true,
            None,
            result,
        )
    }

    /// `<inner>.method(args)` chained onto an existing call expression.
    pub fn chained_call(
        &mut self,
        qualifier: ExpressionId,
        method: &str,
        arguments: &str,
        result: Option<TypeRef>,
    ) -> ExpressionId {
        let qualifier_text = self.expression_text_of(qualifier);
        self.push_call(
            method,
            arguments,
            Qualifier::Call(qualifier),
            Some(qualifier_text),
            false,
            None,
            result,
        )
    }

    /// A chained call whose resolved method is static (rare, but legal
    /// Java when calling a static through an instance expression).
    pub fn static_chained_call(
        &mut self,
        qualifier: ExpressionId,
        method: &str,
        arguments: &str,
        result: Option<TypeRef>,
    ) -> ExpressionId {
        let qualifier_text = self.expression_text_of(qualifier);
        self.push_call(
            method,
            arguments,
            Qualifier::Call(qualifier),
            Some(qualifier_text),
            true,
            None,
            result,
        )
    }

    /// An unqualified call such as `helper()`.
    pub fn unqualified_call(
        &mut self,
        method: &str,
        arguments: &str,
        result: Option<TypeRef>,
    ) -> ExpressionId {
        self.push_call(method, arguments, Qualifier::Other, None, false, None, result)
    }

    /// An unqualified `mock()` call resolving to `org.mockito.Mockito`.
    pub fn mockito_mock_call(&mut self, result: Option<TypeRef>) -> ExpressionId {
        self.push_call(
            "mock",
            "()",
            Qualifier::Other,
            None,
            true,
            Some("org.mockito.Mockito".to_string()),
            result,
        )
    }

    /// A non-call expression with fixed text, e.g. `repository.field`.
    pub fn raw_expression(&mut self, text: &str, ty: Option<TypeRef>) -> ExpressionId {
        self.expressions.push(ExprNode::Raw {
            text: text.to_string(),
            ty,
        });
        ExpressionId(self.expressions.len() as u32 - 1)
    }

    /// `Type name = <initializer>;`, registering the name as a local.
    pub fn declaration(
        &mut self,
        name: &str,
        declared_type: TypeRef,
        initializer: Option<ExpressionId>,
    ) -> StatementId {
        self.locals.insert(name.to_string());
        self.push_statement(
            vec![LocalDeclaration {
                name: Some(name.to_string()),
                declared_type,
                initializer,
            }],
            None,
        )
    }

    /// A declaration statement with an arbitrary set of declared variables
    /// (zero, unnamed, or several), for the not-applicable cases.
    pub fn declaration_of(&mut self, declarations: Vec<LocalDeclaration>) -> StatementId {
        for declaration in &declarations {
            if let Some(name) = &declaration.name {
                self.locals.insert(name.clone());
            }
        }
        self.push_statement(declarations, None)
    }

    /// A bare expression statement, `expr;`.
    pub fn expression_stmt(&mut self, expression: ExpressionId) -> StatementId {
        self.push_statement(Vec::new(), Some(expression))
    }

    /// Marks an active multi-statement selection.
    pub fn select(&mut self, statements: &[StatementId]) {
        self.selection = statements.to_vec();
    }

    /// Places the caret inside a statement (no selection).
    pub fn place_caret(&mut self, statement: StatementId) {
        self.caret = Some(statement);
    }

    /// Registers a pre-existing local name in the enclosing scope.
    pub fn add_local(&mut self, name: &str) {
        self.locals.insert(name.to_string());
    }

    pub fn add_import(&mut self, class_fqn: &str) {
        self.imports.insert(class_fqn.to_string());
    }

    pub fn add_on_demand_import(&mut self, package_fqn: &str) {
        self.on_demand_imports.insert(package_fqn.to_string());
    }

    pub fn add_static_on_demand_import(&mut self, class_fqn: &str) {
        self.static_on_demand_imports.insert(class_fqn.to_string());
    }

    pub fn add_static_member_import(&mut self, class_fqn: &str, member: &str) {
        self.static_member_imports
            .insert((class_fqn.to_string(), member.to_string()));
    }

    pub fn add_test_root(&mut self, path: impl Into<PathBuf>) {
        self.test_roots.push(path.into());
    }

    fn push_call(
        &mut self,
        method: &str,
        arguments: &str,
        qualifier: Qualifier,
        qualifier_text: Option<String>,
        is_static: bool,
        resolved_class: Option<String>,
        ty: Option<TypeRef>,
    ) -> ExpressionId {
        self.expressions.push(ExprNode::Call {
            method_name: method.to_string(),
            argument_list: arguments.to_string(),
            qualifier,
            qualifier_text,
            is_static,
            resolved_class,
            ty,
        });
        ExpressionId(self.expressions.len() as u32 - 1)
    }

    fn push_statement(
        &mut self,
        declarations: Vec<LocalDeclaration>,
        expression: Option<ExpressionId>,
    ) -> StatementId {
        // Statements get increasing offsets in scripting order.
        let offset = self.statements.len() * 10;
        self.statements.push(StmtNode {
            declarations,
            expression,
            offset,
        });
        StatementId(self.statements.len() as u32 - 1)
    }

    fn expression_text_of(&self, id: ExpressionId) -> String {
        match &self.expressions[id.0 as usize] {
            ExprNode::Raw { text, .. } => text.clone(),
            ExprNode::Call {
                method_name,
                argument_list,
                qualifier_text,
                ..
            } => match qualifier_text {
                Some(qualifier) => format!("{qualifier}.{method_name}{argument_list}"),
                None => format!("{method_name}{argument_list}"),
            },
        }
    }

    fn expr(&self, id: ExpressionId) -> &ExprNode {
        &self.expressions[id.0 as usize]
    }

    fn stmt(&self, id: StatementId) -> &StmtNode {
        &self.statements[id.0 as usize]
    }
}

impl SourceModel for ScriptedSource {
    fn selection_targets(&self) -> Vec<StatementId> {
        if !self.selection.is_empty() {
            self.selection.clone()
        } else {
            self.caret.into_iter().collect()
        }
    }

    fn caret_statement(&self) -> Option<StatementId> {
        self.caret
    }

    fn local_declarations(&self, statement: StatementId) -> Vec<LocalDeclaration> {
        self.stmt(statement).declarations.clone()
    }

    fn expression_statement(&self, statement: StatementId) -> Option<ExpressionId> {
        self.stmt(statement).expression
    }

    fn call_shape(&self, expression: ExpressionId) -> Option<CallShape> {
        match self.expr(expression) {
            ExprNode::Call {
                method_name,
                argument_list,
                qualifier,
                qualifier_text,
                ..
            } => Some(CallShape {
                method_name: method_name.clone(),
                argument_list: argument_list.clone(),
                qualifier: qualifier.clone(),
                qualifier_text: qualifier_text.clone(),
            }),
            ExprNode::Raw { .. } => None,
        }
    }

    fn expression_text(&self, expression: ExpressionId) -> String {
        self.expression_text_of(expression)
    }

    fn type_of(&self, expression: ExpressionId) -> Option<TypeRef> {
        match self.expr(expression) {
            ExprNode::Call { ty, .. } | ExprNode::Raw { ty, .. } => ty.clone(),
        }
    }

    fn is_static_method(&self, call: ExpressionId) -> bool {
        match self.expr(call) {
            ExprNode::Call { is_static, .. } => *is_static,
            ExprNode::Raw { .. } => false,
        }
    }

    fn resolved_method_class(&self, call: ExpressionId) -> Option<String> {
        match self.expr(call) {
            ExprNode::Call { resolved_class, .. } => resolved_class.clone(),
            ExprNode::Raw { .. } => None,
        }
    }

    fn existing_local_names(&self, _statement: StatementId) -> BTreeSet<String> {
        self.locals.clone()
    }

    fn statement_offset(&self, statement: StatementId) -> usize {
        self.stmt(statement).offset
    }

    fn has_import(&self, class_fqn: &str) -> bool {
        self.imports.contains(class_fqn)
    }

    fn has_on_demand_import(&self, package_fqn: &str) -> bool {
        self.on_demand_imports.contains(package_fqn)
    }

    fn has_static_on_demand_import(&self, class_fqn: &str) -> bool {
        self.static_on_demand_imports.contains(class_fqn)
    }

    fn has_static_member_import(&self, class_fqn: &str, member: &str) -> bool {
        self.static_member_imports
            .contains(&(class_fqn.to_string(), member.to_string()))
    }

    fn test_source_roots(&self) -> Vec<PathBuf> {
        self.test_roots.clone()
    }
}
