//! Test-class skeleton generation from constructor dependencies.
//!
//! Renders an `@ExtendWith(MockitoExtension.class)` class with one `@Mock`
//! field per constructor-injected dependency and an `@InjectMocks` subject.
//! Annotations and field types stay fully qualified; shortening references
//! is the host's reformat step after insertion.

use crate::error::SkeletonError;
use crate::naming::decapitalize;
use mockmill_host_api::{EditOp, SourceModel};
use std::path::PathBuf;

/// Constructor-injected dependency of the class under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub name: String,
    /// Canonical type of the `@Mock` field.
    pub type_canonical: String,
}

impl Dependency {
    pub fn new(name: impl Into<String>, type_canonical: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_canonical: type_canonical.into(),
        }
    }
}

/// The class a test skeleton is generated for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSummary {
    /// Simple class name, e.g. `UserService`.
    pub name: String,
    /// Package name; empty for the default package.
    pub package: String,
    /// Canonical name, used as the `@InjectMocks` field type.
    pub qualified_name: String,
    pub dependencies: Vec<Dependency>,
}

/// Subject field name: the decapitalized last camel-case word of the class
/// name (`UserService` → `service`, `HTTPClient` → `client`).
pub fn subject_variable_name(class_name: &str) -> String {
    if class_name.is_empty() {
        return "subject".to_string();
    }
    let words = camel_words(class_name);
    let last = words.last().map(String::as_str).unwrap_or(class_name);
    decapitalize(last)
}

/// Splits a class name into camel-case words, keeping acronym runs
/// together (`HTTPClient` → `HTTP`, `Client`).
fn camel_words(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut words = Vec::new();
    let mut word = String::new();
    for (i, &c) in chars.iter().enumerate() {
        if !word.is_empty() && c.is_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars
                .get(i + 1)
                .map(|n| n.is_lowercase())
                .unwrap_or(false);
            if prev.is_lowercase() || prev.is_numeric() || (prev.is_uppercase() && next_is_lower) {
                words.push(std::mem::take(&mut word));
            }
        }
        word.push(c);
    }
    if !word.is_empty() {
        words.push(word);
    }
    words
}

/// Renders the test-class source text.
pub fn render_test_class(class: &ClassSummary) -> String {
    let mut out = String::new();
    if !class.package.is_empty() {
        out.push_str(&format!("package {};\n\n", class.package));
    }
    out.push_str(
        "@org.junit.jupiter.api.extension.ExtendWith(org.mockito.junit.jupiter.MockitoExtension.class)\n",
    );
    out.push_str(&format!("public class {}Test {{\n", class.name));
    for dependency in &class.dependencies {
        out.push_str(&format!(
            "    @org.mockito.Mock private {} {};\n",
            dependency.type_canonical, dependency.name
        ));
    }
    out.push_str(&format!(
        "    @org.mockito.InjectMocks private {} {};\n",
        class.qualified_name,
        subject_variable_name(&class.name)
    ));
    out.push_str("}\n");
    out
}

/// Plans the skeleton file at `<root>/<package dirs>/<Name>Test.java`,
/// using the first reported test source root. No root is an error surfaced
/// to the user; nothing is written.
pub fn plan_test_class<S: SourceModel>(
    source: &S,
    class: &ClassSummary,
) -> Result<EditOp, SkeletonError> {
    let roots = source.test_source_roots();
    let root = roots.first().ok_or(SkeletonError::NoTestSourceRoot)?;

    let mut path: PathBuf = root.clone();
    for segment in class.package.split('.').filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    path.push(format!("{}Test.java", class.name));

    Ok(EditOp::CreateFile {
        path,
        content: render_test_class(class),
    })
}
