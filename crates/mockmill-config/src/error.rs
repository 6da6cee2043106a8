//! Error types for rule validation and settings persistence.

use thiserror::Error;

/// Error raised at settings-commit time or while loading/saving the rule
/// document. Validation variants name the offending rule so the settings
/// surface can point at it.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("Type cannot be blank.")]
    BlankType,

    #[error("Type must be fully-qualified or primitive: {type_name}")]
    MalformedType { type_name: String },

    #[error("Mock expression cannot be blank for type: {type_name}")]
    BlankExpression { type_name: String },

    #[error("Duplicate type mapping for: {type_name}")]
    DuplicateType { type_name: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse rule document: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize rule document: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl ConfigError {
    pub fn malformed_type(type_name: impl Into<String>) -> Self {
        Self::MalformedType {
            type_name: type_name.into(),
        }
    }

    pub fn blank_expression(type_name: impl Into<String>) -> Self {
        Self::BlankExpression {
            type_name: type_name.into(),
        }
    }

    pub fn duplicate_type(type_name: impl Into<String>) -> Self {
        Self::DuplicateType {
            type_name: type_name.into(),
        }
    }
}

/// Result type alias for convenience
pub type ConfigResult<T> = Result<T, ConfigError>;
