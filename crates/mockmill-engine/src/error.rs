//! Engine error types.
//!
//! "Not applicable" is not an error: the drivers express it as `None` and
//! the host simply withholds the action. These types cover the conditions
//! that abort one candidate mid-generation while the rest of the invocation
//! proceeds.

use thiserror::Error;

/// Failure while generating one candidate's replacement statements.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TransformError {
    #[error("call chain has {links} link(s), need at least 2")]
    ChainTooShort { links: usize },

    #[error("no result type resolved for `{call}`")]
    UnresolvedType { call: String },

    #[error("no qualifier mock available for `{call}`")]
    MissingQualifierMock { call: String },
}

impl TransformError {
    pub fn unresolved_type(call: impl Into<String>) -> Self {
        Self::UnresolvedType { call: call.into() }
    }

    pub fn missing_qualifier_mock(call: impl Into<String>) -> Self {
        Self::MissingQualifierMock { call: call.into() }
    }
}

/// Failure while planning a test-class skeleton.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SkeletonError {
    #[error("No test source roots found in project/module.")]
    NoTestSourceRoot,
}
