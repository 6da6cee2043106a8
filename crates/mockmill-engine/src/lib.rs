//! Call-chain decomposition and mock-scaffold generation
//!
//! The engine rewrites a fluent method-call declaration such as
//!
//! ```java
//! Profile profile = repository.findUser(id).getProfile();
//! ```
//!
//! into a stepwise sequence of mock declarations and stubs:
//!
//! ```java
//! com.acme.User repositoryFindUser = mock();
//! when(repository.findUser(id))
//! .thenReturn(repositoryFindUser);
//! com.acme.Profile profile = mock();
//! when(repositoryFindUser.getProfile())
//! .thenReturn(profile);
//! ```
//!
//! All parsing and type resolution comes from the host through the
//! `mockmill-host-api` traits; per-type mock expressions come from the
//! `mockmill-config` rule store. Every operation produces an
//! [`EditScript`](mockmill_host_api::EditScript) for the host to apply as
//! one grouped, undoable edit; the engine itself never mutates source.

pub mod chain;
pub mod driver;
pub mod error;
mod imports;
pub mod naming;
pub mod scaffold;
pub mod skeleton;
pub mod verify;

pub use chain::{extract_chain, CallLink, Chain};
pub use driver::TransformDriver;
pub use error::{SkeletonError, TransformError};
pub use naming::{suggest_name, NameRequest, NameTable};
pub use scaffold::{generate_scaffold, GENERIC_MOCK_EXPRESSION};
pub use skeleton::{plan_test_class, render_test_class, subject_variable_name, ClassSummary, Dependency};
pub use verify::{plan_verify_wrap, verify_action_available};
