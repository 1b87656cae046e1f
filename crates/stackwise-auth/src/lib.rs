//! stackwise-auth
//!
//! Email/password authentication behind the [`AuthProvider`] trait, with a
//! Cognito user pool implementation and an in-process one.

pub mod client;
pub mod cognito;
pub mod error;
pub mod flows;
pub mod memory;
pub mod provider;

pub use cognito::CognitoAuthProvider;
pub use error::AuthError;
pub use memory::MemoryAuthProvider;
pub use provider::{AuthProvider, AuthUser, Session, SignUpOutcome};
