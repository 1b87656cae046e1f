use serde::{Deserialize, Serialize};
use stackwise_core::BoxFuture;
use uuid::Uuid;

use crate::error::AuthError;

/// The identity behind a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

/// Tokens for a signed-in user. Persisted by callers to restore a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub id_token: String,
    pub refresh_token: String,
    pub user: AuthUser,
}

/// Result of registering. `session` is `None` while the account awaits
/// email confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpOutcome {
    pub user: AuthUser,
    pub session: Option<Session>,
}

/// Trait implemented by each identity backend.
pub trait AuthProvider: Send + Sync {
    fn sign_in<'a>(
        &'a self,
        email: &'a str,
        password: &'a str,
    ) -> BoxFuture<'a, Result<Session, AuthError>>;

    fn sign_up<'a>(
        &'a self,
        email: &'a str,
        password: &'a str,
        full_name: &'a str,
    ) -> BoxFuture<'a, Result<SignUpOutcome, AuthError>>;

    /// Revoke every token issued for the session's user.
    fn sign_out<'a>(&'a self, session: &'a Session) -> BoxFuture<'a, Result<(), AuthError>>;

    /// Resolve the user an access token belongs to.
    fn get_user<'a>(&'a self, access_token: &'a str) -> BoxFuture<'a, Result<AuthUser, AuthError>>;

    /// Exchange the refresh token for fresh access and id tokens.
    fn refresh<'a>(&'a self, session: &'a Session) -> BoxFuture<'a, Result<Session, AuthError>>;
}
