use std::collections::HashMap;
use std::sync::Arc;

use stackwise_core::BoxFuture;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::error::AuthError;
use crate::provider::{AuthProvider, AuthUser, Session, SignUpOutcome};

const MIN_PASSWORD_LEN: usize = 6;

struct Account {
    user: AuthUser,
    password: String,
}

#[derive(Default)]
struct Accounts {
    by_email: HashMap<String, Account>,
    /// access token -> user id
    access: HashMap<String, Uuid>,
    /// refresh token -> user id
    refresh: HashMap<String, Uuid>,
}

impl Accounts {
    fn issue(&mut self, user: &AuthUser) -> Session {
        let access_token = Uuid::new_v4().to_string();
        let refresh_token = Uuid::new_v4().to_string();
        self.access.insert(access_token.clone(), user.id);
        self.refresh.insert(refresh_token.clone(), user.id);
        Session {
            access_token,
            id_token: Uuid::new_v4().to_string(),
            refresh_token,
            user: user.clone(),
        }
    }

    fn user(&self, id: Uuid) -> Option<&AuthUser> {
        self.by_email.values().map(|a| &a.user).find(|u| u.id == id)
    }
}

/// In-process accounts with opaque random tokens. Accounts are confirmed on
/// sign-up. Clones share the same accounts.
#[derive(Clone, Default)]
pub struct MemoryAuthProvider {
    accounts: Arc<Mutex<Accounts>>,
}

impl MemoryAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

impl AuthProvider for MemoryAuthProvider {
    fn sign_in<'a>(
        &'a self,
        email: &'a str,
        password: &'a str,
    ) -> BoxFuture<'a, Result<Session, AuthError>> {
        Box::pin(async move {
            let mut accounts = self.accounts.lock().await;
            let user = match accounts.by_email.get(&normalize(email)) {
                Some(account) if account.password == password => account.user.clone(),
                _ => return Err(AuthError::InvalidCredentials),
            };
            debug!(user_id = %user.id, "signed in");
            Ok(accounts.issue(&user))
        })
    }

    fn sign_up<'a>(
        &'a self,
        email: &'a str,
        password: &'a str,
        _full_name: &'a str,
    ) -> BoxFuture<'a, Result<SignUpOutcome, AuthError>> {
        Box::pin(async move {
            if password.chars().count() < MIN_PASSWORD_LEN {
                return Err(AuthError::InvalidPassword(format!(
                    "must be at least {MIN_PASSWORD_LEN} characters"
                )));
            }

            let key = normalize(email);
            let mut accounts = self.accounts.lock().await;
            if accounts.by_email.contains_key(&key) {
                return Err(AuthError::UserExists);
            }

            let user = AuthUser {
                id: Uuid::new_v4(),
                email: key.clone(),
            };
            accounts.by_email.insert(
                key,
                Account {
                    user: user.clone(),
                    password: password.to_string(),
                },
            );
            let session = accounts.issue(&user);
            debug!(user_id = %user.id, "signed up");
            Ok(SignUpOutcome {
                user,
                session: Some(session),
            })
        })
    }

    fn sign_out<'a>(&'a self, session: &'a Session) -> BoxFuture<'a, Result<(), AuthError>> {
        Box::pin(async move {
            let mut accounts = self.accounts.lock().await;
            let id = session.user.id;
            accounts.access.retain(|_, user| *user != id);
            accounts.refresh.retain(|_, user| *user != id);
            Ok(())
        })
    }

    fn get_user<'a>(&'a self, access_token: &'a str) -> BoxFuture<'a, Result<AuthUser, AuthError>> {
        Box::pin(async move {
            let accounts = self.accounts.lock().await;
            accounts
                .access
                .get(access_token)
                .and_then(|id| accounts.user(*id))
                .cloned()
                .ok_or(AuthError::InvalidSession)
        })
    }

    fn refresh<'a>(&'a self, session: &'a Session) -> BoxFuture<'a, Result<Session, AuthError>> {
        Box::pin(async move {
            let mut accounts = self.accounts.lock().await;
            let user = accounts
                .refresh
                .get(&session.refresh_token)
                .and_then(|id| accounts.user(*id))
                .cloned()
                .ok_or(AuthError::InvalidSession)?;

            let access_token = Uuid::new_v4().to_string();
            accounts.access.insert(access_token.clone(), user.id);
            Ok(Session {
                access_token,
                id_token: Uuid::new_v4().to_string(),
                refresh_token: session.refresh_token.clone(),
                user,
            })
        })
    }
}
