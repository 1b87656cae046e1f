use aws_sdk_cognitoidentityprovider::Client;
use stackwise_core::BoxFuture;
use tracing::info;

use crate::error::AuthError;
use crate::flows::{self, Tokens};
use crate::provider::{AuthProvider, AuthUser, Session, SignUpOutcome};

/// Cognito user pool app client without a secret.
#[derive(Clone)]
pub struct CognitoAuthProvider {
    client: Client,
    client_id: String,
}

impl CognitoAuthProvider {
    pub fn new(client: Client, client_id: impl Into<String>) -> Self {
        Self {
            client,
            client_id: client_id.into(),
        }
    }

    async fn session(&self, tokens: Tokens) -> Result<Session, AuthError> {
        let user = flows::get_user(&self.client, &tokens.access_token).await?;
        Ok(Session {
            access_token: tokens.access_token,
            id_token: tokens.id_token,
            refresh_token: tokens.refresh_token,
            user,
        })
    }
}

impl AuthProvider for CognitoAuthProvider {
    fn sign_in<'a>(
        &'a self,
        email: &'a str,
        password: &'a str,
    ) -> BoxFuture<'a, Result<Session, AuthError>> {
        Box::pin(async move {
            let tokens = flows::password_auth(&self.client, &self.client_id, email, password).await?;
            let session = self.session(tokens).await?;
            info!(user_id = %session.user.id, "signed in");
            Ok(session)
        })
    }

    fn sign_up<'a>(
        &'a self,
        email: &'a str,
        password: &'a str,
        full_name: &'a str,
    ) -> BoxFuture<'a, Result<SignUpOutcome, AuthError>> {
        Box::pin(async move {
            let (id, confirmed) =
                flows::sign_up(&self.client, &self.client_id, email, password, full_name).await?;
            let user = AuthUser {
                id,
                email: email.to_string(),
            };

            let session = if confirmed {
                let tokens =
                    flows::password_auth(&self.client, &self.client_id, email, password).await?;
                Some(self.session(tokens).await?)
            } else {
                info!(user_id = %id, "sign-up awaiting confirmation");
                None
            };

            Ok(SignUpOutcome { user, session })
        })
    }

    fn sign_out<'a>(&'a self, session: &'a Session) -> BoxFuture<'a, Result<(), AuthError>> {
        Box::pin(async move {
            flows::global_sign_out(&self.client, &session.access_token).await?;
            info!(user_id = %session.user.id, "signed out");
            Ok(())
        })
    }

    fn get_user<'a>(&'a self, access_token: &'a str) -> BoxFuture<'a, Result<AuthUser, AuthError>> {
        Box::pin(flows::get_user(&self.client, access_token))
    }

    fn refresh<'a>(&'a self, session: &'a Session) -> BoxFuture<'a, Result<Session, AuthError>> {
        Box::pin(async move {
            let tokens =
                flows::refresh_auth(&self.client, &self.client_id, &session.refresh_token).await?;
            Ok(Session {
                access_token: tokens.access_token,
                id_token: tokens.id_token,
                refresh_token: tokens.refresh_token,
                user: session.user.clone(),
            })
        })
    }
}
