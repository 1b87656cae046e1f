//! Cognito API calls, mapped onto [`AuthError`].

use std::collections::HashMap;

use aws_sdk_cognitoidentityprovider::Client;
use aws_sdk_cognitoidentityprovider::error::ProvideErrorMetadata;
use aws_sdk_cognitoidentityprovider::types::{AttributeType, AuthFlowType, AuthenticationResultType};
use tracing::info;
use uuid::Uuid;

use crate::error::AuthError;
use crate::provider::AuthUser;

/// Tokens returned by a successful authentication.
pub struct Tokens {
    pub access_token: String,
    pub id_token: String,
    pub refresh_token: String,
}

impl Tokens {
    fn from_result(result: &AuthenticationResultType, fallback_refresh: &str) -> Self {
        Self {
            access_token: result.access_token().unwrap_or_default().to_string(),
            id_token: result.id_token().unwrap_or_default().to_string(),
            refresh_token: result
                .refresh_token()
                .unwrap_or(fallback_refresh)
                .to_string(),
        }
    }
}

/// USER_PASSWORD_AUTH with the email as username.
pub async fn password_auth(
    client: &Client,
    client_id: &str,
    email: &str,
    password: &str,
) -> Result<Tokens, AuthError> {
    info!(email, "initiating password auth");

    let params = HashMap::from([
        ("USERNAME".to_string(), email.to_string()),
        ("PASSWORD".to_string(), password.to_string()),
    ]);

    let resp = client
        .initiate_auth()
        .auth_flow(AuthFlowType::UserPasswordAuth)
        .client_id(client_id)
        .set_auth_parameters(Some(params))
        .send()
        .await
        .map_err(|e| {
            let err = e.into_service_error();
            if err.is_not_authorized_exception() || err.is_user_not_found_exception() {
                AuthError::InvalidCredentials
            } else if err.is_user_not_confirmed_exception() {
                AuthError::UserNotConfirmed
            } else {
                AuthError::Cognito(err.to_string())
            }
        })?;

    // Challenges (MFA, new password) are not enabled on the pool.
    resp.authentication_result()
        .map(|result| Tokens::from_result(result, ""))
        .ok_or_else(|| AuthError::Cognito("authentication returned a challenge".to_string()))
}

/// REFRESH_TOKEN_AUTH. Cognito does not rotate the refresh token here, so the
/// one passed in is kept.
pub async fn refresh_auth(
    client: &Client,
    client_id: &str,
    refresh_token: &str,
) -> Result<Tokens, AuthError> {
    let params = HashMap::from([("REFRESH_TOKEN".to_string(), refresh_token.to_string())]);

    let resp = client
        .initiate_auth()
        .auth_flow(AuthFlowType::RefreshTokenAuth)
        .client_id(client_id)
        .set_auth_parameters(Some(params))
        .send()
        .await
        .map_err(|e| {
            let err = e.into_service_error();
            if err.is_not_authorized_exception() {
                AuthError::InvalidSession
            } else {
                AuthError::Cognito(err.to_string())
            }
        })?;

    resp.authentication_result()
        .map(|result| Tokens::from_result(result, refresh_token))
        .ok_or(AuthError::InvalidSession)
}

/// Register a user. Returns the new user's id and whether the pool
/// auto-confirmed the account.
pub async fn sign_up(
    client: &Client,
    client_id: &str,
    email: &str,
    password: &str,
    full_name: &str,
) -> Result<(Uuid, bool), AuthError> {
    info!(email, "signing up");

    let mut attributes = vec![attribute("email", email)?];
    if !full_name.trim().is_empty() {
        attributes.push(attribute("name", full_name)?);
    }

    let resp = client
        .sign_up()
        .client_id(client_id)
        .username(email)
        .password(password)
        .set_user_attributes(Some(attributes))
        .send()
        .await
        .map_err(|e| {
            let err = e.into_service_error();
            if err.is_username_exists_exception() {
                AuthError::UserExists
            } else if err.is_invalid_password_exception() {
                AuthError::InvalidPassword(err.message().unwrap_or_default().to_string())
            } else {
                AuthError::Cognito(err.to_string())
            }
        })?;

    let id = Uuid::parse_str(resp.user_sub())?;
    Ok((id, resp.user_confirmed()))
}

/// Invalidate every token issued to the access token's user.
pub async fn global_sign_out(client: &Client, access_token: &str) -> Result<(), AuthError> {
    client
        .global_sign_out()
        .access_token(access_token)
        .send()
        .await
        .map_err(|e| {
            let err = e.into_service_error();
            if err.is_not_authorized_exception() {
                AuthError::InvalidSession
            } else {
                AuthError::Cognito(err.to_string())
            }
        })?;
    Ok(())
}

/// Look up the user for an access token via its `sub` and `email` attributes.
pub async fn get_user(client: &Client, access_token: &str) -> Result<AuthUser, AuthError> {
    let resp = client
        .get_user()
        .access_token(access_token)
        .send()
        .await
        .map_err(|e| {
            let err = e.into_service_error();
            if err.is_not_authorized_exception() || err.is_user_not_found_exception() {
                AuthError::InvalidSession
            } else {
                AuthError::Cognito(err.to_string())
            }
        })?;

    let attr = |name: &str| {
        resp.user_attributes()
            .iter()
            .find(|a| a.name() == name)
            .and_then(|a| a.value())
            .map(str::to_string)
    };

    let sub = attr("sub").ok_or_else(|| AuthError::Cognito("user has no sub attribute".to_string()))?;
    Ok(AuthUser {
        id: Uuid::parse_str(&sub)?,
        email: attr("email").unwrap_or_default(),
    })
}

fn attribute(name: &str, value: &str) -> Result<AttributeType, AuthError> {
    AttributeType::builder()
        .name(name)
        .value(value)
        .build()
        .map_err(|e| AuthError::Cognito(e.to_string()))
}
