use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("an account with this email already exists")]
    UserExists,

    #[error("email address has not been confirmed")]
    UserNotConfirmed,

    #[error("password does not meet requirements: {0}")]
    InvalidPassword(String),

    #[error("session is no longer valid")]
    InvalidSession,

    #[error("user id is not a UUID: {0}")]
    InvalidUserId(#[from] uuid::Error),

    #[error("Cognito error: {0}")]
    Cognito(String),
}
