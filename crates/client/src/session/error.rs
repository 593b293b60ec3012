//! Session error types.

use thiserror::Error;

use starfruit_core::EmailError;

/// Errors surfaced by session operations.
///
/// Any of these means the session has already been collapsed to the
/// anonymous state: no token, no profile, no persisted cookie. The engine
/// never leaves a partially-valid session behind a failure.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The backend rejected the credential exchange or registration.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The token was accepted but the profile behind it could not be loaded.
    #[error("profile unavailable: {0}")]
    ProfileUnavailable(String),

    /// The request never reached the backend.
    #[error("transport failure: {0}")]
    Transport(String),
}
