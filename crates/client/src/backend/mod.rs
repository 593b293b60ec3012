//! Authentication backend contract.
//!
//! The state engine never talks HTTP directly; it calls an [`AuthBackend`]
//! and reacts to its outcome. [`HttpAuthBackend`] is the production
//! implementation; tests substitute a scripted one.

mod http;

pub use http::HttpAuthBackend;

use serde::Deserialize;
use thiserror::Error;

use crate::models::Profile;

/// Errors a backend call can produce.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend answered with a non-2xx status.
    #[error("backend returned status {0}")]
    Status(u16),
    /// The request never produced an HTTP response.
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Successful response of a credential exchange or registration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    /// Opaque bearer token issued by the backend.
    pub token: String,
    /// Profile embedded in the response, when the backend provides one.
    #[serde(default)]
    pub user: Option<Profile>,
}

/// The three logical requests the session manager issues.
///
/// All calls are non-blocking from the engine's perspective; suspension
/// happens only at these await points.
#[allow(async_fn_in_trait)]
pub trait AuthBackend {
    /// Exchange credentials for a token.
    ///
    /// # Errors
    ///
    /// [`BackendError::Status`] on any non-2xx answer (wrong credentials
    /// included), [`BackendError::Transport`] on network failure.
    async fn login(&self, username: &str, password: &str) -> Result<AuthPayload, BackendError>;

    /// Register a new account and exchange it for a token in one step.
    ///
    /// # Errors
    ///
    /// Same contract as [`AuthBackend::login`].
    async fn register(&self, email: &str, password: &str) -> Result<AuthPayload, BackendError>;

    /// Fetch the profile behind a bearer token.
    ///
    /// # Errors
    ///
    /// [`BackendError::Status`] on any non-2xx answer (a stale or revoked
    /// token typically yields 401), [`BackendError::Transport`] on network
    /// failure.
    async fn fetch_profile(&self, token: &str) -> Result<Profile, BackendError>;
}
