//! Integration tests for the Starfruit client.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p starfruit-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `session_lifecycle` - session state machine against a scripted backend
//! - `cart_state` - cart invariants and persistence round-trips
//!
//! This crate's library provides [`ScriptedBackend`], an in-process
//! [`AuthBackend`] whose responses are fixed at construction time and whose
//! call counts are observable from the outside, so tests can assert both on
//! resulting state and on which requests were actually issued.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use starfruit_client::backend::{AuthBackend, AuthPayload, BackendError};
use starfruit_client::models::Profile;
use starfruit_core::Email;

/// How a scripted endpoint answers.
#[derive(Debug, Clone)]
enum Answer {
    /// Succeed with the configured payload.
    Ok,
    /// Answer with the given non-2xx status.
    Reject(u16),
    /// Fail at the transport level.
    Down,
}

struct Inner {
    token: String,
    embedded_user: Option<Profile>,
    profile: Option<Profile>,
    login_answer: Answer,
    register_answer: Answer,
    profile_answer: Answer,
    login_calls: AtomicU32,
    profile_calls: AtomicU32,
}

/// Scripted authentication backend.
///
/// Cheaply cloneable; keep a clone in the test to read call counts after the
/// session manager has taken ownership of another.
#[derive(Clone)]
pub struct ScriptedBackend {
    inner: Arc<Inner>,
}

impl Default for ScriptedBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedBackend {
    /// A backend that issues `tok-1` and serves no profile.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                token: "tok-1".to_owned(),
                embedded_user: None,
                profile: None,
                login_answer: Answer::Ok,
                register_answer: Answer::Ok,
                profile_answer: Answer::Ok,
                login_calls: AtomicU32::new(0),
                profile_calls: AtomicU32::new(0),
            }),
        }
    }

    fn map(&self, f: impl FnOnce(&mut Inner)) -> Self {
        let inner = self.inner.as_ref();
        let mut next = Inner {
            token: inner.token.clone(),
            embedded_user: inner.embedded_user.clone(),
            profile: inner.profile.clone(),
            login_answer: inner.login_answer.clone(),
            register_answer: inner.register_answer.clone(),
            profile_answer: inner.profile_answer.clone(),
            login_calls: AtomicU32::new(0),
            profile_calls: AtomicU32::new(0),
        };
        f(&mut next);
        Self {
            inner: Arc::new(next),
        }
    }

    /// Serve this profile on successful profile fetches.
    #[must_use]
    pub fn with_profile(&self, profile: Profile) -> Self {
        self.map(|inner| inner.profile = Some(profile))
    }

    /// Embed this profile in credential-exchange responses.
    #[must_use]
    pub fn with_embedded_user(&self, profile: Profile) -> Self {
        self.map(|inner| inner.embedded_user = Some(profile))
    }

    /// Reject credential exchanges with the given status.
    #[must_use]
    pub fn rejecting_login(&self, status: u16) -> Self {
        self.map(|inner| inner.login_answer = Answer::Reject(status))
    }

    /// Reject registrations with the given status.
    #[must_use]
    pub fn rejecting_register(&self, status: u16) -> Self {
        self.map(|inner| inner.register_answer = Answer::Reject(status))
    }

    /// Reject profile fetches with the given status.
    #[must_use]
    pub fn rejecting_profile(&self, status: u16) -> Self {
        self.map(|inner| inner.profile_answer = Answer::Reject(status))
    }

    /// Fail every request at the transport level.
    #[must_use]
    pub fn unreachable(&self) -> Self {
        self.map(|inner| {
            inner.login_answer = Answer::Down;
            inner.register_answer = Answer::Down;
            inner.profile_answer = Answer::Down;
        })
    }

    /// Number of credential exchanges issued so far.
    #[must_use]
    pub fn login_calls(&self) -> u32 {
        self.inner.login_calls.load(Ordering::SeqCst)
    }

    /// Number of profile fetches issued so far.
    #[must_use]
    pub fn profile_calls(&self) -> u32 {
        self.inner.profile_calls.load(Ordering::SeqCst)
    }

    fn auth_payload(&self, answer: &Answer) -> Result<AuthPayload, BackendError> {
        match answer {
            Answer::Ok => Ok(AuthPayload {
                token: self.inner.token.clone(),
                user: self.inner.embedded_user.clone(),
            }),
            Answer::Reject(status) => Err(BackendError::Status(*status)),
            Answer::Down => Err(BackendError::Transport("connection refused".to_owned())),
        }
    }
}

impl AuthBackend for ScriptedBackend {
    async fn login(&self, _username: &str, _password: &str) -> Result<AuthPayload, BackendError> {
        self.inner.login_calls.fetch_add(1, Ordering::SeqCst);
        self.auth_payload(&self.inner.login_answer)
    }

    async fn register(&self, _email: &str, _password: &str) -> Result<AuthPayload, BackendError> {
        self.auth_payload(&self.inner.register_answer)
    }

    async fn fetch_profile(&self, _token: &str) -> Result<Profile, BackendError> {
        self.inner.profile_calls.fetch_add(1, Ordering::SeqCst);
        match &self.inner.profile_answer {
            Answer::Ok => self
                .inner
                .profile
                .clone()
                .ok_or(BackendError::Status(404)),
            Answer::Reject(status) => Err(BackendError::Status(*status)),
            Answer::Down => Err(BackendError::Transport("connection refused".to_owned())),
        }
    }
}

/// Build a profile for test scenarios.
///
/// # Panics
///
/// Panics if `name` does not form a valid email local part.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn test_profile(name: &str, roles: &[&str]) -> Profile {
    Profile {
        name: name.to_owned(),
        email: Email::parse(&format!("{name}@example.com")).unwrap(),
        roles: roles
            .iter()
            .map(|r| (*r).to_owned())
            .collect::<HashSet<_>>(),
    }
}
