//! Session manager.
//!
//! Owns authentication state - bearer token, authenticated flag, user
//! profile - and orchestrates login, registration, logout and profile refresh
//! against the backend and the cookie store.
//!
//! # State machine
//!
//! `Anonymous` (no token) → `Authenticating` (a backend call in flight) →
//! `Authenticated` (token present, profile possibly still loading) → back to
//! `Anonymous` on logout or on any detected invalidity.
//!
//! Invariants, held at every observable point:
//! - `is_authenticated()` is true iff a token is present
//! - clearing the token clears the profile in the same transition
//!
//! # Concurrency
//!
//! Operations take `&mut self`, so two operations on one manager cannot
//! overlap within safe Rust; state mutations are atomic with respect to other
//! synchronous code. Callers that hand out interior-mutable clones and
//! interleave two logins reintroduce the upstream last-write-wins behavior:
//! whichever call resolves last overwrites the other's state. Debounce at the
//! call site if that matters. In-flight requests cannot be cancelled; a
//! discarded future simply never applies its mutation.

mod error;

pub use error::SessionError;

use secrecy::{ExposeSecret, SecretString};

use starfruit_core::Email;

use crate::backend::{AuthBackend, BackendError};
use crate::models::Profile;
use crate::storage::{CookieAttributes, CookieStore, keys};

/// Authentication session manager.
///
/// Constructed once at process start via [`SessionManager::restore`] or
/// [`SessionManager::start`] and passed by reference to every consumer.
pub struct SessionManager<B, C> {
    backend: B,
    cookies: C,
    cookie_attributes: CookieAttributes,
    token: Option<SecretString>,
    user: Option<Profile>,
    authenticated: bool,
}

impl<B: AuthBackend, C: CookieStore> SessionManager<B, C> {
    /// Restore a session from the persisted token cookie.
    ///
    /// A persisted token is trusted optimistically: the manager reports
    /// authenticated before the token has been validated. Callers should
    /// follow up with [`SessionManager::fetch_profile`] (or construct via
    /// [`SessionManager::start`], which awaits it) so a stale token corrects
    /// itself to anonymous.
    #[must_use]
    pub fn restore(backend: B, cookies: C, cookie_attributes: CookieAttributes) -> Self {
        let token = cookies.get(keys::TOKEN).map(SecretString::from);
        let authenticated = token.is_some();
        if authenticated {
            tracing::debug!("restored persisted token, validation pending");
        }

        Self {
            backend,
            cookies,
            cookie_attributes,
            token,
            user: None,
            authenticated,
        }
    }

    /// Restore a session and validate any persisted token before returning.
    pub async fn start(backend: B, cookies: C, cookie_attributes: CookieAttributes) -> Self {
        let mut session = Self::restore(backend, cookies, cookie_attributes);
        session.fetch_profile().await;
        session
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Exchange credentials for a session.
    ///
    /// On success the token is stored in memory and persisted to the cookie
    /// store with `SameSite=Strict`, then the profile is loaded (a profile
    /// embedded in the exchange response short-circuits the extra request).
    ///
    /// # Errors
    ///
    /// - [`SessionError::InvalidCredentials`] if the backend rejects the
    ///   exchange
    /// - [`SessionError::Transport`] if the backend is unreachable
    /// - [`SessionError::ProfileUnavailable`] if the token was issued but the
    ///   profile behind it could not be loaded
    ///
    /// Every error path leaves the session anonymous with no persisted cookie.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), SessionError> {
        tracing::debug!("starting credential exchange");
        let payload = match self.backend.login(email, password).await {
            Ok(payload) => payload,
            Err(e) => {
                self.clear();
                return Err(credential_error(e));
            }
        };

        self.install_token(payload.token);

        match payload.user {
            Some(user) => {
                self.user = Some(user);
                Ok(())
            }
            None => self
                .refresh_profile()
                .await
                .map_err(|e| SessionError::ProfileUnavailable(e.to_string())),
        }
    }

    /// Register a new account and open a session for it.
    ///
    /// Same contract as [`SessionManager::login`], against the registration
    /// endpoint. When the response carries no embedded profile, a minimal one
    /// is derived from the supplied email instead of issuing a profile fetch.
    ///
    /// # Errors
    ///
    /// As [`SessionManager::login`], plus [`SessionError::InvalidEmail`] when
    /// the email fails local validation before any request is sent.
    pub async fn register(&mut self, email: &str, password: &str) -> Result<(), SessionError> {
        let parsed = Email::parse(email)?;

        tracing::debug!("starting registration");
        let payload = match self.backend.register(email, password).await {
            Ok(payload) => payload,
            Err(e) => {
                self.clear();
                return Err(credential_error(e));
            }
        };

        self.install_token(payload.token);
        self.user = Some(
            payload
                .user
                .unwrap_or_else(|| Profile::minimal(parsed)),
        );
        Ok(())
    }

    /// Refresh the profile behind the current token.
    ///
    /// No-op without a token. On success the stored profile is replaced. Any
    /// failure - stale token, revoked token, unreachable backend - silently
    /// downgrades the session to anonymous and removes the persisted cookie;
    /// this is how a stale token self-heals.
    pub async fn fetch_profile(&mut self) {
        if self.token.is_none() {
            return;
        }
        if let Err(e) = self.refresh_profile().await {
            tracing::warn!("discarding session token: {e}");
        }
    }

    /// Drop the session: token, profile, flag and persisted cookie.
    ///
    /// Always succeeds; there is no remote side effect.
    pub fn logout(&mut self) {
        tracing::debug!("logging out");
        self.clear();
    }

    // =========================================================================
    // Read surface
    // =========================================================================

    /// Whether a token is currently held.
    ///
    /// Optimistically true right after [`SessionManager::restore`] finds a
    /// persisted token, before validation has resolved.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// The current profile, once loaded.
    #[must_use]
    pub const fn user(&self) -> Option<&Profile> {
        self.user.as_ref()
    }

    /// The current bearer token.
    #[must_use]
    pub const fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    /// The cookie store this session writes through to.
    #[must_use]
    pub const fn cookies(&self) -> &C {
        &self.cookies
    }

    /// Whether the current profile carries the seller role.
    #[must_use]
    pub fn has_seller_role(&self) -> bool {
        self.user.as_ref().is_some_and(Profile::has_seller_role)
    }

    /// Whether the admin surface may be shown: authenticated seller.
    #[must_use]
    pub fn can_access_admin(&self) -> bool {
        self.authenticated && self.has_seller_role()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Store a freshly issued token and persist it to the cookie store.
    fn install_token(&mut self, token: String) {
        self.cookies.set(keys::TOKEN, &token, self.cookie_attributes);
        self.token = Some(SecretString::from(token));
        self.authenticated = true;
    }

    /// Fetch the profile for the held token, collapsing the session on failure.
    async fn refresh_profile(&mut self) -> Result<(), BackendError> {
        let Some(token) = self.token.as_ref() else {
            return Ok(());
        };

        match self.backend.fetch_profile(token.expose_secret()).await {
            Ok(profile) => {
                self.user = Some(profile);
                Ok(())
            }
            Err(e) => {
                self.clear();
                Err(e)
            }
        }
    }

    /// Transition to anonymous: token, profile and cookie all go together.
    fn clear(&mut self) {
        self.token = None;
        self.user = None;
        self.authenticated = false;
        self.cookies.remove(keys::TOKEN);
    }
}

/// Map a failed credential exchange to the surfaced error.
fn credential_error(e: BackendError) -> SessionError {
    match e {
        BackendError::Status(_) => SessionError::InvalidCredentials,
        BackendError::Transport(message) => SessionError::Transport(message),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicU32, Ordering};

    use starfruit_core::SELLER_ROLE;

    use crate::backend::AuthPayload;
    use crate::storage::MemoryCookieStore;

    use super::*;

    /// Scripted backend for unit tests.
    #[derive(Default)]
    struct StubBackend {
        reject_login: bool,
        transport_down: bool,
        embedded_user: Option<Profile>,
        profile: Option<Profile>,
        reject_profile: bool,
        profile_calls: AtomicU32,
    }

    impl StubBackend {
        fn profile_calls(&self) -> u32 {
            self.profile_calls.load(Ordering::SeqCst)
        }
    }

    fn profile(name: &str, roles: &[&str]) -> Profile {
        Profile {
            name: name.to_owned(),
            email: Email::parse(&format!("{name}@example.com")).unwrap(),
            roles: roles.iter().map(|r| (*r).to_owned()).collect::<HashSet<_>>(),
        }
    }

    impl AuthBackend for StubBackend {
        async fn login(&self, _: &str, _: &str) -> Result<AuthPayload, BackendError> {
            if self.transport_down {
                return Err(BackendError::Transport("connection refused".into()));
            }
            if self.reject_login {
                return Err(BackendError::Status(401));
            }
            Ok(AuthPayload {
                token: "tok-1".to_owned(),
                user: self.embedded_user.clone(),
            })
        }

        async fn register(&self, _: &str, _: &str) -> Result<AuthPayload, BackendError> {
            if self.reject_login {
                return Err(BackendError::Status(409));
            }
            Ok(AuthPayload {
                token: "tok-1".to_owned(),
                user: self.embedded_user.clone(),
            })
        }

        async fn fetch_profile(&self, _: &str) -> Result<Profile, BackendError> {
            self.profile_calls.fetch_add(1, Ordering::SeqCst);
            if self.reject_profile {
                return Err(BackendError::Status(401));
            }
            self.profile.clone().ok_or(BackendError::Status(404))
        }
    }

    const ATTRS: CookieAttributes = CookieAttributes::token(true);

    #[tokio::test]
    async fn test_login_success_persists_cookie_and_profile() {
        let backend = StubBackend {
            profile: Some(profile("carol", &[])),
            ..StubBackend::default()
        };
        let mut session = SessionManager::restore(backend, MemoryCookieStore::new(), ATTRS);

        session.login("carol@example.com", "hunter2").await.unwrap();

        assert!(session.is_authenticated());
        assert_eq!(session.user().unwrap().name, "carol");
        assert_eq!(session.cookies.get(keys::TOKEN).as_deref(), Some("tok-1"));
    }

    #[tokio::test]
    async fn test_login_embedded_profile_skips_fetch() {
        let backend = StubBackend {
            embedded_user: Some(profile("carol", &[])),
            ..StubBackend::default()
        };
        let mut session = SessionManager::restore(backend, MemoryCookieStore::new(), ATTRS);

        session.login("carol@example.com", "hunter2").await.unwrap();

        assert!(session.is_authenticated());
        assert_eq!(session.backend.profile_calls(), 0);
    }

    #[tokio::test]
    async fn test_login_rejected_leaves_anonymous() {
        let backend = StubBackend {
            reject_login: true,
            ..StubBackend::default()
        };
        let mut session = SessionManager::restore(backend, MemoryCookieStore::new(), ATTRS);

        let err = session.login("u@x.com", "bad").await.unwrap_err();

        assert!(matches!(err, SessionError::InvalidCredentials));
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
        assert_eq!(session.cookies.get(keys::TOKEN), None);
    }

    #[tokio::test]
    async fn test_login_transport_failure_surfaced() {
        let backend = StubBackend {
            transport_down: true,
            ..StubBackend::default()
        };
        let mut session = SessionManager::restore(backend, MemoryCookieStore::new(), ATTRS);

        let err = session.login("u@x.com", "pw").await.unwrap_err();

        assert!(matches!(err, SessionError::Transport(_)));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_profile_failure_collapses_session() {
        let backend = StubBackend {
            reject_profile: true,
            ..StubBackend::default()
        };
        let mut session = SessionManager::restore(backend, MemoryCookieStore::new(), ATTRS);

        let err = session.login("u@x.com", "pw").await.unwrap_err();

        assert!(matches!(err, SessionError::ProfileUnavailable(_)));
        assert!(!session.is_authenticated());
        assert_eq!(session.cookies.get(keys::TOKEN), None);
    }

    #[tokio::test]
    async fn test_register_falls_back_to_minimal_profile() {
        let backend = StubBackend::default();
        let mut session = SessionManager::restore(backend, MemoryCookieStore::new(), ATTRS);

        session.register("dave@example.com", "hunter2").await.unwrap();

        assert!(session.is_authenticated());
        let user = session.user().unwrap();
        assert_eq!(user.name, "dave");
        assert!(user.roles.is_empty());
        // No profile request was needed
        assert_eq!(session.backend.profile_calls(), 0);
    }

    #[tokio::test]
    async fn test_register_invalid_email_sends_nothing() {
        let backend = StubBackend::default();
        let mut session = SessionManager::restore(backend, MemoryCookieStore::new(), ATTRS);

        let err = session.register("not-an-email", "pw").await.unwrap_err();

        assert!(matches!(err, SessionError::InvalidEmail(_)));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_restore_without_token_issues_no_request() {
        let backend = StubBackend::default();
        let mut session = SessionManager::restore(backend, MemoryCookieStore::new(), ATTRS);

        assert!(!session.is_authenticated());
        session.fetch_profile().await;
        assert_eq!(session.backend.profile_calls(), 0);
    }

    #[tokio::test]
    async fn test_restore_is_optimistic_then_corrects() {
        let backend = StubBackend {
            reject_profile: true,
            ..StubBackend::default()
        };
        let cookies = MemoryCookieStore::with_cookie(keys::TOKEN, "stale", ATTRS);
        let mut session = SessionManager::restore(backend, cookies, ATTRS);

        // Optimistic before validation resolves
        assert!(session.is_authenticated());

        session.fetch_profile().await;

        assert!(!session.is_authenticated());
        assert_eq!(session.cookies.get(keys::TOKEN), None);
    }

    #[tokio::test]
    async fn test_start_validates_persisted_token() {
        let backend = StubBackend {
            profile: Some(profile("carol", &[SELLER_ROLE])),
            ..StubBackend::default()
        };
        let cookies = MemoryCookieStore::with_cookie(keys::TOKEN, "tok-1", ATTRS);
        let session = SessionManager::start(backend, cookies, ATTRS).await;

        assert!(session.is_authenticated());
        assert!(session.has_seller_role());
        assert!(session.can_access_admin());
    }

    #[tokio::test]
    async fn test_logout_clears_everything() {
        let backend = StubBackend {
            profile: Some(profile("carol", &[])),
            ..StubBackend::default()
        };
        let mut session = SessionManager::restore(backend, MemoryCookieStore::new(), ATTRS);
        session.login("carol@example.com", "pw").await.unwrap();

        session.logout();

        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
        assert!(session.token().is_none());
        assert_eq!(session.cookies.get(keys::TOKEN), None);
    }

    #[tokio::test]
    async fn test_admin_requires_seller_role() {
        let backend = StubBackend {
            profile: Some(profile("carol", &["ROLE_USER"])),
            ..StubBackend::default()
        };
        let mut session = SessionManager::restore(backend, MemoryCookieStore::new(), ATTRS);
        session.login("carol@example.com", "pw").await.unwrap();

        assert!(session.is_authenticated());
        assert!(!session.has_seller_role());
        assert!(!session.can_access_admin());
    }
}
