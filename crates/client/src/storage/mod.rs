//! Persistence adapter: cookie and key-value stores.
//!
//! Two independent stores back the state engine, with no business logic of
//! their own:
//!
//! - a [`CookieStore`] holding the bearer token as a single named value with
//!   security attributes
//! - a [`KeyValueStore`] holding the JSON-serialized cart under a well-known
//!   key
//!
//! In-memory implementations serve tests and ephemeral contexts; [`FileStore`]
//! gives desktop builds a durable key-value store.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::{MemoryCookieStore, MemoryStore};

use thiserror::Error;

/// Well-known storage keys.
pub mod keys {
    /// Cookie name holding the raw bearer token.
    pub const TOKEN: &str = "token";

    /// Key-value store key holding the JSON array of cart items.
    pub const CART: &str = "cart";
}

/// Errors that can occur writing to a persistent store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure.
    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// `SameSite` cookie attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    /// Cookie is only sent in a first-party context.
    Strict,
    /// Cookie is withheld on cross-site subrequests.
    Lax,
    /// Cookie is sent in all contexts.
    None,
}

/// Security attributes attached to a cookie write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookieAttributes {
    /// Whether the cookie is restricted to secure transports.
    pub secure: bool,
    /// `SameSite` policy.
    pub same_site: SameSite,
}

impl CookieAttributes {
    /// Attributes for the session token cookie.
    ///
    /// `SameSite` is always `Strict` for the token; `secure` follows the
    /// deployment (plain-HTTP development turns it off).
    #[must_use]
    pub const fn token(secure: bool) -> Self {
        Self {
            secure,
            same_site: SameSite::Strict,
        }
    }
}

/// Named cookie values with security attributes.
///
/// Implementations carry no business logic; repeated writes to the same name
/// are safe and last-write-wins.
pub trait CookieStore {
    /// Read a cookie value by name.
    fn get(&self, name: &str) -> Option<String>;

    /// Write a cookie value with the given attributes.
    fn set(&mut self, name: &str, value: &str, attributes: CookieAttributes);

    /// Remove a cookie by name; removing an absent cookie is a no-op.
    fn remove(&mut self, name: &str);
}

/// String values under string keys.
pub trait KeyValueStore {
    /// Read a value by key.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing medium cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a key; removing an absent key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing medium cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}
