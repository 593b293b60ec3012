//! User profile types.
//!
//! The profile is what the backend knows about the authenticated user; the
//! session manager replaces it wholesale on every successful profile fetch.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use starfruit_core::{Email, SELLER_ROLE};

/// A user profile as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Display name.
    pub name: String,
    /// The user's email address.
    pub email: Email,
    /// Role markers assigned by the backend.
    #[serde(default)]
    pub roles: HashSet<String>,
}

impl Profile {
    /// Build a minimal profile from an email alone.
    ///
    /// Used as a fallback when a registration response carries a token but no
    /// embedded profile: the display name is the email's local part and the
    /// role set is empty.
    #[must_use]
    pub fn minimal(email: Email) -> Self {
        Self {
            name: email.local_part().to_owned(),
            email,
            roles: HashSet::new(),
        }
    }

    /// Whether the profile carries the given role marker.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    /// Whether the profile carries the seller role marker.
    #[must_use]
    pub fn has_seller_role(&self) -> bool {
        self.has_role(SELLER_ROLE)
    }
}
