//! Role markers carried on user profiles.
//!
//! Roles are opaque strings assigned by the backend; the client only ever
//! inspects them for membership.

/// Role marker granting access to seller/admin surfaces.
pub const SELLER_ROLE: &str = "ROLE_SELLER";
