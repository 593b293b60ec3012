//! Core types for the Starfruit client.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod role;

pub use email::{Email, EmailError};
pub use id::ProductId;
pub use price::{Price, PriceError};
pub use role::SELLER_ROLE;
