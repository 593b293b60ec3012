//! Starfruit Core - Shared types library.
//!
//! This crate provides the validated types used across the Starfruit client
//! components:
//! - `client` - Session and cart state engine
//! - `integration-tests` - Scenario tests against a scripted backend
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no storage.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product identifiers, validated emails, non-negative prices,
//!   and role markers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
