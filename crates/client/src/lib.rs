//! Starfruit client library.
//!
//! The client-side state engine for the Starfruit storefront: it owns the
//! authentication session lifecycle (token acquisition, profile sync,
//! invalidation) and the shopping cart (item merge, quantity edits, derived
//! totals), both written through to persistent local storage.
//!
//! Everything else in the application - page layout, visual components, the
//! route table - is thin glue that calls into this crate through the
//! [`session::SessionManager`] and [`cart::CartManager`] operation surfaces
//! and reads derived state back out.
//!
//! # Architecture
//!
//! - [`storage`] - persistence adapter: a cookie store for the bearer token
//!   and a key-value store for the serialized cart
//! - [`backend`] - the authentication backend contract and its HTTP
//!   implementation
//! - [`session`] - session manager orchestrating login, registration, logout
//!   and profile refresh
//! - [`cart`] - cart manager with write-through persistence
//! - [`guard`] - the navigation read contract consumed by the route table
//!
//! Managers are explicit service objects constructed once at process start and
//! passed by reference to every consumer; there is no ambient global state.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod cart;
pub mod config;
pub mod guard;
pub mod models;
pub mod session;
pub mod storage;
