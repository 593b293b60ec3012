//! Domain models for the client state engine.

pub mod cart;
pub mod profile;

pub use cart::{CartItem, Product};
pub use profile::Profile;
