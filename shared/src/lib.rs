//! Fitness Goals Shared Library
//!
//! This crate contains the wire types, public models, error taxonomy and
//! input validation shared by the backend and any Rust client.

pub mod errors;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use models::{Goal, User};
pub use types::*;
