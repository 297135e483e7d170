//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and the auth primitives.

pub mod auth;
pub mod goals;

pub use auth::AuthService;
pub use goals::GoalsService;
