//! Authentication module
//!
//! Provides JWT session tokens, argon2 password hashing and the request
//! extractor that authenticates protected routes.

mod jwt;
mod middleware;
mod password;

pub use jwt::{Claims, JwtService};
pub use middleware::AuthUser;
pub use password::{HashingError, PasswordService};
