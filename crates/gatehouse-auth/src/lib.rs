//! # gatehouse-auth
//!
//! The credential and session core of Gatehouse.
//!
//! ## Modules
//!
//! - `password`: Argon2id hashing and credential input checks
//! - `jwt`: signed, time-bounded session tokens
//! - `session`: the controller behind register, login, check and logout

pub mod jwt;
pub mod password;
pub mod session;

pub use jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder, TokenError};
pub use password::{CredentialPolicy, PasswordHasher};
pub use session::SessionController;
