//! Password hashing and credential input checks.

pub mod hasher;
pub mod validator;

pub use hasher::PasswordHasher;
pub use validator::CredentialPolicy;
