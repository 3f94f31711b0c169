//! # gatehouse-core
//!
//! Core crate for Gatehouse. Contains the configuration schemas and the
//! unified error system shared by every other crate in the workspace.
//!
//! This crate has **no** internal dependencies on other Gatehouse crates.

pub mod config;
pub mod error;
pub mod result;

pub use config::AppConfig;
pub use error::{AppError, ErrorKind};
pub use result::AppResult;
