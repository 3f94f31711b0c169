//! Per-request session lifecycle.

pub mod controller;

pub use controller::SessionController;
