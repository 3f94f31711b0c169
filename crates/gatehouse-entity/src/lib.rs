//! # gatehouse-entity
//!
//! Domain entity models for Gatehouse. Database entities derive
//! `sqlx::FromRow` so repositories can map rows directly.

pub mod user;
