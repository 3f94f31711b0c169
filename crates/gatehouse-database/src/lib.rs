//! # gatehouse-database
//!
//! PostgreSQL connection management and the user store: the [`UserStore`]
//! trait with a Postgres repository and an in-memory implementation.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryUserStore;
pub use repositories::PgUserRepository;
pub use store::UserStore;
