//! # storage-adapters
//!
//! Store implementations of the `domains` repository ports.
//! The memory store is always compiled; Postgres sits behind `db-postgres`.

pub mod memory;

#[cfg(feature = "db-postgres")]
pub mod postgres;

pub use memory::MemoryStore;

#[cfg(feature = "db-postgres")]
pub use postgres::PgStore;
