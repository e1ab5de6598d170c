//! rusty-forum/crates/domains/src/lib.rs
//!
//! The domain models and port definitions for the forum.

pub mod error;
pub mod models;
pub mod ports;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use ports::*;
