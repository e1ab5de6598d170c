//! # Handlers
//!
//! Each handler performs its store operation through a service and returns the
//! entity as JSON. Failures surface as `ApiError`.

pub mod comments;
pub mod pages;
pub mod posts;
