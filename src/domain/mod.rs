//! # Domain Layer
//!
//! Conversation and comparison models, the generation request/response
//! envelope, and the error taxonomy.
//! This layer is independent of external frameworks and infrastructure.

pub mod error;
pub mod models;

pub use error::*;
pub use models::*;
