//! # Connector Layer
//!
//! External integrations and the command-line presentation:
//! - Generative model adapters (Gemini over HTTP, deterministic mock)
//! - Image ingestion from disk
//! - Container, router, controllers and interactive session state

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;
