//! # Application Layer
//!
//! Use cases coordinating the domain models with the generative model port.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
