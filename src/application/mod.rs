//! # Application Layer
//!
//! Persistence ports and the services that orchestrate them.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
