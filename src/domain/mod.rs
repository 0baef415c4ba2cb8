//! # Domain Layer
//!
//! Tours, tour packages and customer ratings, plus the error type shared by
//! every layer. Nothing here knows about storage or the command line.

pub mod error;
pub mod models;

pub use error::*;
pub use models::*;
