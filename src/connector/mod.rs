//! # Connector Layer
//!
//! Implementations of the application ports and the command-line entry
//! points built on them:
//! - Storage (DuckDB, or in-memory maps for tests and throwaway sessions)
//! - API (dependency container, router and controllers)

pub mod adapter;
pub mod api;

pub use adapter::*;
