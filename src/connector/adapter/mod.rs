mod duckdb_tour_package_repository;
mod duckdb_tour_rating_repository;
mod duckdb_tour_repository;
mod in_memory_tour_package_repository;
mod in_memory_tour_rating_repository;
mod in_memory_tour_repository;

pub use duckdb_tour_package_repository::*;
pub use duckdb_tour_rating_repository::*;
pub use duckdb_tour_repository::*;
pub use in_memory_tour_package_repository::*;
pub use in_memory_tour_rating_repository::*;
pub use in_memory_tour_repository::*;
