mod tour_package_repository;
mod tour_rating_repository;
mod tour_repository;
mod unit_of_work;

pub use tour_package_repository::*;
pub use tour_rating_repository::*;
pub use tour_repository::*;
pub use unit_of_work::*;
