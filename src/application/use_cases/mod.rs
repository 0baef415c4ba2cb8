mod import_tours;
mod tour_package_service;
mod tour_rating_service;
mod tour_service;

pub use import_tours::*;
pub use tour_package_service::*;
pub use tour_rating_service::*;
pub use tour_service::*;
