pub mod rating_controller;
pub mod stats_controller;
pub mod tour_controller;

pub use rating_controller::RatingController;
pub use stats_controller::StatsController;
pub use tour_controller::TourController;
