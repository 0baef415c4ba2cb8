mod page;
mod tour;
mod tour_package;
mod tour_rating;

pub use page::*;
pub use tour::*;
pub use tour_package::*;
pub use tour_rating::*;
