pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    ImportToursUseCase, RatingTransaction, TourPackageRepository, TourPackageService,
    TourRatingRepository, TourRatingService, TourRepository, TourService, UnitOfWork,
};

pub use cli::Commands;

pub use connector::{
    DuckdbTourPackageRepository, DuckdbTourRatingRepository, DuckdbTourRepository,
    InMemoryTourPackageRepository, InMemoryTourRatingRepository, InMemoryTourRepository,
};

pub use domain::{
    average_score, default_comment, Difficulty, DomainError, NewTour, Page, PageRequest, Region,
    Tour, TourPackage, TourRating,
};
