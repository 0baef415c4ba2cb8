use async_trait::async_trait;

use crate::domain::{DomainError, Page, PageRequest, TourRating};

/// Persistence for tour ratings.
///
/// Implementations enforce uniqueness of `(tour_id, customer_id)`; `insert`
/// on a taken pair fails with `DomainError::DuplicateKey`.
#[async_trait]
pub trait TourRatingRepository: Send + Sync {
    async fn find_by_key(
        &self,
        tour_id: i64,
        customer_id: i64,
    ) -> Result<Option<TourRating>, DomainError>;

    /// Ratings of one tour ordered by customer id.
    async fn find_by_tour_id(&self, tour_id: i64) -> Result<Vec<TourRating>, DomainError>;

    async fn find_page_by_tour_id(
        &self,
        tour_id: i64,
        request: PageRequest,
    ) -> Result<Page<TourRating>, DomainError>;

    /// Every rating, ordered by `(tour_id, customer_id)`.
    async fn find_all(&self) -> Result<Vec<TourRating>, DomainError>;

    async fn insert(&self, rating: &TourRating) -> Result<(), DomainError>;

    /// Insert-or-update on `(tour_id, customer_id)`.
    async fn save(&self, rating: &TourRating) -> Result<(), DomainError>;

    async fn delete(&self, rating: &TourRating) -> Result<(), DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;
}
