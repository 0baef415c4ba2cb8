use async_trait::async_trait;

use crate::domain::{DomainError, NewTour, Tour};

/// Persistence for tours. The rating service only ever calls `find_by_id`.
#[async_trait]
pub trait TourRepository: Send + Sync {
    /// Stores a new tour and returns it with its assigned id.
    async fn insert(&self, tour: &NewTour) -> Result<Tour, DomainError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Tour>, DomainError>;

    async fn find_all(&self) -> Result<Vec<Tour>, DomainError>;

    async fn find_by_package(&self, package_code: &str) -> Result<Vec<Tour>, DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;
}
