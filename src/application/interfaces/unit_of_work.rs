use async_trait::async_trait;

use crate::domain::{DomainError, TourRating};

/// Opens transactions against the rating store.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn RatingTransaction>, DomainError>;
}

/// A batch of rating inserts that becomes visible only on `commit`.
///
/// Dropping a transaction that was neither committed nor rolled back
/// discards its inserts.
#[async_trait]
pub trait RatingTransaction: Send {
    /// Fails with `DomainError::DuplicateKey` if the pair is already stored
    /// or was inserted earlier in this transaction.
    async fn insert(&mut self, rating: &TourRating) -> Result<(), DomainError>;

    async fn commit(self: Box<Self>) -> Result<(), DomainError>;

    async fn rollback(self: Box<Self>) -> Result<(), DomainError>;
}
