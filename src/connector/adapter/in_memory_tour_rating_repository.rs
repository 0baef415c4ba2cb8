use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

use crate::application::{RatingTransaction, TourRatingRepository, UnitOfWork};
use crate::domain::{DomainError, Page, PageRequest, TourRating};

type RatingMap = BTreeMap<(i64, i64), TourRating>;

/// Ratings keyed by `(tour_id, customer_id)`; map order gives the stable
/// listing order.
pub struct InMemoryTourRatingRepository {
    ratings: Arc<Mutex<RatingMap>>,
}

impl InMemoryTourRatingRepository {
    pub fn new() -> Self {
        Self {
            ratings: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }
}

impl Default for InMemoryTourRatingRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn duplicate(rating: &TourRating) -> DomainError {
    DomainError::duplicate_key(format!(
        "Rating for tour {} by customer {} already exists",
        rating.tour_id(),
        rating.customer_id()
    ))
}

#[async_trait]
impl TourRatingRepository for InMemoryTourRatingRepository {
    async fn find_by_key(
        &self,
        tour_id: i64,
        customer_id: i64,
    ) -> Result<Option<TourRating>, DomainError> {
        let store = self.ratings.lock().await;
        Ok(store.get(&(tour_id, customer_id)).cloned())
    }

    async fn find_by_tour_id(&self, tour_id: i64) -> Result<Vec<TourRating>, DomainError> {
        let store = self.ratings.lock().await;
        Ok(store
            .range((tour_id, i64::MIN)..=(tour_id, i64::MAX))
            .map(|(_, rating)| rating.clone())
            .collect())
    }

    async fn find_page_by_tour_id(
        &self,
        tour_id: i64,
        request: PageRequest,
    ) -> Result<Page<TourRating>, DomainError> {
        let all = self.find_by_tour_id(tour_id).await?;
        Ok(Page::from_all(all, request))
    }

    async fn find_all(&self) -> Result<Vec<TourRating>, DomainError> {
        let store = self.ratings.lock().await;
        Ok(store.values().cloned().collect())
    }

    async fn insert(&self, rating: &TourRating) -> Result<(), DomainError> {
        let mut store = self.ratings.lock().await;
        if store.contains_key(&rating.key()) {
            return Err(duplicate(rating));
        }
        store.insert(rating.key(), rating.clone());
        Ok(())
    }

    async fn save(&self, rating: &TourRating) -> Result<(), DomainError> {
        let mut store = self.ratings.lock().await;
        store.insert(rating.key(), rating.clone());
        Ok(())
    }

    async fn delete(&self, rating: &TourRating) -> Result<(), DomainError> {
        let mut store = self.ratings.lock().await;
        store.remove(&rating.key());
        Ok(())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let store = self.ratings.lock().await;
        Ok(store.len() as u64)
    }
}

#[async_trait]
impl UnitOfWork for InMemoryTourRatingRepository {
    async fn begin(&self) -> Result<Box<dyn RatingTransaction>, DomainError> {
        let store = Arc::clone(&self.ratings).lock_owned().await;
        Ok(Box::new(InMemoryRatingTransaction {
            store,
            staged: BTreeMap::new(),
        }))
    }
}

/// Stages inserts and applies them to the map only on commit.
pub struct InMemoryRatingTransaction {
    store: OwnedMutexGuard<RatingMap>,
    staged: RatingMap,
}

#[async_trait]
impl RatingTransaction for InMemoryRatingTransaction {
    async fn insert(&mut self, rating: &TourRating) -> Result<(), DomainError> {
        let key = rating.key();
        if self.store.contains_key(&key) || self.staged.contains_key(&key) {
            return Err(duplicate(rating));
        }
        self.staged.insert(key, rating.clone());
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        let InMemoryRatingTransaction { mut store, staged } = *self;
        let count = staged.len();
        store.extend(staged);
        debug!("Committed {} tour ratings to memory", count);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), DomainError> {
        debug!("Discarded {} staged tour ratings", self.staged.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_rejects_duplicate_pair() {
        let repo = InMemoryTourRatingRepository::new();
        repo.insert(&TourRating::new(1, 10, 3, None)).await.unwrap();

        let err = repo
            .insert(&TourRating::new(1, 10, 5, None))
            .await
            .unwrap_err();

        assert!(err.is_duplicate_key());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_find_by_tour_id_only_returns_that_tour() {
        let repo = InMemoryTourRatingRepository::new();
        repo.insert(&TourRating::new(2, 5, 3, None)).await.unwrap();
        repo.insert(&TourRating::new(1, 7, 4, None)).await.unwrap();
        repo.insert(&TourRating::new(1, 3, 5, None)).await.unwrap();

        let ratings = repo.find_by_tour_id(1).await.unwrap();

        let customers: Vec<_> = ratings.iter().map(|r| r.customer_id()).collect();
        assert_eq!(customers, vec![3, 7]);
    }

    #[tokio::test]
    async fn test_transaction_is_invisible_until_commit() {
        let repo = InMemoryTourRatingRepository::new();

        let mut tx = repo.begin().await.unwrap();
        tx.insert(&TourRating::new(1, 1, 5, None)).await.unwrap();
        tx.insert(&TourRating::new(1, 2, 5, None)).await.unwrap();
        tx.commit().await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_within_transaction_then_rollback() {
        let repo = InMemoryTourRatingRepository::new();

        let mut tx = repo.begin().await.unwrap();
        tx.insert(&TourRating::new(1, 1, 5, None)).await.unwrap();
        let err = tx
            .insert(&TourRating::new(1, 1, 4, None))
            .await
            .unwrap_err();
        assert!(err.is_duplicate_key());
        tx.rollback().await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_dropped_transaction_discards_inserts() {
        let repo = InMemoryTourRatingRepository::new();

        {
            let mut tx = repo.begin().await.unwrap();
            tx.insert(&TourRating::new(1, 1, 5, None)).await.unwrap();
        }

        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
