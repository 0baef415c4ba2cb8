use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::{TourRatingRepository, TourRepository, UnitOfWork};
use crate::domain::{average_score, DomainError, Page, PageRequest, Tour, TourRating};

/// Creates, updates, deletes, looks up and averages tour ratings.
///
/// Mutations and the average require the tour to exist; listing by tour does
/// not, and simply comes back empty for an unknown id.
pub struct TourRatingService {
    tour_repo: Arc<dyn TourRepository>,
    rating_repo: Arc<dyn TourRatingRepository>,
    unit_of_work: Arc<dyn UnitOfWork>,
}

impl TourRatingService {
    pub fn new(
        tour_repo: Arc<dyn TourRepository>,
        rating_repo: Arc<dyn TourRatingRepository>,
        unit_of_work: Arc<dyn UnitOfWork>,
    ) -> Self {
        Self {
            tour_repo,
            rating_repo,
            unit_of_work,
        }
    }

    pub async fn create_new(
        &self,
        tour_id: i64,
        customer_id: i64,
        score: i32,
        comment: Option<String>,
    ) -> Result<TourRating, DomainError> {
        let tour = self.verify_tour(tour_id).await?;

        let rating = TourRating::new(tour.id(), customer_id, score, comment);
        self.rating_repo.insert(&rating).await?;

        info!(
            "Customer {} rated tour {} with score {}",
            customer_id, tour_id, score
        );
        Ok(rating)
    }

    /// Rates one tour on behalf of several customers in a single transaction.
    /// Any failed insert rolls back the whole batch.
    pub async fn rate_many(
        &self,
        tour_id: i64,
        score: i32,
        customer_ids: &[i64],
    ) -> Result<(), DomainError> {
        let tour = self.verify_tour(tour_id).await?;

        let mut tx = self.unit_of_work.begin().await?;
        for &customer_id in customer_ids {
            let rating = TourRating::with_default_comment(tour.id(), customer_id, score);
            if let Err(e) = tx.insert(&rating).await {
                warn!(
                    "Rolling back {} ratings for tour {}: {}",
                    customer_ids.len(),
                    tour_id,
                    e
                );
                if let Err(rollback_err) = tx.rollback().await {
                    warn!("Rollback failed: {}", rollback_err);
                }
                return Err(e);
            }
        }
        tx.commit().await?;

        info!(
            "Tour {} rated {} by {} customers",
            tour_id,
            score,
            customer_ids.len()
        );
        Ok(())
    }

    pub async fn lookup_all(&self) -> Result<Vec<TourRating>, DomainError> {
        self.rating_repo.find_all().await
    }

    pub async fn lookup_ratings(&self, tour_id: i64) -> Result<Vec<TourRating>, DomainError> {
        self.rating_repo.find_by_tour_id(tour_id).await
    }

    pub async fn lookup_ratings_page(
        &self,
        tour_id: i64,
        request: PageRequest,
    ) -> Result<Page<TourRating>, DomainError> {
        self.rating_repo.find_page_by_tour_id(tour_id, request).await
    }

    pub async fn verify_tour_rating(
        &self,
        tour_id: i64,
        customer_id: i64,
    ) -> Result<TourRating, DomainError> {
        self.rating_repo
            .find_by_key(tour_id, customer_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!(
                    "Tour rating pair for tour {} and customer {}",
                    tour_id, customer_id
                ))
            })
    }

    /// Replaces score and comment of an existing rating.
    pub async fn update(
        &self,
        tour_id: i64,
        customer_id: i64,
        score: i32,
        comment: Option<String>,
    ) -> Result<TourRating, DomainError> {
        let mut rating = self.verify_tour_rating(tour_id, customer_id).await?;
        rating.set_score(score);
        rating.set_comment(comment);
        self.rating_repo.save(&rating).await?;

        info!("Updated rating of tour {} by customer {}", tour_id, customer_id);
        Ok(rating)
    }

    /// Changes only the fields that are given.
    pub async fn update_some(
        &self,
        tour_id: i64,
        customer_id: i64,
        score: Option<i32>,
        comment: Option<String>,
    ) -> Result<TourRating, DomainError> {
        let mut rating = self.verify_tour_rating(tour_id, customer_id).await?;
        if let Some(score) = score {
            rating.set_score(score);
        }
        if comment.is_some() {
            rating.set_comment(comment);
        }
        self.rating_repo.save(&rating).await?;

        info!(
            "Partially updated rating of tour {} by customer {}",
            tour_id, customer_id
        );
        Ok(rating)
    }

    pub async fn delete(&self, tour_id: i64, customer_id: i64) -> Result<(), DomainError> {
        let rating = self.verify_tour_rating(tour_id, customer_id).await?;
        self.rating_repo.delete(&rating).await?;

        info!("Deleted rating of tour {} by customer {}", tour_id, customer_id);
        Ok(())
    }

    /// Mean score of the tour's ratings; `0.0` when it has none.
    pub async fn get_average_score(&self, tour_id: i64) -> Result<f64, DomainError> {
        let tour = self.verify_tour(tour_id).await?;
        let ratings = self.rating_repo.find_by_tour_id(tour.id()).await?;

        if ratings.is_empty() {
            debug!("Tour {} has no ratings, average is 0.0", tour_id);
        }
        Ok(average_score(&ratings))
    }

    async fn verify_tour(&self, tour_id: i64) -> Result<Tour, DomainError> {
        self.tour_repo
            .find_by_id(tour_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Tour does not exist {}", tour_id)))
    }
}
