use anyhow::{bail, Result};

use crate::domain::{Page, PageRequest, TourRating};

use super::super::Container;

pub struct RatingController<'a> {
    container: &'a Container,
}

impl<'a> RatingController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn rate(
        &self,
        tour_id: i64,
        customer_id: i64,
        score: i32,
        comment: Option<String>,
    ) -> Result<String> {
        let rating = self
            .container
            .rating_service()
            .create_new(tour_id, customer_id, score, comment)
            .await?;
        Ok(format!("Created rating: {}", self.format_rating(&rating)))
    }

    pub async fn rate_many(&self, tour_id: i64, score: i32, customer_ids: Vec<i64>) -> Result<String> {
        self.container
            .rating_service()
            .rate_many(tour_id, score, &customer_ids)
            .await?;
        Ok(format!(
            "Tour {} rated {} by {} customers.",
            tour_id,
            score,
            customer_ids.len()
        ))
    }

    pub async fn list(&self, tour: Option<i64>, page: Option<usize>, size: usize) -> Result<String> {
        let service = self.container.rating_service();

        match (tour, page) {
            (Some(tour_id), Some(page)) => {
                let page = service
                    .lookup_ratings_page(tour_id, PageRequest::new(page, size))
                    .await?;
                Ok(self.format_page(&page))
            }
            (Some(tour_id), None) => Ok(self.format_list(&service.lookup_ratings(tour_id).await?)),
            (None, Some(_)) => bail!("--page requires --tour"),
            (None, None) => Ok(self.format_list(&service.lookup_all().await?)),
        }
    }

    pub async fn show(&self, tour_id: i64, customer_id: i64) -> Result<String> {
        let rating = self
            .container
            .rating_service()
            .verify_tour_rating(tour_id, customer_id)
            .await?;
        Ok(self.format_rating(&rating))
    }

    pub async fn update(
        &self,
        tour_id: i64,
        customer_id: i64,
        score: Option<i32>,
        comment: Option<String>,
        partial: bool,
    ) -> Result<String> {
        let service = self.container.rating_service();

        let rating = if partial {
            service
                .update_some(tour_id, customer_id, score, comment)
                .await?
        } else {
            let Some(score) = score else {
                bail!("--score is required unless --partial is given");
            };
            service.update(tour_id, customer_id, score, comment).await?
        };

        Ok(format!("Updated rating: {}", self.format_rating(&rating)))
    }

    pub async fn delete(&self, tour_id: i64, customer_id: i64) -> Result<String> {
        self.container
            .rating_service()
            .delete(tour_id, customer_id)
            .await?;
        Ok("Rating deleted successfully.".to_string())
    }

    pub async fn average(&self, tour_id: i64) -> Result<String> {
        let average = self
            .container
            .rating_service()
            .get_average_score(tour_id)
            .await?;
        Ok(format!("Average score for tour {}: {:.2}", tour_id, average))
    }

    fn format_rating(&self, rating: &TourRating) -> String {
        format!(
            "tour {} / customer {}: {} ({})",
            rating.tour_id(),
            rating.customer_id(),
            rating.score(),
            rating.comment().unwrap_or("no comment")
        )
    }

    fn format_list(&self, ratings: &[TourRating]) -> String {
        if ratings.is_empty() {
            return "No ratings found.".to_string();
        }

        let mut output = format!("{} ratings:\n\n", ratings.len());
        for rating in ratings {
            output.push_str(&format!("  {}\n", self.format_rating(rating)));
        }
        output
    }

    fn format_page(&self, page: &Page<TourRating>) -> String {
        let mut output = format!(
            "Page {} of {} ({} ratings total)\n\n",
            page.page() + 1,
            page.total_pages().max(1),
            page.total()
        );
        for rating in page.items() {
            output.push_str(&format!("  {}\n", self.format_rating(rating)));
        }
        output
    }
}
