use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{RatingController, StatsController, TourController};

pub struct Router<'a> {
    rating_controller: RatingController<'a>,
    tour_controller: TourController<'a>,
    stats_controller: StatsController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            rating_controller: RatingController::new(container),
            tour_controller: TourController::new(container),
            stats_controller: StatsController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::PackageCreate { code, name } => {
                self.tour_controller.create_package(code, name).await
            }
            Commands::Packages => self.tour_controller.list_packages().await,
            Commands::TourCreate {
                package,
                title,
                price,
                description,
                blurb,
                duration,
                bullets,
                keywords,
                difficulty,
                region,
            } => {
                self.tour_controller
                    .create_tour(
                        package,
                        title,
                        price,
                        description,
                        blurb,
                        duration,
                        bullets,
                        keywords,
                        difficulty,
                        region,
                    )
                    .await
            }
            Commands::Tours { package } => self.tour_controller.list_tours(package).await,
            Commands::Import { file } => self.tour_controller.import(file).await,
            Commands::Rate {
                tour_id,
                customer_id,
                score,
                comment,
            } => {
                self.rating_controller
                    .rate(tour_id, customer_id, score, comment)
                    .await
            }
            Commands::RateMany {
                tour_id,
                score,
                customer_ids,
            } => {
                self.rating_controller
                    .rate_many(tour_id, score, customer_ids)
                    .await
            }
            Commands::Ratings { tour, page, size } => {
                self.rating_controller.list(tour, page, size).await
            }
            Commands::Rating {
                tour_id,
                customer_id,
            } => self.rating_controller.show(tour_id, customer_id).await,
            Commands::Update {
                tour_id,
                customer_id,
                score,
                comment,
                partial,
            } => {
                self.rating_controller
                    .update(tour_id, customer_id, score, comment, partial)
                    .await
            }
            Commands::Delete {
                tour_id,
                customer_id,
            } => self.rating_controller.delete(tour_id, customer_id).await,
            Commands::Average { tour_id } => self.rating_controller.average(tour_id).await,
            Commands::Stats => self.stats_controller.stats().await,
        }
    }
}
