use std::sync::Arc;

use tracing::info;

use crate::application::{TourPackageRepository, TourRepository};
use crate::domain::{DomainError, NewTour, Tour};

pub struct TourService {
    tour_repo: Arc<dyn TourRepository>,
    package_repo: Arc<dyn TourPackageRepository>,
}

impl TourService {
    pub fn new(
        tour_repo: Arc<dyn TourRepository>,
        package_repo: Arc<dyn TourPackageRepository>,
    ) -> Self {
        Self {
            tour_repo,
            package_repo,
        }
    }

    /// Fails with `NotFound` when the tour's package does not exist.
    pub async fn create_tour(&self, tour: NewTour) -> Result<Tour, DomainError> {
        self.package_repo
            .find_by_code(&tour.tour_package_code)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!(
                    "Tour package does not exist: {}",
                    tour.tour_package_code
                ))
            })?;

        let created = self.tour_repo.insert(&tour).await?;
        info!("Created tour {} ({})", created.title(), created.id());
        Ok(created)
    }

    pub async fn lookup_all(&self) -> Result<Vec<Tour>, DomainError> {
        self.tour_repo.find_all().await
    }

    pub async fn lookup_by_package(&self, package_code: &str) -> Result<Vec<Tour>, DomainError> {
        self.tour_repo.find_by_package(package_code).await
    }

    pub async fn lookup_by_id(&self, id: i64) -> Result<Tour, DomainError> {
        self.tour_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Tour does not exist {}", id)))
    }

    pub async fn total(&self) -> Result<u64, DomainError> {
        self.tour_repo.count().await
    }
}
