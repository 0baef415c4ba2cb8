use std::sync::Arc;

use tracing::info;

use crate::application::TourPackageRepository;
use crate::domain::{DomainError, TourPackage};

pub struct TourPackageService {
    package_repo: Arc<dyn TourPackageRepository>,
}

impl TourPackageService {
    pub fn new(package_repo: Arc<dyn TourPackageRepository>) -> Self {
        Self { package_repo }
    }

    /// Returns the stored package when `code` is already taken.
    pub async fn create_tour_package(
        &self,
        code: &str,
        name: &str,
    ) -> Result<TourPackage, DomainError> {
        if let Some(existing) = self.package_repo.find_by_code(code).await? {
            return Ok(existing);
        }

        let package = TourPackage::new(code.to_string(), name.to_string());
        self.package_repo.save(&package).await?;

        info!("Created tour package {} ({})", name, code);
        Ok(package)
    }

    pub async fn lookup_all(&self) -> Result<Vec<TourPackage>, DomainError> {
        self.package_repo.find_all().await
    }

    pub async fn total(&self) -> Result<u64, DomainError> {
        self.package_repo.count().await
    }
}
