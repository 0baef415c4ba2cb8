use async_trait::async_trait;

use crate::domain::{DomainError, TourPackage};

#[async_trait]
pub trait TourPackageRepository: Send + Sync {
    /// Insert-or-update by code.
    async fn save(&self, package: &TourPackage) -> Result<(), DomainError>;

    async fn find_by_code(&self, code: &str) -> Result<Option<TourPackage>, DomainError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<TourPackage>, DomainError>;

    async fn find_all(&self) -> Result<Vec<TourPackage>, DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;
}
