use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::application::TourPackageRepository;
use crate::domain::{DomainError, TourPackage};

pub struct InMemoryTourPackageRepository {
    packages: Arc<Mutex<BTreeMap<String, TourPackage>>>,
}

impl InMemoryTourPackageRepository {
    pub fn new() -> Self {
        Self {
            packages: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }
}

impl Default for InMemoryTourPackageRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TourPackageRepository for InMemoryTourPackageRepository {
    async fn save(&self, package: &TourPackage) -> Result<(), DomainError> {
        let mut store = self.packages.lock().await;
        let name_taken = store
            .values()
            .any(|p| p.name() == package.name() && p.code() != package.code());
        if name_taken {
            return Err(DomainError::duplicate_key(format!(
                "Tour package name already used: {}",
                package.name()
            )));
        }
        store.insert(package.code().to_string(), package.clone());
        Ok(())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<TourPackage>, DomainError> {
        let store = self.packages.lock().await;
        Ok(store.get(code).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<TourPackage>, DomainError> {
        let store = self.packages.lock().await;
        Ok(store.values().find(|p| p.name() == name).cloned())
    }

    async fn find_all(&self) -> Result<Vec<TourPackage>, DomainError> {
        let store = self.packages.lock().await;
        Ok(store.values().cloned().collect())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let store = self.packages.lock().await;
        Ok(store.len() as u64)
    }
}
