use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::TourRepository;
use crate::domain::{DomainError, NewTour, Tour};

pub struct InMemoryTourRepository {
    tours: Arc<Mutex<BTreeMap<i64, Tour>>>,
}

impl InMemoryTourRepository {
    pub fn new() -> Self {
        Self {
            tours: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }
}

impl Default for InMemoryTourRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TourRepository for InMemoryTourRepository {
    async fn insert(&self, tour: &NewTour) -> Result<Tour, DomainError> {
        let mut store = self.tours.lock().await;
        let id = store.keys().next_back().map_or(1, |last| last + 1);
        let created = Tour::from_new(id, tour.clone());
        store.insert(id, created.clone());

        debug!("Inserted tour {} with id {} into memory", tour.title, id);
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Tour>, DomainError> {
        let store = self.tours.lock().await;
        Ok(store.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Tour>, DomainError> {
        let store = self.tours.lock().await;
        Ok(store.values().cloned().collect())
    }

    async fn find_by_package(&self, package_code: &str) -> Result<Vec<Tour>, DomainError> {
        let store = self.tours.lock().await;
        Ok(store
            .values()
            .filter(|tour| tour.tour_package_code() == package_code)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let store = self.tours.lock().await;
        Ok(store.len() as u64)
    }
}
