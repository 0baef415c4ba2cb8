use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::application::{
    ImportToursUseCase, TourPackageRepository, TourPackageService, TourRatingRepository,
    TourRatingService, TourRepository, TourService, UnitOfWork,
};
use crate::{
    DuckdbTourPackageRepository, DuckdbTourRatingRepository, DuckdbTourRepository,
    InMemoryTourPackageRepository, InMemoryTourRatingRepository, InMemoryTourRepository,
};

pub struct ContainerConfig {
    pub data_dir: String,
    /// Keep everything in process memory; nothing survives the command.
    pub memory_storage: bool,
}

pub struct Container {
    tour_repo: Arc<dyn TourRepository>,
    package_repo: Arc<dyn TourPackageRepository>,
    rating_repo: Arc<dyn TourRatingRepository>,
    unit_of_work: Arc<dyn UnitOfWork>,
    config: ContainerConfig,
}

impl Container {
    pub async fn new(config: ContainerConfig) -> Result<Self> {
        if config.memory_storage {
            debug!("Using in-memory storage");
            let ratings = Arc::new(InMemoryTourRatingRepository::new());
            return Ok(Self {
                tour_repo: Arc::new(InMemoryTourRepository::new()),
                package_repo: Arc::new(InMemoryTourPackageRepository::new()),
                rating_repo: ratings.clone(),
                unit_of_work: ratings,
                config,
            });
        }

        let db_path = PathBuf::from(&config.data_dir).join("explorecali.duckdb");
        debug!("Using DuckDB storage at {:?}", db_path);

        // All adapters share one connection
        let tours = DuckdbTourRepository::new(&db_path)?;
        let shared_conn = tours.shared_connection();
        let packages = DuckdbTourPackageRepository::with_connection(Arc::clone(&shared_conn)).await?;
        let ratings = Arc::new(DuckdbTourRatingRepository::with_connection(shared_conn).await?);

        Ok(Self {
            tour_repo: Arc::new(tours),
            package_repo: Arc::new(packages),
            rating_repo: ratings.clone(),
            unit_of_work: ratings,
            config,
        })
    }

    pub fn rating_service(&self) -> TourRatingService {
        TourRatingService::new(
            self.tour_repo.clone(),
            self.rating_repo.clone(),
            self.unit_of_work.clone(),
        )
    }

    pub fn tour_service(&self) -> TourService {
        TourService::new(self.tour_repo.clone(), self.package_repo.clone())
    }

    pub fn package_service(&self) -> TourPackageService {
        TourPackageService::new(self.package_repo.clone())
    }

    pub fn import_use_case(&self) -> ImportToursUseCase {
        ImportToursUseCase::new(Arc::new(self.tour_service()), self.package_repo.clone())
    }

    pub fn data_dir(&self) -> &str {
        &self.config.data_dir
    }

    pub fn memory_storage(&self) -> bool {
        self.config.memory_storage
    }
}
