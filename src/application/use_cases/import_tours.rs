use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info};

use crate::application::{TourPackageRepository, TourService};
use crate::domain::{Difficulty, DomainError, NewTour, Region, Tour};

/// One entry of a tour seed file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourRecord {
    pub package_type: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub blurb: String,
    pub price: PriceField,
    #[serde(default)]
    pub length: String,
    #[serde(default)]
    pub bullets: String,
    #[serde(default)]
    pub keywords: String,
    pub difficulty: String,
    pub region: String,
}

/// Seed files carry prices either as numbers or as quoted numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PriceField {
    Number(i32),
    Text(String),
}

impl PriceField {
    fn value(&self) -> Result<i32, DomainError> {
        match self {
            PriceField::Number(n) => Ok(*n),
            PriceField::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| DomainError::invalid_input(format!("Invalid price '{}'", s))),
        }
    }
}

/// Loads tours from a JSON array of [`TourRecord`]s. `packageType` names a
/// tour package that must already exist.
pub struct ImportToursUseCase {
    tour_service: Arc<TourService>,
    package_repo: Arc<dyn TourPackageRepository>,
}

impl ImportToursUseCase {
    pub fn new(tour_service: Arc<TourService>, package_repo: Arc<dyn TourPackageRepository>) -> Self {
        Self {
            tour_service,
            package_repo,
        }
    }

    pub async fn execute(&self, path: &Path) -> Result<Vec<Tour>, DomainError> {
        let json = tokio::fs::read_to_string(path).await?;
        info!("Importing tours from {}", path.display());
        self.import_json(&json).await
    }

    pub async fn import_json(&self, json: &str) -> Result<Vec<Tour>, DomainError> {
        let records: Vec<TourRecord> = serde_json::from_str(json)
            .map_err(|e| DomainError::invalid_input(format!("Invalid tour file: {}", e)))?;

        let mut created = Vec::with_capacity(records.len());
        for record in records {
            let tour = self.to_new_tour(record).await?;
            created.push(self.tour_service.create_tour(tour).await?);
        }

        info!("Imported {} tours", created.len());
        Ok(created)
    }

    async fn to_new_tour(&self, record: TourRecord) -> Result<NewTour, DomainError> {
        let package = self
            .package_repo
            .find_by_name(&record.package_type)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!(
                    "Tour package does not exist: {}",
                    record.package_type
                ))
            })?;
        debug!("Resolved package '{}' to {}", record.package_type, package.code());

        Ok(NewTour {
            price: record.price.value()?,
            difficulty: Difficulty::parse(&record.difficulty)?,
            region: Region::parse(&record.region)?,
            title: record.title,
            description: record.description,
            blurb: record.blurb,
            duration: record.length,
            bullets: record.bullets,
            keywords: record.keywords,
            tour_package_code: package.code().to_string(),
        })
    }
}
