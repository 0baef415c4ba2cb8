use std::path::Path;

use anyhow::Result;

use crate::domain::{Difficulty, NewTour, Region, Tour, TourPackage};

use super::super::Container;

pub struct TourController<'a> {
    container: &'a Container,
}

impl<'a> TourController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn create_package(&self, code: String, name: String) -> Result<String> {
        let package = self
            .container
            .package_service()
            .create_tour_package(&code, &name)
            .await?;
        Ok(format!("Tour package: {} ({})", package.name(), package.code()))
    }

    pub async fn list_packages(&self) -> Result<String> {
        let packages = self.container.package_service().lookup_all().await?;
        Ok(self.format_packages(&packages))
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_tour(
        &self,
        package: String,
        title: String,
        price: i32,
        description: String,
        blurb: String,
        duration: String,
        bullets: String,
        keywords: String,
        difficulty: String,
        region: String,
    ) -> Result<String> {
        let tour = NewTour {
            title,
            description,
            blurb,
            price,
            duration,
            bullets,
            keywords,
            tour_package_code: package,
            difficulty: Difficulty::parse(&difficulty)?,
            region: Region::parse(&region)?,
        };

        let created = self.container.tour_service().create_tour(tour).await?;
        Ok(format!("Created tour {}: {}", created.id(), created.summary()))
    }

    pub async fn list_tours(&self, package: Option<String>) -> Result<String> {
        let service = self.container.tour_service();
        let tours = match package {
            Some(code) => service.lookup_by_package(&code).await?,
            None => service.lookup_all().await?,
        };
        Ok(self.format_tours(&tours))
    }

    pub async fn import(&self, file: String) -> Result<String> {
        let tours = self
            .container
            .import_use_case()
            .execute(Path::new(&file))
            .await?;
        Ok(format!("Imported {} tours from {}", tours.len(), file))
    }

    fn format_packages(&self, packages: &[TourPackage]) -> String {
        if packages.is_empty() {
            return "No tour packages.".to_string();
        }

        let mut output = "Tour packages:\n\n".to_string();
        for package in packages {
            output.push_str(&format!("  {}  {}\n", package.code(), package.name()));
        }
        output
    }

    fn format_tours(&self, tours: &[Tour]) -> String {
        if tours.is_empty() {
            return "No tours.".to_string();
        }

        let mut output = "Tours:\n\n".to_string();
        for tour in tours {
            output.push_str(&format!("  {:>4}  {}\n", tour.id(), tour.summary()));
        }
        output
    }
}
