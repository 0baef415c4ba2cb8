use anyhow::Result;

use super::super::Container;

pub struct StatsController<'a> {
    container: &'a Container,
}

impl<'a> StatsController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn stats(&self) -> Result<String> {
        let packages = self.container.package_service().total().await?;
        let tours = self.container.tour_service().total().await?;
        let ratings = self.container.rating_service().lookup_all().await?.len();

        let storage = if self.container.memory_storage() {
            "memory".to_string()
        } else {
            self.container.data_dir().to_string()
        };

        Ok(format!(
            "Explore California Statistics\n=============================\nTour Packages: {}\nTours:         {}\nRatings:       {}\nStorage:       {}",
            packages, tours, ratings, storage
        ))
    }
}
