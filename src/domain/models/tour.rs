use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Difficult,
    Varies,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Difficult => "Difficult",
            Difficulty::Varies => "Varies",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "difficult" => Ok(Difficulty::Difficult),
            "varies" => Ok(Difficulty::Varies),
            unknown => Err(DomainError::invalid_input(format!(
                "Unknown difficulty '{}'",
                unknown
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    CentralCoast,
    SouthernCalifornia,
    NorthernCalifornia,
    VariesRegion,
}

impl Region {
    /// Human-readable label, also the form used by tour seed files.
    pub fn label(&self) -> &'static str {
        match self {
            Region::CentralCoast => "Central Coast",
            Region::SouthernCalifornia => "Southern California",
            Region::NorthernCalifornia => "Northern California",
            Region::VariesRegion => "Varies",
        }
    }

    /// Accepts either the label ("Central Coast") or the identifier
    /// ("Central_Coast", "central_coast").
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "central_coast" | "centralcoast" => Ok(Region::CentralCoast),
            "southern_california" | "southerncalifornia" => Ok(Region::SouthernCalifornia),
            "northern_california" | "northerncalifornia" => Ok(Region::NorthernCalifornia),
            "varies" | "varies_region" | "variesregion" => Ok(Region::VariesRegion),
            _ => Err(DomainError::invalid_input(format!("Unknown region '{}'", s))),
        }
    }
}

/// Attributes of a tour that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTour {
    pub title: String,
    pub description: String,
    pub blurb: String,
    pub price: i32,
    pub duration: String,
    pub bullets: String,
    pub keywords: String,
    pub tour_package_code: String,
    pub difficulty: Difficulty,
    pub region: Region,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    id: i64,
    title: String,
    description: String,
    blurb: String,
    price: i32,
    duration: String,
    bullets: String,
    keywords: String,
    tour_package_code: String,
    difficulty: Difficulty,
    region: Region,
}

impl Tour {
    /// Binds a store-assigned id to the submitted attributes.
    pub fn from_new(id: i64, tour: NewTour) -> Self {
        Self {
            id,
            title: tour.title,
            description: tour.description,
            blurb: tour.blurb,
            price: tour.price,
            duration: tour.duration,
            bullets: tour.bullets,
            keywords: tour.keywords,
            tour_package_code: tour.tour_package_code,
            difficulty: tour.difficulty,
            region: tour.region,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn blurb(&self) -> &str {
        &self.blurb
    }

    pub fn price(&self) -> i32 {
        self.price
    }

    pub fn duration(&self) -> &str {
        &self.duration
    }

    pub fn bullets(&self) -> &str {
        &self.bullets
    }

    pub fn keywords(&self) -> &str {
        &self.keywords
    }

    pub fn tour_package_code(&self) -> &str {
        &self.tour_package_code
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn summary(&self) -> String {
        format!(
            "{} [{}] ${} ({}, {})",
            self.title,
            self.tour_package_code,
            self.price,
            self.difficulty.as_str(),
            self.region.label()
        )
    }
}
