use serde::{Deserialize, Serialize};

/// A themed group of tours, identified by a short code ("BC", "CC", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourPackage {
    code: String,
    name: String,
}

impl TourPackage {
    pub fn new(code: String, name: String) -> Self {
        Self { code, name }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
