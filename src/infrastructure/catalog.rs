//! Static site catalog: locations, reviews and the chatbot script

use crate::infrastructure::entities::{Location, LocationId, Review};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

const EMBEDDED_CATALOG: &str = include_str!("../../data/catalog.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog has no locations")]
    NoLocations,
    #[error("duplicate location id `{0}`")]
    DuplicateLocation(LocationId),
    #[error("default location `{0}` is not in the catalog")]
    UnknownDefault(LocationId),
    #[error("location `{0}` has an empty hours field")]
    EmptyHours(LocationId),
    #[error("review {id} has rating {rating}, expected 1..=5")]
    RatingOutOfRange { id: u32, rating: u8 },
    #[error("chat rule {0} has no keywords")]
    EmptyRule(usize),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Business {
    pub name: String,
    pub tagline: String,
    pub email: String,
}

impl Business {
    pub fn mailto_href(&self) -> String {
        format!("mailto:{}", self.email)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRule {
    pub keywords: Vec<String>,
    pub reply: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatScript {
    pub welcome: String,
    pub rules: Vec<ChatRule>,
    pub fallback: String,
}

/// Immutable site data, loaded once at startup and shared by every session.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteCatalog {
    pub business: Business,
    pub default_location: LocationId,
    pub locations: Vec<Location>,
    pub reviews: Vec<Review>,
    pub chat: ChatScript,
}

impl SiteCatalog {
    /// The catalog compiled into the binary.
    pub fn embedded() -> Result<SiteCatalog, CatalogError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    pub fn from_path(path: &Path) -> Result<SiteCatalog, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<SiteCatalog, CatalogError> {
        let catalog: SiteCatalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn location(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.id.as_str() == id)
    }

    pub fn default_location(&self) -> &Location {
        // validate() guarantees the default exists and the list is non-empty
        self.location(self.default_location.as_str())
            .unwrap_or(&self.locations[0])
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.locations.is_empty() {
            return Err(CatalogError::NoLocations);
        }

        let mut seen = HashSet::new();
        for location in &self.locations {
            if !seen.insert(location.id.as_str()) {
                return Err(CatalogError::DuplicateLocation(location.id.clone()));
            }
            if location.hours.fields().iter().any(|f| f.trim().is_empty()) {
                return Err(CatalogError::EmptyHours(location.id.clone()));
            }
        }

        if !seen.contains(self.default_location.as_str()) {
            return Err(CatalogError::UnknownDefault(self.default_location.clone()));
        }

        if let Some(review) = self
            .reviews
            .iter()
            .find(|r| !(1..=Review::MAX_RATING).contains(&r.rating))
        {
            return Err(CatalogError::RatingOutOfRange {
                id: review.id,
                rating: review.rating,
            });
        }

        if let Some(index) = self.chat.rules.iter().position(|r| r.keywords.is_empty()) {
            return Err(CatalogError::EmptyRule(index));
        }

        Ok(())
    }
}
