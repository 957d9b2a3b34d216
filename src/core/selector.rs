//! Active-location selection.

use crate::core::map::{FLY_DURATION, FOCUS_ZOOM};
use crate::infrastructure::catalog::SiteCatalog;
use crate::infrastructure::entities::{Coordinate, Location, LocationId};
use log::debug;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum SelectorEvent {
    /// First render of the page.
    Mounted,
    Select(String),
    MarkerClicked(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectorEffect {
    Recenter {
        coordinate: Coordinate,
        zoom: u8,
        duration: Duration,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationSelector {
    active: LocationId,
    initialized: bool,
}

impl LocationSelector {
    pub fn new(catalog: &SiteCatalog) -> Self {
        LocationSelector {
            active: catalog.default_location().id.clone(),
            initialized: false,
        }
    }

    pub fn active_id(&self) -> &LocationId {
        &self.active
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn active<'a>(&self, catalog: &'a SiteCatalog) -> &'a Location {
        catalog
            .location(self.active.as_str())
            .unwrap_or_else(|| catalog.default_location())
    }

    #[must_use]
    pub fn select_location(&mut self, catalog: &SiteCatalog, id: &str) -> Vec<SelectorEffect> {
        self.apply(catalog, SelectorEvent::Select(id.to_owned()))
    }

    #[must_use]
    pub fn apply(&mut self, catalog: &SiteCatalog, event: SelectorEvent) -> Vec<SelectorEffect> {
        let id = match event {
            SelectorEvent::Mounted => {
                self.initialized = true;
                return Vec::new();
            }
            SelectorEvent::Select(id) | SelectorEvent::MarkerClicked(id) => id,
        };

        let Some(location) = catalog.location(&id) else {
            debug!("ignoring unknown location `{id}`");
            return Vec::new();
        };

        if location.id == self.active {
            return Vec::new();
        }
        self.active = location.id.clone();

        if !self.initialized {
            return Vec::new();
        }

        vec![SelectorEffect::Recenter {
            coordinate: location.coordinates,
            zoom: FOCUS_ZOOM,
            duration: FLY_DURATION,
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mounted(catalog: &SiteCatalog) -> LocationSelector {
        let mut selector = LocationSelector::new(catalog);
        let _ = selector.apply(catalog, SelectorEvent::Mounted);
        selector
    }

    #[test]
    fn test_starts_on_default_location() {
        let catalog = SiteCatalog::embedded().unwrap();
        let selector = LocationSelector::new(&catalog);

        assert_eq!(selector.active(&catalog).id.as_str(), "gilmer");
        assert!(!selector.is_initialized());
    }

    #[test]
    fn test_select_every_known_location() {
        let catalog = SiteCatalog::embedded().unwrap();
        let mut selector = mounted(&catalog);

        for location in &catalog.locations {
            let _ = selector.select_location(&catalog, location.id.as_str());
            assert_eq!(selector.active(&catalog).id, location.id);
        }
    }

    #[test]
    fn test_unknown_location_is_ignored() {
        let catalog = SiteCatalog::embedded().unwrap();
        let mut selector = mounted(&catalog);
        let _ = selector.select_location(&catalog, "longview");

        let effects = selector.select_location(&catalog, "tyler");

        assert!(effects.is_empty());
        assert_eq!(selector.active_id().as_str(), "longview");
    }

    #[test]
    fn test_mount_never_recenters() {
        let catalog = SiteCatalog::embedded().unwrap();
        let mut selector = LocationSelector::new(&catalog);

        let effects = selector.apply(&catalog, SelectorEvent::Mounted);

        assert!(effects.is_empty());
        assert!(selector.is_initialized());
    }

    #[test]
    fn test_each_change_after_mount_recenters_once() {
        let catalog = SiteCatalog::embedded().unwrap();
        let mut selector = mounted(&catalog);

        for id in ["longview", "gilmer", "longview"] {
            let effects = selector.select_location(&catalog, id);
            let expected = catalog.location(id).unwrap().coordinates;

            assert_eq!(
                effects,
                vec![SelectorEffect::Recenter {
                    coordinate: expected,
                    zoom: 13,
                    duration: Duration::from_millis(1500),
                }]
            );
        }
    }

    #[test]
    fn test_reselecting_active_location_is_not_a_change() {
        let catalog = SiteCatalog::embedded().unwrap();
        let mut selector = mounted(&catalog);

        assert!(selector.select_location(&catalog, "gilmer").is_empty());
    }

    #[test]
    fn test_select_before_mount_updates_without_recenter() {
        let catalog = SiteCatalog::embedded().unwrap();
        let mut selector = LocationSelector::new(&catalog);

        let effects = selector.select_location(&catalog, "longview");

        assert!(effects.is_empty());
        assert_eq!(selector.active_id().as_str(), "longview");
    }

    #[test]
    fn test_marker_click_converges_with_direct_selection() {
        let catalog = SiteCatalog::embedded().unwrap();
        let mut by_tab = mounted(&catalog);
        let mut by_marker = mounted(&catalog);

        let tab_effects = by_tab.apply(&catalog, SelectorEvent::Select("longview".into()));
        let marker_effects =
            by_marker.apply(&catalog, SelectorEvent::MarkerClicked("longview".into()));

        assert_eq!(tab_effects, marker_effects);
        assert_eq!(by_tab.active_id(), by_marker.active_id());
    }
}
