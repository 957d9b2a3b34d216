//! Map synchronisation.
//!
//! The browser map widget is driven through serialisable [`MapCommand`]s.
//! Setup commands (initial view, one marker and one service-radius circle per
//! location) are produced once per session when the page mounts; after that
//! the synchronizer only translates selector recenter effects into `fly_to`
//! commands. If the widget was unavailable at mount, nothing is emitted.

use crate::core::selector::SelectorEffect;
use crate::infrastructure::catalog::SiteCatalog;
use crate::infrastructure::entities::{Coordinate, LocationId};
use log::{debug, warn};
use serde::Serialize;
use std::time::Duration;

/// Midpoint of the two shops.
pub const INITIAL_CENTER: Coordinate = Coordinate {
    lat: 32.63,
    lng: -94.84,
};
pub const INITIAL_ZOOM: u8 = 10;
pub const FOCUS_ZOOM: u8 = 13;
pub const FLY_DURATION: Duration = Duration::from_millis(1500);
/// 15 miles.
pub const SERVICE_RADIUS_METERS: u32 = 24_140;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum MapCommand {
    View {
        center: Coordinate,
        zoom: u8,
    },
    Marker {
        location_id: LocationId,
        label: String,
        position: Coordinate,
    },
    Circle {
        center: Coordinate,
        radius_meters: u32,
    },
    FlyTo {
        target: Coordinate,
        zoom: u8,
        duration_secs: f64,
    },
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MapSynchronizer {
    mounted: bool,
    available: bool,
}

impl MapSynchronizer {
    /// One-time setup. Later calls return no commands.
    pub fn mount(&mut self, catalog: &SiteCatalog, available: bool) -> Vec<MapCommand> {
        if self.mounted {
            debug!("map already mounted, skipping setup");
            return Vec::new();
        }
        self.mounted = true;
        self.available = available;

        if !available {
            warn!("map widget unavailable, map features disabled for this session");
            return Vec::new();
        }

        let mut commands = vec![MapCommand::View {
            center: INITIAL_CENTER,
            zoom: INITIAL_ZOOM,
        }];
        for location in &catalog.locations {
            commands.push(MapCommand::Marker {
                location_id: location.id.clone(),
                label: location.name.clone(),
                position: location.coordinates,
            });
            commands.push(MapCommand::Circle {
                center: location.coordinates,
                radius_meters: SERVICE_RADIUS_METERS,
            });
        }
        commands
    }

    pub fn sync(&self, effects: Vec<SelectorEffect>) -> Vec<MapCommand> {
        if !(self.mounted && self.available) {
            return Vec::new();
        }

        effects
            .into_iter()
            .map(|effect| match effect {
                SelectorEffect::Recenter {
                    coordinate,
                    zoom,
                    duration,
                } => MapCommand::FlyTo {
                    target: coordinate,
                    zoom,
                    duration_secs: duration.as_secs_f64(),
                },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recenter(lat: f64, lng: f64) -> SelectorEffect {
        SelectorEffect::Recenter {
            coordinate: Coordinate { lat, lng },
            zoom: FOCUS_ZOOM,
            duration: FLY_DURATION,
        }
    }

    #[test]
    fn test_mount_draws_marker_and_circle_per_location() {
        let catalog = SiteCatalog::embedded().unwrap();
        let mut map = MapSynchronizer::default();

        let commands = map.mount(&catalog, true);

        assert_eq!(
            commands[0],
            MapCommand::View {
                center: INITIAL_CENTER,
                zoom: INITIAL_ZOOM
            }
        );
        for location in &catalog.locations {
            assert!(commands.contains(&MapCommand::Marker {
                location_id: location.id.clone(),
                label: location.name.clone(),
                position: location.coordinates,
            }));
            assert!(commands.contains(&MapCommand::Circle {
                center: location.coordinates,
                radius_meters: 24_140,
            }));
        }
        assert_eq!(commands.len(), 1 + 2 * catalog.locations.len());
    }

    #[test]
    fn test_mount_happens_once() {
        let catalog = SiteCatalog::embedded().unwrap();
        let mut map = MapSynchronizer::default();

        assert!(!map.mount(&catalog, true).is_empty());
        assert!(map.mount(&catalog, true).is_empty());
    }

    #[test]
    fn test_sync_translates_recenter_to_fly_to() {
        let catalog = SiteCatalog::embedded().unwrap();
        let mut map = MapSynchronizer::default();
        map.mount(&catalog, true);

        let commands = map.sync(vec![recenter(32.47, -94.73)]);

        assert_eq!(
            commands,
            vec![MapCommand::FlyTo {
                target: Coordinate {
                    lat: 32.47,
                    lng: -94.73
                },
                zoom: 13,
                duration_secs: 1.5,
            }]
        );
    }

    #[test]
    fn test_unavailable_widget_degrades_to_no_op() {
        let catalog = SiteCatalog::embedded().unwrap();
        let mut map = MapSynchronizer::default();

        assert!(map.mount(&catalog, false).is_empty());
        assert!(map.mounted);
        assert!(!map.available);
        assert!(map.sync(vec![recenter(32.47, -94.73)]).is_empty());
    }

    #[test]
    fn test_sync_before_mount_emits_nothing() {
        let map = MapSynchronizer::default();
        assert!(map.sync(vec![recenter(32.47, -94.73)]).is_empty());
    }

    #[test]
    fn test_commands_serialize_with_tag() {
        let json = serde_json::to_value(MapCommand::Circle {
            center: INITIAL_CENTER,
            radius_meters: SERVICE_RADIUS_METERS,
        })
        .unwrap();

        assert_eq!(json["command"], "circle");
        assert_eq!(json["radius_meters"], 24_140);
        assert_eq!(json["center"]["lat"], 32.63);
    }
}
