//! Location selector endpoints

use crate::api::ExtractSession;
use crate::core::traits::LocationService;
use axum::extract::Path;
use axum::routing::{get, post};
use axum::{Json, Router};
use di_axum::Inject;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_locations))
        .route("/mount", post(mount))
        .route("/active", get(active_location).post(select_location))
        .route("/:id/marker", post(marker_clicked))
}

async fn list_locations(
    Inject(location_service): Inject<dyn LocationService>,
) -> Json<schemas::LocationList> {
    let locations = location_service.list_locations().await;

    Json(schemas::LocationList {
        locations: locations.iter().map(schemas::Location::from).collect(),
    })
}

async fn active_location(
    Inject(location_service): Inject<dyn LocationService>,
    ExtractSession(session): ExtractSession,
) -> Json<schemas::Location> {
    let active = location_service.active_location(session).await;
    Json(schemas::Location::from(&active))
}

async fn mount(
    Inject(location_service): Inject<dyn LocationService>,
    ExtractSession(session): ExtractSession,
    Json(mount): Json<schemas::Mount>,
) -> Json<schemas::LocationUpdate> {
    let update = location_service.mount(session, mount.map_available).await;
    Json(update.into())
}

async fn select_location(
    Inject(location_service): Inject<dyn LocationService>,
    ExtractSession(session): ExtractSession,
    Json(selection): Json<schemas::SelectLocation>,
) -> Json<schemas::LocationUpdate> {
    let update = location_service
        .select_location(session, selection.id)
        .await;
    Json(update.into())
}

async fn marker_clicked(
    Inject(location_service): Inject<dyn LocationService>,
    ExtractSession(session): ExtractSession,
    Path(location_id): Path<String>,
) -> Json<schemas::LocationUpdate> {
    let update = location_service.marker_clicked(session, location_id).await;
    Json(update.into())
}

pub mod schemas {
    use crate::core::map::MapCommand;
    use crate::core::traits;
    use crate::infrastructure::entities::{self, Coordinate, Hours, LocationId};
    use serde::{Deserialize, Serialize};

    #[derive(Deserialize, Debug)]
    pub struct Mount {
        pub map_available: bool,
    }

    #[derive(Deserialize, Debug)]
    pub struct SelectLocation {
        pub id: String,
    }

    #[derive(Serialize, Debug)]
    pub struct Location {
        pub id: LocationId,
        pub name: String,
        pub address: String,
        pub city_state_zip: String,
        pub phone: String,
        pub tel_href: String,
        pub map_url: String,
        pub schedule_url: String,
        pub coordinates: Coordinate,
        pub features: Vec<String>,
        pub hours: Hours,
    }

    impl From<&entities::Location> for Location {
        fn from(location: &entities::Location) -> Self {
            Location {
                id: location.id.clone(),
                name: location.name.clone(),
                address: location.address.clone(),
                city_state_zip: location.city_state_zip.clone(),
                phone: location.phone.clone(),
                tel_href: location.tel_href(),
                map_url: location.map_url.clone(),
                schedule_url: location.schedule_url.clone(),
                coordinates: location.coordinates,
                features: location.features.clone(),
                hours: location.hours.clone(),
            }
        }
    }

    #[derive(Serialize, Debug)]
    pub struct LocationList {
        pub locations: Vec<Location>,
    }

    #[derive(Serialize, Debug)]
    pub struct LocationUpdate {
        pub active: Location,
        pub map_commands: Vec<MapCommand>,
    }

    impl From<traits::LocationUpdate> for LocationUpdate {
        fn from(update: traits::LocationUpdate) -> Self {
            LocationUpdate {
                active: Location::from(&update.active),
                map_commands: update.map_commands,
            }
        }
    }
}
