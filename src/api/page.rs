//! Page rendering, reviews and the scheduling modal

use crate::api::ExtractSession;
use crate::api::chat::schemas::ChatState;
use crate::api::locations::schemas::Location;
use crate::core::traits::PageService;
use crate::infrastructure::catalog::SiteCatalog;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{Datelike, Utc};
use di_axum::Inject;
use log::error;
use minijinja::{Environment, context};

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");

pub fn router() -> Router {
    Router::new()
        .route("/reviews", get(list_reviews))
        .route("/modal", get(scheduling_modal).post(set_scheduling_modal))
}

/// Every page load starts a new session.
pub async fn index(
    Inject(page_service): Inject<dyn PageService>,
    Inject(catalog): Inject<SiteCatalog>,
) -> Result<Html<String>, (StatusCode, &'static str)> {
    let (session_id, state) = page_service.open_session().await;
    let reviews = page_service.list_reviews().await;

    let mut env = Environment::new();
    env.add_template("index.html", INDEX_TEMPLATE)
        .and_then(|_| env.get_template("index.html"))
        .and_then(|template| {
            template.render(context! {
                session_id => session_id,
                business => context! {
                    name => catalog.business.name,
                    tagline => catalog.business.tagline,
                    email => catalog.business.email,
                    mailto_href => catalog.business.mailto_href(),
                },
                locations => catalog.locations.iter().map(Location::from).collect::<Vec<_>>(),
                active_location => Location::from(state.selector.active(&catalog)),
                reviews => reviews.iter().map(schemas::Review::from).collect::<Vec<_>>(),
                chat => ChatState::from(state.chat),
                scheduling_modal_open => state.scheduling_modal_open,
                year => Utc::now().year(),
            })
        })
        .map(Html)
        .map_err(|e| {
            error!("failed to render index: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to render page")
        })
}

async fn list_reviews(
    Inject(page_service): Inject<dyn PageService>,
    ExtractSession(_session): ExtractSession,
) -> Json<schemas::ReviewList> {
    let reviews = page_service.list_reviews().await;

    Json(schemas::ReviewList {
        reviews: reviews.iter().map(schemas::Review::from).collect(),
    })
}

async fn scheduling_modal(
    Inject(page_service): Inject<dyn PageService>,
    Inject(catalog): Inject<SiteCatalog>,
    ExtractSession(session): ExtractSession,
) -> Json<schemas::SchedulingModal> {
    let open = page_service.scheduling_modal_open(session).await;
    Json(schemas::SchedulingModal::new(open, &catalog))
}

async fn set_scheduling_modal(
    Inject(page_service): Inject<dyn PageService>,
    Inject(catalog): Inject<SiteCatalog>,
    ExtractSession(session): ExtractSession,
    Json(modal): Json<schemas::SetModal>,
) -> Json<schemas::SchedulingModal> {
    let open = page_service.set_scheduling_modal(session, modal.open).await;
    Json(schemas::SchedulingModal::new(open, &catalog))
}

pub mod schemas {
    use crate::infrastructure::catalog::SiteCatalog;
    use crate::infrastructure::entities::{self, LocationId, ReviewSource};
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Debug)]
    pub struct Review {
        pub id: u32,
        pub name: String,
        pub rating: u8,
        pub stars: Vec<bool>,
        pub text: String,
        pub location: String,
        pub source: ReviewSource,
    }

    impl From<&entities::Review> for Review {
        fn from(review: &entities::Review) -> Self {
            Review {
                id: review.id,
                name: review.name.clone(),
                rating: review.rating,
                stars: review.stars().to_vec(),
                text: review.text.clone(),
                location: review.location.clone(),
                source: review.source,
            }
        }
    }

    #[derive(Serialize, Debug)]
    pub struct ReviewList {
        pub reviews: Vec<Review>,
    }

    #[derive(Deserialize, Debug)]
    pub struct SetModal {
        pub open: bool,
    }

    #[derive(Serialize, Debug)]
    pub struct ScheduleLink {
        pub location_id: LocationId,
        pub name: String,
        pub schedule_url: String,
    }

    #[derive(Serialize, Debug)]
    pub struct SchedulingModal {
        pub open: bool,
        pub links: Vec<ScheduleLink>,
    }

    impl SchedulingModal {
        pub fn new(open: bool, catalog: &SiteCatalog) -> Self {
            SchedulingModal {
                open,
                links: catalog
                    .locations
                    .iter()
                    .map(|location| ScheduleLink {
                        location_id: location.id.clone(),
                        name: location.name.clone(),
                        schedule_url: location.schedule_url.clone(),
                    })
                    .collect(),
            }
        }
    }
}
