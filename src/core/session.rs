//! Per-page-load UI state.

use crate::core::chatbot::ChatSession;
use crate::core::map::MapSynchronizer;
use crate::core::selector::LocationSelector;
use crate::infrastructure::catalog::SiteCatalog;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SessionState {
    pub selector: LocationSelector,
    pub map: MapSynchronizer,
    pub chat: ChatSession,
    pub scheduling_modal_open: bool,
}

impl SessionState {
    pub fn new(catalog: &SiteCatalog) -> Self {
        SessionState {
            selector: LocationSelector::new(catalog),
            map: MapSynchronizer::default(),
            chat: ChatSession::new(&catalog.chat.welcome),
            scheduling_modal_open: false,
        }
    }
}
