//! DI "Interfaces"

use crate::core::chatbot::{ChatSession, WidgetEvent};
use crate::core::map::MapCommand;
use crate::core::selector::SelectorEvent;
use crate::core::session::SessionState;
use crate::infrastructure::entities::{ChatMessage, Location, Review};
use async_trait::async_trait;
use tokio::sync::oneshot;
use uuid::Uuid;

/// Result of a location transition: the active record plus what the map should do.
#[derive(Debug, Clone)]
pub struct LocationUpdate {
    pub active: Location,
    pub map_commands: Vec<MapCommand>,
}

/// A submitted user message whose bot reply is still on its way.
pub struct PendingReply {
    pub user_message: ChatMessage,
    pub reply: oneshot::Receiver<ChatMessage>,
}

#[async_trait]
pub trait LocationService: Send + Sync {
    async fn list_locations(&self) -> Vec<Location>;

    async fn active_location(&self, session_id: Uuid) -> Location;

    /// First render of the page. Returns the map setup commands, or none if
    /// the page reported the map widget as unavailable.
    async fn mount(&self, session_id: Uuid, map_available: bool) -> LocationUpdate;

    async fn apply(&self, session_id: Uuid, event: SelectorEvent) -> LocationUpdate;

    /// Unknown ids leave the session untouched.
    async fn select_location(&self, session_id: Uuid, location_id: String) -> LocationUpdate {
        self.apply(session_id, SelectorEvent::Select(location_id))
            .await
    }

    async fn marker_clicked(&self, session_id: Uuid, location_id: String) -> LocationUpdate {
        self.apply(session_id, SelectorEvent::MarkerClicked(location_id))
            .await
    }
}

#[async_trait]
pub trait ChatService: Send + Sync {
    async fn chat_state(&self, session_id: Uuid) -> ChatSession;

    /// Applies a widget flag transition. Messages only enter through `submit`.
    async fn update_widget(&self, session_id: Uuid, event: WidgetEvent) -> ChatSession;

    async fn open(&self, session_id: Uuid) -> ChatSession {
        self.update_widget(session_id, WidgetEvent::Open).await
    }

    async fn close(&self, session_id: Uuid) -> ChatSession {
        self.update_widget(session_id, WidgetEvent::Close).await
    }

    async fn toggle_minimized(&self, session_id: Uuid) -> ChatSession {
        self.update_widget(session_id, WidgetEvent::ToggleMinimized)
            .await
    }

    /// Appends the user message and queues the bot reply.
    ///
    /// Returns `None` for blank input.
    async fn submit(&self, session_id: Uuid, text: String) -> Option<PendingReply>;
}

#[async_trait]
pub trait PageService: Send + Sync {
    /// Starts the session for a fresh page load.
    async fn open_session(&self) -> (Uuid, SessionState);

    async fn list_reviews(&self) -> Vec<Review>;

    async fn scheduling_modal_open(&self, session_id: Uuid) -> bool;

    async fn set_scheduling_modal(&self, session_id: Uuid, open: bool) -> bool;
}
