//! Implementations for the service the app needs.
//!

use crate::config::SiteConfig;
use crate::core::chatbot::{ChatEffect, ChatEvent, ChatSession, WidgetEvent};
use crate::core::replies::{ReplyQueue, ReplyTask};
use crate::core::responder::Responder;
use crate::core::selector::SelectorEvent;
use crate::core::session::SessionState;
use crate::core::traits::{ChatService, LocationService, LocationUpdate, PageService, PendingReply};
use crate::infrastructure::catalog::SiteCatalog;
use crate::infrastructure::entities::{ChatMessage, Location, Review};
use crate::infrastructure::traits::SessionRepository;
use async_trait::async_trait;
use di::{Ref, injectable};
use log::{error, info};
use uuid::Uuid;

fn new_session(catalog: &SiteCatalog) -> impl Fn() -> SessionState + '_ {
    move || SessionState::new(catalog)
}

#[injectable(LocationService)]
pub struct MyLocationService {
    sessions: Ref<dyn SessionRepository>,
    catalog: Ref<SiteCatalog>,
}

#[async_trait]
impl LocationService for MyLocationService {
    async fn list_locations(&self) -> Vec<Location> {
        self.catalog.locations.clone()
    }

    async fn active_location(&self, session_id: Uuid) -> Location {
        self.sessions
            .update(session_id, &new_session(&self.catalog), |state| {
                state.selector.active(&self.catalog).clone()
            })
    }

    async fn mount(&self, session_id: Uuid, map_available: bool) -> LocationUpdate {
        let catalog = &*self.catalog;

        self.sessions
            .update(session_id, &new_session(catalog), |state| {
                // mounting never recenters
                let _ = state.selector.apply(catalog, SelectorEvent::Mounted);
                LocationUpdate {
                    active: state.selector.active(catalog).clone(),
                    map_commands: state.map.mount(catalog, map_available),
                }
            })
    }

    async fn apply(&self, session_id: Uuid, event: SelectorEvent) -> LocationUpdate {
        let catalog = &*self.catalog;

        self.sessions
            .update(session_id, &new_session(catalog), |state| {
                let effects = state.selector.apply(catalog, event);
                let active = state.selector.active(catalog).clone();
                if !effects.is_empty() {
                    info!("session {session_id} switched to {}", active.id);
                }
                LocationUpdate {
                    active,
                    map_commands: state.map.sync(effects),
                }
            })
    }
}

#[injectable(ChatService)]
pub struct MyChatService {
    sessions: Ref<dyn SessionRepository>,
    catalog: Ref<SiteCatalog>,
    replies: Ref<ReplyQueue>,
    config: Ref<SiteConfig>,
}

#[async_trait]
impl ChatService for MyChatService {
    async fn chat_state(&self, session_id: Uuid) -> ChatSession {
        self.sessions
            .update(session_id, &new_session(&self.catalog), |state| {
                state.chat.clone()
            })
    }

    async fn update_widget(&self, session_id: Uuid, event: WidgetEvent) -> ChatSession {
        let responder = Responder::from_script(&self.catalog.chat);

        self.sessions
            .update(session_id, &new_session(&self.catalog), |state| {
                let effects = state.chat.apply(&responder, event.into());
                debug_assert!(effects.is_empty(), "{event:?} produced {effects:?}");
                state.chat.clone()
            })
    }

    async fn submit(&self, session_id: Uuid, text: String) -> Option<PendingReply> {
        let responder = Responder::from_script(&self.catalog.chat);

        // Queue while the session is held so replies keep submission order.
        self.sessions
            .update(session_id, &new_session(&self.catalog), |state| {
                let mut user_message: Option<ChatMessage> = None;
                let mut reply = None;

                for effect in state.chat.apply(&responder, ChatEvent::Submit(text)) {
                    match effect {
                        ChatEffect::Appended(message) => user_message = Some(message),
                        ChatEffect::ScheduleReply(text) => {
                            let (task, receiver) = ReplyTask::new(
                                session_id,
                                text,
                                self.config.reply_delay,
                                self.sessions.clone(),
                            );
                            if !self.replies.enqueue(task) {
                                error!("reply queue is closed, reply for {session_id} lost");
                            }
                            reply = Some(receiver);
                        }
                    }
                }

                Some(PendingReply {
                    user_message: user_message?,
                    reply: reply?,
                })
            })
    }
}

#[injectable(PageService)]
pub struct MyPageService {
    sessions: Ref<dyn SessionRepository>,
    catalog: Ref<SiteCatalog>,
}

#[async_trait]
impl PageService for MyPageService {
    async fn open_session(&self) -> (Uuid, SessionState) {
        let session_id = Uuid::new_v4();
        let state = self
            .sessions
            .update(session_id, &new_session(&self.catalog), |state| {
                state.clone()
            });

        (session_id, state)
    }

    async fn list_reviews(&self) -> Vec<Review> {
        self.catalog.reviews.clone()
    }

    async fn scheduling_modal_open(&self, session_id: Uuid) -> bool {
        self.sessions
            .update(session_id, &new_session(&self.catalog), |state| {
                state.scheduling_modal_open
            })
    }

    async fn set_scheduling_modal(&self, session_id: Uuid, open: bool) -> bool {
        self.sessions
            .update(session_id, &new_session(&self.catalog), |state| {
                state.scheduling_modal_open = open;
                open
            })
    }
}
