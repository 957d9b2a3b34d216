//! Chat widget endpoints

use crate::api::ExtractSession;
use crate::core::traits::{ChatService, PendingReply};
use crate::infrastructure::entities::ChatMessage;
use async_stream::stream;
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive};
use axum::response::{IntoResponse, Response, Sse};
use axum::routing::{get, post};
use axum::{Json, Router};
use di_axum::Inject;
use futures_util::Stream;
use log::debug;

pub fn router() -> Router {
    Router::new()
        .route("/", get(chat_state))
        .route("/open", post(open_chat))
        .route("/close", post(close_chat))
        .route("/minimize", post(toggle_minimized))
        .route("/messages", post(post_message))
}

async fn chat_state(
    Inject(chat_service): Inject<dyn ChatService>,
    ExtractSession(session): ExtractSession,
) -> Json<schemas::ChatState> {
    Json(chat_service.chat_state(session).await.into())
}

async fn open_chat(
    Inject(chat_service): Inject<dyn ChatService>,
    ExtractSession(session): ExtractSession,
) -> Json<schemas::ChatState> {
    Json(chat_service.open(session).await.into())
}

async fn close_chat(
    Inject(chat_service): Inject<dyn ChatService>,
    ExtractSession(session): ExtractSession,
) -> Json<schemas::ChatState> {
    Json(chat_service.close(session).await.into())
}

async fn toggle_minimized(
    Inject(chat_service): Inject<dyn ChatService>,
    ExtractSession(session): ExtractSession,
) -> Json<schemas::ChatState> {
    Json(chat_service.toggle_minimized(session).await.into())
}

async fn post_message(
    Inject(chat_service): Inject<dyn ChatService>,
    ExtractSession(session): ExtractSession,
    Json(message): Json<schemas::CreateMessage>,
) -> Response {
    match chat_service.submit(session, message.text).await {
        Some(pending) => reply_stream(pending).into_response(),
        None => {
            debug!("ignoring blank chat message from {session}");
            StatusCode::NO_CONTENT.into_response()
        }
    }
}

/// Streams the user's message straight away, then the bot reply once it is delivered.
fn reply_stream(pending: PendingReply) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let PendingReply {
        user_message,
        reply,
    } = pending;

    let stream = stream! {
        yield message_event(&user_message);

        if let Ok(bot_message) = reply.await {
            yield message_event(&bot_message);
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

fn message_event(message: &ChatMessage) -> Result<Event, axum::Error> {
    Event::default()
        .event("new_message")
        .json_data(schemas::Message::from(message))
}

pub mod schemas {
    use crate::core::chatbot::ChatSession;
    use crate::infrastructure::entities;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    #[derive(Deserialize, Debug)]
    pub struct CreateMessage {
        pub text: String,
    }

    #[derive(Serialize, Debug)]
    pub struct Message {
        pub id: Uuid,
        pub text: String,
        pub is_bot: bool,
        pub timestamp: DateTime<Utc>,
    }

    impl From<&entities::ChatMessage> for Message {
        fn from(message: &entities::ChatMessage) -> Self {
            Message {
                id: message.id,
                text: message.text.clone(),
                is_bot: message.is_bot,
                timestamp: message.timestamp,
            }
        }
    }

    #[derive(Serialize, Debug)]
    pub struct ChatState {
        pub open: bool,
        pub minimized: bool,
        pub messages: Vec<Message>,
    }

    impl From<ChatSession> for ChatState {
        fn from(chat: ChatSession) -> Self {
            ChatState {
                open: chat.is_open(),
                minimized: chat.is_minimized(),
                messages: chat.transcript().iter().map(Message::from).collect(),
            }
        }
    }
}
