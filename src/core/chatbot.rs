//! Chat widget state machine.

use crate::core::responder::Responder;
use crate::infrastructure::entities::ChatMessage;
use serde::Serialize;

#[derive(Debug, Clone)]
pub enum ChatEvent {
    Open,
    Close,
    ToggleMinimized,
    Submit(String),
}

/// Transitions of the widget chrome. None of them touch the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetEvent {
    Open,
    Close,
    ToggleMinimized,
}

impl From<WidgetEvent> for ChatEvent {
    fn from(event: WidgetEvent) -> Self {
        match event {
            WidgetEvent::Open => ChatEvent::Open,
            WidgetEvent::Close => ChatEvent::Close,
            WidgetEvent::ToggleMinimized => ChatEvent::ToggleMinimized,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEffect {
    Appended(ChatMessage),
    /// Append `reply` as a bot message once the reply delay has elapsed.
    ScheduleReply(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatSession {
    open: bool,
    minimized: bool,
    transcript: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(welcome: &str) -> Self {
        ChatSession {
            open: false,
            minimized: false,
            transcript: vec![ChatMessage::bot(welcome)],
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    #[must_use]
    pub fn apply(&mut self, responder: &Responder<'_>, event: ChatEvent) -> Vec<ChatEffect> {
        match event {
            ChatEvent::Open => {
                self.open = true;
                Vec::new()
            }
            ChatEvent::Close => {
                self.open = false;
                Vec::new()
            }
            ChatEvent::ToggleMinimized => {
                self.minimized = !self.minimized;
                Vec::new()
            }
            ChatEvent::Submit(text) => {
                if text.trim().is_empty() {
                    return Vec::new();
                }

                let reply = responder.respond(&text).to_owned();
                let message = self.append(ChatMessage::user(text));

                vec![ChatEffect::Appended(message), ChatEffect::ScheduleReply(reply)]
            }
        }
    }

    /// Appends a bot reply scheduled by an earlier `Submit`.
    pub fn deliver_reply(&mut self, reply: String) -> ChatMessage {
        self.append(ChatMessage::bot(reply))
    }

    fn append(&mut self, message: ChatMessage) -> ChatMessage {
        self.transcript.push(message.clone());
        message
    }
}
