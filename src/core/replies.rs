//! Delayed chatbot replies.
//!
//! Replies are queued on a single background task in submission order. Each
//! task carries the instant it becomes due, so equal-latency replies land in
//! the transcript in the order their messages were submitted, and nothing on
//! the request path waits for the delay.

use crate::infrastructure::entities::ChatMessage;
use crate::infrastructure::traits::SessionRepository;
use di::Ref;
use log::{debug, info};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use uuid::Uuid;

pub struct ReplyTask {
    session_id: Uuid,
    reply: String,
    due: Instant,
    sessions: Ref<dyn SessionRepository>,
    delivered: oneshot::Sender<ChatMessage>,
}

impl ReplyTask {
    pub fn new(
        session_id: Uuid,
        reply: String,
        delay: Duration,
        sessions: Ref<dyn SessionRepository>,
    ) -> (ReplyTask, oneshot::Receiver<ChatMessage>) {
        let (sender, receiver) = oneshot::channel();

        (
            ReplyTask {
                session_id,
                reply,
                due: Instant::now() + delay,
                sessions,
                delivered: sender,
            },
            receiver,
        )
    }

    fn deliver(self) {
        let ReplyTask {
            session_id,
            reply,
            sessions,
            delivered,
            ..
        } = self;

        match sessions.update_existing(session_id, |state| state.chat.deliver_reply(reply)) {
            Some(message) => {
                debug!("delivered reply {} to session {session_id}", message.id);
                // the submitting client may have disconnected; the reply is kept anyway
                let _ = delivered.send(message);
            }
            None => debug!("session {session_id} is gone, dropping reply"),
        }
    }
}

pub struct ReplyQueue {
    sender: mpsc::UnboundedSender<ReplyTask>,
}

impl ReplyQueue {
    /// Spawns the delivery task on the current runtime.
    pub fn start() -> (ReplyQueue, JoinHandle<()>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let handle = tokio::spawn(background_task(receiver));

        (ReplyQueue { sender }, handle)
    }

    /// Queues a reply. Returns `false` if the delivery task has stopped.
    pub fn enqueue(&self, task: ReplyTask) -> bool {
        self.sender.send(task).is_ok()
    }
}

pub async fn background_task(mut task_queue: mpsc::UnboundedReceiver<ReplyTask>) {
    while let Some(task) = task_queue.recv().await {
        tokio::time::sleep_until(task.due).await;
        task.deliver();
    }
    info!("reply queue closed");
}
