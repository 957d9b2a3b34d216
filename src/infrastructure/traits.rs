//! Infrastructure traits, used for DI on higher levels

use crate::core::session::SessionState;
use uuid::Uuid;

pub trait SessionRepository: Send + Sync {
    /// Runs `f` on the session, creating it with `init` first if it does not exist.
    fn with_session(
        &self,
        session_id: Uuid,
        init: &dyn Fn() -> SessionState,
        f: &mut dyn FnMut(&mut SessionState),
    );

    /// Runs `f` on the session only if it exists. Returns `false` otherwise.
    fn with_existing(&self, session_id: Uuid, f: &mut dyn FnMut(&mut SessionState)) -> bool;
}

impl dyn SessionRepository {
    pub fn update<R>(
        &self,
        session_id: Uuid,
        init: &dyn Fn() -> SessionState,
        f: impl FnOnce(&mut SessionState) -> R,
    ) -> R {
        let mut f = Some(f);
        let mut result = None;
        self.with_session(session_id, init, &mut |state: &mut SessionState| {
            if let Some(f) = f.take() {
                result = Some(f(state));
            }
        });
        // with_session always runs the callback exactly once
        match result {
            Some(result) => result,
            None => unreachable!("session callback was not invoked"),
        }
    }

    pub fn update_existing<R>(
        &self,
        session_id: Uuid,
        f: impl FnOnce(&mut SessionState) -> R,
    ) -> Option<R> {
        let mut f = Some(f);
        let mut result = None;
        self.with_existing(session_id, &mut |state: &mut SessionState| {
            if let Some(f) = f.take() {
                result = Some(f(state));
            }
        });
        result
    }
}
