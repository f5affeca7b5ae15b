use crossbeam_channel::{bounded, Receiver, Sender};
use crate::error::SealError;
use crate::Result;

/// Interchangeable sessions parked in a channel.
///
/// A call takes one session out of the queue, uses it alone and puts it back, so nothing is
/// locked while a session runs. With `N` sessions, `N` calls proceed at once; a further caller
/// waits in `recv` until one is returned.
pub(crate) struct SessionPool<S> {
    idle_tx: Sender<S>,
    idle_rx: Receiver<S>,
    size: usize,
}

impl<S> SessionPool<S> {
    pub(crate) fn new(sessions: Vec<S>) -> Result<Self> {
        let size = sessions.len();
        if size == 0 {
            return Err(SealError::validation("session pool needs at least one session"));
        }
        let (idle_tx, idle_rx) = bounded(size);
        for session in sessions {
            idle_tx.send(session).map_err(|_| SealError::inference("session pool closed"))?;
        }
        Ok(Self { idle_tx, idle_rx, size })
    }

    pub(crate) fn size(&self) -> usize {
        self.size
    }

    /// Runs `f` with exclusive use of one idle session.
    pub(crate) fn with_session<R>(&self, f: impl FnOnce(&mut S) -> R) -> Result<R> {
        let session = self
            .idle_rx
            .recv()
            .map_err(|_| SealError::inference("session pool closed"))?;
        // returned on drop, also when `f` unwinds
        let mut checkout = Checkout { session: Some(session), idle_tx: &self.idle_tx };
        let result = match checkout.session.as_mut() {
            Some(session) => Ok(f(session)),
            None => Err(SealError::inference("session pool checkout was empty")),
        };
        result
    }
}

struct Checkout<'a, S> {
    session: Option<S>,
    idle_tx: &'a Sender<S>,
}

impl<S> Drop for Checkout<'_, S> {
    fn drop(&mut self) {
        if let Some(session) = self.session.take() {
            let _ = self.idle_tx.send(session);
        }
    }
}
