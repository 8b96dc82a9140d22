//! The caller's handle on a response-expecting call.

use shared_wire::CallId;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

use crate::domain::{BridgeError, CallOutcome};

enum ReplyState {
    /// Settled before the caller got the handle (fail-fast paths), or
    /// already taken.
    Ready(Option<CallOutcome>),
    Waiting(oneshot::Receiver<CallOutcome>),
}

/// Future resolving to the host's reply, or to the reason there is none.
///
/// Resolves exactly once. Polling again after completion yields
/// [`BridgeError::Abandoned`].
pub struct PendingReply {
    id: Option<CallId>,
    func: String,
    state: ReplyState,
}

impl PendingReply {
    pub(crate) fn waiting(id: CallId, func: &str, rx: oneshot::Receiver<CallOutcome>) -> Self {
        Self {
            id: Some(id),
            func: func.to_string(),
            state: ReplyState::Waiting(rx),
        }
    }

    /// An already-failed reply; no id was allocated.
    pub(crate) fn failed(func: &str, error: BridgeError) -> Self {
        Self {
            id: None,
            func: func.to_string(),
            state: ReplyState::Ready(Some(Err(error))),
        }
    }

    /// Id allocated for the call; `None` when the call failed before one
    /// was allocated.
    pub fn call_id(&self) -> Option<CallId> {
        self.id
    }

    pub fn func(&self) -> &str {
        &self.func
    }

    /// Whether the outcome has already been taken, by `try_outcome` or by
    /// awaiting.
    pub fn is_consumed(&self) -> bool {
        matches!(self.state, ReplyState::Ready(None))
    }

    /// Take the outcome without waiting, if the call is already settled.
    ///
    /// `None` means either still pending or already taken; tell the two
    /// apart with [`is_consumed`](Self::is_consumed).
    pub fn try_outcome(&mut self) -> Option<CallOutcome> {
        match &mut self.state {
            ReplyState::Ready(outcome) => outcome.take(),
            ReplyState::Waiting(rx) => match rx.try_recv() {
                Ok(outcome) => {
                    self.state = ReplyState::Ready(None);
                    Some(outcome)
                }
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Closed) => {
                    self.state = ReplyState::Ready(None);
                    Some(Err(self.abandoned()))
                }
            },
        }
    }

    fn abandoned(&self) -> BridgeError {
        BridgeError::Abandoned {
            func: self.func.clone(),
        }
    }
}

impl Future for PendingReply {
    type Output = CallOutcome;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let outcome = match &mut this.state {
            ReplyState::Ready(outcome) => outcome.take(),
            ReplyState::Waiting(rx) => match Pin::new(rx).poll(cx) {
                Poll::Ready(Ok(outcome)) => Some(outcome),
                Poll::Ready(Err(_)) => None,
                Poll::Pending => return Poll::Pending,
            },
        };
        this.state = ReplyState::Ready(None);
        Poll::Ready(outcome.unwrap_or_else(|| Err(this.abandoned())))
    }
}

impl std::fmt::Debug for PendingReply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingReply")
            .field("id", &self.id)
            .field("func", &self.func)
            .finish_non_exhaustive()
    }
}
