use async_trait::async_trait;
use futures::channel::oneshot;
use leptos::*;
use std::{cell::RefCell, rc::Rc};

/// Asks the user to confirm an action. Implementations resolve to `false`
/// when the prompt is dismissed.
#[async_trait(?Send)]
pub trait ConfirmPrompt {
    async fn confirm(&self, message: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConfirmation {
    pub title: String,
    pub message: String,
}

/// Prompt backed by a `ConfirmDialog`: `confirm` opens the dialog and waits
/// for [`DialogPrompt::respond`].
#[derive(Clone)]
pub struct DialogPrompt {
    title: String,
    pending: RwSignal<Option<PendingConfirmation>>,
    responder: Rc<RefCell<Option<oneshot::Sender<bool>>>>,
}

impl DialogPrompt {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            pending: create_rw_signal(None),
            responder: Rc::new(RefCell::new(None)),
        }
    }

    pub fn pending(&self) -> RwSignal<Option<PendingConfirmation>> {
        self.pending
    }

    pub fn respond(&self, accepted: bool) {
        let sender = self.responder.borrow_mut().take();
        self.pending.set(None);
        if let Some(sender) = sender {
            let _ = sender.send(accepted);
        }
    }
}

#[async_trait(?Send)]
impl ConfirmPrompt for DialogPrompt {
    async fn confirm(&self, message: &str) -> bool {
        let (tx, rx) = oneshot::channel();
        let previous = self.responder.borrow_mut().replace(tx);
        if let Some(previous) = previous {
            let _ = previous.send(false);
        }
        self.pending.set(Some(PendingConfirmation {
            title: self.title.clone(),
            message: message.to_string(),
        }));
        rx.await.unwrap_or(false)
    }
}
