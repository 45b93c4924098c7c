// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::Arc;

use tokio::sync::watch;

/// The sending half. Aborting is sticky: once aborted, every [`AbortSignal`] handed out
/// by this controller, before or after, reports it.
///
/// ```
/// use r3bl_prompt::AbortController;
///
/// let controller = AbortController::new();
/// let signal = controller.signal();
/// assert!(!signal.is_aborted());
/// controller.abort();
/// assert!(signal.is_aborted());
/// ```
#[derive(Debug, Clone)]
pub struct AbortController {
    sender: Arc<watch::Sender<bool>>,
}

/// The receiving half, passed to a prompt via [`crate::PromptOptions::abort_signal`].
#[derive(Debug, Clone)]
pub struct AbortSignal {
    receiver: watch::Receiver<bool>,
}

impl Default for AbortController {
    fn default() -> Self { Self::new() }
}

impl AbortController {
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    #[must_use]
    pub fn signal(&self) -> AbortSignal {
        AbortSignal {
            receiver: self.sender.subscribe(),
        }
    }

    pub fn abort(&self) {
        if !self.sender.send_replace(true) {
            tracing::debug!(message = "Abort signal fired");
        }
    }

    #[must_use]
    pub fn is_aborted(&self) -> bool { *self.sender.borrow() }
}

impl AbortSignal {
    #[must_use]
    pub fn is_aborted(&self) -> bool { *self.receiver.borrow() }

    /// Resolves once the controller aborts. Never resolves if the controller is
    /// dropped without aborting.
    pub async fn aborted(&self) {
        let mut receiver = self.receiver.clone();
        if receiver.wait_for(|is_aborted| *is_aborted).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
