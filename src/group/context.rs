//! Validation context
//!
//! Carried through a group run. Holds a cancellation token that another
//! thread may trigger; groups check it before starting each unit.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation; idempotent
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Context carried through group validation
#[derive(Debug, Clone, Default)]
pub struct Context {
    cancel: CancelToken,
}

impl Context {
    /// A context that is never cancelled unless its token is shared first
    pub fn background() -> Self {
        Self::default()
    }

    /// A context plus the token that cancels it
    pub fn with_cancel() -> (Self, CancelToken) {
        let token = CancelToken::new();
        (
            Self {
                cancel: token.clone(),
            },
            token,
        )
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
