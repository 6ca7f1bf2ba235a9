//! User-facing failure surfaces: the caller-supplied callback and the
//! unconditional notification channel.

use pushroute_core::protocol::response::MessageId;

/// Receives the message identifier of a failed server response.
pub trait FailureCallback {
    fn on_failure(&self, message: MessageId);
}

impl<F: Fn(MessageId)> FailureCallback for F {
    fn on_failure(&self, message: MessageId) {
        self(message)
    }
}

/// Presents a message to the user regardless of any callback (toast).
pub trait Notifier: Send + Sync {
    fn notify(&self, message: MessageId);
}

/// Notifier that only logs; used where no UI is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: MessageId) {
        tracing::warn!(%message, "user notification");
    }
}
