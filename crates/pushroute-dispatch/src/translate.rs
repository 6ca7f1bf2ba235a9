//! Response code translation.
//!
//! Success is silent. Every other code resolves through the response table to a
//! message identifier handed to the caller's callback, if any. The credential
//! code bypasses the callback: it always notifies and always forces logout.

use std::sync::Arc;

use pushroute_core::protocol::response::{ResponseCode, RspModel};

use crate::notify::{FailureCallback, Notifier};
use crate::obs::DispatchMetrics;
use crate::session::SessionGate;

pub struct ResponseTranslator {
    session: Arc<dyn SessionGate>,
    notifier: Arc<dyn Notifier>,
    metrics: Arc<DispatchMetrics>,
}

impl ResponseTranslator {
    pub fn new(
        session: Arc<dyn SessionGate>,
        notifier: Arc<dyn Notifier>,
        metrics: Arc<DispatchMetrics>,
    ) -> Self {
        Self {
            session,
            notifier,
            metrics,
        }
    }

    pub fn translate(&self, code: ResponseCode, callback: Option<&dyn FailureCallback>) {
        let entry = code.entry();
        let label = entry.raw.to_string();
        self.metrics
            .translated_responses
            .inc(&[("code", label.as_str())]);

        let Some(message) = entry.message else {
            return;
        };

        if entry.forces_logout {
            tracing::info!(code = entry.raw, %message, "credential rejected, forcing logout");
            self.notifier.notify(message);
            self.session.force_logout();
            self.metrics.forced_logouts.inc(&[("source", "response")]);
            return;
        }

        tracing::debug!(code = entry.raw, %message, has_callback = callback.is_some(), "response failure");
        if let Some(cb) = callback {
            cb.on_failure(message);
        }
    }

    /// Translate a raw wire code; codes outside the table count as unknown.
    pub fn translate_raw(&self, raw: i32, callback: Option<&dyn FailureCallback>) {
        self.translate(ResponseCode::from_code(raw), callback);
    }

    /// Translate a server response; a missing model is a no-op.
    pub fn decode_rsp<T>(&self, model: Option<&RspModel<T>>, callback: Option<&dyn FailureCallback>) {
        if let Some(model) = model {
            self.translate(model.status(), callback);
        }
    }
}
