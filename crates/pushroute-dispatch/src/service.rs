//! Dispatch service: the explicitly constructed entry point for push payloads
//! and server responses.
//!
//! Owns the shared card codec (inside the router) and the worker pool; holds
//! the collaborators it was built with. Callers receive it by reference or by
//! cloning the handle; there is no global instance.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;

use pushroute_core::error::Result;
use pushroute_core::protocol::codec::CardCodec;
use pushroute_core::protocol::response::{ResponseCode, RspModel};

use crate::centers::{Centers, GroupCenter, MessageCenter, UserCenter};
use crate::config::DispatchConfig;
use crate::notify::{FailureCallback, Notifier};
use crate::obs::DispatchMetrics;
use crate::pool::TaskPool;
use crate::router::{DispatchReport, PushRouter};
use crate::session::SessionGate;
use crate::translate::ResponseTranslator;

/// External collaborators the service is wired to.
#[derive(Clone)]
pub struct Collaborators {
    pub session: Arc<dyn SessionGate>,
    pub notifier: Arc<dyn Notifier>,
    pub centers: Centers,
}

#[derive(Clone)]
pub struct DispatchService {
    router: Arc<PushRouter>,
    inner: Arc<ServiceInner>,
}

struct ServiceInner {
    translator: ResponseTranslator,
    pool: TaskPool,
    metrics: Arc<DispatchMetrics>,
}

impl DispatchService {
    /// Build the service. Returns Result so startup errors surface without panics.
    pub fn new(cfg: &DispatchConfig, collab: Collaborators) -> Result<Self> {
        cfg.validate()?;

        let metrics = Arc::new(DispatchMetrics::default());
        let codec = cfg.codec.build();
        let pool = TaskPool::new(&cfg.executor)?;

        let router = PushRouter::new(
            codec,
            collab.centers,
            Arc::clone(&collab.session),
            Arc::clone(&metrics),
        );
        let translator =
            ResponseTranslator::new(collab.session, collab.notifier, Arc::clone(&metrics));

        tracing::info!(
            workers = pool.workers(),
            excluded = ?cfg.codec.exclude_fields,
            "dispatch service ready"
        );

        Ok(Self {
            router: Arc::new(router),
            inner: Arc::new(ServiceInner {
                translator,
                pool,
                metrics,
            }),
        })
    }

    /// Dispatch one push payload on the calling thread.
    pub fn dispatch_push(&self, raw: &[u8]) -> Result<DispatchReport> {
        self.router.dispatch(raw)
    }

    /// Dispatch one push payload on the worker pool (fire-and-forget).
    pub fn submit_push(&self, raw: Bytes) -> Result<()> {
        let router = Arc::clone(&self.router);
        self.inner.pool.run_async(move || {
            if let Err(e) = router.dispatch(&raw) {
                tracing::error!(error = %e, code = e.code().as_str(), "async push dispatch failed");
            }
        })
    }

    /// Run arbitrary work on the shared pool.
    pub fn run_async<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.inner.pool.run_async(f)
    }

    pub fn translate_response(&self, code: ResponseCode, callback: Option<&dyn FailureCallback>) {
        self.inner.translator.translate(code, callback);
    }

    pub fn decode_rsp<T>(&self, model: Option<&RspModel<T>>, callback: Option<&dyn FailureCallback>) {
        self.inner.translator.decode_rsp(model, callback);
    }

    pub fn user_center(&self) -> Arc<dyn UserCenter> {
        Arc::clone(&self.router.centers().user)
    }

    pub fn group_center(&self) -> Arc<dyn GroupCenter> {
        Arc::clone(&self.router.centers().group)
    }

    pub fn message_center(&self) -> Arc<dyn MessageCenter> {
        Arc::clone(&self.router.centers().message)
    }

    pub fn codec(&self) -> &CardCodec {
        self.router.codec()
    }

    pub fn metrics(&self) -> Arc<DispatchMetrics> {
        Arc::clone(&self.inner.metrics)
    }

    /// Drain and stop the worker pool. Call once, at process exit.
    pub fn shutdown(&self, timeout: Duration) {
        self.inner.pool.shutdown(timeout);
    }
}
