//! pushroute dispatch daemon.
//!
//! Reads push payloads (one JSON envelope per line) from stdin and dispatches
//! each on the worker pool into an in-memory center. Prints metrics at EOF.
//!
//! Usage: `pushroute-dispatch [config.yaml]` (default `pushroute.yaml`).

use std::io::{self, BufRead};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tracing_subscriber::{fmt, EnvFilter};

use pushroute_core::error::Result;
use pushroute_dispatch::centers::{Centers, MemoryCenter};
use pushroute_dispatch::notify::TracingNotifier;
use pushroute_dispatch::session::AtomicSession;
use pushroute_dispatch::{config, Collaborators, DispatchService};

const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, code = e.code().as_str(), "pushroute-dispatch failed");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "pushroute.yaml".to_string());
    let cfg = config::load_from_file(&path)?;

    let store = Arc::new(MemoryCenter::new());
    let session = Arc::new(AtomicSession::new(true));
    let service = DispatchService::new(
        &cfg,
        Collaborators {
            session: session.clone(),
            notifier: Arc::new(TracingNotifier),
            centers: Centers::shared(Arc::clone(&store)),
        },
    )?;

    tracing::info!(config = %path, "pushroute-dispatch reading stdin");
    for line in io::stdin().lock().lines() {
        let line = line.map_err(|e| {
            pushroute_core::PushError::Internal(format!("stdin read failed: {e}"))
        })?;
        if line.trim().is_empty() {
            continue;
        }
        service.submit_push(Bytes::from(line))?;
    }

    service.shutdown(DRAIN_TIMEOUT);

    print!("{}", service.metrics().render());
    tracing::info!(
        users = store.user_count(),
        groups = store.group_count(),
        members = store.member_count(),
        messages = store.message_count(),
        forced_logouts = session.forced_logouts(),
        "pushroute-dispatch done"
    );
    Ok(())
}
