//! Session collaborator.
//!
//! The authenticated flag and the logout action are owned outside this crate;
//! dispatch only reads the gate and signals teardown.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

pub trait SessionGate: Send + Sync {
    /// Is a user currently authenticated?
    fn is_authenticated(&self) -> bool;
    /// Invalidate the local session.
    fn force_logout(&self);
}

/// In-process session flag (daemon and tests).
#[derive(Debug, Default)]
pub struct AtomicSession {
    authed: AtomicBool,
    forced_logouts: AtomicU64,
}

impl AtomicSession {
    pub fn new(authed: bool) -> Self {
        Self {
            authed: AtomicBool::new(authed),
            forced_logouts: AtomicU64::new(0),
        }
    }

    pub fn login(&self) {
        self.authed.store(true, Ordering::Release);
    }

    pub fn forced_logouts(&self) -> u64 {
        self.forced_logouts.load(Ordering::Relaxed)
    }
}

impl SessionGate for AtomicSession {
    fn is_authenticated(&self) -> bool {
        self.authed.load(Ordering::Acquire)
    }

    fn force_logout(&self) {
        self.authed.store(false, Ordering::Release);
        self.forced_logouts.fetch_add(1, Ordering::Relaxed);
        tracing::info!("session invalidated");
    }
}
