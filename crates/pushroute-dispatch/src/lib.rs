//! pushroute dispatch library entry.
//!
//! This crate wires the envelope router, response translator, worker pool,
//! and metrics into one explicitly constructed `DispatchService`. It is
//! consumed by the daemon binary (`main.rs`) and by integration tests.

pub mod centers;
pub mod config;
pub mod notify;
pub mod obs;
pub mod pool;
pub mod router;
pub mod service;
pub mod session;
pub mod translate;

pub use router::{DispatchReport, DispatchStatus, PushRouter};
pub use service::{Collaborators, DispatchService};
