//! Lightweight in-process metrics.
//!
//! Counters and a latency histogram keyed by dynamic labels, stored as atomics
//! and rendered in Prometheus text format on demand.

pub mod metrics;

pub use metrics::{CounterVec, DispatchMetrics, HistogramVec};
