//! Dispatch config loader.
//!
//! YAML is parsed strictly (`deny_unknown_fields` at every level), then
//! validated: `version` must be 1, `executor.workers` within 1..=64 with a
//! non-empty thread name, and no empty names in `codec.exclude_fields`.
//! Parse failures surface as `InvalidConfig`, a wrong version as
//! `UnsupportedVersion`.

pub mod schema;

use std::fs;

use pushroute_core::error::{PushError, Result};

pub use schema::{CodecSection, DispatchConfig, ExecutorSection};

pub fn load_from_file(path: &str) -> Result<DispatchConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| PushError::Internal(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<DispatchConfig> {
    let cfg: DispatchConfig = serde_yaml::from_str(s)
        .map_err(|e| PushError::InvalidConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
