use serde::Deserialize;

use pushroute_core::error::{PushError, Result};
use pushroute_core::protocol::codec::{CardCodec, DEFAULT_EXCLUDED_FIELD};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DispatchConfig {
    pub version: u32,

    #[serde(default)]
    pub executor: ExecutorSection,

    #[serde(default)]
    pub codec: CodecSection,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            version: 1,
            executor: ExecutorSection::default(),
            codec: CodecSection::default(),
        }
    }
}

impl DispatchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(PushError::UnsupportedVersion);
        }
        self.executor.validate()?;
        self.codec.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExecutorSection {
    #[serde(default = "default_workers")]
    pub workers: usize,

    #[serde(default = "default_thread_name")]
    pub thread_name: String,
}

impl Default for ExecutorSection {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            thread_name: default_thread_name(),
        }
    }
}

impl ExecutorSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=64).contains(&self.workers) {
            return Err(PushError::InvalidConfig(
                "executor.workers must be between 1 and 64".into(),
            ));
        }
        if self.thread_name.trim().is_empty() {
            return Err(PushError::InvalidConfig(
                "executor.thread_name must not be empty".into(),
            ));
        }
        Ok(())
    }
}

fn default_workers() -> usize {
    4
}
fn default_thread_name() -> String {
    "pushroute-worker".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodecSection {
    /// Persistence-only field names stripped from every card.
    #[serde(default = "default_exclude_fields")]
    pub exclude_fields: Vec<String>,
}

impl Default for CodecSection {
    fn default() -> Self {
        Self {
            exclude_fields: default_exclude_fields(),
        }
    }
}

impl CodecSection {
    pub fn validate(&self) -> Result<()> {
        if self.exclude_fields.iter().any(|f| f.trim().is_empty()) {
            return Err(PushError::InvalidConfig(
                "codec.exclude_fields must not contain empty names".into(),
            ));
        }
        Ok(())
    }

    pub fn build(&self) -> CardCodec {
        CardCodec::new(self.exclude_fields.iter().cloned())
    }
}

fn default_exclude_fields() -> Vec<String> {
    vec![DEFAULT_EXCLUDED_FIELD.into()]
}
