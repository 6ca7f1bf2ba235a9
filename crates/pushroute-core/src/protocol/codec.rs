//! Shared card codec.
//!
//! One `CardCodec` is built at startup and shared by every dispatch. It owns
//! the uniform exclusion rule: persistence-layer field names are stripped from
//! every JSON object (at any depth) before a card is decoded, and never emitted
//! when a card is encoded.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{PushError, Result};

/// Field injected by the local persistence layer; never part of a wire card.
pub const DEFAULT_EXCLUDED_FIELD: &str = "modelAdapter";

#[derive(Debug, Clone)]
pub struct CardCodec {
    excluded: Arc<BTreeSet<String>>,
}

impl Default for CardCodec {
    fn default() -> Self {
        Self::new([DEFAULT_EXCLUDED_FIELD])
    }
}

impl CardCodec {
    pub fn new<I, S>(excluded: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded: Arc::new(excluded.into_iter().map(Into::into).collect()),
        }
    }

    pub fn excluded_fields(&self) -> impl Iterator<Item = &str> {
        self.excluded.iter().map(String::as_str)
    }

    /// Decode a card (or a sequence of cards) from a JSON document.
    pub fn decode<T: DeserializeOwned>(&self, raw: &str) -> Result<T> {
        let mut value: Value = serde_json::from_str(raw)
            .map_err(|e| PushError::Decode(format!("invalid card json: {e}")))?;
        self.strip(&mut value);
        serde_json::from_value(value)
            .map_err(|e| PushError::Decode(format!("card shape mismatch: {e}")))
    }

    /// Encode a card (or a sequence of cards) to a JSON document.
    pub fn encode<T: Serialize>(&self, card: &T) -> Result<String> {
        let mut value = serde_json::to_value(card)
            .map_err(|e| PushError::Internal(format!("card encode failed: {e}")))?;
        self.strip(&mut value);
        serde_json::to_string(&value)
            .map_err(|e| PushError::Internal(format!("card encode failed: {e}")))
    }

    fn strip(&self, value: &mut Value) {
        if self.excluded.is_empty() {
            return;
        }
        match value {
            Value::Object(map) => {
                map.retain(|k, _| !self.excluded.contains(k));
                for v in map.values_mut() {
                    self.strip(v);
                }
            }
            Value::Array(items) => {
                for v in items {
                    self.strip(v);
                }
            }
            _ => {}
        }
    }
}
