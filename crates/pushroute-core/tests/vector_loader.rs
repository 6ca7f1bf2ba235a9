//! JSON test vector loader shared by envelope and entity tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::fs;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TestVector {
    pub description: String,
    pub frame: FrameData,
    #[serde(default)]
    pub expect: Option<serde_json::Value>,
    #[serde(default)]
    pub expect_error: Option<ExpectError>,
}

#[derive(Debug, Deserialize)]
pub struct ExpectError {
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct FrameData {
    pub encoding: String,
    pub data: serde_json::Value,
}

impl FrameData {
    /// Raw push payload bytes as the push channel would deliver them.
    pub fn decode(&self) -> Vec<u8> {
        match self.encoding.as_str() {
            "json" => serde_json::to_vec(&self.data).expect("re-encode json vector"),
            "text" => self
                .data
                .as_str()
                .expect("text vector must be a string")
                .as_bytes()
                .to_vec(),
            other => panic!("unsupported encoding: {other}"),
        }
    }
}

pub fn load(name: &str) -> TestVector {
    let s = fs::read_to_string(format!("tests/vectors/{name}")).unwrap();
    serde_json::from_str(&s).unwrap()
}
