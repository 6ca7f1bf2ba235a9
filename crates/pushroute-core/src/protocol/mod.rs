//! Protocol modules (push envelope, card shapes, response codes).
//!
//! - `push`: the push envelope (JSON array of tagged entities) and the
//!   discriminant-driven decode into `PushEntity`.
//! - `card`: the typed record shapes carried inside entity content.
//! - `codec`: the shared card decoder with its field-exclusion rule.
//! - `response`: server response model and the closed status-code table.
//!
//! All parsers are panic-free: malformed input is reported as `PushError`.

pub mod card;
pub mod codec;
pub mod nullable;
pub mod push;
pub mod response;
pub mod timestamp;
