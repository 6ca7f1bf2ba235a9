//! Card shapes carried inside push entity content.
//!
//! Cards are owned by the center they are routed to; the dispatch path keeps
//! no reference after handing them off. Fields the server adds later are kept
//! in `extra` so a center can still see them.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{nullable, timestamp};

/// A user (friend) record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCard {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub portrait: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub sex: i32,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub follows: i32,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub following: i32,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub is_follow: bool,
    #[serde(default, with = "timestamp::option")]
    pub modify_at: Option<NaiveDateTime>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A group record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupCard {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub notify_level: i32,
    #[serde(default, with = "timestamp::option")]
    pub join_at: Option<NaiveDateTime>,
    #[serde(default, with = "timestamp::option")]
    pub modify_at: Option<NaiveDateTime>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// One membership row of a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMemberCard {
    pub id: String,
    pub user_id: String,
    pub group_id: String,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub is_admin: bool,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default, with = "timestamp::option")]
    pub modify_at: Option<NaiveDateTime>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A chat message, either direct (`receiver_id`) or group (`group_id`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageCard {
    pub id: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub attach: Option<String>,
    /// Message type (field name is `type` in JSON).
    #[serde(rename = "type", default, deserialize_with = "nullable::deserialize")]
    pub msg_type: i32,
    pub sender_id: String,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub receiver_id: Option<String>,
    #[serde(default, with = "timestamp::option")]
    pub create_at: Option<NaiveDateTime>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl MessageCard {
    pub fn is_group(&self) -> bool {
        self.group_id.as_deref().is_some_and(|g| !g.is_empty())
    }
}
