//! Push envelope (JSON) and discriminant-driven entity decode.
//!
//! Wire shape: a JSON array of `{ "type": i32, "content": string, "createAt": ts }`.
//! `content` is a JSON document carried as a string; how it is decoded depends
//! entirely on `type`. The envelope only fails on non-JSON or non-array input;
//! each entity object is decoded on its own, so one bad entity never poisons
//! its siblings.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PushError, Result};

use super::card::{GroupCard, GroupMemberCard, MessageCard, UserCard};
use super::codec::CardCodec;
use super::{nullable, timestamp};

/// Closed set of entity discriminants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Logout,
    Message,
    AddFriend,
    AddGroup,
    AddGroupMembers,
    ModifyGroupMembers,
    ExitGroupMembers,
}

impl EntityKind {
    pub const ALL: [EntityKind; 7] = [
        EntityKind::Logout,
        EntityKind::Message,
        EntityKind::AddFriend,
        EntityKind::AddGroup,
        EntityKind::AddGroupMembers,
        EntityKind::ModifyGroupMembers,
        EntityKind::ExitGroupMembers,
    ];

    /// Wire code carried in the entity `type` field.
    pub const fn code(self) -> i32 {
        match self {
            EntityKind::Logout => -1,
            EntityKind::Message => 200,
            EntityKind::AddFriend => 1001,
            EntityKind::AddGroup => 1002,
            EntityKind::AddGroupMembers => 1003,
            EntityKind::ModifyGroupMembers => 2001,
            EntityKind::ExitGroupMembers => 3001,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.code() == code)
    }

    /// Label used in logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Logout => "logout",
            EntityKind::Message => "message",
            EntityKind::AddFriend => "add_friend",
            EntityKind::AddGroup => "add_group",
            EntityKind::AddGroupMembers => "add_group_members",
            EntityKind::ModifyGroupMembers => "modify_group_members",
            EntityKind::ExitGroupMembers => "exit_group_members",
        }
    }
}

/// One raw entity as it appears in the envelope (content not yet decoded).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRecord {
    /// Discriminant code (field name is `type` in JSON).
    #[serde(rename = "type")]
    pub kind: i32,
    /// Nested JSON document, decoded according to `kind`. `null` reads as empty.
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub content: String,
    #[serde(default, with = "timestamp::option")]
    pub create_at: Option<NaiveDateTime>,
}

impl EntityRecord {
    pub fn new(kind: EntityKind, content: impl Into<String>) -> Self {
        Self {
            kind: kind.code(),
            content: content.into(),
            create_at: None,
        }
    }

    /// Build a record whose content is `card` encoded through `codec`.
    pub fn with_card<T: Serialize>(codec: &CardCodec, kind: EntityKind, card: &T) -> Result<Self> {
        Ok(Self::new(kind, codec.encode(card)?))
    }

    pub fn entity_kind(&self) -> Option<EntityKind> {
        EntityKind::from_code(self.kind)
    }
}

/// One slot of an envelope, in source order.
#[derive(Debug, Clone, PartialEq)]
pub enum EnvelopeEntry {
    Record(EntityRecord),
    /// Entity object that failed to decode; skipped without touching siblings.
    Malformed { kind: Option<i32>, reason: String },
}

impl EnvelopeEntry {
    fn decode(item: Value) -> Self {
        let kind = item
            .get("type")
            .and_then(Value::as_i64)
            .and_then(|k| i32::try_from(k).ok());
        match serde_json::from_value::<EntityRecord>(item) {
            Ok(record) => EnvelopeEntry::Record(record),
            Err(e) => EnvelopeEntry::Malformed {
                kind,
                reason: e.to_string(),
            },
        }
    }

    /// Raw discriminant, if one could be read.
    pub fn kind(&self) -> Option<i32> {
        match self {
            EnvelopeEntry::Record(r) => Some(r.kind),
            EnvelopeEntry::Malformed { kind, .. } => *kind,
        }
    }

    pub fn record(&self) -> Option<&EntityRecord> {
        match self {
            EnvelopeEntry::Record(r) => Some(r),
            EnvelopeEntry::Malformed { .. } => None,
        }
    }
}

/// Decoded push envelope: entries in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PushEnvelope {
    pub entities: Vec<EnvelopeEntry>,
}

impl PushEnvelope {
    pub fn new(records: Vec<EntityRecord>) -> Self {
        Self {
            entities: records.into_iter().map(EnvelopeEntry::Record).collect(),
        }
    }

    /// Structural decode of a raw push payload.
    pub fn decode(raw: &[u8]) -> Result<Self> {
        let items: Vec<Value> = serde_json::from_slice(raw)
            .map_err(|e| PushError::Decode(format!("invalid push envelope: {e}")))?;
        let entities: Vec<EnvelopeEntry> = items.into_iter().map(EnvelopeEntry::decode).collect();
        tracing::trace!(entities = entities.len(), "push envelope decoded");
        Ok(Self { entities })
    }

    /// Encode the well-formed records; malformed entries are not re-emitted.
    pub fn encode(&self) -> Result<String> {
        let records: Vec<&EntityRecord> = self.records().collect();
        serde_json::to_string(&records)
            .map_err(|e| PushError::Internal(format!("envelope encode failed: {e}")))
    }

    pub fn records(&self) -> impl Iterator<Item = &EntityRecord> {
        self.entities.iter().filter_map(EnvelopeEntry::record)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Typed entity: one variant per discriminant, each carrying its own payload.
#[derive(Debug, Clone, PartialEq)]
pub enum PushEntity {
    /// Control signal: terminate the session and the rest of the envelope.
    Logout,
    Message(MessageCard),
    AddFriend(UserCard),
    AddGroup(GroupCard),
    AddGroupMembers(Vec<GroupMemberCard>),
    ModifyGroupMembers(Vec<GroupMemberCard>),
    /// Recognized, not yet decoded or routed.
    ExitGroupMembers,
    /// Discriminant outside the closed set.
    Unknown(i32),
}

impl PushEntity {
    /// Decode `record.content` according to `record.kind`.
    ///
    /// Total over discriminants: unknown codes become `Unknown`, never an error.
    /// Only a content/shape mismatch for a known discriminant fails.
    pub fn decode(codec: &CardCodec, record: &EntityRecord) -> Result<Self> {
        let Some(kind) = record.entity_kind() else {
            return Ok(PushEntity::Unknown(record.kind));
        };
        let entity = match kind {
            EntityKind::Logout => PushEntity::Logout,
            EntityKind::Message => PushEntity::Message(codec.decode(&record.content)?),
            EntityKind::AddFriend => PushEntity::AddFriend(codec.decode(&record.content)?),
            EntityKind::AddGroup => PushEntity::AddGroup(codec.decode(&record.content)?),
            EntityKind::AddGroupMembers => {
                PushEntity::AddGroupMembers(codec.decode(&record.content)?)
            }
            EntityKind::ModifyGroupMembers => {
                PushEntity::ModifyGroupMembers(codec.decode(&record.content)?)
            }
            EntityKind::ExitGroupMembers => PushEntity::ExitGroupMembers,
        };
        Ok(entity)
    }

    pub fn kind(&self) -> Option<EntityKind> {
        match self {
            PushEntity::Logout => Some(EntityKind::Logout),
            PushEntity::Message(_) => Some(EntityKind::Message),
            PushEntity::AddFriend(_) => Some(EntityKind::AddFriend),
            PushEntity::AddGroup(_) => Some(EntityKind::AddGroup),
            PushEntity::AddGroupMembers(_) => Some(EntityKind::AddGroupMembers),
            PushEntity::ModifyGroupMembers(_) => Some(EntityKind::ModifyGroupMembers),
            PushEntity::ExitGroupMembers => Some(EntityKind::ExitGroupMembers),
            PushEntity::Unknown(_) => None,
        }
    }
}
