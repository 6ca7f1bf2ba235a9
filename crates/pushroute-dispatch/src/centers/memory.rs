//! In-memory center backing all three roles.
//!
//! Upsert by id with newer-wins on `modify_at`, so "add" and "modify" member
//! pushes resolve to the same operation. Used by the daemon and tests.

use chrono::NaiveDateTime;
use dashmap::DashMap;

use pushroute_core::error::{PushError, Result};
use pushroute_core::protocol::card::{GroupCard, GroupMemberCard, MessageCard, UserCard};

use super::{GroupCenter, MessageCenter, UserCenter};

#[derive(Default)]
pub struct MemoryCenter {
    users: DashMap<String, UserCard>,
    groups: DashMap<String, GroupCard>,
    members: DashMap<String, GroupMemberCard>,
    messages: DashMap<String, MessageCard>,
}

/// Stale if both sides carry a timestamp and the incoming one is older.
fn is_stale(stored: Option<NaiveDateTime>, incoming: Option<NaiveDateTime>) -> bool {
    matches!((stored, incoming), (Some(s), Some(i)) if i < s)
}

fn require_id(center: &'static str, id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(PushError::handler(center, "card id must not be empty"));
    }
    Ok(())
}

impl MemoryCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&self, id: &str) -> Option<UserCard> {
        self.users.get(id).map(|u| u.value().clone())
    }

    pub fn group(&self, id: &str) -> Option<GroupCard> {
        self.groups.get(id).map(|g| g.value().clone())
    }

    pub fn message(&self, id: &str) -> Option<MessageCard> {
        self.messages.get(id).map(|m| m.value().clone())
    }

    /// Members of `group_id`, ordered by member id.
    pub fn members_of(&self, group_id: &str) -> Vec<GroupMemberCard> {
        let mut out: Vec<GroupMemberCard> = self
            .members
            .iter()
            .filter(|m| m.group_id == group_id)
            .map(|m| m.value().clone())
            .collect();
        out.sort_by(|a, b| a.id.cmp(&b.id));
        out
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

impl UserCenter for MemoryCenter {
    fn dispatch_user(&self, card: UserCard) -> Result<()> {
        require_id("user", &card.id)?;
        if let Some(stored) = self.users.get(&card.id) {
            if is_stale(stored.modify_at, card.modify_at) {
                tracing::debug!(id = %card.id, "stale user card ignored");
                return Ok(());
            }
        }
        self.users.insert(card.id.clone(), card);
        Ok(())
    }
}

impl GroupCenter for MemoryCenter {
    fn dispatch_group(&self, card: GroupCard) -> Result<()> {
        require_id("group", &card.id)?;
        if let Some(stored) = self.groups.get(&card.id) {
            if is_stale(stored.modify_at, card.modify_at) {
                tracing::debug!(id = %card.id, "stale group card ignored");
                return Ok(());
            }
        }
        self.groups.insert(card.id.clone(), card);
        Ok(())
    }

    fn dispatch_members(&self, cards: Vec<GroupMemberCard>) -> Result<()> {
        // validate the whole batch before touching the store
        for card in &cards {
            require_id("group", &card.id)?;
            if card.group_id.is_empty() || card.user_id.is_empty() {
                return Err(PushError::handler(
                    "group",
                    format!("member {} lacks group or user id", card.id),
                ));
            }
        }
        for card in cards {
            let stale = self
                .members
                .get(&card.id)
                .is_some_and(|stored| is_stale(stored.modify_at, card.modify_at));
            if !stale {
                self.members.insert(card.id.clone(), card);
            }
        }
        Ok(())
    }
}

impl MessageCenter for MemoryCenter {
    fn dispatch_message(&self, card: MessageCard) -> Result<()> {
        require_id("message", &card.id)?;
        if !card.is_group() && card.receiver_id.as_deref().map_or(true, str::is_empty) {
            return Err(PushError::handler(
                "message",
                format!("message {} has neither group nor receiver", card.id),
            ));
        }
        self.messages.insert(card.id.clone(), card);
        Ok(())
    }
}
