//! Center (subsystem handler) capability traits.
//!
//! One entry point per payload shape. The router hands cards over by value
//! and keeps nothing; persistence and business rules live behind these traits.

mod memory;

pub use memory::MemoryCenter;

use std::sync::Arc;

use pushroute_core::error::Result;
use pushroute_core::protocol::card::{GroupCard, GroupMemberCard, MessageCard, UserCard};

pub trait UserCenter: Send + Sync {
    fn dispatch_user(&self, card: UserCard) -> Result<()>;
}

pub trait GroupCenter: Send + Sync {
    fn dispatch_group(&self, card: GroupCard) -> Result<()>;
    /// Member cards in source order; covers both "add" and "modify".
    fn dispatch_members(&self, cards: Vec<GroupMemberCard>) -> Result<()>;
}

pub trait MessageCenter: Send + Sync {
    fn dispatch_message(&self, card: MessageCard) -> Result<()>;
}

/// The three centers a router dispatches into.
#[derive(Clone)]
pub struct Centers {
    pub user: Arc<dyn UserCenter>,
    pub group: Arc<dyn GroupCenter>,
    pub message: Arc<dyn MessageCenter>,
}

impl Centers {
    /// All three roles served by one object.
    pub fn shared<C>(center: Arc<C>) -> Self
    where
        C: UserCenter + GroupCenter + MessageCenter + 'static,
    {
        Self {
            user: center.clone(),
            group: center.clone(),
            message: center,
        }
    }
}
