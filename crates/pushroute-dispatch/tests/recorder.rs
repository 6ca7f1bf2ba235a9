//! Recording doubles shared by dispatch tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::json;

use pushroute_core::error::{PushError, Result};
use pushroute_core::protocol::card::{GroupCard, GroupMemberCard, MessageCard, UserCard};
use pushroute_core::protocol::codec::CardCodec;
use pushroute_core::protocol::push::{EntityKind, EntityRecord, PushEnvelope};
use pushroute_core::protocol::response::MessageId;
use pushroute_dispatch::centers::{Centers, GroupCenter, MessageCenter, UserCenter};
use pushroute_dispatch::config::DispatchConfig;
use pushroute_dispatch::notify::Notifier;
use pushroute_dispatch::session::SessionGate;
use pushroute_dispatch::{Collaborators, DispatchService};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    User(UserCard),
    Group(GroupCard),
    Members(Vec<GroupMemberCard>),
    Message(MessageCard),
}

/// Records every center invocation in order; optionally fails on a message id.
#[derive(Default)]
pub struct RecordingCenter {
    pub calls: Mutex<Vec<Call>>,
    pub fail_message_id: Option<String>,
}

impl RecordingCenter {
    pub fn failing_on(message_id: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_message_id: Some(message_id.to_string()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl UserCenter for RecordingCenter {
    fn dispatch_user(&self, card: UserCard) -> Result<()> {
        self.calls.lock().unwrap().push(Call::User(card));
        Ok(())
    }
}

impl GroupCenter for RecordingCenter {
    fn dispatch_group(&self, card: GroupCard) -> Result<()> {
        self.calls.lock().unwrap().push(Call::Group(card));
        Ok(())
    }

    fn dispatch_members(&self, cards: Vec<GroupMemberCard>) -> Result<()> {
        self.calls.lock().unwrap().push(Call::Members(cards));
        Ok(())
    }
}

impl MessageCenter for RecordingCenter {
    fn dispatch_message(&self, card: MessageCard) -> Result<()> {
        if self.fail_message_id.as_deref() == Some(card.id.as_str()) {
            return Err(PushError::handler("message", "store unavailable"));
        }
        self.calls.lock().unwrap().push(Call::Message(card));
        Ok(())
    }
}

pub struct RecordingSession {
    pub authed: AtomicBool,
    pub auth_checks: AtomicUsize,
    pub logouts: AtomicUsize,
}

impl RecordingSession {
    pub fn new(authed: bool) -> Self {
        Self {
            authed: AtomicBool::new(authed),
            auth_checks: AtomicUsize::new(0),
            logouts: AtomicUsize::new(0),
        }
    }

    pub fn logouts(&self) -> usize {
        self.logouts.load(Ordering::SeqCst)
    }
}

impl SessionGate for RecordingSession {
    fn is_authenticated(&self) -> bool {
        self.auth_checks.fetch_add(1, Ordering::SeqCst);
        self.authed.load(Ordering::SeqCst)
    }

    fn force_logout(&self) {
        self.logouts.fetch_add(1, Ordering::SeqCst);
        self.authed.store(false, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub shown: Mutex<Vec<MessageId>>,
}

impl RecordingNotifier {
    pub fn shown(&self) -> Vec<MessageId> {
        self.shown.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: MessageId) {
        self.shown.lock().unwrap().push(message);
    }
}

pub struct Harness {
    pub service: DispatchService,
    pub center: Arc<RecordingCenter>,
    pub session: Arc<RecordingSession>,
    pub notifier: Arc<RecordingNotifier>,
}

impl Harness {
    pub fn new(authed: bool) -> Self {
        Self::with_center(authed, RecordingCenter::default())
    }

    pub fn with_center(authed: bool, center: RecordingCenter) -> Self {
        let center = Arc::new(center);
        let session = Arc::new(RecordingSession::new(authed));
        let notifier = Arc::new(RecordingNotifier::default());
        let service = DispatchService::new(
            &DispatchConfig::default(),
            Collaborators {
                session: session.clone(),
                notifier: notifier.clone(),
                centers: Centers::shared(Arc::clone(&center)),
            },
        )
        .expect("service must build");
        Self {
            service,
            center,
            session,
            notifier,
        }
    }
}

pub fn user(id: &str) -> UserCard {
    serde_json::from_value(json!({ "id": id, "name": format!("name-{id}") })).unwrap()
}

pub fn group(id: &str) -> GroupCard {
    serde_json::from_value(json!({ "id": id, "name": format!("group-{id}"), "ownerId": "u-owner" })).unwrap()
}

pub fn member(id: &str, group_id: &str) -> GroupMemberCard {
    serde_json::from_value(json!({ "id": id, "userId": format!("u-{id}"), "groupId": group_id })).unwrap()
}

pub fn message(id: &str) -> MessageCard {
    serde_json::from_value(json!({
        "id": id,
        "content": "hi",
        "type": 1,
        "senderId": "u-peer",
        "receiverId": "u-self"
    }))
    .unwrap()
}

pub fn record<T: serde::Serialize>(kind: EntityKind, card: &T) -> EntityRecord {
    EntityRecord::with_card(&CardCodec::default(), kind, card).unwrap()
}

pub fn logout() -> EntityRecord {
    EntityRecord::new(EntityKind::Logout, "")
}

pub fn raw(records: Vec<EntityRecord>) -> Vec<u8> {
    PushEnvelope::new(records).encode().unwrap().into_bytes()
}
