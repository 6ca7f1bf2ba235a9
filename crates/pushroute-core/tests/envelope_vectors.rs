//! Push envelope vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use pushroute_core::protocol::codec::CardCodec;
use pushroute_core::protocol::push::{EntityKind, EntityRecord, EnvelopeEntry, PushEntity, PushEnvelope};

mod vector_loader;
use vector_loader::load;

#[test]
fn envelope_vectors() {
    let files = [
        "envelope_scenario.json",
        "envelope_members.json",
        "envelope_empty.json",
        "envelope_not_array.json",
        "envelope_truncated.json",
        "envelope_missing_type.json",
        "envelope_null_content.json",
    ];

    for f in files {
        let v = load(f);
        let res = PushEnvelope::decode(&v.frame.decode());

        if let Some(err) = v.expect_error {
            let e = res.expect_err("expected error");
            assert_eq!(e.code().as_str(), err.code, "vector={}", v.description);
            continue;
        }

        let env = res.expect("expected ok envelope");
        let ex = v.expect.expect("missing expect block");
        let kinds: Vec<i64> = ex["kinds"]
            .as_array()
            .unwrap()
            .iter()
            .map(|k| k.as_i64().unwrap())
            .collect();
        let got: Vec<i64> = env.records().map(|e| e.kind as i64).collect();
        assert_eq!(got, kinds, "vector={}", v.description);

        let malformed = ex.get("malformed").and_then(|m| m.as_u64()).unwrap_or(0);
        assert_eq!(
            (env.len() - env.records().count()) as u64,
            malformed,
            "vector={}",
            v.description
        );
    }
}

#[test]
fn scenario_entities_decode_in_order() {
    let v = load("envelope_scenario.json");
    let env = PushEnvelope::decode(&v.frame.decode()).unwrap();
    let codec = CardCodec::default();

    let decoded: Vec<PushEntity> = env
        .records()
        .map(|r| PushEntity::decode(&codec, r).unwrap())
        .collect();

    match &decoded[0] {
        PushEntity::AddFriend(user) => {
            assert_eq!(user.id, "u-a");
            assert_eq!(user.name.as_deref(), Some("Alice"));
            assert!(user.is_follow);
            assert_eq!(user.sex, 1);
        }
        other => panic!("expected AddFriend, got {other:?}"),
    }
    match &decoded[1] {
        PushEntity::Message(msg) => {
            assert_eq!(msg.id, "m-b");
            assert_eq!(msg.msg_type, 1);
            assert!(!msg.is_group());
        }
        other => panic!("expected Message, got {other:?}"),
    }
    assert_eq!(decoded[2], PushEntity::Logout);
    assert_eq!(decoded[3].kind(), Some(EntityKind::AddGroup));
    assert!(env.records().next().unwrap().create_at.is_some());
}

#[test]
fn member_sequences_keep_source_order() {
    let v = load("envelope_members.json");
    let env = PushEnvelope::decode(&v.frame.decode()).unwrap();
    let codec = CardCodec::default();

    let records: Vec<&EntityRecord> = env.records().collect();
    let modify = PushEntity::decode(&codec, records[3]).unwrap();
    let PushEntity::ModifyGroupMembers(members) = modify else {
        panic!("expected ModifyGroupMembers");
    };
    let ids: Vec<&str> = members.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["gm-3", "gm-1", "gm-2"]);

    assert_eq!(
        PushEntity::decode(&codec, records[1]).unwrap(),
        PushEntity::Unknown(9999)
    );
    assert_eq!(
        PushEntity::decode(&codec, records[2]).unwrap(),
        PushEntity::ExitGroupMembers
    );
}

#[test]
fn null_content_and_bad_entities_are_isolated() {
    let v = load("envelope_null_content.json");
    let env = PushEnvelope::decode(&v.frame.decode()).unwrap();
    let codec = CardCodec::default();

    assert_eq!(env.len(), 5);
    assert!(matches!(
        &env.entities[2],
        EnvelopeEntry::Malformed { kind: Some(1002), .. }
    ));
    assert_eq!(env.entities[3].kind(), None);

    let records: Vec<&EntityRecord> = env.records().collect();
    // null content reads as empty; a message needs a card, a logout does not
    assert_eq!(records[1].content, "");
    assert!(PushEntity::decode(&codec, records[1]).is_err());
    assert_eq!(PushEntity::decode(&codec, records[2]).unwrap(), PushEntity::Logout);
}
