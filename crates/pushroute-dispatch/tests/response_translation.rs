//! Response code translation side effects.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Mutex;

use pushroute_core::protocol::response::{MessageId, ResponseCode, RspModel, RESPONSE_TABLE};
use pushroute_dispatch::notify::FailureCallback;

mod recorder;
use recorder::Harness;

#[test]
fn success_is_silent() {
    let h = Harness::new(true);
    let seen = Mutex::new(Vec::new());
    let cb = |m: MessageId| seen.lock().unwrap().push(m);

    h.service.translate_response(ResponseCode::Succeed, Some(&cb));

    assert!(seen.lock().unwrap().is_empty());
    assert!(h.notifier.shown().is_empty());
    assert_eq!(h.session.logouts(), 0);
}

#[test]
fn ordinary_failures_only_reach_the_callback() {
    let h = Harness::new(true);
    let seen = Mutex::new(Vec::new());
    let cb = |m: MessageId| seen.lock().unwrap().push(m);

    h.service.translate_response(ResponseCode::NotFoundGroup, Some(&cb));
    h.service.translate_response(ResponseCode::Service, Some(&cb));

    assert_eq!(
        seen.lock().unwrap().iter().map(|m| m.as_str()).collect::<Vec<_>>(),
        ["data_rsp_error_not_found_group", "data_rsp_error_service"]
    );
    assert!(h.notifier.shown().is_empty());
    assert_eq!(h.session.logouts(), 0);
}

#[test]
fn without_callback_ordinary_failures_have_no_side_effect() {
    let h = Harness::new(true);
    for e in RESPONSE_TABLE.iter().filter(|e| !e.forces_logout) {
        h.service.translate_response(e.code, None);
    }
    assert!(h.notifier.shown().is_empty());
    assert_eq!(h.session.logouts(), 0);
    assert!(h.session.authed.load(std::sync::atomic::Ordering::SeqCst));
}

#[test]
fn expired_credential_always_notifies_and_logs_out() {
    let h = Harness::new(true);
    h.service.translate_response(ResponseCode::AccountToken, None);

    assert_eq!(
        h.notifier.shown(),
        [MessageId::new("data_rsp_error_account_token")]
    );
    assert_eq!(h.session.logouts(), 1);

    // the callback path is independent of the teardown
    let seen = Mutex::new(Vec::new());
    let cb = |m: MessageId| seen.lock().unwrap().push(m);
    h.service.translate_response(ResponseCode::AccountToken, Some(&cb as &dyn FailureCallback));
    assert!(seen.lock().unwrap().is_empty());
    assert_eq!(h.notifier.shown().len(), 2);
    assert_eq!(h.session.logouts(), 2);
    assert_eq!(
        h.service.metrics().forced_logouts.get(&[("source", "response")]),
        2
    );
}

#[test]
fn unknown_codes_read_as_generic_error() {
    let h = Harness::new(true);
    let seen = Mutex::new(Vec::new());
    let cb = |m: MessageId| seen.lock().unwrap().push(m);

    let model: RspModel<()> = serde_json::from_str(r#"{"code":123456,"message":"??"}"#).unwrap();
    h.service.decode_rsp(Some(&model), Some(&cb));

    assert_eq!(
        *seen.lock().unwrap(),
        [MessageId::new("data_rsp_error_unknown")]
    );
}

#[test]
fn missing_model_is_a_no_op() {
    let h = Harness::new(true);
    let seen = Mutex::new(Vec::new());
    let cb = |m: MessageId| seen.lock().unwrap().push(m);

    h.service.decode_rsp::<()>(None, Some(&cb));

    assert!(seen.lock().unwrap().is_empty());
    assert_eq!(h.session.logouts(), 0);
}
