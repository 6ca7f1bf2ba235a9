//! Server response model and the closed status-code table.
//!
//! Every code maps to exactly one message identifier and one logout flag via
//! `RESPONSE_TABLE`. Codes outside the table normalize to `ResponseCode::Unknown`,
//! so translation is total.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::timestamp;

/// Localized message identifier (a string resource key).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(&'static str);

impl MessageId {
    pub const fn new(key: &'static str) -> Self {
        Self(key)
    }

    pub fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Closed status-code enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseCode {
    Succeed,
    Unknown,
    AccountToken,
    AccountLogin,
    AccountRegister,
    AccountNoPermission,
    CreateUser,
    CreateGroup,
    CreateMessage,
    Parameters,
    ParametersExistAccount,
    ParametersExistName,
    NotFoundUser,
    NotFoundGroup,
    NotFoundGroupMember,
    Service,
}

/// One row of the translation table.
#[derive(Debug, Clone, Copy)]
pub struct ResponseEntry {
    pub code: ResponseCode,
    pub raw: i32,
    /// `None` only for success.
    pub message: Option<MessageId>,
    /// Invalid/expired credential: notify and tear the session down.
    pub forces_logout: bool,
}

const fn entry(code: ResponseCode, raw: i32, message: &'static str) -> ResponseEntry {
    ResponseEntry {
        code,
        raw,
        message: Some(MessageId::new(message)),
        forces_logout: false,
    }
}

pub static RESPONSE_TABLE: [ResponseEntry; 16] = [
    ResponseEntry {
        code: ResponseCode::Succeed,
        raw: 1,
        message: None,
        forces_logout: false,
    },
    entry(ResponseCode::Unknown, 0, "data_rsp_error_unknown"),
    ResponseEntry {
        code: ResponseCode::AccountToken,
        raw: 2001,
        message: Some(MessageId::new("data_rsp_error_account_token")),
        forces_logout: true,
    },
    entry(ResponseCode::AccountLogin, 2002, "data_rsp_error_account_login"),
    entry(ResponseCode::AccountRegister, 2003, "data_rsp_error_account_register"),
    entry(ResponseCode::AccountNoPermission, 2010, "data_rsp_error_account_no_permission"),
    entry(ResponseCode::CreateUser, 3001, "data_rsp_error_create_user"),
    entry(ResponseCode::CreateGroup, 3002, "data_rsp_error_create_group"),
    entry(ResponseCode::CreateMessage, 3003, "data_rsp_error_create_message"),
    entry(ResponseCode::Parameters, 4001, "data_rsp_error_parameters"),
    entry(ResponseCode::ParametersExistAccount, 4002, "data_rsp_error_parameters_exist_account"),
    entry(ResponseCode::ParametersExistName, 4003, "data_rsp_error_parameters_exist_name"),
    entry(ResponseCode::NotFoundUser, 4041, "data_rsp_error_not_found_user"),
    entry(ResponseCode::NotFoundGroup, 4042, "data_rsp_error_not_found_group"),
    entry(ResponseCode::NotFoundGroupMember, 4043, "data_rsp_error_not_found_group_member"),
    entry(ResponseCode::Service, 5001, "data_rsp_error_service"),
];

impl ResponseCode {
    /// Total: any code outside the table is `Unknown`.
    pub fn from_code(raw: i32) -> Self {
        RESPONSE_TABLE
            .iter()
            .find(|e| e.raw == raw)
            .map(|e| e.code)
            .unwrap_or(ResponseCode::Unknown)
    }

    pub fn entry(self) -> &'static ResponseEntry {
        // Every variant has exactly one row; Unknown is the fallback row.
        RESPONSE_TABLE
            .iter()
            .find(|e| e.code == self)
            .unwrap_or(&RESPONSE_TABLE[1])
    }

    pub fn code(self) -> i32 {
        self.entry().raw
    }

    pub fn message_id(self) -> Option<MessageId> {
        self.entry().message
    }

    pub fn forces_logout(self) -> bool {
        self.entry().forces_logout
    }

    pub fn is_success(self) -> bool {
        self == ResponseCode::Succeed
    }
}

/// Server response envelope: `{ code, message, time, result }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RspModel<T> {
    pub code: i32,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, with = "timestamp::option")]
    pub time: Option<NaiveDateTime>,
    #[serde(default = "Option::default")]
    pub result: Option<T>,
}

impl<T> RspModel<T> {
    pub fn status(&self) -> ResponseCode {
        ResponseCode::from_code(self.code)
    }

    pub fn is_success(&self) -> bool {
        self.status().is_success()
    }
}
