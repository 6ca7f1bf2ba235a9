//! Envelope router: session gate, structural decode, and the in-order entity loop.
//!
//! Rules:
//! - Unauthenticated: silent no-op, nothing is decoded.
//! - Undecodable envelope: skipped whole, never surfaced as an error.
//! - Malformed entity object, per-entity decode failure, or unknown discriminant:
//!   skipped, loop continues.
//! - `Logout`: force session teardown and stop; later entities are never touched.
//! - Center error: propagates and aborts the rest of the envelope.

use std::sync::Arc;
use std::time::Instant;

use pushroute_core::error::Result;
use pushroute_core::protocol::codec::CardCodec;
use pushroute_core::protocol::push::{EntityRecord, EnvelopeEntry, PushEntity, PushEnvelope};

use crate::centers::Centers;
use crate::obs::DispatchMetrics;
use crate::session::SessionGate;

/// How a dispatch call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStatus {
    /// No authenticated session; nothing decoded.
    Gated,
    /// Envelope failed structural decode; treated as empty.
    Undecodable,
    /// Every entity was visited.
    Completed,
    /// A logout entity ended the envelope early.
    LoggedOut,
}

impl DispatchStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DispatchStatus::Gated => "gated",
            DispatchStatus::Undecodable => "undecodable",
            DispatchStatus::Completed => "completed",
            DispatchStatus::LoggedOut => "logged_out",
        }
    }
}

/// Per-envelope outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchReport {
    pub status: DispatchStatus,
    /// Entities present in the envelope.
    pub entities: usize,
    /// Entities handed to a center.
    pub routed: usize,
    /// Entities skipped (decode failure, unknown, or pending no-op).
    pub skipped: usize,
}

impl DispatchReport {
    fn empty(status: DispatchStatus) -> Self {
        Self {
            status,
            entities: 0,
            routed: 0,
            skipped: 0,
        }
    }
}

enum Step {
    Routed,
    Skipped,
    Stop,
}

pub struct PushRouter {
    codec: CardCodec,
    centers: Centers,
    session: Arc<dyn SessionGate>,
    metrics: Arc<DispatchMetrics>,
}

impl PushRouter {
    pub fn new(
        codec: CardCodec,
        centers: Centers,
        session: Arc<dyn SessionGate>,
        metrics: Arc<DispatchMetrics>,
    ) -> Self {
        Self {
            codec,
            centers,
            session,
            metrics,
        }
    }

    pub fn codec(&self) -> &CardCodec {
        &self.codec
    }

    pub fn centers(&self) -> &Centers {
        &self.centers
    }

    /// Gate, decode, and route one raw push payload.
    pub fn dispatch(&self, raw: &[u8]) -> Result<DispatchReport> {
        if !self.session.is_authenticated() {
            tracing::debug!(bytes = raw.len(), "push ignored: no authenticated session");
            self.metrics.envelopes.inc(&[("outcome", "gated")]);
            return Ok(DispatchReport::empty(DispatchStatus::Gated));
        }

        let envelope = match PushEnvelope::decode(raw) {
            Ok(env) => env,
            Err(e) => {
                tracing::warn!(error = %e, bytes = raw.len(), "push envelope skipped");
                self.metrics.decode_errors.inc(&[("stage", "envelope")]);
                self.metrics.envelopes.inc(&[("outcome", "undecodable")]);
                return Ok(DispatchReport::empty(DispatchStatus::Undecodable));
            }
        };

        let started = Instant::now();
        let res = self.route(&envelope);
        self.metrics.dispatch_duration.observe(&[], started.elapsed());

        match &res {
            Ok(report) => self.metrics.envelopes.inc(&[("outcome", report.status.as_str())]),
            Err(e) => {
                tracing::warn!(error = %e, "push envelope aborted by center error");
                self.metrics.envelopes.inc(&[("outcome", "handler_error")]);
            }
        }
        res
    }

    /// Route an already decoded envelope, strictly in order.
    pub fn route(&self, envelope: &PushEnvelope) -> Result<DispatchReport> {
        let mut report = DispatchReport {
            status: DispatchStatus::Completed,
            entities: envelope.len(),
            routed: 0,
            skipped: 0,
        };

        for (idx, entry) in envelope.entities.iter().enumerate() {
            let step = match entry {
                EnvelopeEntry::Record(record) => self.route_record(idx, record)?,
                EnvelopeEntry::Malformed { kind, reason } => {
                    tracing::warn!(idx, kind = ?kind, %reason, "malformed push entity skipped");
                    self.metrics.decode_errors.inc(&[("stage", "entity")]);
                    Step::Skipped
                }
            };
            match step {
                Step::Routed => report.routed += 1,
                Step::Skipped => report.skipped += 1,
                Step::Stop => {
                    report.status = DispatchStatus::LoggedOut;
                    return Ok(report);
                }
            }
        }
        Ok(report)
    }

    fn route_record(&self, idx: usize, record: &EntityRecord) -> Result<Step> {
        let entity = match PushEntity::decode(&self.codec, record) {
            Ok(entity) => entity,
            Err(e) => {
                tracing::warn!(idx, kind = record.kind, error = %e, "push entity skipped");
                self.metrics.decode_errors.inc(&[("stage", "entity")]);
                return Ok(Step::Skipped);
            }
        };

        let label = entity.kind().map_or("unknown", |k| k.as_str());
        self.metrics.entities.inc(&[("kind", label)]);
        tracing::debug!(idx, kind = label, "routing push entity");

        match entity {
            PushEntity::Logout => {
                tracing::info!(idx, "logout entity, dropping rest of envelope");
                self.session.force_logout();
                self.metrics.forced_logouts.inc(&[("source", "push")]);
                return Ok(Step::Stop);
            }
            PushEntity::Message(card) => self.centers.message.dispatch_message(card)?,
            PushEntity::AddFriend(card) => self.centers.user.dispatch_user(card)?,
            PushEntity::AddGroup(card) => self.centers.group.dispatch_group(card)?,
            PushEntity::AddGroupMembers(cards) | PushEntity::ModifyGroupMembers(cards) => {
                self.centers.group.dispatch_members(cards)?
            }
            // TODO: route member exits once GroupCenter grows a removal entry point.
            PushEntity::ExitGroupMembers => return Ok(Step::Skipped),
            PushEntity::Unknown(code) => {
                tracing::warn!(idx, code, "unknown push entity type");
                return Ok(Step::Skipped);
            }
        }
        Ok(Step::Routed)
    }
}
