
use std::fmt;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use serde::Serialize;
use stun::message::TransactionId;

/// State of the active checklist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ChecklistState {
    /// No checklist has been started yet.
    #[serde(rename = "idle")]
    Idle,

    /// Connectivity checks are being paced out.
    #[serde(rename = "running")]
    Running,

    /// Every pair is completed and at least one pair made it to the valid list.
    #[serde(rename = "completed")]
    Completed,

    /// Every pair is completed and the valid list is empty.
    #[serde(rename = "failed")]
    Failed,
}

impl Default for ChecklistState {
    fn default() -> Self {
        Self::Idle
    }
}

impl fmt::Display for ChecklistState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

/// An in-flight connectivity check: one outbound Binding request transaction
/// together with its retransmission clock.
#[derive(Debug, Clone)]
pub(crate) struct ConnCheck {
    pub(crate) pair_index: usize,
    pub(crate) local_index: usize,
    pub(crate) transaction_id: TransactionId,
    pub(crate) destination: SocketAddr,
    pub(crate) use_candidate: bool,
    pub(crate) attempt: u16,
    pub(crate) next_rto: Instant,
    pub(crate) raw: Vec<u8>,
}

impl ConnCheck {
    pub(crate) fn next_timeout(&self, now: Instant, rto: Duration) -> Instant {
        now + rto * u32::from(self.attempt + 1)
    }
}

/// The active checklist: pacing state plus the in-flight connectivity checks.
/// Created by `Agent::start_checklist`, destroyed with the agent.
pub(crate) struct Checklist {
    pub(crate) state: ChecklistState,
    pub(crate) interval: Duration,
    pub(crate) use_candidate: bool,
    pub(crate) next_pace: Instant,
    pub(crate) conn_checks: Vec<ConnCheck>,
    pub(crate) rto: Duration,
    pub(crate) max_attempts: u16,
}

impl Checklist {
    pub(crate) fn find_conn_check(&self, transaction_id: TransactionId) -> Option<usize> {
        self.conn_checks
            .iter()
            .position(|cc| cc.transaction_id == transaction_id)
    }
}
