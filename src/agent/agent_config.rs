use std::time::Duration;

/// The interval at which the pacer issues new connectivity checks when none
/// is given to `start_checklist`.
pub(crate) const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_millis(200);

/// Initial retransmission timeout of an in-flight connectivity check.
pub(crate) const DEFAULT_RTO: Duration = Duration::from_millis(300);

/// Max binding requests sent for one connectivity check before the pair is
/// considered failed.
pub(crate) const DEFAULT_MAX_BINDING_REQUESTS: u16 = 7;

/// Collects the arguments to `Agent` construction into a single structure,
/// for future-proofness of the interface.
#[derive(Default)]
pub struct AgentConfig {
    /// It is used to perform connectivity checks. The values MUST be unguessable, with at least
    /// 128 bits of random number generator output used to generate the password, and at least 24
    /// bits of output to generate the username fragment. Generated when left empty.
    pub local_ufrag: String,
    /// See `local_ufrag`.
    pub local_pwd: String,

    pub is_controlling: bool,

    /// The max amount of binding requests the agent will send for one
    /// connectivity check before it marks the candidate pair as failed.
    pub max_binding_requests: Option<u16>,

    /// Initial retransmission timeout for connectivity checks. The deadline
    /// grows linearly with the attempt count.
    pub binding_request_rto: Option<Duration>,
}
