
pub mod agent_config;
mod agent_checklist;
mod agent_conncheck;
mod agent_proto;

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use agent_config::*;
use bytes::BytesMut;
use log::{debug, info, trace, warn};
use stun::attributes::*;
use stun::error_code::*;
use stun::fingerprint::*;
use stun::integrity::*;
use stun::message::*;
use stun::textattrs::*;
use stun::xoraddr::*;

use crate::attributes::control::{AttrControlled, AttrControlling};
use crate::attributes::priority::PriorityAttr;
use crate::attributes::use_candidate::UseCandidateAttr;
use crate::candidate::candidate_pair::*;
use crate::candidate::tcp_type::TcpType;
use crate::candidate::*;
use crate::checklist::{Checklist, ChecklistState, ConnCheck};
use crate::error::{Error, Result};
use shared::{Protocol as TransportProtocol, Transmit as TransportMessage, TransportContext};

#[derive(Default, Clone)]
pub struct Credentials {
    pub ufrag: String,
    pub pwd: String,
}

#[derive(Default, Clone)]
pub(crate) struct UfragPwd {
    pub(crate) local_credentials: Credentials,
    pub(crate) remote_ufrag: Option<String>,
    pub(crate) remote_pwd: Option<String>,
}

/// A TCP connection from a local address to a peer address. One connection
/// can be shared by multiple candidate pairs; exactly one record exists per
/// (component, local address, peer address). The socket itself is owned and
/// driven by the caller.
#[derive(Clone, Debug)]
pub struct TcpConnection {
    pub component_id: u16,
    pub local_addr: SocketAddr,
    pub peer_addr: SocketAddr,
    /// True when the connection was initiated locally.
    pub active: bool,
    pub established: bool,
}

pub enum Event {
    ChecklistStateChange(ChecklistState),
    /// Fired once per pair transitioning to Succeeded, carrying the binding
    /// success response that validated the pair.
    CandidatePairEstablished(Box<CandidatePair>, Message),
    /// Fired on terminal failure of a check: the local error, the STUN error
    /// code (0 if none) and the failed pair.
    CandidatePairFailed(Error, u16, Box<CandidatePair>),
}

fn assert_inbound_username_prefix(m: &Message, expected_prefix: &str) -> Result<()> {
    let mut username = Username::new(ATTR_USERNAME, String::new());
    username.get_from(m)?;

    let name = username.to_string();
    match name.split_once(':') {
        Some((prefix, _)) if prefix == expected_prefix => Ok(()),
        _ => Err(Error::ErrMismatchUsername),
    }
}

fn assert_inbound_message_integrity(m: &mut Message, key: &[u8]) -> Result<()> {
    let message_integrity_attr = MessageIntegrity(key.to_vec());
    Ok(message_integrity_attr.check(m)?)
}

fn transports_compatible(local: &CandidateAttr, remote: &CandidateAttr) -> bool {
    match (local.protocol, remote.protocol) {
        (TransportProtocol::UDP, TransportProtocol::UDP) => true,
        (TransportProtocol::TCP, TransportProtocol::TCP) => {
            local.tcp_type != TcpType::Unspecified
                && remote.tcp_type == local.tcp_type.reverse()
        }
        _ => false,
    }
}

/// Represents the ICE agent: both candidate registries, the pair arena with
/// its check and valid lists, and the active checklist once started.
///
/// The agent is sans-IO. Datagrams enter through `handle_read`, outbound
/// messages leave through `poll_write`, deadlines are exported by
/// `poll_timeout` and fed back through `handle_timeout`, and pair outcomes
/// are reported by `poll_event`.
pub struct Agent {
    pub(crate) tie_breaker: u64,
    pub(crate) is_controlling: bool,

    pub(crate) ufrag_pwd: UfragPwd,

    pub(crate) local_candidates: Vec<LocalCandidate>,
    pub(crate) remote_candidates: Vec<RemoteCandidate>,

    /// Pair arena. `check_list` and `valid_list` hold indices into it,
    /// both sorted by descending pair priority.
    pub(crate) candidate_pairs: Vec<CandidatePair>,
    pub(crate) check_list: Vec<usize>,
    pub(crate) valid_list: Vec<usize>,

    pub(crate) checklist: Option<Checklist>,

    pub(crate) tcp_conns: Vec<TcpConnection>,

    // the following won't be changed after new()
    pub(crate) max_binding_requests: u16,
    pub(crate) binding_request_rto: Duration,

    pub(crate) transmits: VecDeque<TransportMessage<BytesMut>>,
    pub(crate) events: VecDeque<Event>,
}

impl Agent {
    /// Creates a new Agent. Empty local credentials are generated; explicit
    /// ones must be at least 4 (ufrag) and 22 (pwd) characters.
    pub fn new(config: AgentConfig) -> Result<Self> {
        let local_ufrag = if config.local_ufrag.is_empty() {
            crate::rand::generate_ufrag()
        } else {
            config.local_ufrag
        };
        let local_pwd = if config.local_pwd.is_empty() {
            crate::rand::generate_pwd()
        } else {
            config.local_pwd
        };

        if local_ufrag.len() < 4 {
            return Err(Error::ErrLocalUfragInsufficientBits);
        }
        if local_pwd.len() < 22 {
            return Err(Error::ErrLocalPwdInsufficientBits);
        }

        Ok(Self {
            tie_breaker: rand::random::<u64>(),
            is_controlling: config.is_controlling,

            ufrag_pwd: UfragPwd {
                local_credentials: Credentials {
                    ufrag: local_ufrag,
                    pwd: local_pwd,
                },
                remote_ufrag: None,
                remote_pwd: None,
            },

            local_candidates: vec![],
            remote_candidates: vec![],
            candidate_pairs: vec![],
            check_list: vec![],
            valid_list: vec![],
            checklist: None,
            tcp_conns: vec![],

            max_binding_requests: config
                .max_binding_requests
                .unwrap_or(DEFAULT_MAX_BINDING_REQUESTS),
            binding_request_rto: config.binding_request_rto.unwrap_or(DEFAULT_RTO),

            transmits: VecDeque::new(),
            events: VecDeque::new(),
        })
    }

    /// Sets the username fragment of the remote agent.
    pub fn set_remote_ufrag(&mut self, remote_ufrag: String) -> Result<()> {
        if remote_ufrag.is_empty() {
            return Err(Error::ErrRemoteUfragEmpty);
        }
        self.ufrag_pwd.remote_ufrag = Some(remote_ufrag);
        Ok(())
    }

    /// Sets the password of the remote agent, the key of every outbound
    /// connectivity check.
    pub fn set_remote_pwd(&mut self, remote_pwd: String) -> Result<()> {
        if remote_pwd.is_empty() {
            return Err(Error::ErrRemotePwdEmpty);
        }
        self.ufrag_pwd.remote_pwd = Some(remote_pwd);
        Ok(())
    }

    /// Returns the local credentials.
    pub fn get_local_credentials(&self) -> &Credentials {
        &self.ufrag_pwd.local_credentials
    }

    pub fn get_remote_ufrag(&self) -> Option<&str> {
        self.ufrag_pwd.remote_ufrag.as_deref()
    }

    pub fn get_remote_pwd(&self) -> Option<&str> {
        self.ufrag_pwd.remote_pwd.as_deref()
    }

    pub fn is_controlling(&self) -> bool {
        self.is_controlling
    }

    /// Sets the local role. Pair priorities depend on the role, so the check
    /// and valid lists are re-ordered when it changes.
    pub fn set_controlling(&mut self, controlling: bool) {
        if self.is_controlling != controlling {
            self.is_controlling = controlling;
            self.prio_order(controlling);
        }
    }

    pub(crate) fn switch_role(&mut self) {
        self.is_controlling = !self.is_controlling;
        info!("[{}]: switched local role", self.get_name());
        self.prio_order(self.is_controlling);
    }

    /// Adds a new local candidate. For UDP, a candidate already registered
    /// under the same (component, protocol, address) is replaced only when
    /// the new priority is strictly higher; otherwise the existing candidate
    /// is returned. TCP active candidates bind port zero, so no lookup is
    /// attempted for them.
    #[allow(clippy::too_many_arguments)]
    pub fn add_local_candidate(
        &mut self,
        component_id: u16,
        protocol: TransportProtocol,
        priority: u32,
        addr: SocketAddr,
        base_addr: Option<SocketAddr>,
        candidate_type: CandidateType,
        tcp_type: TcpType,
    ) -> Result<usize> {
        if component_id == 0 {
            return Err(Error::ErrInvalidComponentId);
        }
        if protocol == TransportProtocol::TCP && tcp_type == TcpType::Unspecified {
            return Err(Error::ErrTcpTypeUnsupported);
        }

        let base_addr = if candidate_type == CandidateType::Host {
            base_addr.unwrap_or(addr)
        } else {
            if addr.port() == 0 {
                return Err(Error::ErrPortEmpty);
            }
            let Some(base) = base_addr else {
                return Err(Error::ErrBaseAddrEmpty);
            };
            if base.port() == 0 {
                return Err(Error::ErrBaseAddrEmpty);
            }
            if base.is_ipv4() != addr.is_ipv4() {
                return Err(Error::ErrAddressFamilyMismatch);
            }
            base
        };

        let tcp_type = if protocol == TransportProtocol::TCP {
            tcp_type
        } else {
            TcpType::Unspecified
        };

        if protocol == TransportProtocol::UDP {
            if let Some(local_index) = self.find_local_candidate(component_id, protocol, addr) {
                trace!(
                    "[{}]: add_local[{}] -- candidate already exists ({})",
                    self.get_name(),
                    addr,
                    self.local_candidates[local_index],
                );
                if priority > self.local_candidates[local_index].attr.priority {
                    self.replace_local_candidate(
                        local_index,
                        priority,
                        base_addr,
                        candidate_type,
                        tcp_type,
                    );
                }
                return Ok(local_index);
            }
        }

        let foundation = compute_foundation(&addr, candidate_type);
        self.local_candidates.push(LocalCandidate {
            attr: CandidateAttr {
                component_id,
                foundation,
                protocol,
                priority,
                addr,
                candidate_type,
                tcp_type,
            },
            base_addr,
        });
        let local_index = self.local_candidates.len() - 1;

        // pair this local candidate with all existing remote candidates
        for remote_index in 0..self.remote_candidates.len() {
            self.add_pair(local_index, remote_index);
        }

        Ok(local_index)
    }

    /// Replaces the candidate record in place so its index stays stable,
    /// then rebuilds its pairs under the new priority.
    fn replace_local_candidate(
        &mut self,
        local_index: usize,
        priority: u32,
        base_addr: SocketAddr,
        candidate_type: CandidateType,
        tcp_type: TcpType,
    ) {
        self.remove_pairs_with_local(local_index);

        let addr = self.local_candidates[local_index].attr.addr;
        let lcand = &mut self.local_candidates[local_index];
        lcand.attr.priority = priority;
        lcand.attr.candidate_type = candidate_type;
        lcand.attr.tcp_type = tcp_type;
        lcand.attr.foundation = compute_foundation(&addr, candidate_type);
        lcand.base_addr = base_addr;

        for remote_index in 0..self.remote_candidates.len() {
            self.add_pair(local_index, remote_index);
        }
    }

    fn remove_pairs_with_local(&mut self, local_index: usize) {
        let pairs = &self.candidate_pairs;
        self.check_list
            .retain(|&pi| pairs[pi].local_index != local_index);
        self.valid_list
            .retain(|&pi| pairs[pi].local_index != local_index);
        if let Some(checklist) = &mut self.checklist {
            checklist
                .conn_checks
                .retain(|cc| pairs[cc.pair_index].local_index != local_index);
        }
    }

    /// Adds a new remote candidate. The foundation is stored verbatim as
    /// signalled by the peer. Adding a known (component, protocol, address)
    /// again is a successful no-op returning the existing candidate.
    #[allow(clippy::too_many_arguments)]
    pub fn add_remote_candidate(
        &mut self,
        component_id: u16,
        foundation: String,
        protocol: TransportProtocol,
        priority: u32,
        addr: SocketAddr,
        candidate_type: CandidateType,
        tcp_type: TcpType,
    ) -> Result<usize> {
        if component_id == 0 {
            return Err(Error::ErrInvalidComponentId);
        }
        if protocol == TransportProtocol::TCP && tcp_type == TcpType::Unspecified {
            return Err(Error::ErrTcpTypeUnsupported);
        }

        if let Some(remote_index) = self.find_remote_candidate(component_id, protocol, addr) {
            trace!(
                "[{}]: add_remote[{}] -- candidate already exists ({})",
                self.get_name(),
                addr,
                self.remote_candidates[remote_index],
            );
            return Ok(remote_index);
        }

        self.remote_candidates.push(RemoteCandidate {
            attr: CandidateAttr {
                component_id,
                foundation,
                protocol,
                priority,
                addr,
                candidate_type,
                tcp_type,
            },
        });
        let remote_index = self.remote_candidates.len() - 1;

        // pair this remote candidate with all existing local candidates
        for local_index in 0..self.local_candidates.len() {
            self.add_pair(local_index, remote_index);
        }

        Ok(remote_index)
    }

    pub fn find_local_candidate(
        &self,
        component_id: u16,
        protocol: TransportProtocol,
        addr: SocketAddr,
    ) -> Option<usize> {
        self.local_candidates
            .iter()
            .position(|c| c.attr.matches(component_id, protocol, addr))
    }

    /// First local candidate of the given type and address family.
    pub fn find_local_candidate_by_type(
        &self,
        candidate_type: CandidateType,
        ipv4: bool,
    ) -> Option<usize> {
        self.local_candidates.iter().position(|c| {
            c.attr.candidate_type == candidate_type && c.attr.addr.is_ipv4() == ipv4
        })
    }

    pub fn find_remote_candidate(
        &self,
        component_id: u16,
        protocol: TransportProtocol,
        addr: SocketAddr,
    ) -> Option<usize> {
        self.remote_candidates
            .iter()
            .position(|c| c.attr.matches(component_id, protocol, addr))
    }

    pub(crate) fn find_local_candidate_by_addr(
        &self,
        addr: SocketAddr,
        protocol: TransportProtocol,
    ) -> Option<usize> {
        self.local_candidates
            .iter()
            .position(|c| c.attr.addr == addr && c.attr.protocol == protocol)
    }

    pub(crate) fn find_remote_candidate_by_addr(
        &self,
        addr: SocketAddr,
        protocol: TransportProtocol,
    ) -> Option<usize> {
        self.remote_candidates
            .iter()
            .position(|c| c.attr.addr == addr && c.attr.protocol == protocol)
    }

    /// Pairs two candidates if their components match and their transports
    /// are compatible (UDP with UDP; TCP with the reversed TCP type). The
    /// new pair starts Frozen and enters the check list at its priority
    /// position.
    pub(crate) fn add_pair(&mut self, local_index: usize, remote_index: usize) -> Option<usize> {
        let (compatible, local_priority, remote_priority, is_tcp, component_id, local_addr, remote_addr) = {
            let local = &self.local_candidates[local_index].attr;
            let remote = &self.remote_candidates[remote_index].attr;
            (
                local.component_id == remote.component_id
                    && transports_compatible(local, remote),
                local.priority,
                remote.priority,
                local.protocol == TransportProtocol::TCP,
                local.component_id,
                local.addr,
                remote.addr,
            )
        };
        if !compatible {
            return None;
        }
        if let Some(pair_index) = self.find_pair(local_index, remote_index) {
            return Some(pair_index);
        }

        let mut p = CandidatePair::new(
            local_index,
            remote_index,
            local_priority,
            remote_priority,
            self.is_controlling,
        );
        if is_tcp {
            p.conn_index = self.find_tcp_connection(component_id, local_addr, remote_addr);
        }
        self.candidate_pairs.push(p);
        let pair_index = self.candidate_pairs.len() - 1;
        self.insert_check_list_sorted(pair_index);
        trace!(
            "[{}]: new pair {}",
            self.get_name(),
            self.candidate_pairs[pair_index]
        );
        Some(pair_index)
    }

    pub(crate) fn find_pair(&self, local_index: usize, remote_index: usize) -> Option<usize> {
        self.check_list.iter().copied().find(|&pi| {
            let p = &self.candidate_pairs[pi];
            p.local_index == local_index && p.remote_index == remote_index
        })
    }

    /// Highest-priority pair in the given state; the check list is sorted,
    /// so the first hit wins.
    pub(crate) fn find_pair_by_state(&self, state: CandidatePairState) -> Option<usize> {
        self.check_list
            .iter()
            .copied()
            .find(|&pi| self.candidate_pairs[pi].state == state)
    }

    fn insert_check_list_sorted(&mut self, pair_index: usize) {
        let prio = self.candidate_pairs[pair_index].priority();
        let pairs = &self.candidate_pairs;
        let pos = self
            .check_list
            .iter()
            .position(|&pi| pairs[pi].priority() < prio)
            .unwrap_or(self.check_list.len());
        self.check_list.insert(pos, pair_index);
    }

    pub(crate) fn insert_valid_list_sorted(&mut self, pair_index: usize) {
        let prio = self.candidate_pairs[pair_index].priority();
        let pairs = &self.candidate_pairs;
        let pos = self
            .valid_list
            .iter()
            .position(|&pi| pairs[pi].priority() < prio)
            .unwrap_or(self.valid_list.len());
        self.valid_list.insert(pos, pair_index);
    }

    /// Recomputes every pair priority for the given role and re-sorts the
    /// check and valid lists. Sorting is stable, so pairs of equal priority
    /// keep their insertion order.
    pub(crate) fn prio_order(&mut self, controlling: bool) {
        for p in &mut self.candidate_pairs {
            p.ice_role_controlling = controlling;
        }
        let pairs = &self.candidate_pairs;
        self.check_list
            .sort_by_key(|&pi| std::cmp::Reverse(pairs[pi].priority()));
        self.valid_list
            .sort_by_key(|&pi| std::cmp::Reverse(pairs[pi].priority()));
    }

    /// The single mutator of the pair state machine.
    pub(crate) fn set_pair_state(&mut self, pair_index: usize, state: CandidatePairState) {
        let old = self.candidate_pairs[pair_index].state;
        if old == state {
            return;
        }
        self.candidate_pairs[pair_index].state = state;
        trace!(
            "[{}]: pair {} {} -> {}",
            self.get_name(),
            self.candidate_pairs[pair_index],
            old,
            state
        );
    }

    /// Records a terminal check failure on the pair and reports it.
    pub(crate) fn pair_failed(&mut self, pair_index: usize, err: Error, stun_code: u16) {
        self.set_pair_state(pair_index, CandidatePairState::Failed);
        if self.candidate_pairs[pair_index].valid {
            self.valid_list.retain(|&pi| pi != pair_index);
        }
        {
            let p = &mut self.candidate_pairs[pair_index];
            p.valid = false;
            p.error = Some(err.clone());
            p.stun_code = stun_code;
        }
        debug!(
            "[{}]: pair {} failed: {} (scode {})",
            self.get_name(),
            self.candidate_pairs[pair_index],
            err,
            stun_code
        );
        let snapshot = Box::new(self.candidate_pairs[pair_index].clone());
        self.events
            .push_back(Event::CandidatePairFailed(err, stun_code, snapshot));
    }

    /// Moves a pair into the valid list after a successful round trip. The
    /// established event fires exactly once per pair.
    pub(crate) fn make_pair_valid(&mut self, pair_index: usize, use_candidate: bool, msg: &Message) {
        self.set_pair_state(pair_index, CandidatePairState::Succeeded);
        let first = !self.candidate_pairs[pair_index].established;
        {
            let p = &mut self.candidate_pairs[pair_index];
            p.valid = true;
            p.established = true;
            if use_candidate {
                p.nominated = true;
            }
        }
        if !self.valid_list.contains(&pair_index) {
            self.insert_valid_list_sorted(pair_index);
        }
        if first {
            trace!(
                "[{}]: found valid candidate pair: {}",
                self.get_name(),
                self.candidate_pairs[pair_index]
            );
            let snapshot = Box::new(self.candidate_pairs[pair_index].clone());
            self.events
                .push_back(Event::CandidatePairEstablished(snapshot, msg.clone()));
        }
    }

    pub(crate) fn send_stun(
        &mut self,
        raw: &[u8],
        local_index: usize,
        peer_addr: SocketAddr,
        now: Instant,
    ) {
        let local_addr = self.local_candidates[local_index].attr.addr;
        let transport_protocol = self.local_candidates[local_index].attr.protocol;

        self.transmits.push_back(TransportMessage {
            now,
            transport: TransportContext {
                local_addr,
                peer_addr,
                ecn: None,
                protocol: transport_protocol,
            },
            message: BytesMut::from(raw),
        });
    }

    /// Processes one received datagram for the local candidate that owns the
    /// receiving address. `ErrNonStunmessage` means the buffer is not STUN
    /// and the caller should hand the bytes to upper protocol layers.
    pub(crate) fn handle_inbound_candidate_msg(
        &mut self,
        local_index: usize,
        buf: &[u8],
        remote_addr: SocketAddr,
        local_addr: SocketAddr,
    ) -> Result<()> {
        if !is_message(buf) {
            trace!(
                "[{}]: not a STUN message from {} to {}",
                self.get_name(),
                remote_addr,
                local_addr
            );
            return Err(Error::ErrNonStunmessage);
        }

        let mut m = Message {
            raw: vec![],
            ..Message::default()
        };
        // Explicitly copy raw buffer so Message can own the memory.
        m.raw.extend_from_slice(buf);

        if let Err(err) = m.decode() {
            warn!(
                "[{}]: failed to decode ICE from {} to {}: {}",
                self.get_name(),
                remote_addr,
                local_addr,
                err
            );
            return Err(Error::ErrNonStunmessage);
        }

        self.handle_inbound(&mut m, local_index, remote_addr)
    }

    /// Dispatches a decoded STUN message: requests go to the embedded
    /// server, responses resolve pending connectivity checks. Everything
    /// else is consumed silently.
    pub(crate) fn handle_inbound(
        &mut self,
        m: &mut Message,
        local_index: usize,
        remote_addr: SocketAddr,
    ) -> Result<()> {
        if m.typ.method != METHOD_BINDING {
            trace!(
                "[{}]: consumed STUN from {} class({}) method({})",
                self.get_name(),
                remote_addr,
                m.typ.class,
                m.typ.method
            );
            return Ok(());
        }

        if m.typ.class == CLASS_REQUEST {
            self.handle_binding_request(m, local_index, remote_addr)
        } else if m.typ.class == CLASS_SUCCESS_RESPONSE || m.typ.class == CLASS_ERROR_RESPONSE {
            self.handle_binding_response(m, local_index, remote_addr)
        } else {
            trace!(
                "[{}]: consumed binding indication from {}",
                self.get_name(),
                remote_addr
            );
            Ok(())
        }
    }

    /// Registers a TCP connection, deduplicated per (component, local
    /// address, peer address), and attaches it to every pair that runs over
    /// it. The caller drives accept/connect and the socket itself.
    pub fn add_tcp_connection(
        &mut self,
        component_id: u16,
        local_addr: SocketAddr,
        peer_addr: SocketAddr,
        active: bool,
    ) -> usize {
        if let Some(conn_index) = self.find_tcp_connection(component_id, local_addr, peer_addr) {
            return conn_index;
        }
        self.tcp_conns.push(TcpConnection {
            component_id,
            local_addr,
            peer_addr,
            active,
            established: false,
        });
        let conn_index = self.tcp_conns.len() - 1;

        let attached: Vec<usize> = self
            .check_list
            .iter()
            .copied()
            .filter(|&pi| {
                let p = &self.candidate_pairs[pi];
                let local = &self.local_candidates[p.local_index].attr;
                let remote = &self.remote_candidates[p.remote_index].attr;
                local.protocol == TransportProtocol::TCP
                    && local.component_id == component_id
                    && local.addr == local_addr
                    && remote.addr == peer_addr
            })
            .collect();
        for pi in attached {
            self.candidate_pairs[pi].conn_index = Some(conn_index);
        }

        conn_index
    }

    pub fn find_tcp_connection(
        &self,
        component_id: u16,
        local_addr: SocketAddr,
        peer_addr: SocketAddr,
    ) -> Option<usize> {
        self.tcp_conns.iter().position(|c| {
            c.component_id == component_id
                && c.local_addr == local_addr
                && c.peer_addr == peer_addr
        })
    }

    pub fn set_tcp_connection_established(&mut self, conn_index: usize, established: bool) {
        if let Some(conn) = self.tcp_conns.get_mut(conn_index) {
            conn.established = established;
        }
    }

    pub fn get_tcp_connections(&self) -> &[TcpConnection] {
        &self.tcp_conns
    }

    /// Returns the local candidates.
    pub fn get_local_candidates(&self) -> &[LocalCandidate] {
        &self.local_candidates
    }

    /// Returns the remote candidates.
    pub fn get_remote_candidates(&self) -> &[RemoteCandidate] {
        &self.remote_candidates
    }

    /// The check list: pair indices sorted by descending pair priority.
    pub fn check_list(&self) -> &[usize] {
        &self.check_list
    }

    /// The valid list: the subset of the check list that completed a
    /// successful round trip, sorted by descending pair priority.
    pub fn valid_list(&self) -> &[usize] {
        &self.valid_list
    }

    pub fn get_candidate_pair(&self, pair_index: usize) -> Option<&CandidatePair> {
        self.candidate_pairs.get(pair_index)
    }

    pub(crate) fn get_name(&self) -> &str {
        if self.is_controlling {
            "controlling"
        } else {
            "controlled"
        }
    }
}
