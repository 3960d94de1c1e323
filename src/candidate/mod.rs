#[cfg(test)]
mod candidate_pair_test;
#[cfg(test)]
mod candidate_test;
#[cfg(test)]
mod tcp_type_test;

pub mod candidate_pair;
pub mod tcp_type;

use std::fmt;
use std::net::SocketAddr;

use crc::{Crc, CRC_32_ISO_HDLC};
use serde::Serialize;
use shared::Protocol as TransportProtocol;

use tcp_type::TcpType;

/// Represents the type of an ICE candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CandidateType {
    #[serde(rename = "unspecified")]
    Unspecified,
    #[serde(rename = "host")]
    Host,
    #[serde(rename = "srflx")]
    ServerReflexive,
    #[serde(rename = "prflx")]
    PeerReflexive,
    #[serde(rename = "relay")]
    Relay,
}

impl fmt::Display for CandidateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            CandidateType::Host => "host",
            CandidateType::ServerReflexive => "srflx",
            CandidateType::PeerReflexive => "prflx",
            CandidateType::Relay => "relay",
            CandidateType::Unspecified => "Unknown candidate type",
        };
        write!(f, "{s}")
    }
}

impl Default for CandidateType {
    fn default() -> Self {
        Self::Unspecified
    }
}

impl CandidateType {
    /// Returns the preference weight of a `CandidateType`.
    ///
    /// 4.1.2.2.  Guidelines for Choosing Type and Local Preferences
    /// The RECOMMENDED values are 126 for host candidates, 100
    /// for server reflexive candidates, 110 for peer reflexive candidates,
    /// and 0 for relayed candidates.
    #[must_use]
    pub const fn preference(self) -> u16 {
        match self {
            Self::Host => 126,
            Self::PeerReflexive => 110,
            Self::ServerReflexive => 100,
            Self::Relay | CandidateType::Unspecified => 0,
        }
    }

    pub(crate) const fn ordinal(self) -> u32 {
        match self {
            Self::Host => 0,
            Self::ServerReflexive => 1,
            Self::PeerReflexive => 2,
            Self::Relay => 3,
            Self::Unspecified => 4,
        }
    }
}

pub(crate) const DEFAULT_LOCAL_PREFERENCE: u16 = 65535;

/// Computes the priority a candidate of the given type gets under the
/// recommended formula of RFC 8445 5.1.2.1.
pub fn compute_priority(
    candidate_type: CandidateType,
    local_preference: u16,
    component_id: u16,
) -> u32 {
    (1 << 24) * u32::from(candidate_type.preference())
        + (1 << 8) * u32::from(local_preference)
        + 256_u32.saturating_sub(u32::from(component_id))
}

const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// Computes the foundation of a locally synthesised candidate: a hash of the
/// candidate address XORed with the candidate type, rendered as 8 hex chars.
/// Candidates sharing an address and type land in the same unfreeze group.
pub fn compute_foundation(addr: &SocketAddr, candidate_type: CandidateType) -> String {
    let hash = match addr.ip() {
        std::net::IpAddr::V4(ip) => CRC32.checksum(&ip.octets()),
        std::net::IpAddr::V6(ip) => CRC32.checksum(&ip.octets()),
    };
    format!("{:08x}", hash ^ candidate_type.ordinal())
}

/// The attributes common to local and remote candidates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateAttr {
    pub component_id: u16,
    pub foundation: String,
    pub protocol: TransportProtocol,
    pub priority: u32,
    pub addr: SocketAddr,
    pub candidate_type: CandidateType,
    pub tcp_type: TcpType,
}

impl fmt::Display for CandidateAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let proto = match self.protocol {
            TransportProtocol::UDP => "udp",
            TransportProtocol::TCP => "tcp",
        };
        write!(f, "{}|{}", self.candidate_type, proto)?;
        if self.protocol == TransportProtocol::TCP {
            write!(f, ".{}", self.tcp_type)?;
        }
        write!(f, "|{}", self.addr)
    }
}

impl CandidateAttr {
    /// Candidate lookup identity: component, transport protocol and address.
    pub(crate) fn matches(
        &self,
        component_id: u16,
        protocol: TransportProtocol,
        addr: SocketAddr,
    ) -> bool {
        self.component_id == component_id && self.protocol == protocol && self.addr == addr
    }
}

/// A local candidate. The base address is the host address the candidate
/// derives from and equals the candidate address for host candidates.
#[derive(Clone, Debug)]
pub struct LocalCandidate {
    pub attr: CandidateAttr,
    pub base_addr: SocketAddr,
}

impl fmt::Display for LocalCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.attr, f)
    }
}

/// A remote candidate, as signalled by the peer or learned from an inbound
/// binding request (peer reflexive).
#[derive(Clone, Debug)]
pub struct RemoteCandidate {
    pub attr: CandidateAttr,
}

impl fmt::Display for RemoteCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.attr, f)
    }
}
