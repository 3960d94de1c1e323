use std::net::SocketAddr;
use std::str::FromStr;

use shared::Protocol as TransportProtocol;

use super::tcp_type::TcpType;
use super::*;

#[test]
fn test_foundation_deterministic() {
    let addr = SocketAddr::from_str("192.168.1.1:19216").unwrap();

    let f1 = compute_foundation(&addr, CandidateType::Host);
    let f2 = compute_foundation(&addr, CandidateType::Host);
    assert_eq!(f1, f2, "same inputs must produce the same foundation");
    assert_eq!(f1.len(), 8);

    let f3 = compute_foundation(&addr, CandidateType::ServerReflexive);
    assert_ne!(f1, f3, "candidate type must influence the foundation");

    // the port is not part of the hash, only the address and type are
    let same_ip = SocketAddr::from_str("192.168.1.1:20000").unwrap();
    assert_eq!(f1, compute_foundation(&same_ip, CandidateType::Host));

    let other = SocketAddr::from_str("192.168.1.2:19216").unwrap();
    assert_ne!(f1, compute_foundation(&other, CandidateType::Host));
}

#[test]
fn test_compute_priority() {
    assert_eq!(
        compute_priority(CandidateType::Host, DEFAULT_LOCAL_PREFERENCE, 1),
        (126 << 24) + (65535 << 8) + 255,
    );
    assert_eq!(
        compute_priority(CandidateType::Relay, 0, 1),
        255,
    );
    assert!(
        compute_priority(CandidateType::Host, DEFAULT_LOCAL_PREFERENCE, 1)
            > compute_priority(CandidateType::PeerReflexive, DEFAULT_LOCAL_PREFERENCE, 1)
    );
}

#[test]
fn test_candidate_attr_matches() {
    let addr = SocketAddr::from_str("10.0.0.1:5000").unwrap();
    let attr = CandidateAttr {
        component_id: 1,
        foundation: "abcdef01".to_owned(),
        protocol: TransportProtocol::UDP,
        priority: 100,
        addr,
        candidate_type: CandidateType::Host,
        tcp_type: TcpType::Unspecified,
    };

    assert!(attr.matches(1, TransportProtocol::UDP, addr));
    assert!(!attr.matches(2, TransportProtocol::UDP, addr));
    assert!(!attr.matches(1, TransportProtocol::TCP, addr));
    assert!(!attr.matches(
        1,
        TransportProtocol::UDP,
        SocketAddr::from_str("10.0.0.1:5001").unwrap()
    ));
}

#[test]
fn test_candidate_display() {
    let addr = SocketAddr::from_str("10.0.0.1:5000").unwrap();
    let udp = LocalCandidate {
        attr: CandidateAttr {
            component_id: 1,
            foundation: "abcdef01".to_owned(),
            protocol: TransportProtocol::UDP,
            priority: 100,
            addr,
            candidate_type: CandidateType::Host,
            tcp_type: TcpType::Unspecified,
        },
        base_addr: addr,
    };
    assert_eq!(udp.to_string(), "host|udp|10.0.0.1:5000");

    let tcp = RemoteCandidate {
        attr: CandidateAttr {
            component_id: 1,
            foundation: "abcdef01".to_owned(),
            protocol: TransportProtocol::TCP,
            priority: 100,
            addr,
            candidate_type: CandidateType::PeerReflexive,
            tcp_type: TcpType::Passive,
        },
    };
    assert_eq!(tcp.to_string(), "prflx|tcp.passive|10.0.0.1:5000");
}
