use super::tcp_type::*;

#[test]
fn test_tcp_type() {
    let passive = TcpType::from("passive");

    assert_eq!(TcpType::from("active"), TcpType::Active);
    assert_eq!(passive, TcpType::Passive);
    assert_eq!(TcpType::from("so"), TcpType::SimultaneousOpen);
    assert_eq!(TcpType::from("something else"), TcpType::Unspecified);

    assert_eq!(TcpType::Unspecified.to_string(), "unspecified");
    assert_eq!(TcpType::Active.to_string(), "active");
    assert_eq!(passive.to_string(), "passive");
    assert_eq!(TcpType::SimultaneousOpen.to_string(), "so");
}

#[test]
fn test_tcp_type_reverse() {
    assert_eq!(TcpType::Active.reverse(), TcpType::Passive);
    assert_eq!(TcpType::Passive.reverse(), TcpType::Active);
    assert_eq!(
        TcpType::SimultaneousOpen.reverse(),
        TcpType::SimultaneousOpen
    );

    // round trip
    for t in [
        TcpType::Active,
        TcpType::Passive,
        TcpType::SimultaneousOpen,
        TcpType::Unspecified,
    ] {
        assert_eq!(t.reverse().reverse(), t);
    }
}
