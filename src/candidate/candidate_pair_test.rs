use super::candidate_pair::*;

#[test]
fn test_candidate_pair_priority() {
    let tests = vec![
        (
            CandidatePair::new(0, 0, 100, 200, false),
            (1_u64 << 32) * 100 + 2 * 200 + 1,
        ),
        (
            CandidatePair::new(0, 0, 200, 100, false),
            (1_u64 << 32) * 100 + 2 * 200,
        ),
        (
            CandidatePair::new(0, 0, 100, 200, true),
            (1_u64 << 32) * 100 + 2 * 200,
        ),
        (
            CandidatePair::new(0, 0, 200, 100, true),
            (1_u64 << 32) * 100 + 2 * 200 + 1,
        ),
        (
            CandidatePair::new(0, 0, 42, 42, true),
            (1_u64 << 32) * 42 + 2 * 42,
        ),
    ];

    for (pair, want) in tests {
        assert_eq!(
            pair.priority(),
            want,
            "pair {pair} unexpected priority"
        );
    }
}

#[test]
fn test_candidate_pair_priority_role_symmetry() {
    // the pair priority must be identical on both agents: flipping the role
    // and swapping the candidate priorities gives the same value
    let controlling = CandidatePair::new(0, 0, 123456, 654321, true);
    let controlled = CandidatePair::new(0, 0, 654321, 123456, false);
    assert_eq!(controlling.priority(), controlled.priority());
}

#[test]
fn test_candidate_pair_state() {
    let mut pair = CandidatePair::new(0, 0, 100, 200, true);
    assert_eq!(pair.state(), CandidatePairState::Frozen);
    assert!(!pair.is_completed());

    pair.state = CandidatePairState::Waiting;
    assert!(!pair.is_completed());
    pair.state = CandidatePairState::InProgress;
    assert!(!pair.is_completed());
    pair.state = CandidatePairState::Succeeded;
    assert!(pair.is_completed());
    pair.state = CandidatePairState::Failed;
    assert!(pair.is_completed());
}

#[test]
fn test_candidate_pair_state_from_u8() {
    for state in [
        CandidatePairState::Frozen,
        CandidatePairState::Waiting,
        CandidatePairState::InProgress,
        CandidatePairState::Succeeded,
        CandidatePairState::Failed,
    ] {
        assert_eq!(CandidatePairState::from(state as u8), state);
    }
}
