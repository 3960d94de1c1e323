use super::*;

#[test]
fn test_random_generator_collision() {
    let ufrag = generate_ufrag();
    let pwd = generate_pwd();

    assert_eq!(ufrag.len(), LEN_UFRAG);
    assert_eq!(pwd.len(), LEN_PWD);
    assert!(ufrag.chars().all(|c| c.is_ascii_alphabetic()));
    assert!(pwd.chars().all(|c| c.is_ascii_alphabetic()));
}
