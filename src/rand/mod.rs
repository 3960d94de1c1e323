#[cfg(test)]
mod rand_test;

use rand::{thread_rng, Rng};

const RUNES_ALPHA: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

const LEN_UFRAG: usize = 16;
const LEN_PWD: usize = 32;

fn generate_rand_string(len: usize, runes: &[u8]) -> String {
    let mut rng = thread_rng();
    (0..len)
        .map(|_| runes[rng.gen_range(0..runes.len())] as char)
        .collect()
}

/// Generates an ICE pwd of the length used for local credentials.
pub fn generate_pwd() -> String {
    generate_rand_string(LEN_PWD, RUNES_ALPHA)
}

/// Generates an ICE user fragment of the length used for local credentials.
pub fn generate_ufrag() -> String {
    generate_rand_string(LEN_UFRAG, RUNES_ALPHA)
}
