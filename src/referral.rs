use rand::Rng;

pub const REF_LEN: usize = 6;

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Fresh base-36 token for decorating a visit link. Never stored.
pub fn generate() -> String {
    let mut rng = rand::thread_rng();
    (0..REF_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}
