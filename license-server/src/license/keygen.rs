//! License key generation

use rand::Rng;

const KEY_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const SEGMENT_LEN: usize = 4;

/// Generate a license key of the form `PRO-XXXX-XXXX`, where each X is an
/// uppercase alphanumeric character. Collisions are left to the store's
/// uniqueness constraint.
pub fn generate_license_key() -> String {
    let mut rng = rand::thread_rng();
    format!("PRO-{}-{}", segment(&mut rng), segment(&mut rng))
}

fn segment(rng: &mut impl Rng) -> String {
    (0..SEGMENT_LEN)
        .map(|_| KEY_CHARSET[rng.gen_range(0..KEY_CHARSET.len())] as char)
        .collect()
}
