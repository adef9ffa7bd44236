// src/note/id.rs
//! Note identifiers: creation time in base 36 followed by a random suffix.

use chrono::{DateTime, Utc};
use rand::Rng;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of the random part appended after the timestamp.
pub const SUFFIX_LEN: usize = 11;

/// Render a non-negative integer in lowercase base 36.
pub fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(ALPHABET[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

/// Generate a fresh note id for a note created at `now`.
///
/// Collisions require two notes in the same millisecond drawing the same
/// 11-character suffix, which is treated as impossible.
pub fn generate_id<R: Rng>(now: &DateTime<Utc>, rng: &mut R) -> String {
    let millis = now.timestamp_millis().max(0) as u64;
    let mut id = to_base36(millis);
    for _ in 0..SUFFIX_LEN {
        id.push(ALPHABET[rng.gen_range(0..ALPHABET.len())] as char);
    }
    id
}
