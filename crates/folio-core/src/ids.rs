//! Session identifier generation.
//!
//! Identifiers are short lowercase base36 tokens. Uniqueness is best-effort:
//! they correlate one client's requests on the backend and carry no security
//! weight.

use std::time::{SystemTime, UNIX_EPOCH};

/// Length of a generated session identifier.
pub const SESSION_ID_LEN: usize = 9;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a fresh session identifier.
#[must_use]
pub fn new_session_id() -> String {
    let mut bytes = [0u8; SESSION_ID_LEN];
    if let Err(error) = getrandom::fill(&mut bytes) {
        tracing::warn!(%error, "OS randomness unavailable; deriving session id from the clock");
        bytes = clock_bytes();
    }
    bytes
        .iter()
        .map(|b| char::from(ALPHABET[usize::from(*b) % ALPHABET.len()]))
        .collect()
}

#[allow(clippy::cast_possible_truncation)]
fn clock_bytes() -> [u8; SESSION_ID_LEN] {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos());
    let mut out = [0u8; SESSION_ID_LEN];
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = (nanos >> (i * 8)) as u8 ^ (nanos >> (64 + i * 4)) as u8;
    }
    out
}

/// Check that `id` looks like something [`new_session_id`] produces.
#[must_use]
pub fn is_session_id(id: &str) -> bool {
    id.len() == SESSION_ID_LEN && id.bytes().all(|b| ALPHABET.contains(&b))
}
