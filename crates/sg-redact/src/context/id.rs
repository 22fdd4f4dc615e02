//! Opaque error identifiers.
//!
//! Identifiers look like `ERR_2026_1a2b3c4d`. The hex part is an FNV-1a hash
//! over the error name, the message *length*, the timestamp and eight random
//! bytes. Message text never enters the hash.

use chrono::{DateTime, Datelike, Utc};
use std::sync::atomic::{AtomicU64, Ordering};

const FNV_OFFSET: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

static FALLBACK_COUNTER: AtomicU64 = AtomicU64::new(0);

fn fnv1a(hash: u32, bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .fold(hash, |h, b| (h ^ u32::from(*b)).wrapping_mul(FNV_PRIME))
}

fn random_salt(now: DateTime<Utc>) -> [u8; 8] {
    let mut salt = [0u8; 8];
    if getrandom::getrandom(&mut salt).is_err() {
        // Unique per process at least.
        let n = FALLBACK_COUNTER.fetch_add(1, Ordering::Relaxed);
        let nanos = now.timestamp_nanos_opt().unwrap_or_default() as u64;
        salt = (n ^ nanos.rotate_left(17)).to_le_bytes();
    }
    salt
}

/// Generate an identifier for an error named `name` with a message of `message_len` chars.
pub fn generate_error_id(name: &str, message_len: usize, now: DateTime<Utc>) -> String {
    let salt = random_salt(now);
    let nanos = now.timestamp_nanos_opt().unwrap_or_default();

    let mut hash = fnv1a(FNV_OFFSET, name.as_bytes());
    hash = fnv1a(hash, &(message_len as u64).to_le_bytes());
    hash = fnv1a(hash, &nanos.to_le_bytes());
    hash = fnv1a(hash, &salt);

    format!("ERR_{}_{:08x}", now.year(), hash)
}

/// True when `id` has the `ERR_<year>_<8 hex>` shape.
pub fn is_error_id(id: &str) -> bool {
    let mut parts = id.splitn(3, '_');
    let (Some("ERR"), Some(year), Some(hex)) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    year.len() == 4
        && year.bytes().all(|b| b.is_ascii_digit())
        && hex.len() == 8
        && hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
