//! MurmurHash2, 32-bit variant, over raw byte strings.
//!
//! Bucket placement depends on these exact bits, so the mixing steps must
//! not change: words are read little-endian regardless of target, and all
//! arithmetic wraps.

/// Seed used by tables that do not configure their own.
pub const SEED: u32 = 5381;

const M: u32 = 0x5bd1_e995;
const R: u32 = 24;

/// Hash `bytes` with the default [`SEED`].
#[inline]
pub fn murmur2(bytes: &[u8]) -> u32 {
    murmur2_with_seed(bytes, SEED)
}

/// Hash `bytes` with an explicit seed.
pub fn murmur2_with_seed(bytes: &[u8], seed: u32) -> u32 {
    // The length is folded in modulo 2^32.
    let mut h = seed ^ (bytes.len() as u32);

    let mut words = bytes.chunks_exact(4);
    for word in &mut words {
        let mut k = u32::from_le_bytes([word[0], word[1], word[2], word[3]]);
        k = k.wrapping_mul(M);
        k ^= k >> R;
        k = k.wrapping_mul(M);

        h = h.wrapping_mul(M);
        h ^= k;
    }

    let tail = words.remainder();
    if tail.len() >= 3 {
        h ^= u32::from(tail[2]) << 16;
    }
    if tail.len() >= 2 {
        h ^= u32::from(tail[1]) << 8;
    }
    if let Some(&first) = tail.first() {
        h ^= u32::from(first);
        h = h.wrapping_mul(M);
    }

    h ^= h >> 13;
    h = h.wrapping_mul(M);
    h ^= h >> 15;
    h
}
