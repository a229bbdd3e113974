//! Curated bucket counts.
//!
//! Roughly doubling primes keep `hash % size` from clustering the way a
//! power-of-two mask would. Every table size is one of these values.

/// Ascending bucket counts a table may take.
pub const PRIMES: [usize; 30] = [
    5,
    11,
    23,
    47,
    97,
    199,
    409,
    823,
    1741,
    3469,
    6949,
    14033,
    28411,
    57557,
    116731,
    236897,
    480881,
    976369,
    1982627,
    4026031,
    8175383,
    16601593,
    33712729,
    68460391,
    139022417,
    282312799,
    573292817,
    1164186217,
    2364114217,
    4294967291,
];

/// Hard ceiling on the bucket count; tables never grow past it.
pub const MAX_CAPACITY: usize = PRIMES[PRIMES.len() - 1];

/// Smallest listed size `>= n`, clamped to [`MAX_CAPACITY`].
pub fn next_prime(n: usize) -> usize {
    PRIMES[next_index(n)]
}

/// The listed size just below `next_prime(n)`, or the smallest one.
pub fn prev_prime(n: usize) -> usize {
    PRIMES[next_index(n).saturating_sub(1)]
}

fn next_index(n: usize) -> usize {
    PRIMES.partition_point(|&p| p < n).min(PRIMES.len() - 1)
}
