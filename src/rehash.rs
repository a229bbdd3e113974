//! Growing and shrinking the bucket array.
//!
//! Entries live in the arena independently of the chains, so a rehash only
//! allocates the new bucket array and then relinks arena keys. Relinking
//! cannot fail, which makes the swap all-or-nothing: if the allocation is
//! refused, the old buckets are still in place and untouched.

use crate::error::RehashError;
use crate::primes;
use crate::table::{alloc_buckets, bucket_of, exceeds_threshold, HashTable};

impl<V> HashTable<V> {
    /// Rebuild the table with `next_prime(target)` buckets.
    ///
    /// Serves both directions; a target below the current size shrinks.
    /// Refuses when the size would not change, or when the live entries
    /// would exceed the load threshold at the new size.
    pub fn expand(&mut self, target: usize) -> Result<(), RehashError> {
        let size = self.size();
        let resolved = primes::next_prime(target);
        if resolved == size {
            return Err(RehashError::Unchanged { size });
        }

        let used = self.used();
        if exceeds_threshold(used, resolved, self.expand_threshold) {
            return Err(RehashError::Overloaded {
                used,
                size: resolved,
            });
        }

        let mut buckets = alloc_buckets(resolved)?;
        for (k, entry) in self.slots.iter_mut() {
            let idx = bucket_of(entry.hash, resolved);
            entry.next = buckets[idx].replace(k);
        }
        self.buckets = buckets;

        log::debug!("rehashed {used} entries from {size} to {resolved} buckets");
        Ok(())
    }

    /// Shrink so that fewer than half of the buckets are in use.
    ///
    /// The candidate size is `next_prime(used * 2)`; a candidate that is
    /// not strictly smaller than the current size is refused.
    pub fn resize_to_fit(&mut self) -> Result<(), RehashError> {
        let size = self.size();
        let candidate = primes::next_prime(self.used().saturating_mul(2));
        if candidate >= size {
            return Err(RehashError::NotShrinking { candidate, size });
        }
        self.expand(candidate)
    }
}
