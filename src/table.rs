//! HashTable: prime-sized buckets chaining entries stored in a slotmap arena.

use crate::config::Config;
use crate::error::Result;
use crate::murmur::murmur2_with_seed;
use crate::primes::{self, MAX_CAPACITY};
use core::fmt;
use core::mem;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Arena key of one chain node.
    pub(crate) struct EntryKey;
}

/// One chain node. The key bytes are immutable once stored.
#[derive(Debug)]
pub(crate) struct Entry<V> {
    pub(crate) key: Box<[u8]>,
    pub(crate) value: V,
    pub(crate) hash: u32,
    pub(crate) next: Option<EntryKey>,
}

pub(crate) type Buckets = Box<[Option<EntryKey>]>;

/// A map from byte strings to `V` with separate chaining.
///
/// The bucket count is always one of [`primes::PRIMES`]. Inserting a new
/// key that pushes the load factor past the configured threshold (70% by
/// default) grows the table before `set` returns, to the smallest larger
/// listed prime that brings the load back under the threshold.
pub struct HashTable<V> {
    pub(crate) buckets: Buckets,
    pub(crate) slots: SlotMap<EntryKey, Entry<V>>, // every live entry, chained or not
    pub(crate) expand_threshold: u8,
    pub(crate) seed: u32,
}

/// Allocate `size` empty chain heads, reporting failure instead of aborting.
pub(crate) fn alloc_buckets(size: usize) -> Result<Buckets> {
    let mut buckets = Vec::new();
    buckets.try_reserve_exact(size)?;
    buckets.resize(size, None);
    Ok(buckets.into_boxed_slice())
}

#[inline]
pub(crate) fn bucket_of(hash: u32, size: usize) -> usize {
    hash as usize % size
}

/// `used / size > percent / 100`, without rounding.
#[inline]
pub(crate) fn exceeds_threshold(used: usize, size: usize, percent: u8) -> bool {
    (used as u128) * 100 > (size as u128) * u128::from(percent)
}

fn copy_key(key: &[u8]) -> Result<Box<[u8]>> {
    let mut owned = Vec::new();
    owned.try_reserve_exact(key.len())?;
    owned.extend_from_slice(key);
    Ok(owned.into_boxed_slice())
}

impl<V> HashTable<V> {
    /// Create a table with at least `capacity` buckets, rounded up to the
    /// next listed prime (and clamped to [`MAX_CAPACITY`]).
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_config(Config::new().capacity(capacity))
    }

    pub fn with_config(config: Config) -> Result<Self> {
        let size = primes::next_prime(config.capacity);
        let buckets = alloc_buckets(size)?;
        log::trace!(
            "created table with {size} buckets (requested {})",
            config.capacity
        );
        Ok(Self {
            buckets,
            slots: SlotMap::with_key(),
            expand_threshold: config.expand_threshold,
            seed: config.seed,
        })
    }

    /// Number of live keys.
    pub fn used(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Current bucket count.
    pub fn size(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.used() as f64 / self.size() as f64
    }

    #[inline]
    fn hash(&self, key: &[u8]) -> u32 {
        murmur2_with_seed(key, self.seed)
    }

    fn find(&self, hash: u32, key: &[u8]) -> Option<EntryKey> {
        let mut cursor = self.buckets[bucket_of(hash, self.size())];
        while let Some(k) = cursor {
            let entry = &self.slots[k];
            if entry.hash == hash && *entry.key == *key {
                return Some(k);
            }
            cursor = entry.next;
        }
        None
    }

    /// Map `key` to `value`.
    ///
    /// An existing key has its value replaced in place and the old value is
    /// returned. A new key is linked at the head of its chain; if the table
    /// is then over its load threshold it grows to the smallest larger listed
    /// prime that brings the load back under it.
    /// A failed growth is logged and does not fail the insert.
    ///
    /// Fails only when the key bytes cannot be allocated, leaving the table
    /// unchanged.
    pub fn set(&mut self, key: impl AsRef<[u8]>, value: V) -> Result<Option<V>> {
        let key = key.as_ref();
        let hash = self.hash(key);
        if let Some(k) = self.find(hash, key) {
            return Ok(Some(mem::replace(&mut self.slots[k].value, value)));
        }

        let key = copy_key(key)?;
        let idx = bucket_of(hash, self.size());
        let next = self.buckets[idx];
        let k = self.slots.insert(Entry {
            key,
            value,
            hash,
            next,
        });
        self.buckets[idx] = Some(k);

        self.grow_if_needed();
        Ok(None)
    }

    fn grow_if_needed(&mut self) {
        let size = self.size();
        if !exceeds_threshold(self.used(), size, self.expand_threshold) {
            return;
        }
        if size >= MAX_CAPACITY {
            log::trace!("table is at the {MAX_CAPACITY} bucket ceiling, not growing");
            return;
        }
        // Smallest larger listed size that brings the load back under the threshold.
        let (used, threshold) = (self.used(), self.expand_threshold);
        let target = primes::PRIMES
            .iter()
            .copied()
            .find(|&p| p > size && !exceeds_threshold(used, p, threshold))
            .unwrap_or(MAX_CAPACITY);
        if let Err(e) = self.expand(target) {
            log::warn!("automatic growth from {size} to {target} buckets failed: {e}");
        }
    }

    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&V> {
        let key = key.as_ref();
        let k = self.find(self.hash(key), key)?;
        Some(&self.slots[k].value)
    }

    pub fn get_mut(&mut self, key: impl AsRef<[u8]>) -> Option<&mut V> {
        let key = key.as_ref();
        let k = self.find(self.hash(key), key)?;
        Some(&mut self.slots[k].value)
    }

    /// Whether `key` is present, regardless of what it maps to.
    pub fn has(&self, key: impl AsRef<[u8]>) -> bool {
        let key = key.as_ref();
        self.find(self.hash(key), key).is_some()
    }

    /// Unlink `key` from its chain and return its value.
    pub fn remove(&mut self, key: impl AsRef<[u8]>) -> Option<V> {
        let key = key.as_ref();
        let hash = self.hash(key);
        let idx = bucket_of(hash, self.size());

        let mut prev: Option<EntryKey> = None;
        let mut cursor = self.buckets[idx];
        while let Some(k) = cursor {
            let entry = &self.slots[k];
            if entry.hash == hash && *entry.key == *key {
                let next = entry.next;
                match prev {
                    None => self.buckets[idx] = next,
                    Some(p) => self.slots[p].next = next,
                }
                return self.slots.remove(k).map(|e| e.value);
            }
            prev = Some(k);
            cursor = entry.next;
        }
        None
    }

    /// Remove `key`; `false` if it was absent.
    pub fn delete(&mut self, key: impl AsRef<[u8]>) -> bool {
        self.remove(key).is_some()
    }

    /// Drop every entry, keeping the current bucket count.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.buckets.fill(None);
    }

    /// Release the table and everything it owns.
    ///
    /// Dropping the table does the same; this form only makes the teardown
    /// point explicit at the call site.
    pub fn destroy(self) {
        log::trace!(
            "destroying table with {} entries in {} buckets",
            self.used(),
            self.size()
        );
    }

    /// Entries in unspecified order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            it: self.slots.values(),
        }
    }

    /// Entries in unspecified order, with mutable values.
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut {
            it: self.slots.values_mut(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.iter().map(|(k, _)| k)
    }

    /// Walk every chain and check the structural invariants.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        use std::collections::HashSet;

        let size = self.size();
        assert!(primes::PRIMES.contains(&size), "size {size} is not listed");

        let mut seen: HashSet<&[u8]> = HashSet::new();
        let mut reachable = 0usize;
        for (idx, head) in self.buckets.iter().enumerate() {
            let mut cursor = *head;
            while let Some(k) = cursor {
                let entry = self.slots.get(k).expect("chain links a live entry");
                assert_eq!(entry.hash, self.hash(&entry.key), "stale cached hash");
                assert_eq!(bucket_of(entry.hash, size), idx, "entry in wrong bucket");
                assert!(seen.insert(&*entry.key), "duplicate key in chains");
                reachable += 1;
                assert!(reachable <= self.slots.len(), "chain cycle");
                cursor = entry.next;
            }
        }
        assert_eq!(reachable, self.slots.len(), "unreachable entries");
    }
}

impl<V> fmt::Debug for HashTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashTable")
            .field("size", &self.size())
            .field("used", &self.used())
            .finish_non_exhaustive()
    }
}

/// Iterator over `(key, &value)` pairs of a [`HashTable`].
pub struct Iter<'a, V> {
    it: slotmap::basic::Values<'a, EntryKey, Entry<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a [u8], &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|e| (&*e.key, &e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

/// Iterator over `(key, &mut value)` pairs of a [`HashTable`].
pub struct IterMut<'a, V> {
    it: slotmap::basic::ValuesMut<'a, EntryKey, Entry<V>>,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = (&'a [u8], &'a mut V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|e| (&*e.key, &mut e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<'a, V> IntoIterator for &'a HashTable<V> {
    type Item = (&'a [u8], &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
