//! prime-hashtable: a single-threaded map from byte strings to values,
//! using separate chaining and a curated sequence of prime bucket counts.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a chained hash table whose sizing and rehash rules are small
//!   enough to state precisely and check in tests.
//! - Layers:
//!   - `murmur`: MurmurHash2 (32-bit) over raw key bytes, fixed seed by
//!     default.
//!   - `primes`: the 30 listed bucket counts and the next/previous lookups.
//!   - `table`: `HashTable<V>`, chains of entries linked by arena keys.
//!   - `rehash`: `expand` and `resize_to_fit`, which rebuild the bucket
//!     array at a new listed size.
//!
//! Storage
//! - Entries live in a `SlotMap`; each owns its key bytes, its value, its
//!   cached hash and the key of the next entry in its chain. Buckets hold
//!   only the key of their chain head.
//! - New entries are linked at the chain head. Chain order and iteration
//!   order are unspecified.
//! - `used` is the arena length, so it always equals the number of entries
//!   reachable through the chains.
//!
//! Sizing
//! - The bucket count is always a listed prime. Requests above the largest
//!   one clamp to it, and the table never grows past it.
//! - Inserting a new key that leaves `used / size` above the threshold
//!   (70% by default) grows the table to the next listed prime before
//!   `set` returns. Growth failure does not fail the insert.
//! - `resize_to_fit` shrinks to `next_prime(used * 2)`, keeping the load
//!   below 50%.
//!
//! Failure model
//! - Key buffers and bucket arrays are allocated with `try_reserve_exact`
//!   and report `Error::Alloc` instead of aborting; the table is unchanged.
//! - A rehash allocates the new bucket array before touching any entry and
//!   then only relinks arena keys, so it either completes or leaves the
//!   table exactly as it was.
//! - Missing keys are `None`/`false`, never errors. Rehash refusals are
//!   `RehashError` values the caller may ignore.
//!
//! Notes and non-goals
//! - Single-threaded: no internal locking. Share behind a lock or keep the
//!   table on one thread.
//! - No persistence and no ordering guarantees.
//!
//! ```rust
//! use prime_hashtable::HashTable;
//!
//! let mut table = HashTable::new(7).unwrap();
//! assert_eq!(table.size(), 11);
//!
//! table.set("kkey", "vvalue").unwrap();
//! assert_eq!(table.get("kkey"), Some(&"vvalue"));
//!
//! assert!(table.delete("kkey"));
//! assert_eq!(table.get("kkey"), None);
//! ```

mod config;
mod error;
pub mod murmur;
pub mod primes;
mod rehash;
mod table;
mod table_proptest;

// Public surface
pub use config::{Config, DEFAULT_CAPACITY, DEFAULT_EXPAND_THRESHOLD};
pub use error::{Error, RehashError, Result};
pub use table::{HashTable, Iter, IterMut};
