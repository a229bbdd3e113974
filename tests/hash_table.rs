// HashTable integration suite.
//
// Each test documents which behavior is being verified. The core properties
// exercised through the public API:
// - Sizing: a new table takes the next listed prime at or above the request.
// - Round trip: `set` then `get` returns the stored value; overwrites do not
//   change `used`.
// - Growth: crossing 70% load on a new-key insert grows the table before
//   `set` returns.
// - Rehash: explicit `expand`/`resize_to_fit` preserve every entry, and
//   refusals leave the table untouched.
use prime_hashtable::primes::{next_prime, MAX_CAPACITY, PRIMES};
use prime_hashtable::{Config, HashTable, RehashError};
use test_log::test;

// Test: create, set, get, delete on a rounded-up table.
// Verifies: `create(7)` yields 11 buckets; a deleted key reads as absent.
#[test]
fn create_set_get_delete() {
    let mut t = HashTable::new(7).expect("create");
    assert_eq!(t.size(), 11);
    assert_eq!(t.used(), 0);

    t.set("kkey", "vvalue").expect("set");
    assert_eq!(t.get("kkey"), Some(&"vvalue"));

    assert!(t.delete("kkey"));
    assert_eq!(t.get("kkey"), None);
    assert!(!t.delete("kkey"));
}

// Test: sizing of fresh tables.
// Verifies: `size == next_prime(n)` and `used == 0` across requests.
#[test]
fn create_uses_next_prime() {
    for n in [0, 1, 5, 6, 100, 1700, 1741, 5000] {
        let t: HashTable<u8> = HashTable::new(n).expect("create");
        assert_eq!(t.size(), next_prime(n), "requested {n}");
        assert_eq!(t.used(), 0);
    }
    let t: HashTable<u8> = HashTable::new(1700).expect("create");
    assert_eq!(t.size(), 1741);
}

// Test: requests past the ceiling clamp rather than fail.
// Verifies: the sizer maps any oversized request to the largest listed prime.
#[test]
fn oversized_request_clamps() {
    assert_eq!(next_prime(usize::MAX), MAX_CAPACITY);
    assert_eq!(MAX_CAPACITY, 4294967291);
    assert_eq!(PRIMES.len(), 30);
}

// Test: repeated reads after a single write.
#[test]
fn round_trip_is_repeatable() {
    let mut t = HashTable::new(5).expect("create");
    t.set(b"bytes\x00key", 7u64).expect("set");
    for _ in 0..100 {
        assert_eq!(t.get(b"bytes\x00key"), Some(&7));
    }
}

// Test: overwrite semantics.
// Verifies: the second `set` returns the first value and `used` is unchanged.
#[test]
fn overwrite_returns_previous() {
    let mut t = HashTable::new(5).expect("create");
    assert_eq!(t.set("k", 1).expect("set"), None);
    let used = t.used();
    assert_eq!(t.set("k", 2).expect("set"), Some(1));
    assert_eq!(t.get("k"), Some(&2));
    assert_eq!(t.used(), used);
}

// Test: automatic growth on the fourth insert into five buckets.
// Verifies: 4/5 = 80% > 70% grows the table to 11 within that `set`.
#[test]
fn fourth_insert_triggers_growth() {
    let mut t = HashTable::new(5).expect("create");
    assert_eq!(t.size(), 5);
    for (i, k) in ["key", "k1", "k2"].into_iter().enumerate() {
        t.set(k, i).expect("set");
        assert_eq!(t.size(), 5);
    }
    t.set("k3", 3).expect("set");
    assert_eq!(t.size(), 11);
    for (i, k) in ["key", "k1", "k2", "k3"].into_iter().enumerate() {
        assert_eq!(t.get(k), Some(&i));
    }
}

// Test: the load bound over a long run of inserts.
// Verifies: `used / size <= 0.70` after every `set`.
#[test]
fn load_factor_stays_bounded() {
    let mut t = HashTable::new(5).expect("create");
    for i in 0..20_000u32 {
        t.set(i.to_le_bytes(), i).expect("set");
        assert!(t.load_factor() <= 0.70, "load {} at {i}", t.load_factor());
        assert!(PRIMES.contains(&t.size()));
    }
    for i in 0..20_000u32 {
        assert_eq!(t.get(i.to_le_bytes()), Some(&i));
    }
}

// Test: `expand` to the current size.
// Verifies: reports `Unchanged` and leaves size, used and contents as they were.
#[test]
fn expand_to_same_size_is_noop() {
    let mut t = HashTable::new(7).expect("create");
    t.set("a", 1).expect("set");
    t.set("b", 2).expect("set");
    assert_eq!(t.expand(10), Err(RehashError::Unchanged { size: 11 }));
    assert_eq!(t.size(), 11);
    assert_eq!(t.used(), 2);
    assert_eq!(t.get("a"), Some(&1));
    assert_eq!(t.get("b"), Some(&2));
}

// Test: rehash preserves contents in both directions.
// Verifies: after growing and then shrinking, every key reads back and
// `used` is unchanged.
#[test]
fn expand_preserves_contents() {
    let mut t = HashTable::new(5).expect("create");
    for i in 0..300 {
        t.set(format!("key-{i}"), i).expect("set");
    }
    let used = t.used();
    assert_eq!(t.expand(10_000), Ok(()));
    assert_eq!(t.size(), 14033);
    assert_eq!(t.used(), used);
    assert_eq!(t.expand(500), Ok(()));
    assert_eq!(t.size(), 823);
    for i in 0..300 {
        assert_eq!(t.get(format!("key-{i}")), Some(&i));
    }
    assert_eq!(t.iter().count(), used);
}

// Test: `resize_to_fit` after deletions.
// Verifies: the table shrinks below 50% load and survivors remain.
#[test]
fn resize_to_fit_reclaims_buckets() {
    let mut t = HashTable::new(5).expect("create");
    for i in 0..2_000 {
        t.set(i.to_string(), i).expect("set");
    }
    assert_eq!(
        t.resize_to_fit(),
        Err(RehashError::NotShrinking {
            candidate: next_prime(4_000),
            size: t.size()
        })
    );

    for i in 50..2_000 {
        assert!(t.delete(i.to_string()));
    }
    assert_eq!(t.resize_to_fit(), Ok(()));
    assert_eq!(t.size(), 199);
    assert!(t.load_factor() < 0.5);
    for i in 0..50 {
        assert_eq!(t.get(i.to_string()), Some(&i));
    }
    for i in 50..2_000 {
        assert!(!t.has(i.to_string()));
    }
}

// Test: builder configuration flows into the table.
#[test]
fn config_builder() {
    let mut t = Config::new()
        .capacity(40)
        .expand_threshold(50)
        .seed(42)
        .build()
        .expect("build");
    assert_eq!(t.size(), 47);
    for i in 0..24 {
        t.set(i.to_string(), i).expect("set");
    }
    assert_eq!(t.size(), 97);
}

// Test: values are opaque and may be "empty"; presence is tracked separately.
#[test]
fn empty_values_are_present() {
    let mut t: HashTable<Option<Box<u8>>> = HashTable::new(5).expect("create");
    t.set("nothing", None).expect("set");
    assert!(t.has("nothing"));
    assert!(!t.has("missing"));
    assert_eq!(t.remove("nothing"), Some(None));
    assert!(!t.has("nothing"));
}

// Test: explicit teardown releases a populated table.
#[test]
fn destroy_after_use() {
    let mut t = HashTable::new(5).expect("create");
    for i in 0..100 {
        t.set(i.to_string(), vec![i; 4]).expect("set");
    }
    t.destroy();
}
