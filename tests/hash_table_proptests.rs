use prime_hashtable::primes::PRIMES;
use prime_hashtable::HashTable;
use proptest::prelude::*;
use std::collections::HashMap;

// Short keys over a small alphabet, so sets, gets and deletes collide often
// and the empty key shows up regularly.
fn short_key() -> impl Strategy<Value = String> {
    "[a-zA-K.]{0,2}"
}

// Model random set/get/delete traffic and check the table agrees with a
// HashMap after every step.
proptest! {
    #[test]
    fn prop_random_traffic(
        initial in 0usize..200,
        ops in proptest::collection::vec((0u8..=2u8, short_key(), any::<u16>()), 1..400),
    ) {
        let mut t: HashTable<u16> = HashTable::new(initial).unwrap();
        let mut model: HashMap<String, u16> = HashMap::new();

        for (op, key, value) in ops {
            match op {
                0 => {
                    let prev = t.set(&key, value).unwrap();
                    prop_assert_eq!(prev, model.insert(key.clone(), value));
                }
                1 => {
                    prop_assert_eq!(t.get(&key), model.get(&key));
                    prop_assert_eq!(t.has(&key), model.contains_key(&key));
                }
                2 => {
                    prop_assert_eq!(t.delete(&key), model.remove(&key).is_some());
                }
                _ => unreachable!(),
            }

            prop_assert_eq!(t.used(), model.len());
            prop_assert!(PRIMES.contains(&t.size()));
            prop_assert!(t.used() * 100 <= t.size() * 70);
        }

        for (k, v) in &model {
            prop_assert_eq!(t.get(k), Some(v));
        }
    }

    // Rehashing to any target keeps every key and `used`, whether or not the
    // rehash was accepted.
    #[test]
    fn prop_expand_preserves_contents(
        keys in proptest::collection::hash_set(proptest::collection::vec(any::<u8>(), 0..8), 0..200),
        target in 0usize..5_000,
        shrink in any::<bool>(),
    ) {
        let mut t = HashTable::new(5).unwrap();
        for (i, k) in keys.iter().enumerate() {
            t.set(k, i).unwrap();
        }
        let used = t.used();

        let _ = t.expand(target);
        if shrink {
            let _ = t.resize_to_fit();
        }

        prop_assert_eq!(t.used(), used);
        prop_assert_eq!(t.iter().count(), used);
        for (i, k) in keys.iter().enumerate() {
            prop_assert_eq!(t.get(k), Some(&i));
        }
    }
}
