#![cfg(test)]

// Property tests for HashTable kept inside the crate so they can walk the
// chains through `assert_invariants`.

use crate::primes::{next_prime, MAX_CAPACITY};
use crate::table::exceeds_threshold;
use crate::{Config, HashTable, RehashError};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Set(usize, i32),
    Get(usize),
    Has(Vec<u8>),
    Delete(usize),
    Remove(usize),
    Mutate(usize, i32),
    Expand(usize),
    ResizeToFit,
    Clear,
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<Vec<u8>>, Vec<OpI>)> {
    proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..5), 1..=12).prop_flat_map(
        |pool| {
            let idxs: Vec<usize> = (0..pool.len()).collect();
            let idx = proptest::sample::select(idxs);
            let has_pool = proptest::sample::select(pool.clone());
            let op = prop_oneof![
                4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Set(i, v)),
                2 => idx.clone().prop_map(OpI::Get),
                1 => prop_oneof![
                    has_pool,
                    proptest::collection::vec(any::<u8>(), 0..5)
                ]
                .prop_map(OpI::Has),
                2 => idx.clone().prop_map(OpI::Delete),
                1 => idx.clone().prop_map(OpI::Remove),
                1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
                1 => (0usize..2_000).prop_map(OpI::Expand),
                1 => Just(OpI::ResizeToFit),
                1 => Just(OpI::Clear),
                1 => Just(OpI::Iterate),
            ];
            proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
        },
    )
}

fn run(config: Config, pool: &[Vec<u8>], ops: Vec<OpI>) -> Result<(), TestCaseError> {
    let threshold = config.expand_threshold;
    let mut sut: HashTable<i32> = config.build().expect("small table allocates");
    let mut model: HashMap<Vec<u8>, i32> = HashMap::new();

    for op in ops {
        match op {
            OpI::Set(i, v) => {
                let k = &pool[i];
                let prev = sut.set(k, v).expect("small key allocates");
                prop_assert_eq!(prev, model.insert(k.clone(), v));
            }
            OpI::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k), model.get(k));
            }
            OpI::Has(k) => {
                prop_assert_eq!(sut.has(&k), model.contains_key(&k));
            }
            OpI::Delete(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.delete(k), model.remove(k).is_some());
                prop_assert!(!sut.has(k));
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.remove(k), model.remove(k));
            }
            OpI::Mutate(i, d) => {
                let k = &pool[i];
                match (sut.get_mut(k), model.get_mut(k)) {
                    (Some(s), Some(m)) => {
                        *s = s.saturating_add(d);
                        *m = m.saturating_add(d);
                    }
                    (None, None) => {}
                    (s, m) => prop_assert!(false, "presence differs: {:?} vs {:?}", s, m),
                }
            }
            OpI::Expand(target) => {
                let before = sut.size();
                let resolved = next_prime(target);
                match sut.expand(target) {
                    Ok(()) => prop_assert_eq!(sut.size(), resolved),
                    Err(RehashError::Unchanged { size }) => {
                        prop_assert_eq!(size, before);
                        prop_assert_eq!(resolved, before);
                    }
                    Err(RehashError::Overloaded { used, size }) => {
                        prop_assert_eq!(sut.size(), before);
                        prop_assert!(exceeds_threshold(used, size, threshold));
                    }
                    Err(e) => prop_assert!(false, "unexpected rehash result: {}", e),
                }
            }
            OpI::ResizeToFit => {
                let before = sut.size();
                match sut.resize_to_fit() {
                    Ok(()) => {
                        prop_assert!(sut.size() < before);
                        prop_assert!(sut.used() * 2 < sut.size());
                    }
                    Err(RehashError::NotShrinking { candidate, size }) => {
                        prop_assert!(candidate >= size);
                        prop_assert_eq!(sut.size(), before);
                    }
                    Err(RehashError::Overloaded { used, size }) => {
                        prop_assert_eq!(sut.size(), before);
                        prop_assert!(exceeds_threshold(used, size, threshold));
                    }
                    Err(e) => prop_assert!(false, "unexpected rehash result: {}", e),
                }
            }
            OpI::Clear => {
                sut.clear();
                model.clear();
            }
            OpI::Iterate => {
                let s: BTreeSet<(Vec<u8>, i32)> = sut.iter().map(|(k, v)| (k.to_vec(), *v)).collect();
                let m: BTreeSet<(Vec<u8>, i32)> = model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                prop_assert_eq!(s, m);
            }
        }

        // Post-conditions after each op
        sut.assert_invariants();
        prop_assert_eq!(sut.used(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        if sut.size() < MAX_CAPACITY {
            prop_assert!(
                !exceeds_threshold(sut.used(), sut.size(), threshold),
                "load {}/{} over {}%",
                sut.used(),
                sut.size(),
                threshold
            );
        }
    }
    Ok(())
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - `set` returns the overwritten value; `get`/`has`/`delete` agree with the model.
// - Chains hold every live entry exactly once, each in the bucket its hash selects.
// - The bucket count is always listed and the load never exceeds the threshold.
// - Rehash outcomes match their stated preconditions and never change contents.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run(Config::new(), &pool, ops)?;
    }
}

// Property: Same state-machine invariants with a 100% threshold, so the
// five-bucket table fills completely before growing and chains get long.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_long_chains((pool, ops) in arb_scenario()) {
        run(Config::new().expand_threshold(100), &pool, ops)?;
    }
}

// Property: Same state-machine invariants for any accepted threshold. Low
// thresholds force automatic growth to skip several listed sizes at once.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_any_threshold(threshold in 1u8..=100, (pool, ops) in arb_scenario()) {
        run(Config::new().expand_threshold(threshold), &pool, ops)?;
    }
}
