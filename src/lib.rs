#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod chained;
pub mod double_hash;
pub mod linear;
pub mod prime;

mod slot;

pub use chained::ChainedMap;
pub use double_hash::DoubleHashMap;
pub use linear::LinearProbeMap;

/// Default hasher builder for all three maps.
pub type DefaultHashBuilder = foldhash::fast::RandomState;

/// Initial capacity when none is requested. Prime, like every capacity in
/// this crate.
pub(crate) const DEFAULT_CAPACITY: usize = 17;

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::Rng;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    /// The three engines and a `std` oracle must agree on the outcome of
    /// every operation in a randomized workload.
    #[test]
    fn test_cross_engine_equivalence_randomized() {
        let mut rng = SmallRng::seed_from_u64(0x5EED_CAFE);

        let mut chained: ChainedMap<u64, u64> = ChainedMap::new();
        let mut linear: LinearProbeMap<u64, u64> = LinearProbeMap::new();
        let mut double: DoubleHashMap<u64, u64> = DoubleHashMap::new();
        let mut oracle: HashMap<u64, u64> = HashMap::new();

        for round in 0..10_000u64 {
            let key = rng.random_range(0..64);
            match rng.random_range(0..3) {
                0 => {
                    let value = round;
                    let expected = oracle.insert(key, value);
                    assert_eq!(chained.insert(key, value), expected);
                    assert_eq!(linear.insert(key, value), expected);
                    assert_eq!(double.insert(key, value), expected);
                }
                1 => {
                    let expected = oracle.get(&key);
                    assert_eq!(chained.get(&key), expected);
                    assert_eq!(linear.get(&key), expected);
                    assert_eq!(double.get(&key), expected);
                }
                _ => {
                    let expected = oracle.remove(&key);
                    assert_eq!(chained.remove(&key), expected);
                    assert_eq!(linear.remove(&key), expected);
                    assert_eq!(double.remove(&key), expected);
                }
            }

            assert_eq!(chained.len(), oracle.len());
            assert_eq!(linear.len(), oracle.len());
            assert_eq!(double.len(), oracle.len());
        }

        for key in 0..64 {
            let expected = oracle.get(&key);
            assert_eq!(chained.get(&key), expected);
            assert_eq!(linear.get(&key), expected);
            assert_eq!(double.get(&key), expected);
        }
    }

    /// Keys 0..=11 against the default capacity of 17: twelve entries leave
    /// the load factor just past 0.7 without triggering growth, since the
    /// pre-insert check is strict and runs before each insertion.
    #[test]
    fn test_twelve_entries_at_default_capacity() {
        let mut chained: ChainedMap<u64, String> = ChainedMap::new();
        let mut linear: LinearProbeMap<u64, String> = LinearProbeMap::new();
        let mut double: DoubleHashMap<u64, String> = DoubleHashMap::new();

        for key in 0u64..=11 {
            let value = format!("v{key}");
            chained.insert(key, value.clone());
            linear.insert(key, value.clone());
            double.insert(key, value);
        }

        assert_eq!(chained.capacity(), 17);
        assert_eq!(linear.capacity(), 17);
        assert_eq!(double.capacity(), 17);

        for key in 0u64..=11 {
            let expected = format!("v{key}");
            assert_eq!(chained.get(&key), Some(&expected));
            assert_eq!(linear.get(&key), Some(&expected));
            assert_eq!(double.get(&key), Some(&expected));
        }
    }
}
