//! Separate chaining.
//!
//! Each slot holds a growable bucket of entries whose keys reduce to that
//! index. Collisions append to the bucket, so there is no probing, no
//! tombstone state, and no resize: the bucket count is fixed at construction
//! and lookups degrade gracefully toward a linear scan as buckets fill. This
//! is the baseline the two open-addressing tables are contrasted against.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;

use crate::DEFAULT_CAPACITY;
use crate::DefaultHashBuilder;
use crate::prime;

/// A hash map using separate chaining.
///
/// The bucket array has prime length, fixed for the lifetime of the map.
/// Deleting an entry frees its bucket position immediately; there are no
/// tombstones here.
///
/// # Examples
///
/// ```rust
/// use prime_probe::ChainedMap;
///
/// let mut map: ChainedMap<i32, &str> = ChainedMap::new();
/// map.insert(7, "seven");
/// assert_eq!(map.get(&7), Some(&"seven"));
/// assert_eq!(map.remove(&7), Some("seven"));
/// assert_eq!(map.get(&7), None);
/// ```
pub struct ChainedMap<K, V, S = DefaultHashBuilder> {
    buckets: Vec<Vec<(K, V)>>,
    len: usize,
    hash_builder: S,
}

impl<K, V, S> ChainedMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Creates an empty map with the given hasher builder and the default
    /// bucket count of 17.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, hash_builder)
    }

    /// Creates an empty map with the given bucket count and hasher builder.
    ///
    /// The bucket count is coerced to the next prime.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        let capacity = prime::next_prime(capacity);
        let mut buckets = Vec::new();
        buckets.resize_with(capacity, Vec::new);
        Self {
            buckets,
            len: 0,
            hash_builder,
        }
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the bucket count. Always prime, never changes.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Removes all entries, keeping the buckets allocated.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the key is already present in its bucket the value is overwritten
    /// and the old value returned; otherwise the pair is appended to the
    /// bucket. Never fails and never resizes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use prime_probe::ChainedMap;
    ///
    /// let mut map: ChainedMap<i32, &str> = ChainedMap::new();
    /// assert_eq!(map.insert(1, "a"), None);
    /// assert_eq!(map.insert(1, "b"), Some("a"));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let index = self.bucket_index(&key);
        let bucket = &mut self.buckets[index];

        for (existing, slot) in bucket.iter_mut() {
            if *existing == key {
                return Some(core::mem::replace(slot, value));
            }
        }

        bucket.push((key, value));
        self.len += 1;
        None
    }

    /// Returns a reference to the value stored under `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use prime_probe::ChainedMap;
    ///
    /// let mut map: ChainedMap<i32, &str> = ChainedMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        let index = self.bucket_index(key);
        self.buckets[index]
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.bucket_index(key);
        self.buckets[index]
            .iter_mut()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// Returns `true` if the map contains an entry for `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Removes the entry stored under `key`, returning its value.
    ///
    /// Removing an absent key returns `None`. Bucket order is not preserved.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use prime_probe::ChainedMap;
    ///
    /// let mut map: ChainedMap<i32, &str> = ChainedMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let index = self.bucket_index(key);
        let bucket = &mut self.buckets[index];
        let position = bucket.iter().position(|(existing, _)| existing == key)?;
        let (_, value) = bucket.swap_remove(position);
        self.len -= 1;
        Some(value)
    }

    /// Returns an iterator over the entries, in arbitrary order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            entries: Default::default(),
        }
    }

    fn bucket_index(&self, key: &K) -> usize {
        (self.hash_builder.hash_one(key) % self.buckets.len() as u64) as usize
    }
}

impl<K, V, S> ChainedMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates an empty map with the default bucket count of 17.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use prime_probe::ChainedMap;
    ///
    /// let map: ChainedMap<u64, &str> = ChainedMap::new();
    /// assert_eq!(map.capacity(), 17);
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates an empty map with the given bucket count, coerced to the next
    /// prime.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, S::default())
    }
}

impl<K, V, S> Default for ChainedMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> Debug for ChainedMap<K, V, S>
where
    K: Debug + Hash + Eq,
    V: Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in self.iter() {
            map.entry(key, value);
        }
        map.finish()
    }
}

/// An iterator over the entries of a [`ChainedMap`].
pub struct Iter<'a, K, V> {
    buckets: core::slice::Iter<'a, Vec<(K, V)>>,
    entries: core::slice::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((key, value)) = self.entries.next() {
                return Some((key, value));
            }
            self.entries = self.buckets.next()?.iter();
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::string::ToString;
    use core::hash::BuildHasher;
    use core::hash::Hasher;

    use siphasher::sip::SipHasher;

    use super::*;
    use crate::prime::is_prime;

    #[derive(Clone, Default)]
    struct FixedSipBuilder;

    impl BuildHasher for FixedSipBuilder {
        type Hasher = SipHasher;

        fn build_hasher(&self) -> Self::Hasher {
            SipHasher::new_with_keys(0xABAD, 0x1DEA)
        }
    }

    /// Hashes every key to 42, forcing all keys into one bucket.
    struct ConstantHasher;

    impl Hasher for ConstantHasher {
        fn finish(&self) -> u64 {
            42
        }

        fn write(&mut self, _bytes: &[u8]) {}
    }

    #[derive(Clone, Default)]
    struct ConstantBuilder;

    impl BuildHasher for ConstantBuilder {
        type Hasher = ConstantHasher;

        fn build_hasher(&self) -> Self::Hasher {
            ConstantHasher
        }
    }

    #[test]
    fn test_insert_and_get() {
        let mut map = ChainedMap::with_hasher(FixedSipBuilder);

        assert_eq!(map.insert(1u64, "one".to_string()), None);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&1), Some(&"one".to_string()));
        assert_eq!(map.get(&2), None);

        assert_eq!(map.insert(1, "uno".to_string()), Some("one".to_string()));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&1), Some(&"uno".to_string()));
    }

    #[test]
    fn test_get_mut() {
        let mut map = ChainedMap::with_hasher(FixedSipBuilder);
        map.insert(1u64, String::from("one"));

        if let Some(value) = map.get_mut(&1) {
            value.push_str(" two");
        }

        assert_eq!(map.get(&1), Some(&String::from("one two")));
        assert_eq!(map.get_mut(&9), None);
    }

    #[test]
    fn test_remove() {
        let mut map = ChainedMap::with_hasher(FixedSipBuilder);
        map.insert(1u64, "one");
        map.insert(2, "two");

        assert_eq!(map.remove(&1), Some("one"));
        assert_eq!(map.len(), 1);
        assert!(!map.contains_key(&1));
        assert!(map.contains_key(&2));

        assert_eq!(map.remove(&1), None);
        assert_eq!(map.remove(&9), None);
    }

    #[test]
    fn test_default_capacity() {
        let map: ChainedMap<u64, (), FixedSipBuilder> = ChainedMap::new();
        assert_eq!(map.capacity(), 17);
        assert!(map.is_empty());
    }

    #[test]
    fn test_capacity_coerced_to_prime() {
        let map: ChainedMap<u64, (), FixedSipBuilder> = ChainedMap::with_capacity(18);
        assert_eq!(map.capacity(), 19);

        let map: ChainedMap<u64, (), FixedSipBuilder> = ChainedMap::with_capacity(100);
        assert!(is_prime(map.capacity()));
    }

    #[test]
    fn test_collisions_share_a_bucket() {
        let mut map = ChainedMap::with_capacity_and_hasher(17, ConstantBuilder);
        map.insert(1u64, "a");
        map.insert(2, "b");
        map.insert(3, "c");

        assert_eq!(map.len(), 3);
        assert_eq!(map.get(&1), Some(&"a"));
        assert_eq!(map.get(&2), Some(&"b"));
        assert_eq!(map.get(&3), Some(&"c"));

        // Removing the middle entry leaves its neighbors intact.
        assert_eq!(map.remove(&2), Some("b"));
        assert_eq!(map.get(&1), Some(&"a"));
        assert_eq!(map.get(&3), Some(&"c"));
        assert_eq!(map.get(&2), None);
    }

    #[test]
    fn test_no_resize_under_overload() {
        let mut map = ChainedMap::with_capacity_and_hasher(17, FixedSipBuilder);

        for key in 0u64..100 {
            map.insert(key, key * 3);
        }

        // Buckets grow without bound; the bucket array never does.
        assert_eq!(map.capacity(), 17);
        assert_eq!(map.len(), 100);
        for key in 0u64..100 {
            assert_eq!(map.get(&key), Some(&(key * 3)));
        }
    }

    #[test]
    fn test_clear() {
        let mut map = ChainedMap::with_hasher(FixedSipBuilder);
        map.insert(1u64, "a");
        map.insert(2, "b");

        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.capacity(), 17);
        assert_eq!(map.get(&1), None);

        map.insert(1, "again");
        assert_eq!(map.get(&1), Some(&"again"));
    }

    #[test]
    fn test_iter() {
        let mut map = ChainedMap::with_hasher(FixedSipBuilder);
        for key in 0u64..20 {
            map.insert(key, key + 100);
        }
        map.remove(&3);

        let mut seen: alloc::vec::Vec<u64> = map.iter().map(|(key, _)| *key).collect();
        seen.sort_unstable();
        let expected: alloc::vec::Vec<u64> = (0u64..20).filter(|key| *key != 3).collect();
        assert_eq!(seen, expected);
        assert!(map.iter().all(|(key, value)| *value == key + 100));
    }
}
