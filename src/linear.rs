//! Open addressing with linear probing.
//!
//! Collisions walk forward one slot at a time, wrapping modulo the (prime)
//! capacity. Deletion leaves a tombstone so that probe sequences running
//! through the deleted slot still reach entries placed beyond it; tombstones
//! are reclaimed wholesale on the next resize.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;

use crate::DEFAULT_CAPACITY;
use crate::DefaultHashBuilder;
use crate::prime;
use crate::slot::Slot;

/// Strict comparison against the 0.7 threshold, in integer arithmetic.
/// A resize fires only once `len / capacity` exceeds 0.7, not upon reaching
/// it exactly.
#[inline(always)]
fn over_load_factor(len: usize, capacity: usize) -> bool {
    len as u128 * 10 > capacity as u128 * 7
}

/// A hash map using open addressing with linear probing.
///
/// The backing array always has prime length. Before each insertion, if the
/// load factor strictly exceeds 0.7 the table grows to the next prime at
/// least twice the current capacity and every live entry is rehashed;
/// resizing is the only operation that reclaims tombstones.
///
/// # Examples
///
/// ```rust
/// use prime_probe::LinearProbeMap;
///
/// let mut map: LinearProbeMap<i32, &str> = LinearProbeMap::new();
/// map.insert(7, "seven");
/// assert_eq!(map.get(&7), Some(&"seven"));
/// assert_eq!(map.remove(&7), Some("seven"));
/// assert_eq!(map.get(&7), None);
/// ```
pub struct LinearProbeMap<K, V, S = DefaultHashBuilder> {
    slots: Vec<Slot<K, V>>,
    len: usize,
    hash_builder: S,
}

impl<K, V, S> LinearProbeMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Creates an empty map with the given hasher builder and the default
    /// capacity of 17.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, hash_builder)
    }

    /// Creates an empty map with the given capacity and hasher builder.
    ///
    /// The capacity is coerced to the next prime.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        let capacity = prime::next_prime(capacity);
        let mut slots = Vec::new();
        slots.resize_with(capacity, || Slot::Empty);
        Self {
            slots,
            len: 0,
            hash_builder,
        }
    }

    /// Returns the number of live entries in the map.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current capacity of the backing array. Always prime.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Removes all entries, keeping the allocated capacity.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = Slot::Empty;
        }
        self.len = 0;
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the key is already present its value is overwritten and the old
    /// value returned. May grow the table first if the load factor strictly
    /// exceeds 0.7.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use prime_probe::LinearProbeMap;
    ///
    /// let mut map: LinearProbeMap<i32, &str> = LinearProbeMap::new();
    /// assert_eq!(map.insert(1, "a"), None);
    /// assert_eq!(map.insert(1, "b"), Some("a"));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if over_load_factor(self.len, self.slots.len()) {
            self.grow();
        }

        let capacity = self.slots.len();
        let mut index = self.home_index(&key);
        let mut matched = None;
        let mut reusable = None;
        let mut empty = None;

        // The full probe sequence up to the first empty slot must be scanned
        // before claiming anything: the key's live slot may sit beyond a
        // tombstone, and inserting into the tombstone would duplicate it.
        for _ in 0..capacity {
            match &self.slots[index] {
                Slot::Empty => {
                    empty = Some(index);
                    break;
                }
                Slot::Tombstone => {
                    if reusable.is_none() {
                        reusable = Some(index);
                    }
                }
                Slot::Occupied(existing, _) if existing == &key => {
                    matched = Some(index);
                    break;
                }
                Slot::Occupied(..) => {}
            }
            index = (index + 1) % capacity;
        }

        if let Some(index) = matched {
            let Slot::Occupied(_, existing) = &mut self.slots[index] else {
                unreachable!()
            };
            return Some(core::mem::replace(existing, value));
        }

        match reusable.or(empty) {
            Some(index) => {
                self.slots[index] = Slot::Occupied(key, value);
                self.len += 1;
                None
            }
            None => {
                // Every slot holds a live entry. The load factor bound keeps
                // this from arising, but growing keeps insert total anyway.
                self.grow();
                self.insert(key, value)
            }
        }
    }

    /// Returns a reference to the value stored under `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use prime_probe::LinearProbeMap;
    ///
    /// let mut map: LinearProbeMap<i32, &str> = LinearProbeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        let index = self.find_index(key)?;
        self.slots[index].as_occupied().map(|(_, value)| value)
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.find_index(key)?;
        match &mut self.slots[index] {
            Slot::Occupied(_, value) => Some(value),
            _ => None,
        }
    }

    /// Returns `true` if the map contains an entry for `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.find_index(key).is_some()
    }

    /// Removes the entry stored under `key`, returning its value.
    ///
    /// The slot is tombstoned rather than emptied, so lookups for other keys
    /// probing through it are unaffected. Removing an absent key returns
    /// `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use prime_probe::LinearProbeMap;
    ///
    /// let mut map: LinearProbeMap<i32, &str> = LinearProbeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let index = self.find_index(key)?;
        let (_, value) = self.slots[index].bury()?;
        self.len -= 1;
        Some(value)
    }

    /// Returns an iterator over the live entries, in arbitrary order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.slots.iter(),
        }
    }

    fn home_index(&self, key: &K) -> usize {
        (self.hash_builder.hash_one(key) % self.slots.len() as u64) as usize
    }

    /// Probes for the slot holding `key`.
    ///
    /// Tombstones and foreign keys do not terminate the scan; only an empty
    /// slot or a match does. The scan is bounded to one full cycle of the
    /// array, since a table whose free space is entirely tombstones has no
    /// empty terminator.
    fn find_index(&self, key: &K) -> Option<usize> {
        let capacity = self.slots.len();
        let mut index = self.home_index(key);

        for _ in 0..capacity {
            match &self.slots[index] {
                Slot::Empty => return None,
                Slot::Occupied(existing, _) if existing == key => return Some(index),
                _ => {}
            }
            index = (index + 1) % capacity;
        }

        None
    }

    /// Grows to the next prime at least twice the current capacity and
    /// re-inserts every live entry through the normal insert path. Tombstones
    /// are dropped in the process.
    fn grow(&mut self) {
        let new_capacity = prime::next_prime(self.slots.len() * 2);
        let old = core::mem::take(&mut self.slots);
        self.slots.resize_with(new_capacity, || Slot::Empty);
        self.len = 0;

        for slot in old {
            if let Slot::Occupied(key, value) = slot {
                self.insert(key, value);
            }
        }
    }
}

impl<K, V, S> LinearProbeMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates an empty map with the default capacity of 17.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use prime_probe::LinearProbeMap;
    ///
    /// let map: LinearProbeMap<u64, &str> = LinearProbeMap::new();
    /// assert_eq!(map.capacity(), 17);
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates an empty map with the given capacity, coerced to the next
    /// prime.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use prime_probe::LinearProbeMap;
    ///
    /// let map: LinearProbeMap<u64, &str> = LinearProbeMap::with_capacity(18);
    /// assert_eq!(map.capacity(), 19);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, S::default())
    }
}

impl<K, V, S> Default for LinearProbeMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> Debug for LinearProbeMap<K, V, S>
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

/// An iterator over the live entries of a [`LinearProbeMap`].
pub struct Iter<'a, K, V> {
    inner: core::slice::Iter<'a, Slot<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.inner.by_ref() {
            if let Slot::Occupied(key, value) = slot {
                return Some((key, value));
            }
        }

        None
    }
}
