//! The open-addressing table engine.
//!
//! [`HashTable`] stores `(key, value)` pairs in a single bucket array and
//! resolves collisions with linear probing. Like a raw table it does not know
//! how to hash: every operation takes the key's 32-bit hash and an equality
//! predicate. [`HashMap`](crate::HashMap) binds a [`KeyHasher`] to it.
//!
//! Removal uses backward shift instead of tombstones, so after any sequence of
//! operations every stored key is reachable by scanning forward from its ideal
//! bucket (`hash % capacity`) without crossing an empty bucket.
//!
//! [`KeyHasher`]: crate::KeyHasher

use alloc::vec::Vec;
use core::fmt::Debug;
use core::mem;

use crate::config::Config;
use crate::config::RECIPROCAL_LOAD_FACTOR;
use crate::error::ConsistencyError;
use crate::error::ResizeError;
use crate::probe::circular_range;
use crate::probe::in_circular_interval;

#[derive(Clone)]
struct Slot<K, V> {
    hash: u32,
    key: K,
    value: V,
}

#[inline(always)]
fn ideal_index(hash: u32, capacity: usize) -> usize {
    hash as usize % capacity
}

/// Where a probe sequence stopped.
enum Probe {
    /// A bucket holding a matching key.
    Match(usize),
    /// The first empty bucket; the key is absent.
    Empty(usize),
}

/// Displacement histogram of a [`HashTable`].
///
/// `counts()[d]` is the number of entries stored `d` buckets after their
/// ideal bucket.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeHistogram {
    counts: Vec<usize>,
}

#[cfg(any(test, feature = "stats"))]
impl ProbeHistogram {
    /// Entry counts indexed by displacement.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Number of entries counted.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Pretty-prints the histogram horizontally using stdout.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        let max = self.counts.iter().copied().max().unwrap_or(0);
        if max == 0 {
            println!("probe histogram: empty");
            return;
        }

        let max_bar = 60usize;
        let total_units = max_bar * 8;
        println!("probe histogram ({} entries):", self.total());

        let make_bar = |count: usize| -> alloc::string::String {
            if count == 0 {
                return alloc::string::String::new();
            }
            let units = ((count as u128 * total_units as u128).div_ceil(max as u128)) as usize;
            let mut bar = "█".repeat(units / 8);
            let partial = match units % 8 {
                1 => Some('▏'),
                2 => Some('▎'),
                3 => Some('▍'),
                4 => Some('▌'),
                5 => Some('▋'),
                6 => Some('▊'),
                7 => Some('▉'),
                _ => None,
            };
            if let Some(ch) = partial {
                bar.push(ch);
            }
            bar
        };

        for (displacement, &count) in self.counts.iter().enumerate() {
            println!("{:>3} | {} ({})", displacement, make_bar(count), count);
        }
    }
}

/// Debug statistics for hash table analysis.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of entries currently in the table
    pub populated: usize,
    /// Number of buckets
    pub capacity: usize,
    /// Load factor (populated / capacity)
    pub load_factor: f64,
    /// Largest displacement of any entry from its ideal bucket
    pub longest_probe: usize,
    /// Mean displacement over all entries
    pub mean_probe_length: f64,
    /// Total memory in bytes used by the bucket array
    pub total_bytes: usize,
    /// Memory in bytes held by empty buckets
    pub wasted_bytes: usize,
}

#[cfg(any(test, feature = "stats"))]
impl DebugStats {
    /// Pretty-print the debug statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Hash Table Debug Statistics ===");
        println!(
            "Population: {}/{} ({:.2}% load factor)",
            self.populated,
            self.capacity,
            self.load_factor * 100.0
        );
        println!(
            "Probe length: {:.2} mean, {} longest",
            self.mean_probe_length, self.longest_probe
        );
        println!("Total Allocated: {} bytes", self.total_bytes);
        println!(
            "Memory: {} bytes wasted ({:.02}%)",
            self.wasted_bytes,
            if self.total_bytes == 0 {
                0.0
            } else {
                (self.wasted_bytes as f64 / self.total_bytes as f64) * 100.0
            }
        );
    }
}

/// An open-addressing hash table with linear probing and backward-shift
/// deletion.
///
/// `HashTable<K, V>` stores key-value pairs together with each key's cached
/// 32-bit hash. Unlike standard hash maps, this implementation requires you to
/// provide both the hash value and an equality predicate for each operation.
///
/// The bucket array starts unallocated, is allocated with
/// [`Config::initial_capacity`] buckets on the first insertion, and doubles
/// whenever an insertion would push occupancy above one half. Growth is
/// fallible: if it cannot happen the table is left exactly as it was.
///
/// ## Example
///
/// ```rust
/// use shift_hash::HashTable;
/// use shift_hash::hash_table::Entry;
/// use shift_hash::hasher::StringHasher;
///
/// let mut table = HashTable::new();
/// let hash = StringHasher::djb2(b"alice");
///
/// match table.try_entry(hash, |name: &&str| *name == "alice").unwrap() {
///     Entry::Vacant(entry) => {
///         entry.insert("alice", 123);
///     }
///     Entry::Occupied(_) => {
///         println!("alice already exists");
///     }
/// }
/// assert_eq!(table.find(hash, |name| *name == "alice"), Some((&"alice", &123)));
/// ```
#[derive(Clone)]
pub struct HashTable<K, V> {
    buckets: Vec<Option<Slot<K, V>>>,
    populated: usize,
    config: Config,
}

impl<K, V> Debug for HashTable<K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use alloc::format;
        use alloc::string::String;
        use alloc::string::ToString;

        if self.buckets.is_empty() {
            return f
                .debug_struct("HashTable")
                .field("buckets", &"unallocated")
                .field("populated", &self.populated)
                .field("capacity", &0usize)
                .finish();
        }

        let capacity = self.buckets.len();
        // Each occupied bucket shows its entry's displacement from its ideal bucket.
        let cells = self
            .buckets
            .iter()
            .enumerate()
            .map(|(index, bucket)| match bucket {
                Some(slot) => {
                    let ideal = ideal_index(slot.hash, capacity);
                    format!(
                        "{:02}",
                        crate::probe::circular_distance(ideal, index, capacity)
                    )
                }
                None => "..".to_string(),
            })
            .collect::<Vec<_>>();
        let popmap = cells
            .chunks(16)
            .map(|row| row.join(", "))
            .collect::<Vec<String>>();

        f.debug_struct("HashTable")
            .field("popmap", &popmap)
            .field("populated", &self.populated)
            .field("capacity", &capacity)
            .finish()
    }
}

impl<K, V> Default for HashTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> HashTable<K, V> {
    /// Creates an empty table.
    ///
    /// No memory is allocated until the first insertion.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use shift_hash::HashTable;
    /// let table: HashTable<u64, String> = HashTable::new();
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), 0);
    /// ```
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty table that grows according to `config`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use shift_hash::Config;
    /// # use shift_hash::HashTable;
    /// let table: HashTable<u64, u64> =
    ///     HashTable::with_config(Config::default().with_max_capacity(64));
    /// assert_eq!(table.config().max_capacity(), 64);
    /// ```
    pub fn with_config(config: Config) -> Self {
        Self {
            buckets: Vec::new(),
            populated: 0,
            config,
        }
    }

    /// Creates a table that can hold at least `capacity` entries without
    /// growing.
    ///
    /// # Panics
    ///
    /// Panics if the required bucket count overflows `usize` or cannot be
    /// allocated.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use shift_hash::HashTable;
    /// let table: HashTable<u64, u64> = HashTable::with_capacity(100);
    /// assert!(table.capacity() >= 200);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        let mut table = Self::new();
        table.reserve(capacity);
        table
    }

    /// Returns the sizing configuration of the table.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the number of entries in the table.
    pub fn len(&self) -> usize {
        self.populated
    }

    /// Returns `true` if the table contains no entries.
    pub fn is_empty(&self) -> bool {
        self.populated == 0
    }

    /// Returns the number of buckets.
    ///
    /// The table holds at most `capacity() / 2` entries before growing.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Removes all entries, keeping the allocated buckets.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use shift_hash::HashTable;
    /// let mut table = HashTable::new();
    /// table.try_entry(1, |&k: &u32| k == 1).unwrap().or_insert(1, "one");
    /// let capacity = table.capacity();
    ///
    /// table.clear();
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), capacity);
    /// ```
    pub fn clear(&mut self) {
        self.buckets.iter_mut().for_each(|bucket| *bucket = None);
        self.populated = 0;
    }

    /// Reserves room for at least `additional` more entries.
    ///
    /// On error the table is unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use shift_hash::Config;
    /// # use shift_hash::HashTable;
    /// # use shift_hash::ResizeError;
    /// let mut table: HashTable<u64, u64> = HashTable::new();
    /// table.try_reserve(50).unwrap();
    /// assert!(table.capacity() >= 100);
    ///
    /// let mut bounded: HashTable<u64, u64> =
    ///     HashTable::with_config(Config::default().with_max_capacity(16));
    /// assert!(matches!(
    ///     bounded.try_reserve(50),
    ///     Err(ResizeError::CapacityLimit { .. })
    /// ));
    /// assert_eq!(bounded.capacity(), 0);
    /// ```
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), ResizeError> {
        let items = self
            .populated
            .checked_add(additional)
            .ok_or(ResizeError::CapacityOverflow)?;
        let capacity = self
            .config
            .capacity_for(items)
            .ok_or(ResizeError::CapacityOverflow)?;
        if capacity <= self.buckets.len() {
            return Ok(());
        }

        self.resize(capacity)
    }

    /// Reserves room for at least `additional` more entries.
    ///
    /// # Panics
    ///
    /// Panics if [`try_reserve`](Self::try_reserve) fails.
    pub fn reserve(&mut self, additional: usize) {
        if let Err(error) = self.try_reserve(additional) {
            panic!("failed to reserve room for {additional} entries: {error}");
        }
    }

    /// Finds an entry by hash and equality predicate.
    ///
    /// Returns the stored key and value if found. This method does not modify
    /// the table and is safe to call on an empty table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use shift_hash::HashTable;
    /// let mut table = HashTable::new();
    /// table.try_entry(42, |&k: &u64| k == 42).unwrap().or_insert(42, "answer");
    ///
    /// assert_eq!(table.find(42, |&k| k == 42), Some((&42, &"answer")));
    /// assert_eq!(table.find(99, |&k| k == 99), None);
    /// ```
    #[inline]
    pub fn find(&self, hash: u32, eq: impl Fn(&K) -> bool) -> Option<(&K, &V)> {
        let index = self.find_index(hash, eq)?;
        let slot = self.occupied(index);
        Some((&slot.key, &slot.value))
    }

    /// Finds an entry by hash and equality predicate, returning a mutable
    /// reference to its value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use shift_hash::HashTable;
    /// let mut table = HashTable::new();
    /// table.try_entry(42, |&k: &u64| k == 42).unwrap().or_insert(42, 1);
    ///
    /// if let Some((_, value)) = table.find_mut(42, |&k| k == 42) {
    ///     *value += 1;
    /// }
    /// assert_eq!(table.find(42, |&k| k == 42), Some((&42, &2)));
    /// ```
    #[inline]
    pub fn find_mut(&mut self, hash: u32, eq: impl Fn(&K) -> bool) -> Option<(&K, &mut V)> {
        let index = self.find_index(hash, eq)?;
        let slot = self.occupied_mut(index);
        Some((&slot.key, &mut slot.value))
    }

    /// Gets the entry for `hash` and `eq`, growing the table first if one
    /// more entry would exceed the load limit.
    ///
    /// The growth check happens whether or not the key turns out to be
    /// present. If growth fails the table is unchanged and the error is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use shift_hash::HashTable;
    /// # use shift_hash::hash_table::Entry;
    /// let mut table = HashTable::new();
    ///
    /// match table.try_entry(7, |&k: &u32| k == 7).unwrap() {
    ///     Entry::Vacant(entry) => {
    ///         entry.insert(7, "seven".to_string());
    ///     }
    ///     Entry::Occupied(mut entry) => {
    ///         entry.get_mut().push('!');
    ///     }
    /// }
    ///
    /// // The second time around the entry exists and is left as is.
    /// let value = table.try_entry(7, |&k| k == 7).unwrap().or_insert(7, "other".to_string());
    /// assert_eq!(*value, "seven");
    /// ```
    #[inline]
    pub fn try_entry(
        &mut self,
        hash: u32,
        eq: impl Fn(&K) -> bool,
    ) -> Result<Entry<'_, K, V>, ResizeError> {
        self.grow_for_insert()?;
        Ok(self.entry_impl(hash, eq))
    }

    fn entry_impl(&mut self, hash: u32, eq: impl Fn(&K) -> bool) -> Entry<'_, K, V> {
        match self.probe(hash, eq) {
            Some(Probe::Match(index)) => Entry::Occupied(OccupiedEntry { table: self, index }),
            Some(Probe::Empty(index)) => Entry::Vacant(VacantEntry {
                table: self,
                index,
                hash,
            }),
            None => unreachable!("a table below its load limit always has an empty bucket"),
        }
    }

    /// Removes an entry by hash and equality predicate and returns its key
    /// and value.
    ///
    /// Entries after the removed one in its probe run are shifted back so
    /// that every remaining key stays reachable.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use shift_hash::HashTable;
    /// let mut table = HashTable::new();
    /// table.try_entry(42, |&k: &u64| k == 42).unwrap().or_insert(42, "answer");
    ///
    /// assert_eq!(table.remove(42, |&k| k == 42), Some((42, "answer")));
    /// assert!(table.is_empty());
    ///
    /// // Removing a missing entry returns None
    /// assert_eq!(table.remove(99, |&k| k == 99), None);
    /// ```
    pub fn remove(&mut self, hash: u32, eq: impl Fn(&K) -> bool) -> Option<(K, V)> {
        let index = self.find_index(hash, eq)?;
        Some(self.remove_at(index))
    }

    /// Consumes the table, handing every key to `on_key` and every value to
    /// `on_value` exactly once.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use shift_hash::HashTable;
    /// let mut table = HashTable::new();
    /// for k in 0..3u32 {
    ///     table.try_entry(k, |&v: &u32| v == k).unwrap().or_insert(k, k * 10);
    /// }
    ///
    /// let mut values = Vec::new();
    /// table.destroy_with(drop, |v| values.push(v));
    /// values.sort();
    /// assert_eq!(values, [0, 10, 20]);
    /// ```
    pub fn destroy_with(self, mut on_key: impl FnMut(K), mut on_value: impl FnMut(V)) {
        log::trace!(
            "destroying table with {} entries in {} buckets",
            self.populated,
            self.buckets.len()
        );
        for slot in self.buckets.into_iter().flatten() {
            on_key(slot.key);
            on_value(slot.value);
        }
    }

    /// Verifies every table invariant.
    ///
    /// `hash` and `eq` must be the functions the entries were inserted with.
    /// The check recounts occupied buckets, re-hashes every stored key and
    /// probes for every stored key from its ideal bucket. It costs a full
    /// scan plus one lookup per entry and is meant for tests.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use shift_hash::HashTable;
    /// # use shift_hash::hasher::StringHasher;
    /// let mut table = HashTable::new();
    /// for key in ["a", "b", "c"] {
    ///     let hash = StringHasher::djb2(key.as_bytes());
    ///     table.try_entry(hash, |k: &&str| *k == key).unwrap().or_insert(key, ());
    /// }
    ///
    /// let check = table.check_consistency(|k| StringHasher::djb2(k.as_bytes()), |a, b| a == b);
    /// assert_eq!(check, Ok(()));
    /// ```
    pub fn check_consistency(
        &self,
        hash: impl Fn(&K) -> u32,
        eq: impl Fn(&K, &K) -> bool,
    ) -> Result<(), ConsistencyError> {
        let capacity = self.buckets.len();
        if self.populated > capacity {
            return Err(ConsistencyError::SizeExceedsCapacity {
                size: self.populated,
                capacity,
            });
        }
        if self.populated.saturating_mul(RECIPROCAL_LOAD_FACTOR) > capacity {
            return Err(ConsistencyError::LoadFactorExceeded {
                size: self.populated,
                capacity,
            });
        }

        let mut occupied = 0;
        for (index, bucket) in self.buckets.iter().enumerate() {
            let Some(slot) = bucket else {
                continue;
            };
            occupied += 1;

            let actual = hash(&slot.key);
            if actual != slot.hash {
                return Err(ConsistencyError::StaleHash {
                    index,
                    cached: slot.hash,
                    actual,
                });
            }

            if self.find_index(slot.hash, |key| eq(&slot.key, key)) != Some(index) {
                return Err(ConsistencyError::Unreachable {
                    index,
                    ideal: ideal_index(slot.hash, capacity),
                });
            }
        }

        if occupied != self.populated {
            return Err(ConsistencyError::SizeMismatch {
                occupied,
                size: self.populated,
            });
        }

        Ok(())
    }

    /// Computes the displacement histogram of the stored entries.
    ///
    /// Test-only unless the `stats` feature is enabled.
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_histogram(&self) -> ProbeHistogram {
        let capacity = self.buckets.len();
        let mut counts = Vec::new();
        for (index, bucket) in self.buckets.iter().enumerate() {
            if let Some(slot) = bucket {
                let displacement = crate::probe::circular_distance(
                    ideal_index(slot.hash, capacity),
                    index,
                    capacity,
                );
                if counts.len() <= displacement {
                    counts.resize(displacement + 1, 0);
                }
                counts[displacement] += 1;
            }
        }

        ProbeHistogram { counts }
    }

    /// Returns detailed utilization statistics for debugging.
    ///
    /// Test-only unless the `stats` feature is enabled.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> DebugStats {
        let histogram = self.probe_histogram();
        let capacity = self.buckets.len();
        let bucket_bytes = mem::size_of::<Option<Slot<K, V>>>();
        let total_displacement: usize = histogram
            .counts()
            .iter()
            .enumerate()
            .map(|(displacement, count)| displacement * count)
            .sum();

        DebugStats {
            populated: self.populated,
            capacity,
            load_factor: if capacity == 0 {
                0.0
            } else {
                self.populated as f64 / capacity as f64
            },
            longest_probe: histogram.counts().len().saturating_sub(1),
            mean_probe_length: if self.populated == 0 {
                0.0
            } else {
                total_displacement as f64 / self.populated as f64
            },
            total_bytes: self.buckets.capacity() * bucket_bytes,
            wasted_bytes: (capacity - self.populated) * bucket_bytes,
        }
    }

    /// Stored keys and values in bucket order.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (&K, &V)> {
        self.buckets
            .iter()
            .flatten()
            .map(|slot| (&slot.key, &slot.value))
    }

    pub(crate) fn value_mut_at(&mut self, index: usize) -> &mut V {
        &mut self.occupied_mut(index).value
    }

    #[inline]
    fn find_index(&self, hash: u32, eq: impl Fn(&K) -> bool) -> Option<usize> {
        match self.probe(hash, eq)? {
            Probe::Match(index) => Some(index),
            Probe::Empty(_) => None,
        }
    }

    /// Scans circularly from `hash`'s ideal bucket until a matching key or an
    /// empty bucket. `None` for an unallocated table or a scan that wrapped
    /// all the way around.
    #[inline]
    fn probe(&self, hash: u32, eq: impl Fn(&K) -> bool) -> Option<Probe> {
        let capacity = self.buckets.len();
        if capacity == 0 {
            return None;
        }

        for index in circular_range(ideal_index(hash, capacity), capacity) {
            match &self.buckets[index] {
                None => return Some(Probe::Empty(index)),
                Some(slot) if slot.hash == hash && eq(&slot.key) => {
                    return Some(Probe::Match(index));
                }
                Some(_) => {}
            }
        }

        None
    }

    #[inline]
    fn occupied(&self, index: usize) -> &Slot<K, V> {
        match &self.buckets[index] {
            Some(slot) => slot,
            None => unreachable!("bucket {index} was expected to be occupied"),
        }
    }

    #[inline]
    fn occupied_mut(&mut self, index: usize) -> &mut Slot<K, V> {
        match &mut self.buckets[index] {
            Some(slot) => slot,
            None => unreachable!("bucket {index} was expected to be occupied"),
        }
    }

    #[inline]
    fn grow_for_insert(&mut self) -> Result<(), ResizeError> {
        let required = self
            .populated
            .checked_add(1)
            .and_then(|items| items.checked_mul(RECIPROCAL_LOAD_FACTOR))
            .ok_or(ResizeError::CapacityOverflow)?;
        if required <= self.buckets.len() {
            return Ok(());
        }

        let new_capacity = self
            .config
            .next_capacity(self.buckets.len())
            .ok_or(ResizeError::CapacityOverflow)?;
        self.resize(new_capacity)
    }

    /// Moves every entry into a new array of `new_capacity` buckets.
    ///
    /// The new array is fully allocated before the old one is touched, so any
    /// failure leaves the table as it was.
    #[cold]
    fn resize(&mut self, new_capacity: usize) -> Result<(), ResizeError> {
        debug_assert!(new_capacity > self.buckets.len());
        debug_assert!(self.populated * RECIPROCAL_LOAD_FACTOR <= new_capacity);

        let max = self.config.max_capacity();
        if new_capacity > max {
            log::warn!(
                "refusing to grow from {} to {} buckets: configured maximum is {}",
                self.buckets.len(),
                new_capacity,
                max
            );
            return Err(ResizeError::CapacityLimit {
                requested: new_capacity,
                max,
            });
        }

        let mut buckets = Vec::new();
        if let Err(source) = buckets.try_reserve_exact(new_capacity) {
            log::warn!("failed to allocate {} buckets: {}", new_capacity, source);
            return Err(ResizeError::AllocFailed {
                capacity: new_capacity,
                source,
            });
        }
        buckets.resize_with(new_capacity, || None);

        log::debug!(
            "growing bucket array from {} to {} buckets ({} entries)",
            self.buckets.len(),
            new_capacity,
            self.populated
        );

        let old_buckets = mem::replace(&mut self.buckets, buckets);
        for slot in old_buckets.into_iter().flatten() {
            self.place(slot);
        }

        Ok(())
    }

    /// Puts `slot` in the first empty bucket of its probe sequence. Keys are
    /// known to be unique, so no equality test is needed.
    fn place(&mut self, slot: Slot<K, V>) {
        let capacity = self.buckets.len();
        let index = circular_range(ideal_index(slot.hash, capacity), capacity)
            .find(|&index| self.buckets[index].is_none());
        match index {
            Some(index) => self.buckets[index] = Some(slot),
            None => unreachable!("rehashing into a table without an empty bucket"),
        }
    }

    /// Removes the entry at `index` with backward-shift deletion.
    ///
    /// The emptied bucket becomes the open bucket. Walking forward, an entry
    /// whose ideal bucket lies in the circular interval `(open, current]` is
    /// still reachable and stays; any other entry was only reachable through
    /// the open bucket, so it moves there and its old bucket becomes the open
    /// one. The walk ends at the first empty bucket.
    fn remove_at(&mut self, index: usize) -> (K, V) {
        let capacity = self.buckets.len();
        let Some(removed) = self.buckets[index].take() else {
            unreachable!("bucket {index} was expected to be occupied");
        };

        let mut open = index;
        for current in circular_range(index, capacity).skip(1) {
            let Some(slot) = &self.buckets[current] else {
                self.populated -= 1;
                return (removed.key, removed.value);
            };

            let ideal = ideal_index(slot.hash, capacity);
            if !in_circular_interval(ideal, open, current) {
                log::trace!("shifting bucket {} back to {}", current, open);
                self.buckets.swap(open, current);
                open = current;
            }
        }

        unreachable!("backward shift wrapped around a table without an empty bucket")
    }
}

/// A view into a single entry in the hash table, which may be vacant or
/// occupied.
///
/// This enum is constructed from the [`try_entry`] method on [`HashTable`].
///
/// [`try_entry`]: HashTable::try_entry
pub enum Entry<'a, K, V> {
    /// A vacant entry - the key is not present in the table
    Vacant(VacantEntry<'a, K, V>),
    /// An occupied entry - the key is present in the table
    Occupied(OccupiedEntry<'a, K, V>),
}

impl<'a, K, V> Entry<'a, K, V> {
    /// Inserts `key` and `value` if the entry is vacant and returns a mutable
    /// reference to the stored value.
    ///
    /// If the entry is occupied, `key` and `value` are dropped and the
    /// existing value is returned unchanged.
    pub fn or_insert(self, key: K, value: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(key, value),
        }
    }

    /// Applies `f` to the value of an occupied entry.
    pub fn and_modify(self, f: impl FnOnce(&mut V)) -> Self {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }
}

/// A view into a vacant entry in the hash table.
///
/// It points at the empty bucket that ended the probe sequence, which is
/// where [`insert`](VacantEntry::insert) stores the entry.
pub struct VacantEntry<'a, K, V> {
    table: &'a mut HashTable<K, V>,
    index: usize,
    hash: u32,
}

impl<'a, K, V> VacantEntry<'a, K, V> {
    /// The hash the entry will be stored with.
    pub fn hash(&self) -> u32 {
        self.hash
    }

    pub(crate) fn index(&self) -> usize {
        self.index
    }

    /// Inserts the entry and returns a mutable reference to its value.
    pub fn insert(self, key: K, value: V) -> &'a mut V {
        let VacantEntry { table, index, hash } = self;
        debug_assert!(table.buckets[index].is_none());

        table.populated += 1;
        let slot = table.buckets[index].insert(Slot { hash, key, value });
        &mut slot.value
    }
}

/// A view into an occupied entry in the hash table.
pub struct OccupiedEntry<'a, K, V> {
    table: &'a mut HashTable<K, V>,
    index: usize,
}

impl<'a, K, V> OccupiedEntry<'a, K, V> {
    pub(crate) fn index(&self) -> usize {
        self.index
    }

    /// Gets a reference to the stored key.
    pub fn key(&self) -> &K {
        &self.table.occupied(self.index).key
    }

    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        &self.table.occupied(self.index).value
    }

    /// Gets a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.table.occupied_mut(self.index).value
    }

    /// Converts the entry into a mutable reference to the value with the
    /// lifetime of the table borrow.
    pub fn into_mut(self) -> &'a mut V {
        let OccupiedEntry { table, index } = self;
        &mut table.occupied_mut(index).value
    }

    /// Removes the entry from the table and returns its key and value.
    pub fn remove(self) -> (K, V) {
        self.table.remove_at(self.index)
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::String;
    use alloc::string::ToString;
    use core::hash::Hasher;

    use rand::TryRngCore;
    use rand::rngs::OsRng;
    use siphasher::sip::SipHasher;

    use super::*;

    struct HashState {
        k0: u64,
        k1: u64,
    }

    impl HashState {
        fn default() -> Self {
            let mut rng = OsRng;
            Self {
                k0: rng.try_next_u64().unwrap(),
                k1: rng.try_next_u64().unwrap(),
            }
        }

        fn build_hasher(&self) -> SipHasher {
            SipHasher::new_with_keys(self.k0, self.k1)
        }
    }

    fn fold(hash: u64) -> u32 {
        (hash ^ (hash >> 32)) as u32
    }

    fn hash_key(state: &HashState, key: u64) -> u32 {
        let mut h = state.build_hasher();
        h.write_u64(key);
        fold(h.finish())
    }

    fn hash_string_key(state: &HashState, key: &str) -> u32 {
        let mut h = state.build_hasher();
        h.write(key.as_bytes());
        fold(h.finish())
    }

    fn insert_new<K, V>(table: &mut HashTable<K, V>, hash: u32, key: K, value: V)
    where
        K: PartialEq + Debug,
    {
        match table.try_entry(hash, |k| *k == key).unwrap() {
            Entry::Vacant(entry) => {
                entry.insert(key, value);
            }
            Entry::Occupied(_) => panic!("unexpected occupied entry for {:?}", key),
        }
    }

    /// Entries with hand-picked hashes in an 8-bucket table.
    fn table_with_hashes(hashes: &[u32]) -> HashTable<u64, u64> {
        let mut table = HashTable::new();
        for (key, &hash) in hashes.iter().enumerate() {
            insert_new(&mut table, hash, key as u64, key as u64 * 10);
        }
        assert_eq!(table.capacity(), 8, "{:#?}", table);
        table
    }

    fn bucket_of(table: &HashTable<u64, u64>, hash: u32, key: u64) -> Option<usize> {
        table.find_index(hash, |&k| k == key)
    }

    #[test]
    fn insert_and_find() {
        let state = HashState::default();
        let mut table: HashTable<u64, i32> = HashTable::new();
        for k in 0..32u64 {
            let hash = hash_key(&state, k);
            match table.try_entry(hash, |&v| v == k).unwrap() {
                Entry::Vacant(v) => {
                    v.insert(k, (k as i32) * 2);
                    assert_eq!(
                        table.find(hash, |&v| v == k),
                        Some((&k, &((k as i32) * 2))),
                        "{:#?}",
                        table
                    );
                }
                Entry::Occupied(_) => panic!("unexpected occupied on first insert: {:#?}", table),
            }
        }
        assert_eq!(table.len(), 32);
        for k in 0..32u64 {
            let hash = hash_key(&state, k);
            assert_eq!(
                table.find(hash, |&v| v == k),
                Some((&k, &((k as i32) * 2))),
                "{:#?}",
                table
            );
        }

        let miss_hash = hash_key(&state, 999);
        assert!(table.find(miss_hash, |&v| v == 999).is_none());
    }

    #[test]
    fn find_on_unallocated_table() {
        let table: HashTable<u64, u64> = HashTable::new();
        assert_eq!(table.capacity(), 0);
        assert!(table.find(0, |_| true).is_none());
    }

    #[test]
    fn first_insert_allocates_initial_capacity() {
        let mut table: HashTable<u64, u64> = HashTable::new();
        insert_new(&mut table, 3, 3, 3);
        assert_eq!(table.capacity(), 8);

        let mut table: HashTable<u64, u64> =
            HashTable::with_config(Config::default().with_initial_capacity(32));
        insert_new(&mut table, 3, 3, 3);
        assert_eq!(table.capacity(), 32);
    }

    #[test]
    fn growth_keeps_half_load() {
        let mut table: HashTable<u64, u64> = HashTable::new();
        let mut capacities = Vec::new();
        for k in 0..40u64 {
            insert_new(&mut table, k as u32, k, k);
            assert!(table.len() * 2 <= table.capacity());
            if capacities.last() != Some(&table.capacity()) {
                capacities.push(table.capacity());
            }
        }
        assert_eq!(capacities, [8, 16, 32, 64, 128]);
    }

    #[test]
    fn duplicate_entry_is_occupied() {
        let state = HashState::default();
        let mut table: HashTable<u64, i32> = HashTable::new();
        let k = 42u64;
        let hash = hash_key(&state, k);

        match table.try_entry(hash, |&v| v == k).unwrap() {
            Entry::Vacant(v) => {
                v.insert(k, 7);
            }
            Entry::Occupied(_) => panic!("should be vacant first time"),
        }

        match table.try_entry(hash, |&v| v == k).unwrap() {
            Entry::Occupied(mut occ) => {
                let prev_value = *occ.get();
                *occ.get_mut() = 11;
                assert_eq!(prev_value, 7, "{:#?}", table);
            }
            Entry::Vacant(_) => panic!("should be occupied: {}#{:08X} in {:#?}", k, hash, table),
        }
        assert_eq!(table.find(hash, |&v| v == k), Some((&k, &11)));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn or_insert_does_not_overwrite() {
        let mut table: HashTable<u64, &str> = HashTable::new();
        assert_eq!(*table.try_entry(5, |&k| k == 5).unwrap().or_insert(5, "first"), "first");
        assert_eq!(*table.try_entry(5, |&k| k == 5).unwrap().or_insert(5, "second"), "first");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn and_modify_only_touches_occupied() {
        let mut table: HashTable<u64, u64> = HashTable::new();
        table.try_entry(1, |&k| k == 1).unwrap().and_modify(|v| *v += 1);
        assert!(table.is_empty());

        insert_new(&mut table, 1, 1, 10);
        table.try_entry(1, |&k| k == 1).unwrap().and_modify(|v| *v += 1);
        assert_eq!(table.find(1, |&k| k == 1), Some((&1, &11)));
    }

    #[test]
    fn find_mut_and_modify() {
        let state = HashState::default();
        let mut table: HashTable<u64, i32> = HashTable::new();
        for k in 0..5u64 {
            insert_new(&mut table, hash_key(&state, k), k, 1);
        }

        for k in 0..5u64 {
            let hash = hash_key(&state, k);
            if let Some((_, v)) = table.find_mut(hash, |&v| v == k) {
                *v += 9;
            }
        }
        for k in 0..5u64 {
            let hash = hash_key(&state, k);
            let (_, v) = table.find(hash, |&v| v == k).unwrap();
            assert_eq!(*v, 10);
        }
    }

    #[test]
    fn remove_items() {
        let state = HashState::default();
        let mut table: HashTable<u64, i32> = HashTable::new();
        for k in 0..8u64 {
            insert_new(&mut table, hash_key(&state, k), k, k as i32);
        }
        assert_eq!(table.len(), 8);
        for k in [0u64, 3, 7] {
            let hash = hash_key(&state, k);
            let (key, value) = table.remove(hash, |&v| v == k).expect("should remove");
            assert_eq!(key, k);
            assert_eq!(value, k as i32);
            assert!(table.find(hash, |&v| v == k).is_none());
        }
        assert_eq!(table.len(), 5);

        let hash = hash_key(&state, 1000);
        assert!(table.remove(hash, |&v| v == 1000).is_none());
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn remove_through_occupied_entry() {
        let mut table: HashTable<u64, u64> = HashTable::new();
        for k in 0..4u64 {
            insert_new(&mut table, 0, k, k);
        }

        match table.try_entry(0, |&k| k == 1).unwrap() {
            Entry::Occupied(entry) => assert_eq!(entry.remove(), (1, 1)),
            Entry::Vacant(_) => panic!("should be occupied: {:#?}", table),
        }
        assert_eq!(table.len(), 3);
        for k in [0u64, 2, 3] {
            assert_eq!(table.find(0, |&v| v == k), Some((&k, &k)), "{:#?}", table);
        }
        assert_eq!(table.check_consistency(|_| 0, |a, b| a == b), Ok(()));
    }

    #[test]
    fn backward_shift_moves_dependents_across_wrap() {
        // Buckets: 6 <- key 0 (ideal 6), 7 <- key 1 (ideal 6),
        //          0 <- key 2 (ideal 7), 1 <- key 3 (ideal 6)
        let hashes = [6, 6, 7, 6];
        let mut table = table_with_hashes(&hashes);
        assert_eq!(bucket_of(&table, 6, 0), Some(6));
        assert_eq!(bucket_of(&table, 6, 1), Some(7));
        assert_eq!(bucket_of(&table, 7, 2), Some(0));
        assert_eq!(bucket_of(&table, 6, 3), Some(1));

        assert_eq!(table.remove(6, |&k| k == 0), Some((0, 0)));

        assert_eq!(bucket_of(&table, 6, 1), Some(6), "{:#?}", table);
        assert_eq!(bucket_of(&table, 7, 2), Some(7), "{:#?}", table);
        assert_eq!(bucket_of(&table, 6, 3), Some(0), "{:#?}", table);
        assert!(table.buckets[1].is_none());
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn backward_shift_leaves_entries_at_their_ideal_bucket() {
        // Buckets 6, 7, 0 each hold an entry sitting in its own ideal bucket.
        let hashes = [6, 7, 0];
        let mut table = table_with_hashes(&hashes);

        assert_eq!(table.remove(6, |&k| k == 0), Some((0, 0)));

        assert!(table.buckets[6].is_none());
        assert_eq!(bucket_of(&table, 7, 1), Some(7), "{:#?}", table);
        assert_eq!(bucket_of(&table, 0, 2), Some(0), "{:#?}", table);
    }

    #[test]
    fn backward_shift_skips_over_entries_that_stay() {
        // 2 <- key 0 (ideal 2), 3 <- key 1 (ideal 3), 4 <- key 2 (ideal 2)
        let hashes = [2, 3, 2];
        let mut table = table_with_hashes(&hashes);
        assert_eq!(bucket_of(&table, 2, 2), Some(4));

        assert_eq!(table.remove(2, |&k| k == 0), Some((0, 0)));

        // key 1 stays in its ideal bucket; key 2 jumps over it into bucket 2.
        assert_eq!(bucket_of(&table, 3, 1), Some(3), "{:#?}", table);
        assert_eq!(bucket_of(&table, 2, 2), Some(2), "{:#?}", table);
        assert!(table.buckets[4].is_none());
    }

    #[test]
    fn explicit_collision() {
        let mut table: HashTable<u64, i32> = HashTable::new();
        let hash = 0;
        for k in 0..65u64 {
            insert_new(&mut table, hash, k, k as i32);
        }

        assert_eq!(table.len(), 65);
        for k in 0..65u64 {
            assert_eq!(
                table.find(hash, |&v| v == k),
                Some((&k, &(k as i32))),
                "{:#?}",
                table
            );
        }

        for k in (0..65u64).rev().step_by(2) {
            assert_eq!(table.remove(hash, |&v| v == k), Some((k, k as i32)));
            assert_eq!(table.check_consistency(|_| 0, |a, b| a == b), Ok(()));
        }
        for k in (0..65u64).rev().skip(1).step_by(2) {
            assert!(table.find(hash, |&v| v == k).is_some(), "{:#?}", table);
        }
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn insert_many() {
        let state = HashState::default();
        let mut table: HashTable<u64, i32> = HashTable::new();
        for k in 0..100000u64 {
            let hash = hash_key(&state, k);
            insert_new(&mut table, hash, k, k as i32);
            assert_eq!(table.find(hash, |&v| v == k), Some((&k, &(k as i32))));
        }

        assert_eq!(table.len(), 100000);
        for k in 0..100000u64 {
            let hash = hash_key(&state, k);
            assert_eq!(table.find(hash, |&v| v == k), Some((&k, &(k as i32))));
        }
        assert_eq!(
            table.check_consistency(|&k| hash_key(&state, k), |a, b| a == b),
            Ok(())
        );
    }

    #[test]
    fn insert_and_find_string_keys() {
        let state = HashState::default();
        let mut table: HashTable<String, i32> = HashTable::new();
        let keys = ["hello", "world", "foo", "bar", "baz"];

        for (i, k) in keys.iter().enumerate() {
            insert_new(&mut table, hash_string_key(&state, k), k.to_string(), i as i32);
        }

        assert_eq!(table.len(), keys.len());

        for (i, k) in keys.iter().enumerate() {
            let hash = hash_string_key(&state, k);
            assert_eq!(
                table.find(hash, |v| v == k),
                Some((&k.to_string(), &(i as i32)))
            );
        }

        let miss_hash = hash_string_key(&state, "not found");
        assert!(table.find(miss_hash, |v| v == "not found").is_none());
    }

    #[test]
    fn remove_string_keys() {
        let state = HashState::default();
        let mut table: HashTable<String, i32> = HashTable::new();
        let keys = ["a", "b", "c", "d", "e"];
        for (i, k) in keys.iter().enumerate() {
            insert_new(&mut table, hash_string_key(&state, k), k.to_string(), i as i32);
        }

        assert_eq!(table.len(), 5);
        let hash_c = hash_string_key(&state, "c");
        let (key, value) = table.remove(hash_c, |v| v == "c").unwrap();
        assert_eq!(key, "c");
        assert_eq!(value, 2);
        assert_eq!(table.len(), 4);

        let hash_a = hash_string_key(&state, "a");
        assert!(table.find(hash_a, |v| v == "a").is_some());
        assert!(table.find(hash_c, |v| v == "c").is_none());
    }

    #[test]
    fn failed_growth_leaves_table_unchanged() {
        let mut table: HashTable<u64, u64> =
            HashTable::with_config(Config::default().with_max_capacity(8));
        for k in 0..4u64 {
            insert_new(&mut table, k as u32, k, k * 3);
        }
        assert_eq!(table.capacity(), 8);

        let err = match table.try_entry(4, |&k| k == 4) {
            Err(err) => err,
            Ok(_) => panic!("growth past the maximum should fail: {:#?}", table),
        };
        assert_eq!(
            err,
            ResizeError::CapacityLimit {
                requested: 16,
                max: 8
            }
        );

        assert_eq!(table.len(), 4);
        assert_eq!(table.capacity(), 8);
        for k in 0..4u64 {
            assert_eq!(table.find(k as u32, |&v| v == k), Some((&k, &(k * 3))));
        }

        // Removing makes room again without growing.
        assert!(table.remove(0, |&k| k == 0).is_some());
        insert_new(&mut table, 4, 4, 12);
        assert_eq!(table.capacity(), 8);
    }

    #[test]
    fn growth_check_precedes_duplicate_detection() {
        let mut table: HashTable<u64, u64> =
            HashTable::with_config(Config::default().with_max_capacity(8));
        for k in 0..4u64 {
            insert_new(&mut table, k as u32, k, k);
        }
        assert!(table.try_entry(0, |&k| k == 0).is_err());
    }

    #[test]
    fn reserve_avoids_growth() {
        let mut table: HashTable<u64, u64> = HashTable::new();
        table.try_reserve(100).unwrap();
        let capacity = table.capacity();
        assert_eq!(capacity, 256);

        for k in 0..100u64 {
            insert_new(&mut table, k as u32, k, k);
        }
        assert_eq!(table.capacity(), capacity);

        table.try_reserve(10).unwrap();
        assert_eq!(table.capacity(), capacity);
    }

    #[test]
    fn reserve_overflow_is_reported() {
        let mut table: HashTable<u64, u64> = HashTable::new();
        assert_eq!(
            table.try_reserve(usize::MAX),
            Err(ResizeError::CapacityOverflow)
        );
        assert_eq!(table.capacity(), 0);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut table: HashTable<u64, u64> = HashTable::new();
        for k in 0..20u64 {
            insert_new(&mut table, k as u32, k, k);
        }
        let capacity = table.capacity();

        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.capacity(), capacity);
        assert!(table.find(3, |&k| k == 3).is_none());
        assert_eq!(table.check_consistency(|&k| k as u32, |a, b| a == b), Ok(()));
    }

    #[test]
    fn destroy_with_visits_every_entry_once() {
        let mut table: HashTable<u64, u64> = HashTable::new();
        for k in 0..50u64 {
            insert_new(&mut table, (k % 7) as u32, k, k + 1000);
        }
        for k in (0..50u64).step_by(5) {
            table.remove((k % 7) as u32, |&v| v == k);
        }

        let mut keys = Vec::new();
        let mut values = Vec::new();
        table.destroy_with(|k| keys.push(k), |v| values.push(v));

        keys.sort();
        values.sort();
        let expected: Vec<u64> = (0..50).filter(|k| k % 5 != 0).collect();
        assert_eq!(keys, expected);
        assert_eq!(
            values,
            expected.iter().map(|k| k + 1000).collect::<Vec<_>>()
        );
    }

    #[test]
    fn consistency_detects_stale_hash() {
        let mut table: HashTable<u64, ()> = HashTable::new();
        insert_new(&mut table, 5, 1, ());

        let err = table
            .check_consistency(|_| 6, |a, b| a == b)
            .expect_err("hash mismatch should be reported");
        assert!(matches!(
            err,
            ConsistencyError::StaleHash {
                cached: 5,
                actual: 6,
                ..
            }
        ));
    }

    #[test]
    fn consistency_detects_unreachable_entry() {
        let mut table = table_with_hashes(&[3, 3]);
        // Punch a hole in the middle of the probe run without repairing it.
        table.buckets[3] = None;
        table.populated -= 1;

        let err = table
            .check_consistency(|&k| [3, 3][k as usize], |a, b| a == b)
            .expect_err("a hole before key 1 should be reported");
        assert_eq!(err, ConsistencyError::Unreachable { index: 4, ideal: 3 });
    }

    #[test]
    fn test_clone() {
        let state = HashState::default();
        let mut original: HashTable<String, i32> = HashTable::new();

        let test_data = [
            ("hello", 1),
            ("world", 2),
            ("rust", 3),
            ("clone", 4),
            ("test", 5),
        ];

        for (key, value) in test_data.iter() {
            insert_new(&mut original, hash_string_key(&state, key), key.to_string(), *value);
        }

        let mut cloned = original.clone();
        assert_eq!(original.len(), cloned.len());
        assert_eq!(original.capacity(), cloned.capacity());

        for (key, expected_value) in test_data.iter() {
            let hash = hash_string_key(&state, key);
            assert_eq!(original.find(hash, |v| v == key).unwrap().1, expected_value);
            assert_eq!(cloned.find(hash, |v| v == key).unwrap().1, expected_value);
        }

        let hash = hash_string_key(&state, "hello");
        if let Some((_, value)) = original.find_mut(hash, |v| v == "hello") {
            *value = 999;
        }
        cloned.remove(hash_string_key(&state, "rust"), |v| v == "rust");

        assert_eq!(original.find(hash, |v| v == "hello").unwrap().1, &999);
        assert_eq!(cloned.find(hash, |v| v == "hello").unwrap().1, &1);
        assert_eq!(original.len(), 5);
        assert_eq!(cloned.len(), 4);
    }

    #[test]
    fn debug_output_shows_displacement() {
        let table = table_with_hashes(&[6, 6]);
        let rendered = format!("{:?}", table);
        assert!(rendered.contains(".., .., .., .., .., .., 00, 01"), "{rendered}");

        let empty: HashTable<u64, u64> = HashTable::new();
        assert!(format!("{:?}", empty).contains("unallocated"));
    }

    #[test]
    fn probe_histogram_counts_displacement() {
        let mut table: HashTable<u64, u64> = HashTable::new();
        for k in 0..5u64 {
            insert_new(&mut table, 0, k, k);
        }

        let histogram = table.probe_histogram();
        assert_eq!(histogram.counts(), &[1, 1, 1, 1, 1]);
        assert_eq!(histogram.total(), 5);

        let stats = table.debug_stats();
        assert_eq!(stats.populated, 5);
        assert_eq!(stats.capacity, 16);
        assert_eq!(stats.longest_probe, 4);
        assert!((stats.mean_probe_length - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    #[cfg(feature = "std")]
    fn histogram_output() {
        let state = HashState::default();
        let mut table: HashTable<u64, i32> = HashTable::with_capacity(10000);
        for k in 0..10000u64 {
            insert_new(&mut table, hash_key(&state, k), k, k as i32);
        }

        table.probe_histogram().print();
        table.debug_stats().print();
    }
}
