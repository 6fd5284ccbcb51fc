use core::fmt::Debug;

use crate::config::Config;
use crate::error::ConsistencyError;
use crate::error::InsertError;
use crate::error::ResizeError;
use crate::hash_table::Entry as TableEntry;
use crate::hash_table::HashTable;
use crate::hasher::KeyHasher;

/// A hash map over the linear-probing [`HashTable`].
///
/// `HashMap<K, V, H>` owns its keys and values and uses the [`KeyHasher`] `H`,
/// supplied once at creation, for every operation. Inserting a key that is
/// already present never overwrites: [`insert`](HashMap::insert) reports the
/// existing value and hands the new key and value back.
///
/// # Performance Characteristics
///
/// - **Memory**: a `u32` cached hash plus the `Option` discriminant per
///   bucket, with at least two buckets per entry
/// - **Growth**: doubling, moving every entry by its cached hash without
///   re-hashing or comparing keys
#[derive(Clone)]
pub struct HashMap<K, V, H> {
    table: HashTable<K, V>,
    hasher: H,
}

impl<K, V, H> Debug for HashMap<K, V, H>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in self.table.entries() {
            map.entry(k, v);
        }
        map.finish()
    }
}

/// The outcome of a successful [`HashMap::insert`].
#[derive(Debug)]
pub enum Insertion<'a, K, V> {
    /// The key was absent and has been stored.
    Inserted(&'a mut V),
    /// The key was already present. The stored entry is untouched and the
    /// rejected key and value are returned.
    AlreadyPresent {
        /// The value stored under the key.
        existing: &'a mut V,
        /// The key passed to `insert`.
        key: K,
        /// The value passed to `insert`.
        value: V,
    },
}

impl<'a, K, V> Insertion<'a, K, V> {
    /// Returns `true` if the entry was newly stored.
    pub fn is_inserted(&self) -> bool {
        matches!(self, Insertion::Inserted(_))
    }

    /// Returns the value stored in the map under the key, whether or not it
    /// was just inserted.
    pub fn into_mut(self) -> &'a mut V {
        match self {
            Insertion::Inserted(value) => value,
            Insertion::AlreadyPresent { existing, .. } => existing,
        }
    }
}

/// Where an insertion ended up, recorded before the result borrows the table.
enum Placed<K, V> {
    New(usize),
    Existing(usize, K, V),
}

impl<K, V, H> HashMap<K, V, H>
where
    H: KeyHasher<K>,
{
    /// Creates a new hash map that uses `hasher` for its keys.
    ///
    /// No memory is allocated until the first insertion.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use shift_hash::HashMap;
    /// # use shift_hash::hasher::StringHasher;
    /// let map: HashMap<String, u32, _> = HashMap::with_hasher(StringHasher);
    /// assert!(map.is_empty());
    /// assert_eq!(map.capacity(), 0);
    /// ```
    pub fn with_hasher(hasher: H) -> Self {
        Self::with_config(hasher, Config::default())
    }

    /// Creates a new hash map with the given hasher and sizing configuration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use shift_hash::Config;
    /// # use shift_hash::HashMap;
    /// # use shift_hash::hasher::FnHasher;
    /// let hasher = FnHasher::new(|k: &u32| *k, |a: &u32, b: &u32| a == b);
    /// let mut map = HashMap::with_config(hasher, Config::default().with_max_capacity(8));
    ///
    /// for k in 0..4 {
    ///     map.insert(k, ()).unwrap();
    /// }
    /// // A fifth entry would need 16 buckets.
    /// let err = map.insert(4, ()).unwrap_err();
    /// assert_eq!(err.into_inner(), (4, ()));
    /// assert_eq!(map.len(), 4);
    /// ```
    pub fn with_config(hasher: H, config: Config) -> Self {
        Self {
            table: HashTable::with_config(config),
            hasher,
        }
    }

    /// Creates a new hash map that can hold `capacity` entries without
    /// growing.
    ///
    /// # Panics
    ///
    /// Panics if the bucket array cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use shift_hash::HashMap;
    /// # use shift_hash::hasher::StringHasher;
    /// let map: HashMap<&str, u32, _> = HashMap::with_capacity_and_hasher(100, StringHasher);
    /// assert!(map.capacity() >= 200);
    /// ```
    pub fn with_capacity_and_hasher(capacity: usize, hasher: H) -> Self {
        let mut map = Self::with_hasher(hasher);
        map.reserve(capacity);
        map
    }

    /// Returns a reference to the map's hasher.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Returns the map's sizing configuration.
    pub fn config(&self) -> &Config {
        self.table.config()
    }

    /// Returns the number of entries in the map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use shift_hash::HashMap;
    /// # use shift_hash::hasher::StringHasher;
    /// let mut map = HashMap::with_hasher(StringHasher);
    /// assert_eq!(map.len(), 0);
    /// map.insert("a", 1).unwrap();
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of buckets. The map holds at most half as many
    /// entries before it grows.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Removes all entries, keeping the allocated buckets.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use shift_hash::HashMap;
    /// # use shift_hash::hasher::StringHasher;
    /// let mut map = HashMap::with_hasher(StringHasher);
    /// map.insert("a", 1).unwrap();
    /// let capacity = map.capacity();
    ///
    /// map.clear();
    /// assert!(map.is_empty());
    /// assert_eq!(map.capacity(), capacity);
    /// ```
    pub fn clear(&mut self) {
        self.table.clear();
        self.validate();
    }

    /// Reserves room for at least `additional` more entries.
    ///
    /// On error the map is unchanged.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), ResizeError> {
        let result = self.table.try_reserve(additional);
        self.validate();
        result
    }

    /// Reserves room for at least `additional` more entries.
    ///
    /// # Panics
    ///
    /// Panics if [`try_reserve`](Self::try_reserve) fails.
    pub fn reserve(&mut self, additional: usize) {
        self.table.reserve(additional);
        self.validate();
    }

    /// Inserts a key-value pair unless the key is already present.
    ///
    /// If the map has to grow and cannot, the key and value are returned in
    /// the [`InsertError`] and the map is unchanged. The growth check runs
    /// before the key is looked up, so it can fail even for a key that is
    /// already present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use shift_hash::HashMap;
    /// # use shift_hash::Insertion;
    /// # use shift_hash::hasher::StringHasher;
    /// let mut map = HashMap::with_hasher(StringHasher);
    ///
    /// assert!(map.insert("key", 1).unwrap().is_inserted());
    ///
    /// match map.insert("key", 2).unwrap() {
    ///     Insertion::AlreadyPresent { existing, value, .. } => {
    ///         assert_eq!(*existing, 1);
    ///         assert_eq!(value, 2);
    ///     }
    ///     Insertion::Inserted(_) => unreachable!(),
    /// }
    /// assert_eq!(map.get(&"key"), Some(&1));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Result<Insertion<'_, K, V>, InsertError<K, V>> {
        let hash = self.hasher.hash(&key);
        let hasher = &self.hasher;
        let placed = match self
            .table
            .try_entry(hash, |stored| hasher.equal(&key, stored))
        {
            Ok(TableEntry::Vacant(entry)) => {
                let index = entry.index();
                entry.insert(key, value);
                Placed::New(index)
            }
            Ok(TableEntry::Occupied(entry)) => Placed::Existing(entry.index(), key, value),
            Err(error) => return Err(InsertError { key, value, error }),
        };
        self.validate();

        Ok(match placed {
            Placed::New(index) => Insertion::Inserted(self.table.value_mut_at(index)),
            Placed::Existing(index, key, value) => Insertion::AlreadyPresent {
                existing: self.table.value_mut_at(index),
                key,
                value,
            },
        })
    }

    /// Returns a reference to the value stored under `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use shift_hash::HashMap;
    /// # use shift_hash::hasher::StringHasher;
    /// let mut map = HashMap::with_hasher(StringHasher);
    /// map.insert("a", 1).unwrap();
    /// assert_eq!(map.get(&"a"), Some(&1));
    /// assert_eq!(map.get(&"b"), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        self.get_key_value(key).map(|(_, v)| v)
    }

    /// Returns the stored key and value for `key`.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let hash = self.hasher.hash(key);
        self.table
            .find(hash, |stored| self.hasher.equal(key, stored))
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let hash = self.hasher.hash(key);
        let hasher = &self.hasher;
        self.table
            .find_mut(hash, |stored| hasher.equal(key, stored))
            .map(|(_, v)| v)
    }

    /// Returns `true` if the map contains `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get_key_value(key).is_some()
    }

    /// Removes `key` from the map, returning the stored key and value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use shift_hash::HashMap;
    /// # use shift_hash::hasher::StringHasher;
    /// let mut map = HashMap::with_hasher(StringHasher);
    /// map.insert(String::from("a"), 1).unwrap();
    ///
    /// assert_eq!(map.remove(&String::from("a")), Some((String::from("a"), 1)));
    /// assert_eq!(map.remove(&String::from("a")), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<(K, V)> {
        let hash = self.hasher.hash(key);
        let hasher = &self.hasher;
        let removed = self
            .table
            .remove(hash, |stored| hasher.equal(key, stored));
        self.validate();
        removed
    }

    /// Gets the entry for `key`, growing the map first if one more entry would
    /// exceed the load limit.
    ///
    /// On failure the key is handed back in the error. Mutations made through
    /// the returned entry are covered by the next `consistency-checks`
    /// validation rather than immediately.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use shift_hash::HashMap;
    /// # use shift_hash::hasher::StringHasher;
    /// let mut counts = HashMap::with_hasher(StringHasher);
    /// for word in ["a", "b", "a"] {
    ///     *counts.try_entry(word).unwrap().or_insert(0) += 1;
    /// }
    /// assert_eq!(counts.get(&"a"), Some(&2));
    /// assert_eq!(counts.get(&"b"), Some(&1));
    /// ```
    pub fn try_entry(&mut self, key: K) -> Result<Entry<'_, K, V>, InsertError<K, ()>> {
        let hash = self.hasher.hash(&key);
        let hasher = &self.hasher;
        match self
            .table
            .try_entry(hash, |stored| hasher.equal(&key, stored))
        {
            Ok(TableEntry::Vacant(entry)) => Ok(Entry::Vacant(VacantEntry { entry, key })),
            Ok(TableEntry::Occupied(entry)) => Ok(Entry::Occupied(OccupiedEntry { entry })),
            Err(error) => Err(InsertError {
                key,
                value: (),
                error,
            }),
        }
    }

    /// Drops the map and every entry in it.
    pub fn destroy(self) {
        self.destroy_with(drop, drop);
    }

    /// Consumes the map, handing every key to `on_key` and every value to
    /// `on_value` exactly once.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use shift_hash::HashMap;
    /// # use shift_hash::hasher::StringHasher;
    /// let mut map = HashMap::with_hasher(StringHasher);
    /// map.insert("a", 1).unwrap();
    /// map.insert("b", 2).unwrap();
    ///
    /// let mut released = 0;
    /// map.destroy_with(|_| (), |v| released += v);
    /// assert_eq!(released, 3);
    /// ```
    pub fn destroy_with(self, on_key: impl FnMut(K), on_value: impl FnMut(V)) {
        self.table.destroy_with(on_key, on_value);
    }

    /// Verifies every table invariant using the map's hasher.
    ///
    /// See [`HashTable::check_consistency`].
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        self.table.check_consistency(
            |key| self.hasher.hash(key),
            |a, b| self.hasher.equal(a, b),
        )
    }

    /// The underlying table, for statistics.
    #[cfg(any(test, feature = "stats"))]
    pub fn table(&self) -> &HashTable<K, V> {
        &self.table
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = &K> {
        self.table.entries().map(|(k, _)| k)
    }

    #[inline(always)]
    fn validate(&self) {
        #[cfg(feature = "consistency-checks")]
        {
            if let Err(error) = self.check_consistency() {
                panic!("hash map consistency check failed: {error}");
            }
        }
    }
}

#[cfg(any(feature = "std", feature = "foldhash"))]
impl<K, V> HashMap<K, V, crate::hasher::DefaultHasher>
where
    K: core::hash::Hash + Eq,
{
    /// Creates a new hash map using the default hasher.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use shift_hash::HashMap;
    /// let mut map = HashMap::new();
    /// map.insert(1, "one").unwrap();
    /// assert_eq!(map.get(&1), Some(&"one"));
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }

    /// Creates a new hash map with room for `capacity` entries using the
    /// default hasher.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, Default::default())
    }
}

impl<K, V, H> Default for HashMap<K, V, H>
where
    H: KeyHasher<K> + Default,
{
    fn default() -> Self {
        Self::with_hasher(H::default())
    }
}

/// A view into a single entry in the map, which may either be vacant or
/// occupied.
///
/// This enum is constructed from the [`try_entry`] method on [`HashMap`].
///
/// [`try_entry`]: HashMap::try_entry
pub enum Entry<'a, K, V> {
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V>),
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V>),
}

impl<'a, K, V> Entry<'a, K, V> {
    /// Inserts a default value if the entry is vacant and returns a mutable
    /// reference.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts a value computed from a closure if the entry is vacant and
    /// returns a mutable reference.
    pub fn or_insert_with<F>(self, default: F) -> &'a mut V
    where
        F: FnOnce() -> V,
    {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts.
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }

    /// Returns a reference to this entry's key.
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }
}

impl<'a, K, V> Entry<'a, K, V>
where
    V: Default,
{
    /// Inserts the default value if the entry is vacant and returns a mutable
    /// reference.
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(Default::default)
    }
}

/// A view into a vacant entry in the map.
pub struct VacantEntry<'a, K, V> {
    entry: crate::hash_table::VacantEntry<'a, K, V>,
    key: K,
}

impl<'a, K, V> VacantEntry<'a, K, V> {
    /// Gets a reference to the key that would be used when inserting a value.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Take ownership of the key.
    pub fn into_key(self) -> K {
        self.key
    }

    /// Inserts the value into the map and returns a mutable reference to it.
    pub fn insert(self, value: V) -> &'a mut V {
        self.entry.insert(self.key, value)
    }
}

/// A view into an occupied entry in the map.
pub struct OccupiedEntry<'a, K, V> {
    entry: crate::hash_table::OccupiedEntry<'a, K, V>,
}

impl<'a, K, V> OccupiedEntry<'a, K, V> {
    /// Gets a reference to the stored key.
    pub fn key(&self) -> &K {
        self.entry.key()
    }

    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        self.entry.get()
    }

    /// Gets a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        self.entry.get_mut()
    }

    /// Converts the entry into a mutable reference to the value.
    pub fn into_mut(self) -> &'a mut V {
        self.entry.into_mut()
    }

    /// Replaces the value in the entry and returns the old value.
    pub fn insert(&mut self, value: V) -> V {
        core::mem::replace(self.entry.get_mut(), value)
    }

    /// Removes the entry from the map and returns the value.
    pub fn remove(self) -> V {
        self.entry.remove().1
    }

    /// Removes the entry from the map and returns the key and value.
    pub fn remove_entry(self) -> (K, V) {
        self.entry.remove()
    }
}
