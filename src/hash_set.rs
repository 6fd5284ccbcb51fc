use core::fmt::Debug;

use crate::config::Config;
use crate::error::ConsistencyError;
use crate::error::InsertError;
use crate::error::ResizeError;
use crate::hash_map::HashMap;
use crate::hash_map::Insertion;
use crate::hasher::KeyHasher;

/// A hash set implemented as a [`HashMap`] with `()` values.
///
/// `HashSet<T, H>` stores values of type `T` hashed and compared by the
/// [`KeyHasher`] `H`. Inserting a value that is already present leaves the
/// stored value in place.
#[derive(Clone)]
pub struct HashSet<T, H> {
    map: HashMap<T, (), H>,
}

impl<T, H> PartialEq for HashSet<T, H>
where
    H: KeyHasher<T>,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.map.keys().all(|v| other.contains(v))
    }
}

impl<T, H> Eq for HashSet<T, H> where H: KeyHasher<T> {}

impl<T, H> Debug for HashSet<T, H>
where
    T: Debug,
    H: KeyHasher<T>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.map.keys()).finish()
    }
}

impl<T, H> HashSet<T, H>
where
    H: KeyHasher<T>,
{
    /// Creates a new hash set with the given hasher.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use shift_hash::HashSet;
    /// use shift_hash::hasher::StringHasher;
    ///
    /// let set: HashSet<String, _> = HashSet::with_hasher(StringHasher);
    /// assert!(set.is_empty());
    /// ```
    pub fn with_hasher(hasher: H) -> Self {
        Self {
            map: HashMap::with_hasher(hasher),
        }
    }

    /// Creates a new hash set with the given hasher and sizing configuration.
    pub fn with_config(hasher: H, config: Config) -> Self {
        Self {
            map: HashMap::with_config(hasher, config),
        }
    }

    /// Creates a new hash set that can hold `capacity` values without
    /// growing.
    ///
    /// # Panics
    ///
    /// Panics if the bucket array cannot be allocated.
    pub fn with_capacity_and_hasher(capacity: usize, hasher: H) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(capacity, hasher),
        }
    }

    /// Returns a reference to the set's hasher.
    pub fn hasher(&self) -> &H {
        self.map.hasher()
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use shift_hash::HashSet;
    /// # use shift_hash::hasher::StringHasher;
    /// let mut set = HashSet::with_hasher(StringHasher);
    /// assert_eq!(set.len(), 0);
    /// set.insert("a").unwrap();
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the number of buckets.
    pub fn capacity(&self) -> usize {
        self.map.capacity()
    }

    /// Removes all elements, keeping the allocated buckets.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Reserves room for at least `additional` more elements.
    ///
    /// On error the set is unchanged.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), ResizeError> {
        self.map.try_reserve(additional)
    }

    /// Reserves room for at least `additional` more elements.
    ///
    /// # Panics
    ///
    /// Panics if the set cannot grow.
    pub fn reserve(&mut self, additional: usize) {
        self.map.reserve(additional);
    }

    /// Adds a value to the set.
    ///
    /// Returns `Ok(true)` if the value was newly added and `Ok(false)` if an
    /// equal value was already present, in which case the stored value is
    /// kept. If the set has to grow and cannot, the value is handed back in
    /// the error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use shift_hash::HashSet;
    /// # use shift_hash::hasher::StringHasher;
    /// let mut set = HashSet::with_hasher(StringHasher);
    /// assert_eq!(set.insert("a").unwrap(), true);
    /// assert_eq!(set.insert("a").unwrap(), false);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> Result<bool, InsertError<T, ()>> {
        match self.map.insert(value, ()) {
            Ok(Insertion::Inserted(_)) => Ok(true),
            Ok(Insertion::AlreadyPresent { .. }) => Ok(false),
            Err(error) => Err(error),
        }
    }

    /// Returns `true` if the set contains `value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use shift_hash::HashSet;
    /// # use shift_hash::hasher::StringHasher;
    /// let mut set = HashSet::with_hasher(StringHasher);
    /// set.insert("a").unwrap();
    /// assert!(set.contains(&"a"));
    /// assert!(!set.contains(&"b"));
    /// ```
    pub fn contains(&self, value: &T) -> bool {
        self.map.contains_key(value)
    }

    /// Returns a reference to the stored value equal to `value`.
    pub fn get(&self, value: &T) -> Option<&T> {
        self.map.get_key_value(value).map(|(k, _)| k)
    }

    /// Removes and returns the stored value equal to `value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use shift_hash::HashSet;
    /// # use shift_hash::hasher::StringHasher;
    /// let mut set = HashSet::with_hasher(StringHasher);
    /// set.insert(String::from("a")).unwrap();
    /// assert_eq!(set.remove(&String::from("a")), Some(String::from("a")));
    /// assert_eq!(set.remove(&String::from("a")), None);
    /// ```
    pub fn remove(&mut self, value: &T) -> Option<T> {
        self.map.remove(value).map(|(k, ())| k)
    }

    /// Drops the set and every value in it.
    pub fn destroy(self) {
        self.map.destroy();
    }

    /// Consumes the set, handing every value to `on_value` exactly once.
    pub fn destroy_with(self, on_value: impl FnMut(T)) {
        self.map.destroy_with(on_value, drop);
    }

    /// Verifies every table invariant using the set's hasher.
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        self.map.check_consistency()
    }
}

#[cfg(any(feature = "std", feature = "foldhash"))]
impl<T> HashSet<T, crate::hasher::DefaultHasher>
where
    T: core::hash::Hash + Eq,
{
    /// Creates a new hash set using the default hasher.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use shift_hash::HashSet;
    /// let mut set = HashSet::new();
    /// set.insert(1).unwrap();
    /// assert!(set.contains(&1));
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }

    /// Creates a new hash set with room for `capacity` values using the
    /// default hasher.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, Default::default())
    }
}

impl<T, H> Default for HashSet<T, H>
where
    H: KeyHasher<T> + Default,
{
    fn default() -> Self {
        Self::with_hasher(H::default())
    }
}
