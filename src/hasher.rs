use core::hash::BuildHasher;
use core::hash::Hash;

/// The hash and equality functions a table uses for its keys.
///
/// Implementations must be consistent for the lifetime of the table: keys that
/// compare equal must produce equal hashes. The table caches each entry's hash
/// and compares it before calling [`equal`](KeyHasher::equal), so a hasher that
/// breaks this rule makes entries unreachable rather than causing memory
/// unsafety.
pub trait KeyHasher<K: ?Sized> {
    /// Hashes `key` to 32 bits.
    fn hash(&self, key: &K) -> u32;

    /// Returns `true` if `a` and `b` are the same key.
    fn equal(&self, a: &K, b: &K) -> bool;
}

impl<K: ?Sized, H: KeyHasher<K> + ?Sized> KeyHasher<K> for &H {
    #[inline]
    fn hash(&self, key: &K) -> u32 {
        (**self).hash(key)
    }

    #[inline]
    fn equal(&self, a: &K, b: &K) -> bool {
        (**self).equal(a, b)
    }
}

/// A [`KeyHasher`] made from a hash function and an equality function.
///
/// # Examples
///
/// ```rust
/// use shift_hash::KeyHasher;
/// use shift_hash::hasher::FnHasher;
///
/// // Every key collides; equality alone tells them apart.
/// let hasher = FnHasher::new(|_: &u32| 0, |a: &u32, b: &u32| a == b);
/// assert_eq!(hasher.hash(&7u32), hasher.hash(&9u32));
/// assert!(!hasher.equal(&7u32, &9u32));
/// ```
#[derive(Clone, Copy)]
pub struct FnHasher<F, E> {
    hash: F,
    equal: E,
}

impl<F, E> FnHasher<F, E> {
    /// Creates a hasher from `hash` and `equal`.
    pub fn new<K: ?Sized>(hash: F, equal: E) -> Self
    where
        F: Fn(&K) -> u32,
        E: Fn(&K, &K) -> bool,
    {
        Self { hash, equal }
    }
}

impl<K, F, E> KeyHasher<K> for FnHasher<F, E>
where
    K: ?Sized,
    F: Fn(&K) -> u32,
    E: Fn(&K, &K) -> bool,
{
    #[inline]
    fn hash(&self, key: &K) -> u32 {
        (self.hash)(key)
    }

    #[inline]
    fn equal(&self, a: &K, b: &K) -> bool {
        (self.equal)(a, b)
    }
}

/// The djb2 string hash with byte-wise string equality.
///
/// Works for any key that can be viewed as a `str`, so both `String` and
/// `&str` keys are supported.
///
/// # Examples
///
/// ```rust
/// use shift_hash::KeyHasher;
/// use shift_hash::hasher::StringHasher;
///
/// assert_eq!(StringHasher.hash(""), 5381);
/// assert!(StringHasher.equal("key", "key"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringHasher;

impl StringHasher {
    /// djb2 over `bytes`: `h = h * 33 + byte`, seeded with 5381.
    pub const fn djb2(bytes: &[u8]) -> u32 {
        let mut hash: u32 = 5381;
        let mut i = 0;
        while i < bytes.len() {
            hash = (hash << 5).wrapping_add(hash).wrapping_add(bytes[i] as u32);
            i += 1;
        }
        hash
    }
}

impl<K: AsRef<str> + ?Sized> KeyHasher<K> for StringHasher {
    #[inline]
    fn hash(&self, key: &K) -> u32 {
        Self::djb2(key.as_ref().as_bytes())
    }

    #[inline]
    fn equal(&self, a: &K, b: &K) -> bool {
        a.as_ref() == b.as_ref()
    }
}

/// Adapts a [`BuildHasher`] to [`KeyHasher`] for keys that are `Hash + Eq`.
///
/// The 64-bit hash is folded to 32 bits by XOR-ing its halves.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildHasherAdapter<S> {
    hash_builder: S,
}

impl<S> BuildHasherAdapter<S> {
    /// Wraps `hash_builder`.
    pub fn new(hash_builder: S) -> Self {
        Self { hash_builder }
    }

    /// Returns the wrapped hasher builder.
    pub fn hash_builder(&self) -> &S {
        &self.hash_builder
    }
}

impl<K, S> KeyHasher<K> for BuildHasherAdapter<S>
where
    K: Hash + Eq + ?Sized,
    S: BuildHasher,
{
    #[inline]
    fn hash(&self, key: &K) -> u32 {
        let hash = self.hash_builder.hash_one(key);
        (hash ^ (hash >> 32)) as u32
    }

    #[inline]
    fn equal(&self, a: &K, b: &K) -> bool {
        a == b
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// The [`BuildHasher`] used by [`DefaultHasher`].
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else if #[cfg(feature = "std")] {
        /// The [`BuildHasher`] used by [`DefaultHasher`].
        pub type DefaultHashBuilder = std::hash::RandomState;
    }
}

/// The hasher used by `HashMap::new` and `HashSet::new`.
#[cfg(any(feature = "std", feature = "foldhash"))]
pub type DefaultHasher = BuildHasherAdapter<DefaultHashBuilder>;
