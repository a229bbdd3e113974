use crate::{murmur, HashTable, Result};

/// Default requested bucket count; rounds to the smallest listed prime.
pub const DEFAULT_CAPACITY: usize = 5;

/// Grow once `used / size` exceeds this percentage.
pub const DEFAULT_EXPAND_THRESHOLD: u8 = 70;

/// Table construction parameters.
///
/// ```
/// use prime_hashtable::Config;
///
/// let table = Config::new()
///     .capacity(1700)
///     .build::<u32>()
///     .unwrap();
/// assert_eq!(table.size(), 1741);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub(crate) capacity: usize,
    pub(crate) expand_threshold: u8,
    pub(crate) seed: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            expand_threshold: DEFAULT_EXPAND_THRESHOLD,
            seed: murmur::SEED,
        }
    }
}

impl Config {
    /// Default parameters: 5 buckets, 70% threshold, the MurmurHash2 default seed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requested initial bucket count, rounded up to the next listed prime.
    #[must_use]
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Load percentage that triggers automatic growth, clamped to `1..=100`.
    ///
    /// The same bound makes an explicit `expand` refuse an overloaded target.
    #[must_use]
    pub fn expand_threshold(mut self, percent: u8) -> Self {
        self.expand_threshold = percent.clamp(1, 100);
        self
    }

    /// Seed fed to MurmurHash2.
    #[must_use]
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Allocate a table with these parameters.
    pub fn build<V>(self) -> Result<HashTable<V>> {
        HashTable::with_config(self)
    }
}
