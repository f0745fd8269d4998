//! Case-insensitive word counting on a hand-built chained hash table.
//!
//! `WordTable` keys every word by its lowercase form and remembers each
//! distinct casing it was seen under. Buckets are singly linked chains, the
//! bucket array doubles whenever the load factor exceeds 0.7, and keys are
//! placed with a seeded 32-bit MurmurHash3 whose seed is drawn per table.
//!
//! ```
//! use word_variants::WordTable;
//!
//! let mut table = WordTable::with_seed(42);
//! table.extend(vec!["The", "quick", "the", "THE"]);
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.get("the").unwrap().to_string(), "the (The the THE) - 3");
//! ```

#[macro_use]
extern crate log;
extern crate byteorder;
extern crate rand;

mod chain;
mod entry;
pub mod hasher;
mod table;
pub mod tokenizer;

pub use chain::{Chain, Iter as ChainIter};
pub use entry::Entry;

use std::fmt;
use std::iter::FromIterator;

use table::RawTable;

/// Growth triggers once `len / bucket_count` is strictly above this.
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.7;

/// Decides when the bucket array doubles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizePolicy {
    max_load_factor: f64,
}

impl Default for ResizePolicy {
    fn default() -> ResizePolicy {
        ResizePolicy::new(DEFAULT_MAX_LOAD_FACTOR)
    }
}

impl ResizePolicy {
    pub fn new(max_load_factor: f64) -> ResizePolicy {
        assert!(
            max_load_factor > 0.0,
            "max load factor must be positive, got {}",
            max_load_factor
        );
        ResizePolicy { max_load_factor }
    }

    #[inline]
    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    /// Checked before a word is placed, against the current entry count.
    #[inline]
    fn should_grow(&self, len: usize, bucket_count: usize) -> bool {
        len as f64 / bucket_count as f64 > self.max_load_factor
    }
}

/// Counts words case-insensitively and tracks their casing variants.
pub struct WordTable {
    table: RawTable,
    len: usize,
    resize_policy: ResizePolicy,
}

impl Default for WordTable {
    fn default() -> WordTable {
        WordTable::new()
    }
}

impl WordTable {
    /// Creates an empty table with one bucket and a random seed.
    pub fn new() -> WordTable {
        WordTable::with_seed(hasher::random_seed())
    }

    /// Creates an empty table hashing with a fixed `seed`, which makes the
    /// bucket layout and therefore the report order reproducible.
    pub fn with_seed(seed: u32) -> WordTable {
        WordTable::with_policy(seed, ResizePolicy::default())
    }

    pub fn with_policy(seed: u32, resize_policy: ResizePolicy) -> WordTable {
        WordTable {
            table: RawTable::new(seed),
            len: 0,
            resize_policy,
        }
    }

    /// Number of distinct (lowercase) words.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.table.capacity()
    }

    #[inline]
    pub fn seed(&self) -> u32 {
        self.table.seed()
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.bucket_count() as f64
    }

    pub fn resize_policy(&self) -> &ResizePolicy {
        &self.resize_policy
    }

    /// Counts one occurrence of `word`.
    ///
    /// The load factor is checked before the word is looked up, so a table
    /// that is over the threshold grows even when `word` is already present.
    pub fn insert(&mut self, word: &str) {
        debug_assert!(!word.is_empty());
        if self
            .resize_policy
            .should_grow(self.len, self.table.capacity())
        {
            self.grow();
        }
        let key = word.to_lowercase();
        if self.table.record(key, word) {
            trace!("new word {:?}", word);
            self.len += 1;
        }
    }

    fn grow(&mut self) {
        let old_capacity = self.table.capacity();
        self.table.grow();
        debug!(
            "grew word table from {} to {} buckets ({} words)",
            old_capacity,
            self.table.capacity(),
            self.len
        );
    }

    /// Case-insensitive lookup.
    pub fn get(&self, word: &str) -> Option<&Entry> {
        self.table.find(&word.to_lowercase())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.get(word).is_some()
    }

    /// Index of the bucket currently holding `word`, if it was inserted.
    pub fn bucket_of(&self, word: &str) -> Option<usize> {
        let key = word.to_lowercase();
        if self.table.find(&key).is_some() {
            Some(self.table.index_of(&key))
        } else {
            None
        }
    }

    /// Non-empty chains with their bucket index, ascending.
    pub fn chains<'a>(&'a self) -> impl Iterator<Item = (usize, &'a Chain)> + 'a {
        self.table.chains()
    }

    /// Every entry, in the order the report lists them.
    pub fn iter<'a>(&'a self) -> impl Iterator<Item = &'a Entry> + 'a {
        self.table.chains().flat_map(|(_, chain)| chain.iter())
    }

    /// The full report: a `Words <n>` header, a blank line, then every
    /// non-empty chain in bucket order, each followed by a newline.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for WordTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Words {}\n\n", self.len)?;
        for (_, chain) in self.table.chains() {
            writeln!(f, "{}", chain)?;
        }
        Ok(())
    }
}

impl fmt::Debug for WordTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("WordTable")
            .field("len", &self.len)
            .field("bucket_count", &self.bucket_count())
            .field("seed", &self.seed())
            .finish()
    }
}

impl<'a> Extend<&'a str> for WordTable {
    fn extend<T: IntoIterator<Item = &'a str>>(&mut self, iter: T) {
        for word in iter {
            self.insert(word);
        }
    }
}

impl<'a> FromIterator<&'a str> for WordTable {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> WordTable {
        let mut table = WordTable::new();
        table.extend(iter);
        table
    }
}
