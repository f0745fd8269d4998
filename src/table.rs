use std::iter;
use std::mem;

use chain::{Chain, Node};
use entry::Entry;
use hasher::murmur3_32;

/// The bucket array. Its length is always a power of two, so taking a hash
/// modulo the length is a mask of the low bits.
pub(crate) struct RawTable {
    buckets: Vec<Option<Chain>>,
    seed: u32,
}

fn empty_buckets(len: usize) -> Vec<Option<Chain>> {
    debug_assert!(len.is_power_of_two());
    iter::repeat_with(|| None).take(len).collect()
}

impl RawTable {
    pub(crate) fn new(seed: u32) -> RawTable {
        RawTable {
            buckets: empty_buckets(1),
            seed,
        }
    }

    #[inline]
    pub(crate) fn seed(&self) -> u32 {
        self.seed
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    fn mask(&self) -> usize {
        self.buckets.len() - 1
    }

    #[inline]
    pub(crate) fn index_of(&self, key: &str) -> usize {
        murmur3_32(self.seed, key.as_bytes()) as usize & self.mask()
    }

    pub(crate) fn find(&self, key: &str) -> Option<&Entry> {
        self.buckets[self.index_of(key)]
            .as_ref()
            .and_then(|chain| chain.find(key))
    }

    /// Records `surface` under the lowercase `key`, creating the entry if the
    /// key is new. Returns whether an entry was created.
    pub(crate) fn record(&mut self, key: String, surface: &str) -> bool {
        let index = self.index_of(&key);
        let chain = self.buckets[index].get_or_insert_with(Chain::new);
        if let Some(entry) = chain.find_mut(&key) {
            entry.record_occurrence(surface);
            return false;
        }
        chain.push_front(Entry::with_key(key, surface));
        true
    }

    /// Non-empty chains in ascending bucket order.
    pub(crate) fn chains<'a>(&'a self) -> impl Iterator<Item = (usize, &'a Chain)> + 'a {
        self.buckets
            .iter()
            .enumerate()
            .filter_map(|(index, bucket)| bucket.as_ref().map(|chain| (index, chain)))
    }

    /// Doubles the bucket array and rehashes every entry on its own.
    ///
    /// Entries are relinked node by node, never copied. With a doubled
    /// power-of-two length, old bucket `i` only feeds new buckets `i` and
    /// `i + old_len`, so each new chain keeps the relative order it had.
    #[inline(never)]
    #[cold]
    pub(crate) fn grow(&mut self) {
        let new_len = self.capacity() * 2;
        let old_buckets = mem::replace(&mut self.buckets, empty_buckets(new_len));

        let mut nodes: Vec<Box<Node>> = Vec::new();
        for mut chain in old_buckets.into_iter().filter_map(|bucket| bucket) {
            while let Some(node) = chain.pop_node() {
                nodes.push(node);
            }
            // Push back tail first so the old head stays in front.
            while let Some(node) = nodes.pop() {
                let index = self.index_of(node.entry().key());
                self.buckets[index]
                    .get_or_insert_with(Chain::new)
                    .push_node(node);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RawTable;

    fn assert_placement(table: &RawTable) {
        for (index, chain) in table.chains() {
            assert!(!chain.is_empty());
            for entry in chain.iter() {
                assert_eq!(table.index_of(entry.key()), index);
            }
        }
    }

    #[test]
    fn test_new_table_has_one_bucket() {
        let table = RawTable::new(7);
        assert_eq!(table.capacity(), 1);
        assert_eq!(table.seed(), 7);
        assert_eq!(table.index_of("anything"), 0);
        assert_eq!(table.chains().count(), 0);
    }

    #[test]
    fn test_record() {
        let mut table = RawTable::new(3);
        assert!(table.record("cat".to_string(), "Cat"));
        assert!(!table.record("cat".to_string(), "cat"));
        assert!(table.record("dog".to_string(), "dog"));
        let cat = table.find("cat").unwrap();
        assert_eq!(cat.count(), 2);
        assert_eq!(cat.variants(), &["Cat", "cat"]);
        assert!(table.find("Cat").is_none());
        assert!(table.find("bird").is_none());
    }

    #[test]
    fn test_grow_rehashes_every_entry() {
        let mut table = RawTable::new(0xdead_beef);
        for i in 0..64 {
            table.record(format!("word{}", i), &format!("Word{}", i));
        }
        // All 64 entries share the single bucket until the first growth.
        assert_eq!(table.chains().count(), 1);

        for expected in &[2, 4, 8, 16, 32, 64, 128] {
            table.grow();
            assert_eq!(table.capacity(), *expected);
            assert_placement(&table);
            let total: usize = table.chains().map(|(_, chain)| chain.len()).sum();
            assert_eq!(total, 64);
        }
        for i in 0..64 {
            assert_eq!(table.find(&format!("word{}", i)).map(|e| e.count()), Some(1));
        }
    }

    #[test]
    fn test_grow_keeps_chain_order() {
        let mut table = RawTable::new(11);
        for word in &["a", "b", "c", "d", "e", "f", "g", "h"] {
            table.record(word.to_string(), word);
        }
        let before: Vec<String> = table
            .chains()
            .flat_map(|(_, chain)| chain.iter())
            .map(|entry| entry.key().to_string())
            .collect();
        assert_eq!(before, vec!["h", "g", "f", "e", "d", "c", "b", "a"]);

        table.grow();
        for (_, chain) in table.chains() {
            let keys: Vec<&str> = chain.iter().map(|entry| entry.key()).collect();
            let in_old_order: Vec<&str> = before
                .iter()
                .map(|key| key.as_str())
                .filter(|key| keys.contains(key))
                .collect();
            assert_eq!(keys, in_old_order);
        }
    }
}
