use std::fmt;

/// One distinct word, keyed by its lowercase form.
///
/// Every casing the word was seen under is kept once, in the order it
/// first appeared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    key: String,
    count: usize,
    variants: Vec<String>,
    has_variants: bool,
}

impl Entry {
    /// Creates the entry for `surface.to_lowercase()` and records `surface`
    /// as its first occurrence.
    pub fn new(surface: &str) -> Entry {
        Entry::with_key(surface.to_lowercase(), surface)
    }

    /// `key` must already be the lowercase form of `surface`.
    pub(crate) fn with_key(key: String, surface: &str) -> Entry {
        debug_assert_eq!(key, surface.to_lowercase());
        let mut entry = Entry {
            key,
            count: 0,
            variants: Vec::with_capacity(1),
            has_variants: false,
        };
        entry.record_occurrence(surface);
        entry
    }

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    /// True once any recorded surface form differs from the key.
    #[inline]
    pub fn has_variants(&self) -> bool {
        self.has_variants
    }

    /// Counts one more occurrence of this word written as `surface`.
    ///
    /// Variant sets stay tiny in practice, a linear scan beats hashing here.
    pub fn record_occurrence(&mut self, surface: &str) {
        self.count += 1;
        if !self.variants.iter().any(|v| v == surface) {
            self.variants.push(surface.to_owned());
        }
        if surface != self.key {
            self.has_variants = true;
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.has_variants {
            write!(f, "{} (", self.key)?;
            for (i, variant) in self.variants.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                f.write_str(variant)?;
            }
            write!(f, ") - {}", self.count)
        } else {
            write!(f, "{} - {}", self.key, self.count)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Entry;

    #[test]
    fn test_new_records_first_occurrence() {
        let entry = Entry::new("Cat");
        assert_eq!(entry.key(), "cat");
        assert_eq!(entry.count(), 1);
        assert_eq!(entry.variants(), &["Cat".to_string()][..]);
        assert!(entry.has_variants());
    }

    #[test]
    fn test_casing_variants_merge() {
        let mut entry = Entry::new("Cat");
        entry.record_occurrence("cat");
        entry.record_occurrence("CAT");
        entry.record_occurrence("cat");
        assert_eq!(entry.count(), 4);
        assert_eq!(entry.variants(), &["Cat", "cat", "CAT"]);
        assert_eq!(entry.to_string(), "cat (Cat cat CAT) - 4");
    }

    #[test]
    fn test_single_casing_renders_short_form() {
        let mut entry = Entry::new("dog");
        entry.record_occurrence("dog");
        entry.record_occurrence("dog");
        assert_eq!(entry.count(), 3);
        assert_eq!(entry.variants(), &["dog"]);
        assert!(!entry.has_variants());
        assert_eq!(entry.to_string(), "dog - 3");
    }

    #[test]
    fn test_flag_sticks_after_variant() {
        let mut entry = Entry::new("dog");
        entry.record_occurrence("Dog");
        entry.record_occurrence("dog");
        assert!(entry.has_variants());
        assert_eq!(entry.to_string(), "dog (dog Dog) - 3");
    }
}
