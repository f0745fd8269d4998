//! 32-bit MurmurHash3 (x86 variant) with an explicit seed.
//!
//! `murmur3_32` is the one-shot form used by `WordTable` to place keys.
//! `Murmur3Hasher` computes the same value incrementally so the hash can be
//! plugged into std collections through `Murmur3BuildHasher`.

use byteorder::{ByteOrder, LittleEndian};
use rand::random;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hasher};

const C1: u32 = 0xcc9e_2d51;
const C2: u32 = 0x1b87_3593;
const M: u32 = 5;
const N: u32 = 0xe654_6b64;
const BLOCK_SIZE: usize = 4;

/// Draws a fresh uniformly random seed.
#[inline]
pub fn random_seed() -> u32 {
    random::<u32>()
}

#[inline(always)]
fn mix_k1(k1: u32) -> u32 {
    k1.wrapping_mul(C1).rotate_left(15).wrapping_mul(C2)
}

#[inline(always)]
fn mix_h1(h1: u32, k1: u32) -> u32 {
    (h1 ^ mix_k1(k1))
        .rotate_left(13)
        .wrapping_mul(M)
        .wrapping_add(N)
}

/// Forces all bits of `h` to avalanche.
#[inline]
pub fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

/// Folds the 0..3 trailing bytes and the total length into `h1`.
#[inline]
fn finalize(mut h1: u32, tail: &[u8], len: usize) -> u32 {
    debug_assert!(tail.len() < BLOCK_SIZE);
    if !tail.is_empty() {
        let mut k1: u32 = 0;
        for (i, &byte) in tail.iter().enumerate() {
            k1 ^= u32::from(byte) << (8 * i);
        }
        h1 ^= mix_k1(k1);
    }
    // The reference implementation only mixes in the low 32 bits of the length.
    fmix32(h1 ^ len as u32)
}

/// Hashes `bytes` with MurmurHash3_x86_32, starting from `seed`.
#[inline]
pub fn murmur3_32(seed: u32, bytes: &[u8]) -> u32 {
    let rounded_end = bytes.len() & !(BLOCK_SIZE - 1);
    let mut h1 = seed;
    for block in bytes[..rounded_end].chunks(BLOCK_SIZE) {
        h1 = mix_h1(h1, LittleEndian::read_u32(block));
    }
    finalize(h1, &bytes[rounded_end..], bytes.len())
}

/// Streaming MurmurHash3. Bytes that do not complete a block are kept
/// until the next `write`, so any split of the input hashes the same.
#[derive(Debug, Clone)]
pub struct Murmur3Hasher {
    h1: u32,
    tail: [u8; BLOCK_SIZE],
    tail_len: usize,
    len: usize,
}

impl Default for Murmur3Hasher {
    #[inline]
    fn default() -> Murmur3Hasher {
        Murmur3Hasher::with_seed(0)
    }
}

impl Murmur3Hasher {
    #[inline]
    pub fn with_seed(seed: u32) -> Murmur3Hasher {
        Murmur3Hasher {
            h1: seed,
            tail: [0; BLOCK_SIZE],
            tail_len: 0,
            len: 0,
        }
    }

    /// The 32-bit hash of everything written so far.
    #[inline]
    pub fn finish32(&self) -> u32 {
        finalize(self.h1, &self.tail[..self.tail_len], self.len)
    }
}

impl Hasher for Murmur3Hasher {
    #[inline]
    fn finish(&self) -> u64 {
        u64::from(self.finish32())
    }

    fn write(&mut self, mut bytes: &[u8]) {
        self.len += bytes.len();

        if self.tail_len > 0 {
            let take = (BLOCK_SIZE - self.tail_len).min(bytes.len());
            self.tail[self.tail_len..self.tail_len + take].copy_from_slice(&bytes[..take]);
            self.tail_len += take;
            bytes = &bytes[take..];
            if self.tail_len < BLOCK_SIZE {
                return;
            }
            self.h1 = mix_h1(self.h1, LittleEndian::read_u32(&self.tail));
            self.tail_len = 0;
        }

        let rounded_end = bytes.len() & !(BLOCK_SIZE - 1);
        for block in bytes[..rounded_end].chunks(BLOCK_SIZE) {
            self.h1 = mix_h1(self.h1, LittleEndian::read_u32(block));
        }
        let rest = &bytes[rounded_end..];
        self.tail[..rest.len()].copy_from_slice(rest);
        self.tail_len = rest.len();
    }
}

/// Builds `Murmur3Hasher`s that all share one seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Murmur3BuildHasher {
    seed: u32,
}

impl Murmur3BuildHasher {
    pub fn with_seed(seed: u32) -> Murmur3BuildHasher {
        Murmur3BuildHasher { seed }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for Murmur3BuildHasher {
    /// Every default builder gets its own random seed.
    fn default() -> Murmur3BuildHasher {
        Murmur3BuildHasher::with_seed(random_seed())
    }
}

impl BuildHasher for Murmur3BuildHasher {
    type Hasher = Murmur3Hasher;

    #[inline]
    fn build_hasher(&self) -> Murmur3Hasher {
        Murmur3Hasher::with_seed(self.seed)
    }
}

/// A std `HashMap` hashed with seeded MurmurHash3.
pub type Murmur3HashMap<K, V> = HashMap<K, V, Murmur3BuildHasher>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_murmur3_against_reference_impl() {
        assert_eq!(murmur3_32(0, b""), 0);
        assert_eq!(murmur3_32(1, b""), 0x514e_28b7);
        assert_eq!(murmur3_32(0xffff_ffff, b""), 0x81f1_6f39);
        assert_eq!(murmur3_32(0, b"test"), 0xba6b_d213);
        assert_eq!(murmur3_32(0, b"Hello, world!"), 0xc036_3e43);
        assert_eq!(
            murmur3_32(0, b"The quick brown fox jumps over the lazy dog"),
            0x2e4f_f723
        );
        assert_eq!(murmur3_32(0x9747_b28c, b"aaaa"), 0x5a97_808a);
    }

    #[test]
    fn test_murmur3_is_deterministic() {
        let seed = random_seed();
        for word in &["", "a", "ab", "abc", "abcd", "abcde", "heiß"] {
            assert_eq!(
                murmur3_32(seed, word.as_bytes()),
                murmur3_32(seed, word.as_bytes())
            );
        }
    }

    #[test]
    fn test_murmur3_seed_changes_hash() {
        let words = ["the", "quick", "brown", "fox"];
        let differing = words
            .iter()
            .filter(|w| murmur3_32(1, w.as_bytes()) != murmur3_32(2, w.as_bytes()))
            .count();
        assert_eq!(differing, words.len());
    }

    #[test]
    fn test_murmur3_collisions() {
        let mut set: HashSet<u32> = HashSet::default();
        for i in 0..1_000 {
            let s = format!("hash{}", i);
            set.insert(murmur3_32(0, s.as_bytes()));
        }
        assert_eq!(set.len(), 1_000);
    }

    #[test]
    fn test_murmur3_avalanche() {
        // Flipping any single input bit should flip about half of the output bits.
        let mut flipped_bits = 0u64;
        let mut samples = 0u64;
        for i in 0..200u32 {
            let mut key = format!("word{}", i).into_bytes();
            let base = murmur3_32(0x1234_5678, &key);
            for bit in 0..8 {
                key[0] ^= 1 << bit;
                flipped_bits += u64::from((base ^ murmur3_32(0x1234_5678, &key)).count_ones());
                key[0] ^= 1 << bit;
                samples += 1;
            }
        }
        let average = flipped_bits as f64 / samples as f64;
        assert!(average > 14.0 && average < 18.0, "average {}", average);
    }

    #[test]
    fn test_fmix32_fixed_point() {
        assert_eq!(fmix32(0), 0);
        assert_ne!(fmix32(1), 1);
    }

    #[test]
    fn test_streaming_matches_one_shot() {
        let text = b"The quick brown fox jumps over the lazy dog";
        for split in 0..text.len() {
            let mut hasher = Murmur3Hasher::with_seed(42);
            hasher.write(&text[..split]);
            hasher.write(&text[split..]);
            assert_eq!(hasher.finish32(), murmur3_32(42, text));
        }

        let mut bytewise = Murmur3Hasher::with_seed(7);
        for byte in text.iter() {
            bytewise.write(&[*byte]);
        }
        assert_eq!(bytewise.finish(), u64::from(murmur3_32(7, text)));
    }

    #[test]
    fn test_build_hasher_map() {
        let mut map: Murmur3HashMap<String, u32> = Murmur3HashMap::default();
        *map.entry("cat".to_string()).or_insert(0) += 1;
        *map.entry("cat".to_string()).or_insert(0) += 1;
        map.insert("dog".to_string(), 1);
        assert_eq!(map.get("cat"), Some(&2));
        assert_eq!(map.len(), 2);

        let builder = Murmur3BuildHasher::with_seed(99);
        let mut a = builder.build_hasher();
        let mut b = builder.build_hasher();
        a.write(b"same");
        b.write(b"same");
        assert_eq!(a.finish(), b.finish());
    }
}
