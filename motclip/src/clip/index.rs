//! Node name → index resolution

use super::Clip;
use crate::format::{MAX_NAME_LEN, read_pod};

/// Node count above which [`LookupStrategy::Auto`] uses the hash table
pub const HASH_LOOKUP_THRESHOLD: usize = 20;

const FNV_OFFSET_BASIS: u32 = 2166136261;
const FNV_PRIME: u32 = 16777619;

/// 32-bit FNV hash of a node name (multiply, then xor each byte).
///
/// The node table and hash table of a clip are sorted by this value.
pub fn name_hash(name: &[u8]) -> u32 {
    name.iter().fold(FNV_OFFSET_BASIS, |h, &c| {
        h.wrapping_mul(FNV_PRIME) ^ c as u32
    })
}

/// How [`Clip::find_node_with`] searches the node table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStrategy {
    /// Hashed when the clip has a hash table and more than `threshold` nodes
    Auto { threshold: usize },
    /// Scan names in table order
    Linear,
    /// Binary search the hash table; falls back to a scan when the clip has none
    Hashed,
}

impl Default for LookupStrategy {
    fn default() -> Self {
        LookupStrategy::Auto {
            threshold: HASH_LOOKUP_THRESHOLD,
        }
    }
}

impl Clip<'_> {
    /// Index of the node called `name`
    pub fn find_node(&self, name: &str) -> Option<usize> {
        self.find_node_with(name, LookupStrategy::default())
    }

    pub fn find_node_with(&self, name: &str, strategy: LookupStrategy) -> Option<usize> {
        let name = name.as_bytes();
        // Names longer than MAX_NAME_LEN never match, whatever the blob stores
        if name.len() > MAX_NAME_LEN {
            return None;
        }
        let hashed = self.has_hash_table()
            && match strategy {
                LookupStrategy::Auto { threshold } => self.node_count() > threshold,
                LookupStrategy::Linear => false,
                LookupStrategy::Hashed => true,
            };
        if hashed {
            self.find_hashed(name)
        } else {
            self.find_linear(name)
        }
    }

    fn find_linear(&self, name: &[u8]) -> Option<usize> {
        (0..self.node_count()).find(|&node| self.node_name(node) == Some(name))
    }

    #[inline]
    fn hash_at(&self, index: usize) -> u32 {
        let at = self.header().hash_offset as usize + index * size_of::<u32>();
        read_pod(self.bytes(), at).unwrap_or(0)
    }

    fn find_hashed(&self, name: &[u8]) -> Option<usize> {
        let count = self.node_count();
        if count == 0 {
            return None;
        }

        // Last index whose hash is <= h
        let h = name_hash(name);
        let mut base = 0;
        let mut n = count;
        while n > 1 {
            let half = n / 2;
            if self.hash_at(base + half) <= h {
                base += half;
            }
            n -= half;
        }
        if self.hash_at(base) != h {
            return None;
        }

        let mut first = base;
        while first > 0 && self.hash_at(first - 1) == h {
            first -= 1;
        }
        (first..=base).find(|&node| {
            self.node_name(node)
                .is_some_and(|stored| stored.len() == name.len() && stored == name)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_hash_known_values() {
        assert_eq!(name_hash(b""), FNV_OFFSET_BASIS);
        assert_eq!(name_hash(b"a"), FNV_OFFSET_BASIS.wrapping_mul(FNV_PRIME) ^ 0x61);
        assert_ne!(name_hash(b"ab"), name_hash(b"ba"));
    }

    #[test]
    fn test_name_hash_uses_unsigned_bytes() {
        let h = name_hash(&[0xFF]);
        assert_eq!(h, FNV_OFFSET_BASIS.wrapping_mul(FNV_PRIME) ^ 0xFF);
    }

    #[test]
    fn test_default_strategy() {
        assert_eq!(
            LookupStrategy::default(),
            LookupStrategy::Auto { threshold: 20 }
        );
    }
}
