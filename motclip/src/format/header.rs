//! Clip header and the fixed-length name string

use bytemuck::{Pod, Zeroable};

use super::{CLIP_MAGIC, Record};

/// Capacity of a fixed name field in bytes, including the length prefix
pub const FIXED_NAME_SIZE: usize = 0x40;

/// Longest name a fixed name field holds; lookups reject anything longer
pub const MAX_NAME_LEN: usize = FIXED_NAME_SIZE - 2;

/// Length-prefixed, zero-padded name (1 length byte + up to 62 characters + NUL)
#[derive(Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
#[repr(transparent)]
pub struct FixedName(pub [u8; FIXED_NAME_SIZE]);

impl FixedName {
    /// Build a name field. Input longer than [`MAX_NAME_LEN`] is truncated.
    pub fn new(name: &str) -> Self {
        let mut raw = [0u8; FIXED_NAME_SIZE];
        let bytes = name.as_bytes();
        let len = bytes.len().min(MAX_NAME_LEN);
        raw[0] = len as u8;
        raw[1..1 + len].copy_from_slice(&bytes[..len]);
        Self(raw)
    }

    /// Stored length byte
    #[inline]
    pub fn len_field(&self) -> u8 {
        self.0[0]
    }

    /// Name bytes: bounded by the length prefix, the field size, and the first NUL
    pub fn as_bytes(&self) -> &[u8] {
        let chars = &self.0[1..];
        let len = (self.len_field() as usize).min(chars.len());
        let chars = &chars[..len];
        match chars.iter().position(|&c| c == 0) {
            Some(end) => &chars[..end],
            None => chars,
        }
    }

    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(self.as_bytes()).into_owned()
    }
}

impl Default for FixedName {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl std::fmt::Debug for FixedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.to_string_lossy())
    }
}

/// Clip header (96 bytes)
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
#[repr(C)]
pub struct ClipHeader {
    /// Format tag, `MCLP`
    pub magic: [u8; 4],
    /// Total blob size in bytes
    pub total_size: u32,
    /// Frames per second
    pub sample_rate: f32,
    pub frame_count: u32,
    pub node_count: u32,
    /// Byte offset of the sorted node-name hash table (0 = absent)
    pub hash_offset: u32,
    /// Byte offset of the eval-info extension block (0 = absent)
    pub ext_offset: u32,
    /// Reserved
    pub pad: u32,
    /// Clip display name
    pub name: FixedName,
}

impl Record for ClipHeader {}

impl ClipHeader {
    pub fn new(name: &str, sample_rate: f32, frame_count: u32, node_count: u32) -> Self {
        Self {
            magic: CLIP_MAGIC,
            total_size: 0,
            sample_rate,
            frame_count,
            node_count,
            hash_offset: 0,
            ext_offset: 0,
            pad: 0,
            name: FixedName::new(name),
        }
    }

    /// Read header from the start of a blob
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        Self::read_at(bytes, 0)
    }

    /// Check the format tag
    pub fn has_valid_magic(&self) -> bool {
        self.magic == CLIP_MAGIC
    }

    /// Clip length in seconds
    pub fn duration(&self) -> f32 {
        if self.sample_rate > 0.0 {
            self.frame_count as f32 / self.sample_rate
        } else {
            0.0
        }
    }

    /// Byte offset one past the node table
    pub fn node_table_end(&self) -> Option<usize> {
        (self.node_count as usize)
            .checked_mul(super::NodeRecord::SIZE)?
            .checked_add(Self::SIZE)
    }
}
