//! Fixed-size record access for the clip layout.
//!
//! Every structure in a clip blob is a plain-old-data record addressed by byte
//! offset from the start of the blob. `Record` gives them a uniform
//! read/serialize interface. Reads copy out of the byte slice, so the blob
//! needs no particular alignment in memory.

use bytemuck::Pod;

/// Read a POD value at `offset`, or `None` if it would run past the end of `bytes`
#[inline]
pub fn read_pod<T: Pod>(bytes: &[u8], offset: usize) -> Option<T> {
    let end = offset.checked_add(size_of::<T>())?;
    bytes.get(offset..end).map(bytemuck::pod_read_unaligned)
}

/// Trait for binary-serializable clip records.
///
/// # Example
///
/// ```
/// use motclip::format::{ClipHeader, Record};
///
/// let header = ClipHeader::new("walk", 30.0, 48, 12);
/// let bytes = header.serialize();
/// let parsed = ClipHeader::read_at(&bytes, 0).unwrap();
/// assert_eq!(parsed.frame_count, 48);
/// ```
pub trait Record: Pod {
    /// Size of the serialized record in bytes.
    const SIZE: usize = size_of::<Self>();

    /// Read the record starting at `offset`.
    ///
    /// Returns `None` if the record does not fit in `bytes`.
    fn read_at(bytes: &[u8], offset: usize) -> Option<Self> {
        read_pod(bytes, offset)
    }

    /// Serialized bytes in native byte order.
    fn serialize(&self) -> Vec<u8> {
        bytemuck::bytes_of(self).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{ChannelMapEntry, ClipHeader, EvalInfoHeader, NodeRecord, TrackInfo};

    #[test]
    fn test_read_pod_bounds() {
        let bytes = 7u32.to_ne_bytes();
        assert_eq!(read_pod::<u32>(&bytes, 0), Some(7));
        assert_eq!(read_pod::<u32>(&bytes, 1), None);
        assert_eq!(read_pod::<u32>(&bytes, usize::MAX), None);
    }

    #[test]
    fn test_read_pod_unaligned() {
        let mut bytes = vec![0u8; 9];
        bytes[1..5].copy_from_slice(&1.5f32.to_ne_bytes());
        bytes[5..9].copy_from_slice(&0xDEAD_BEEFu32.to_ne_bytes());
        assert_eq!(read_pod::<f32>(&bytes, 1), Some(1.5));
        assert_eq!(read_pod::<u32>(&bytes, 5), Some(0xDEAD_BEEF));
    }

    /// Demonstrates generic function using the trait
    fn record_size<T: Record>() -> usize {
        T::SIZE
    }

    #[test]
    fn test_record_sizes() {
        assert_eq!(record_size::<ClipHeader>(), 0x60);
        assert_eq!(record_size::<NodeRecord>(), 0xB0);
        assert_eq!(record_size::<TrackInfo>(), 0x20);
        assert_eq!(record_size::<EvalInfoHeader>(), 36);
        assert_eq!(record_size::<ChannelMapEntry>(), 4);
    }

    #[test]
    fn test_read_at_insufficient_bytes() {
        assert!(ClipHeader::read_at(&[0; 0x5F], 0).is_none());
        assert!(NodeRecord::read_at(&[0; 0xB0], 1).is_none());
        assert!(TrackInfo::read_at(&[0; 0x1F], 0).is_none());
    }
}
