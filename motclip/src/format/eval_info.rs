//! Extension block describing the animated and constant channels of a clip
//!
//! Located at the header's `ext_offset`. A fixed [`EvalInfoHeader`] is
//! followed by one [`ChannelMapEntry`] per channel: every animated curve first
//! (position, then rotation, then scale), then every constant channel in the
//! same kind order.

use bytemuck::{Pod, Zeroable};

use super::{Record, TrackKind};

/// Per-kind counts (36 bytes)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct EvalInfoHeader {
    /// Nodes carrying a track of each kind
    pub tracks: [u32; 3],
    /// Source channels (axes) of each kind
    pub channels: [u32; 3],
    /// Per-frame curves of each kind
    pub curves: [u32; 3],
}

impl Record for EvalInfoHeader {}

impl EvalInfoHeader {
    pub fn total_channels(&self) -> Option<usize> {
        self.channels
            .iter()
            .try_fold(0usize, |acc, &n| acc.checked_add(n as usize))
    }

    pub fn total_curves(&self) -> Option<usize> {
        self.curves
            .iter()
            .try_fold(0usize, |acc, &n| acc.checked_add(n as usize))
    }
}

/// One channel of the map (4 bytes)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct ChannelMapEntry {
    pub node: u16,
    pub kind: u8,
    pub axis: u8,
}

impl Record for ChannelMapEntry {}

impl ChannelMapEntry {
    pub fn new(node: u16, kind: TrackKind, axis: u8) -> Self {
        Self {
            node,
            kind: kind as u8,
            axis,
        }
    }

    pub fn track_kind(&self) -> Option<TrackKind> {
        TrackKind::from_index(self.kind as usize)
    }
}

/// Borrowed, bounds-checked view of an eval-info block
#[derive(Debug, Clone, Copy)]
pub struct EvalInfo<'a> {
    header: EvalInfoHeader,
    entries: &'a [u8],
}

impl<'a> EvalInfo<'a> {
    /// Parse the block at `offset`. `None` if the header or the channel map
    /// does not fit, or the curve counts exceed the channel counts.
    pub fn parse(bytes: &'a [u8], offset: usize) -> Option<Self> {
        let header = EvalInfoHeader::read_at(bytes, offset)?;
        if header
            .curves
            .iter()
            .zip(header.channels.iter())
            .any(|(curves, channels)| curves > channels)
        {
            return None;
        }
        let start = offset.checked_add(EvalInfoHeader::SIZE)?;
        let len = header
            .total_channels()?
            .checked_mul(ChannelMapEntry::SIZE)?;
        let end = start.checked_add(len)?;
        let entries = bytes.get(start..end)?;
        Some(Self { header, entries })
    }

    pub fn header(&self) -> &EvalInfoHeader {
        &self.header
    }

    pub fn track_count(&self, kind: TrackKind) -> u32 {
        self.header.tracks[kind.index()]
    }

    pub fn channel_count(&self, kind: TrackKind) -> u32 {
        self.header.channels[kind.index()]
    }

    pub fn curve_count(&self, kind: TrackKind) -> u32 {
        self.header.curves[kind.index()]
    }

    /// Channels of `kind` that hold a single value for the whole clip
    pub fn constant_count(&self, kind: TrackKind) -> u32 {
        self.channel_count(kind) - self.curve_count(kind)
    }

    /// Total number of map entries
    pub fn len(&self) -> usize {
        self.entries.len() / ChannelMapEntry::SIZE
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, index: usize) -> Option<ChannelMapEntry> {
        ChannelMapEntry::read_at(self.entries, index.checked_mul(ChannelMapEntry::SIZE)?)
    }

    pub fn entries(&self) -> impl Iterator<Item = ChannelMapEntry> + 'a {
        self.entries
            .chunks_exact(ChannelMapEntry::SIZE)
            .map(bytemuck::pod_read_unaligned)
    }

    /// Animated channels, in map order
    pub fn curves(&self) -> impl Iterator<Item = ChannelMapEntry> + 'a {
        let n = self.header.total_curves().unwrap_or(0);
        self.entries().take(n)
    }

    /// Constant channels, in map order
    pub fn constants(&self) -> impl Iterator<Item = ChannelMapEntry> + 'a {
        let n = self.header.total_curves().unwrap_or(0);
        self.entries().skip(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(header: EvalInfoHeader, entries: &[ChannelMapEntry]) -> Vec<u8> {
        let mut bytes = vec![0u8; 8];
        bytes.extend(header.serialize());
        for e in entries {
            bytes.extend(e.serialize());
        }
        bytes
    }

    #[test]
    fn test_parse_splits_curves_and_constants() {
        let header = EvalInfoHeader {
            tracks: [1, 1, 0],
            channels: [3, 1, 0],
            curves: [1, 1, 0],
        };
        let entries = [
            ChannelMapEntry::new(0, TrackKind::Position, 0),
            ChannelMapEntry::new(1, TrackKind::Rotation, 2),
            ChannelMapEntry::new(0, TrackKind::Position, 1),
            ChannelMapEntry::new(0, TrackKind::Position, 2),
        ];
        let bytes = block(header, &entries);

        let info = EvalInfo::parse(&bytes, 8).unwrap();
        assert_eq!(info.len(), 4);
        assert_eq!(info.constant_count(TrackKind::Position), 2);
        assert_eq!(info.track_count(TrackKind::Scale), 0);

        let curves: Vec<_> = info.curves().collect();
        assert_eq!(curves, entries[..2]);
        let constants: Vec<_> = info.constants().collect();
        assert_eq!(constants, entries[2..]);

        assert_eq!(info.entry(1).unwrap().track_kind(), Some(TrackKind::Rotation));
        assert!(info.entry(4).is_none());
    }

    #[test]
    fn test_parse_rejects_truncated_map() {
        let header = EvalInfoHeader {
            tracks: [1, 0, 0],
            channels: [3, 0, 0],
            curves: [3, 0, 0],
        };
        let mut bytes = block(header, &[ChannelMapEntry::default(); 3]);
        assert!(EvalInfo::parse(&bytes, 8).is_some());
        bytes.pop();
        assert!(EvalInfo::parse(&bytes, 8).is_none());
    }

    #[test]
    fn test_parse_rejects_more_curves_than_channels() {
        let header = EvalInfoHeader {
            tracks: [1, 0, 0],
            channels: [1, 0, 0],
            curves: [2, 0, 0],
        };
        let bytes = block(header, &[ChannelMapEntry::default()]);
        assert!(EvalInfo::parse(&bytes, 8).is_none());
    }
}
