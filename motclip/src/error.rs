//! Clip validation errors

use crate::format::TrackKind;

/// Reasons a byte buffer is rejected as a clip
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipError {
    #[error("Buffer too small for a clip header: {0} bytes")]
    TooSmall(usize),

    #[error("Invalid clip magic: {0:02X?}")]
    BadMagic([u8; 4]),

    #[error("Clip declares {declared} bytes but buffer holds {actual}")]
    Truncated { declared: usize, actual: usize },

    #[error("Node table ({nodes} nodes) runs past the end of the clip")]
    NodeTableOutOfBounds { nodes: u32 },

    #[error("Hash table at offset {offset:#x} runs past the end of the clip")]
    HashTableOutOfBounds { offset: u32 },

    #[error("Node {node} {} samples at offset {offset:#x} run past the end of the clip", .kind.name())]
    TrackOutOfBounds {
        node: usize,
        kind: TrackKind,
        offset: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ClipError::BadMagic(*b"ABCD").to_string(),
            "Invalid clip magic: [41, 42, 43, 44]"
        );
        assert_eq!(
            ClipError::TrackOutOfBounds {
                node: 2,
                kind: TrackKind::Rotation,
                offset: 0x200
            }
            .to_string(),
            "Node 2 rot samples at offset 0x200 run past the end of the clip"
        );
    }
}
