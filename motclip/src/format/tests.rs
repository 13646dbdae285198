//! Layout tests over blobs produced by the writer

use glam::Vec3;

use super::*;
use crate::clip::name_hash;

fn two_node_blob() -> Vec<u8> {
    ClipWriter::new("walk", 24.0, 3)
        .node(NodeSpec::new("root").pos(TrackSpec::constant(Vec3::new(0.0, 1.0, 0.0))))
        .node(
            NodeSpec::new("leg_L")
                .xform_order(XformOrder::Trs)
                .rot_order(RotOrder::Zxy)
                .pos(TrackSpec::sampled(&[
                    Vec3::new(0.0, 1.0, 2.0),
                    Vec3::new(0.5, 1.0, 2.0),
                    Vec3::new(1.0, 1.0, 2.0),
                ])),
        )
        .build()
        .unwrap()
}

fn node_at(bytes: &[u8], index: usize) -> NodeRecord {
    NodeRecord::read_at(bytes, ClipHeader::SIZE + index * NodeRecord::SIZE).unwrap()
}

#[test]
fn test_header_fields() {
    let bytes = two_node_blob();
    let header = ClipHeader::from_bytes(&bytes).unwrap();
    assert!(header.has_valid_magic());
    assert_eq!(header.name.as_bytes(), b"walk");
    assert_eq!(header.sample_rate, 24.0);
    assert_eq!(header.frame_count, 3);
    assert_eq!(header.node_count, 2);
    assert_eq!(header.total_size as usize, bytes.len());
    assert_eq!(header.hash_offset as usize, header.node_table_end().unwrap());
}

#[test]
fn test_hash_table_matches_node_table() {
    let bytes = two_node_blob();
    let header = ClipHeader::from_bytes(&bytes).unwrap();
    let mut prev = 0u32;
    for i in 0..header.node_count as usize {
        let stored: u32 = read_pod(&bytes, header.hash_offset as usize + i * 4).unwrap();
        let node = node_at(&bytes, i);
        assert_eq!(stored, name_hash(node.name.as_bytes()));
        assert!(stored >= prev);
        prev = stored;
    }
}

#[test]
fn test_sampled_track_layout() {
    let bytes = two_node_blob();
    let header = ClipHeader::from_bytes(&bytes).unwrap();
    let leg = (0..2)
        .map(|i| node_at(&bytes, i))
        .find(|n| n.name.as_bytes() == b"leg_L")
        .unwrap();

    assert_eq!(leg.xform_order(), XformOrder::Trs);
    assert_eq!(leg.rot_order(), RotOrder::Zxy);

    let pos = leg.track(TrackKind::Position);
    assert_eq!(pos.src_mask, 0b111);
    assert_eq!(pos.data_mask, 0b001);
    assert_eq!(pos.stride_hint, 1);
    assert_eq!(pos.min(), Vec3::new(0.0, 1.0, 2.0));
    assert_eq!(pos.max(), Vec3::new(1.0, 1.0, 2.0));

    let offset = leg.offset(TrackKind::Position) as usize;
    assert!(offset >= header.ext_offset as usize);
    let xs: Vec<f32> = (0..3)
        .map(|f| read_pod::<f32>(&bytes, offset + f * 4).unwrap())
        .collect();
    assert_eq!(xs, vec![0.0, 0.5, 1.0]);

    assert_eq!(leg.offset(TrackKind::Rotation), 0);
    assert!(!leg.track(TrackKind::Rotation).is_present());
}

#[test]
fn test_constant_track_has_no_samples() {
    let bytes = two_node_blob();
    let root = (0..2)
        .map(|i| node_at(&bytes, i))
        .find(|n| n.name.as_bytes() == b"root")
        .unwrap();
    let pos = root.track(TrackKind::Position);
    assert!(pos.is_constant());
    assert_eq!(root.offset(TrackKind::Position), 0);
    assert_eq!(pos.min(), Vec3::new(0.0, 1.0, 0.0));
}

#[test]
fn test_eval_info_block() {
    let bytes = two_node_blob();
    let header = ClipHeader::from_bytes(&bytes).unwrap();
    let info = EvalInfo::parse(&bytes, header.ext_offset as usize).unwrap();

    assert_eq!(info.track_count(TrackKind::Position), 2);
    assert_eq!(info.channel_count(TrackKind::Position), 6);
    assert_eq!(info.curve_count(TrackKind::Position), 1);
    assert_eq!(info.constant_count(TrackKind::Position), 5);
    assert_eq!(info.channel_count(TrackKind::Rotation), 0);
    assert_eq!(info.len(), 6);

    let curve = info.curves().next().unwrap();
    assert_eq!(curve.track_kind(), Some(TrackKind::Position));
    assert_eq!(curve.axis, 0);
    let leg = node_at(&bytes, curve.node as usize);
    assert_eq!(leg.name.as_bytes(), b"leg_L");
    assert_eq!(info.constants().count(), 5);
}

#[test]
fn test_optional_blocks_omitted() {
    let bytes = ClipWriter::new("bare", 30.0, 1)
        .hash_table(false)
        .eval_info(false)
        .node(NodeSpec::new("a"))
        .build()
        .unwrap();
    let header = ClipHeader::from_bytes(&bytes).unwrap();
    assert_eq!(header.hash_offset, 0);
    assert_eq!(header.ext_offset, 0);
    assert_eq!(bytes.len(), ClipHeader::SIZE + NodeRecord::SIZE);
}
