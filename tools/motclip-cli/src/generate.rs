//! Generate command - write a synthetic looping clip
//!
//! Produces a chain of nodes waving about Z with a phase offset per node. The
//! first node also bobs vertically and pulses in scale, so every track kind
//! and both sampled and constant axes appear in the output.

use std::f32::consts::TAU;
use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use clap::Args;
use glam::{Quat, Vec3};
use motclip::format::{ClipWriter, NodeSpec, TrackSpec};
use motclip::{RotOrder, XformOrder};
use tracing::info;

/// Arguments for the generate command
#[derive(Args)]
pub struct GenerateArgs {
    /// Output clip file
    pub out: PathBuf,

    /// Number of nodes
    #[arg(long, default_value_t = 3)]
    pub nodes: usize,

    /// Number of frames
    #[arg(long, default_value_t = 30)]
    pub frames: u32,

    /// Frames per second
    #[arg(long, default_value_t = 30.0)]
    pub rate: f32,
}

/// Execute the generate command
pub fn execute(args: GenerateArgs) -> Result<()> {
    let bytes = wave_clip_bytes(args.nodes, args.frames, args.rate)?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    std::fs::write(&args.out, &bytes)
        .with_context(|| format!("Failed to write clip: {}", args.out.display()))?;

    info!(
        path = %args.out.display(),
        nodes = args.nodes,
        frames = args.frames,
        bytes = bytes.len(),
        "generated clip"
    );
    println!(
        "Generated {} ({} nodes, {} frames, {} bytes)",
        args.out.display(),
        args.nodes,
        args.frames,
        bytes.len()
    );
    Ok(())
}

/// Build the wave clip in memory
pub fn wave_clip_bytes(node_count: usize, frame_count: u32, rate: f32) -> Result<Vec<u8>> {
    ensure!(node_count > 0, "At least one node is required");
    ensure!(frame_count > 0, "At least one frame is required");
    ensure!(rate > 0.0, "Frame rate must be positive");

    let phase = |frame: u32| (frame as f32 / frame_count as f32) * TAU;

    let mut writer = ClipWriter::new("wave", rate, frame_count);
    for index in 0..node_count {
        let offset = index as f32 * 0.5;
        let rotations: Vec<Quat> = (0..frame_count)
            .map(|f| Quat::from_rotation_z((phase(f) + offset).sin() * 0.3))
            .collect();

        let mut node = NodeSpec::new(format!("node_{index}"))
            .rot_order(RotOrder::Zyx)
            .rot(TrackSpec::rotations(&rotations));

        if index == 0 {
            let positions: Vec<Vec3> = (0..frame_count)
                .map(|f| Vec3::new(0.0, phase(f).sin() * 0.1, 0.0))
                .collect();
            let scales: Vec<Vec3> = (0..frame_count)
                .map(|f| Vec3::splat(1.0 + phase(f).cos() * 0.05))
                .collect();
            node = node
                .xform_order(XformOrder::Srt)
                .pos(TrackSpec::sampled(&positions))
                .scl(TrackSpec::sampled(&scales));
        } else {
            node = node.pos(TrackSpec::constant(Vec3::new(0.0, 1.5, 0.0)));
        }
        writer = writer.node(node);
    }
    writer.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use motclip::{ClipFile, TrackKind};

    #[test]
    fn test_wave_clip_shape() {
        let bytes = wave_clip_bytes(4, 24, 30.0).unwrap();
        let file = ClipFile::from_vec(bytes).unwrap();
        let clip = file.clip();

        assert_eq!(clip.node_count(), 4);
        assert_eq!(clip.frame_count(), 24);
        assert_eq!(clip.track_count(TrackKind::Rotation), 4);
        assert_eq!(clip.track_count(TrackKind::Scale), 1);

        let root = clip.find_node("node_0").unwrap();
        assert!(clip.track_data(root, TrackKind::Scale).is_some());

        let child = clip.find_node("node_2").unwrap();
        assert_eq!(clip.rot_order(child), RotOrder::Zyx);
        assert_eq!(clip.get_pos(child, 5), Vec3::new(0.0, 1.5, 0.0));
        assert!(clip.track_data(child, TrackKind::Position).is_none());
    }

    #[test]
    fn test_wave_clip_loops() {
        let bytes = wave_clip_bytes(2, 16, 30.0).unwrap();
        let file = ClipFile::from_vec(bytes).unwrap();
        let clip = file.clip();
        let node = clip.find_node("node_1").unwrap();
        let a = clip.eval_quat(node, 3.0);
        let b = clip.eval_quat(node, 19.0);
        assert!(a.dot(b).abs() > 1.0 - 1e-6);
    }

    #[test]
    fn test_rejects_empty_clip() {
        assert!(wave_clip_bytes(0, 10, 30.0).is_err());
        assert!(wave_clip_bytes(2, 0, 30.0).is_err());
        assert!(wave_clip_bytes(2, 10, 0.0).is_err());
    }

    #[test]
    fn test_execute_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("wave.mclp");
        execute(GenerateArgs {
            out: out.clone(),
            nodes: 2,
            frames: 8,
            rate: 24.0,
        })
        .unwrap();

        let file = ClipFile::load(&out).unwrap();
        assert_eq!(file.clip().sample_rate(), 24.0);
        assert_eq!(file.clip().node_count(), 2);
    }
}
