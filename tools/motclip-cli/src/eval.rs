//! Eval command - evaluate a node's pose at a frame

use std::fmt::Write;
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use motclip::math::quat::{quat_to_degrees, quat_to_radians};
use motclip::{Clip, ClipFile, PlaybackConfig, RotationInterp, TrackKind};

/// Arguments for the eval command
#[derive(Args)]
pub struct EvalArgs {
    /// Clip file
    pub clip: PathBuf,

    /// Node name (or index)
    pub node: String,

    /// Frame number; fractional, negative and out-of-range values wrap
    #[arg(allow_negative_numbers = true)]
    pub frame: f32,

    /// Playback config (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print Euler angles in degrees instead of radians
    #[arg(long)]
    pub degrees: bool,
}

/// Execute the eval command
pub fn execute(args: EvalArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => PlaybackConfig::load(path)?,
        None => PlaybackConfig::default(),
    };
    let file = ClipFile::load(&args.clip)?;
    let clip = file.clip();

    let Some(node) = resolve_node(&clip, &args.node, &config) else {
        bail!("Node '{}' not found in {}", args.node, args.clip.display());
    };
    print!("{}", render(&clip, node, args.frame, &config, args.degrees));
    Ok(())
}

/// Name lookup first, then a numeric index
fn resolve_node(clip: &Clip<'_>, node: &str, config: &PlaybackConfig) -> Option<usize> {
    clip.find_node_with(node, config.lookup_strategy()).or_else(|| {
        node.parse::<usize>()
            .ok()
            .filter(|&index| clip.node_index_ok(index))
    })
}

/// Evaluated pose of one node as text
pub fn render(
    clip: &Clip<'_>,
    node: usize,
    frame: f32,
    config: &PlaybackConfig,
    degrees: bool,
) -> String {
    let mut out = String::new();
    let name = clip
        .node_name(node)
        .map(String::from_utf8_lossy)
        .unwrap_or_default();

    let rotation = match config.rotation {
        RotationInterp::Lerp => clip.eval_quat(node, frame),
        RotationInterp::Slerp => clip.eval_quat_slerp(node, frame),
    };
    let angles = if degrees {
        quat_to_degrees(rotation, clip.rot_order(node))
    } else {
        quat_to_radians(rotation, clip.rot_order(node))
    };

    let _ = writeln!(out, "Node {node} '{name}' @ frame {frame}");
    if let Some(fi) = clip.frame_info(frame) {
        let _ = writeln!(out, "  frames: {} -> {} (t = {:.4})", fi.fno, fi.next, fi.t);
    }
    let tag = |kind| if clip.has_track(node, kind) { "" } else { " (default)" };
    let pos = clip.eval_pos(node, frame);
    let scl = clip.eval_scl(node, frame);
    let _ = writeln!(
        out,
        "  pos: [{:.6}, {:.6}, {:.6}]{}",
        pos.x,
        pos.y,
        pos.z,
        tag(TrackKind::Position)
    );
    let _ = writeln!(
        out,
        "  rot: [{:.6}, {:.6}, {:.6}, {:.6}]{}",
        rotation.x,
        rotation.y,
        rotation.z,
        rotation.w,
        tag(TrackKind::Rotation)
    );
    let _ = writeln!(
        out,
        "  euler {} ({}): [{:.6}, {:.6}, {:.6}]",
        clip.rot_order(node).name(),
        if degrees { "deg" } else { "rad" },
        angles.x,
        angles.y,
        angles.z
    );
    let _ = writeln!(
        out,
        "  scl: [{:.6}, {:.6}, {:.6}]{}",
        scl.x,
        scl.y,
        scl.z,
        tag(TrackKind::Scale)
    );

    let m = clip.eval_transform_with(node, frame, config);
    let _ = writeln!(out, "  transform ({}):", clip.xform_order(node).name());
    for row in m.to_cols_array_2d() {
        let _ = writeln!(
            out,
            "    [{:10.5} {:10.5} {:10.5} {:10.5}]",
            row[0], row[1], row[2], row[3]
        );
    }
    out
}
