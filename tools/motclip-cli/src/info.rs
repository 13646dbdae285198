//! Info command - print clip header and per-node summary

use std::fmt::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use motclip::{Clip, ClipFile, TrackKind};

/// Arguments for the info command
#[derive(Args)]
pub struct InfoArgs {
    /// Clip file
    pub clip: PathBuf,
}

/// Execute the info command
pub fn execute(args: InfoArgs) -> Result<()> {
    let file = ClipFile::load(&args.clip)?;
    print!("{}", describe(&file.clip()));
    Ok(())
}

fn mask_str(mask: u8) -> String {
    ['x', 'y', 'z']
        .iter()
        .enumerate()
        .map(|(axis, c)| if mask & (1 << axis) != 0 { *c } else { '-' })
        .collect()
}

/// Human-readable summary of a clip
pub fn describe(clip: &Clip<'_>) -> String {
    let mut out = String::new();
    let header = clip.header();
    let _ = writeln!(out, "Clip: {}", clip.name());
    let _ = writeln!(
        out,
        "  {} frames @ {} fps ({:.3}s), {} nodes, {} bytes",
        clip.frame_count(),
        clip.sample_rate(),
        header.duration(),
        clip.node_count(),
        header.total_size
    );
    let _ = writeln!(
        out,
        "  hash table: {}, eval info: {}",
        if clip.has_hash_table() { "yes" } else { "no" },
        if clip.eval_info().is_some() { "yes" } else { "no" }
    );
    let _ = writeln!(
        out,
        "  tracks: pos {}, rot {}, scl {}",
        clip.track_count(TrackKind::Position),
        clip.track_count(TrackKind::Rotation),
        clip.track_count(TrackKind::Scale)
    );

    for node in 0..clip.node_count() {
        let name = clip
            .node_name(node)
            .map(String::from_utf8_lossy)
            .unwrap_or_default();
        let _ = write!(
            out,
            "  [{node:3}] {name:<24} {} {}",
            clip.xform_order(node).name(),
            clip.rot_order(node).name()
        );
        for kind in TrackKind::ALL {
            match clip.track_info(node, kind).filter(|info| info.is_present()) {
                Some(info) => {
                    let _ = write!(
                        out,
                        "  {} src={} data={}",
                        kind.name(),
                        mask_str(info.src_mask),
                        mask_str(info.data_mask)
                    );
                }
                None => {
                    let _ = write!(out, "  {} -", kind.name());
                }
            }
        }
        out.push('\n');

        for kind in TrackKind::ALL {
            let Some(info) = clip.track_info(node, kind).filter(|info| info.stride() > 0) else {
                continue;
            };
            let (lo, hi) = (info.min(), info.max());
            let _ = writeln!(
                out,
                "        {} range: [{:.3}, {:.3}, {:.3}] .. [{:.3}, {:.3}, {:.3}]",
                kind.name(),
                lo.x,
                lo.y,
                lo.z,
                hi.x,
                hi.y,
                hi.z
            );
        }
    }
    out
}
