//! Read-only motion clip playback
//!
//! A clip is a pre-baked binary blob of per-node position, rotation and scale
//! tracks sampled at fixed frames. This crate locates nodes by name, decodes
//! per-frame track values from their compact storage, and evaluates poses and
//! local transforms at arbitrary (fractional, negative or out-of-range) frames.
//!
//! # Modules
//!
//! - [`format`] - Binary clip layout and record types
//! - [`clip`] - Validated clip view: node lookup, decoding, evaluation
//! - [`math`] - Quaternion codec and transform composition
//! - [`loader`] - File → owned, validated clip
//! - [`config`] - TOML playback settings
//!
//! # Example
//!
//! ```no_run
//! use motclip::ClipFile;
//!
//! let file = ClipFile::load("walk.mclp")?;
//! let clip = file.clip();
//! if let Some(hips) = clip.find_node("hips") {
//!     let local = clip.eval_transform(hips, 12.5, None);
//!     println!("{local:?}");
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod clip;
pub mod config;
pub mod error;
pub mod format;
pub mod loader;
pub mod math;

pub use clip::{ChannelData, Clip, FrameInfo, LookupStrategy, TrackData, name_hash};
pub use config::{LookupConfig, LookupMode, PlaybackConfig, RotationInterp};
pub use error::ClipError;
pub use format::{RotOrder, TrackKind, XformOrder};
pub use loader::ClipFile;
