use std::path::Path;

use log::{debug, info};

use super::load;
use crate::color::normalize;
use crate::config::{PlaybackConfig, TieredPlaybackConfig};
use crate::error::Result;
use crate::formats::PointCloud;
use crate::frame_dir::FrameDir;
use crate::io::Layout;
use crate::render::{RenderBackend, Viewer};

/// Plays every file of the directory, in name order, opening the viewer first if needed.
///
/// Returns the number of frames shown.
pub fn play_sequence<B: RenderBackend>(
    config: &PlaybackConfig,
    viewer: &mut Viewer<B>,
) -> Result<usize> {
    let frames = FrameDir::open(&config.dir)?;
    viewer.open()?;
    let shown = play_frames(&frames, &config.layout, config.normalize_colors, viewer)?;
    info!("played {} frames from {:?}", shown, config.dir);
    Ok(shown)
}

/// Lists `listing_dir` once, then plays those file names from every tier directory in turn.
///
/// Only the names come from the listing: a listed name missing from a tier fails, and files
/// only present in a tier are never played. The camera is framed once for the whole run.
pub fn play_tiers<B: RenderBackend>(
    config: &TieredPlaybackConfig,
    viewer: &mut Viewer<B>,
) -> Result<usize> {
    let listing = FrameDir::open(&config.listing_dir)?;
    viewer.open()?;

    let mut shown = 0;
    for tier in &config.tier_dirs {
        debug!("playing tier {:?}", tier);
        let frames = listing.rebase(tier);
        shown += play_frames(&frames, &config.layout, config.normalize_colors, viewer)?;
    }
    info!(
        "played {} frames listed in {:?} across {} tiers",
        shown,
        config.listing_dir,
        config.tier_dirs.len()
    );
    Ok(shown)
}

fn play_frames<B: RenderBackend>(
    frames: &FrameDir,
    layout: &Layout,
    normalize_colors: bool,
    viewer: &mut Viewer<B>,
) -> Result<usize> {
    for path in frames.paths() {
        viewer.show(load_frame(&path, layout, normalize_colors)?)?;
    }
    Ok(frames.count())
}

fn load_frame(path: &Path, layout: &Layout, normalize_colors: bool) -> Result<PointCloud> {
    let mut pc = load(path, layout)?;
    if normalize_colors {
        normalize(&mut pc);
    }
    debug!("{:?}: {} points", path, pc.len());
    Ok(pc)
}
