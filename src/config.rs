//! Explicit configuration for every job.
//!
//! Nothing in the library reads arguments, stdin or the environment: whoever drives a job
//! fills one of these structures first.

use std::num::ParseFloatError;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::downsample::voxel_size_from_rate;
use crate::io::Layout;

/// Prefix given to every file written by the downsampler.
pub const DOWNSAMPLED_PREFIX: &str = "downsampled_";

/// Quality tiers played in turn by tiered playback, relative to its root directory.
pub const DEFAULT_TIERS: [&str; 3] = ["low", "mid", "high"];

/// Directory whose listing drives tiered playback, relative to its root directory.
pub const DEFAULT_LISTING_DIR: &str = "mixed";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("compression rate {value:?} is not a number")]
    InvalidCompressionRate {
        value: String,
        #[source]
        source: ParseFloatError,
    },
}

/// Parses a compression rate as typed by a user, surrounding whitespace allowed.
pub fn parse_compression_rate(s: &str) -> Result<f32, ConfigError> {
    s.trim()
        .parse::<f32>()
        .map_err(|source| ConfigError::InvalidCompressionRate {
            value: s.to_string(),
            source,
        })
}

/// Window settings of the playback viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub point_size: f32,
    /// Channels in [0, 1].
    pub background_color: [f32; 3],
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "pcseq".to_string(),
            width: 1600,
            height: 900,
            point_size: 1.0,
            background_color: [0.0, 0.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub input_layout: Layout,
    pub output_layout: Layout,
    /// Prepended to every output file name.
    pub prefix: String,
}

impl NormalizeConfig {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(input_dir: P, output_dir: Q) -> Self {
        Self {
            input_dir: input_dir.as_ref().to_path_buf(),
            output_dir: output_dir.as_ref().to_path_buf(),
            input_layout: Layout::xyzrgb(),
            output_layout: Layout::xyzrgb(),
            prefix: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DownsampleConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Voxel edge length is `1 / compression_rate`.
    pub compression_rate: f32,
    pub input_layout: Layout,
    pub output_layout: Layout,
    pub prefix: String,
    /// Divide colors by 256 before averaging them.
    pub normalize_colors: bool,
}

impl DownsampleConfig {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(
        input_dir: P,
        output_dir: Q,
        compression_rate: f32,
    ) -> Self {
        Self {
            input_dir: input_dir.as_ref().to_path_buf(),
            output_dir: output_dir.as_ref().to_path_buf(),
            compression_rate,
            input_layout: Layout::xyzrgb(),
            output_layout: Layout::xyzrgb(),
            prefix: DOWNSAMPLED_PREFIX.to_string(),
            normalize_colors: false,
        }
    }

    pub fn voxel_size(&self) -> f32 {
        voxel_size_from_rate(self.compression_rate)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackConfig {
    pub dir: PathBuf,
    pub layout: Layout,
    pub normalize_colors: bool,
    pub viewer: ViewerConfig,
}

impl PlaybackConfig {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            layout: Layout::xyzrgb(),
            normalize_colors: true,
            viewer: ViewerConfig::default(),
        }
    }
}

/// Plays the files listed in `listing_dir`, loading them from each tier directory in turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TieredPlaybackConfig {
    pub listing_dir: PathBuf,
    pub tier_dirs: Vec<PathBuf>,
    pub layout: Layout,
    pub normalize_colors: bool,
    pub viewer: ViewerConfig,
}

impl TieredPlaybackConfig {
    /// `<root>/mixed` as listing, `<root>/low`, `<root>/mid` and `<root>/high` as tiers.
    pub fn from_root<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();
        Self {
            listing_dir: root.join(DEFAULT_LISTING_DIR),
            tier_dirs: DEFAULT_TIERS.iter().map(|tier| root.join(tier)).collect(),
            layout: Layout::xyzrgb(),
            normalize_colors: true,
            viewer: ViewerConfig::default(),
        }
    }
}
