//! Batch processing and playback of point cloud sequences.
//!
//! A sequence is a directory of point cloud files played or processed in file name order.
//! The jobs in [pipeline] normalize colors, voxel downsample, or play a sequence in a
//! viewer window. Each job is driven by a configuration structure from [config].

pub mod color;
pub mod config;
pub mod downsample;
pub mod error;
pub mod formats;
pub mod frame_dir;
pub mod io;
pub mod pipeline;
pub mod render;

pub use error::{Error, Result};
pub use formats::PointCloud;
