pub mod voxel;

pub use voxel::{downsample, voxel_size_from_rate, DownsampleError};
