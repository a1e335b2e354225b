use hashbrown::HashMap;
use log::{debug, warn};
use nalgebra::{Point3, Vector3};
use thiserror::Error;

use crate::formats::bounds::Bounds;
use crate::formats::PointCloud;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DownsampleError {
    #[error("voxel size must be positive and finite, got {0}")]
    InvalidVoxelSize(f32),
    /// More than `i32::MAX` voxels would be needed along one axis.
    #[error("voxel size {voxel_size} is too small for a cloud spanning {extent}")]
    VoxelSizeTooSmall { voxel_size: f32, extent: f32 },
}

/// Edge length of a voxel for a compression rate: `1 / rate`.
///
/// A rate of zero gives an infinite size, which [downsample] rejects.
pub fn voxel_size_from_rate(rate: f32) -> f32 {
    1.0 / rate
}

#[derive(Default, Clone, Copy)]
struct VoxelAccum {
    position: [f64; 3],
    color: [f64; 3],
    n: usize,
}

impl VoxelAccum {
    fn add(&mut self, position: &Point3<f32>, color: &Point3<f32>) {
        for i in 0..3 {
            self.position[i] += position[i] as f64;
            self.color[i] += color[i] as f64;
        }
        self.n += 1;
    }

    fn centroid(&self) -> (Point3<f32>, Point3<f32>) {
        let n = self.n as f64;
        (
            Point3::new(
                (self.position[0] / n) as f32,
                (self.position[1] / n) as f32,
                (self.position[2] / n) as f32,
            ),
            Point3::new(
                (self.color[0] / n) as f32,
                (self.color[1] / n) as f32,
                (self.color[2] / n) as f32,
            ),
        )
    }
}

/// Replaces all points falling in the same cube of edge `voxel_size` with their centroid,
/// colored with the average of their colors.
///
/// The grid starts half a voxel below the minimum corner of the cloud. Points with a
/// non-finite coordinate are dropped. Output points come in ascending voxel index order,
/// not input order.
pub fn downsample(pc: &PointCloud, voxel_size: f32) -> Result<PointCloud, DownsampleError> {
    if !(voxel_size.is_finite() && voxel_size > 0.0) {
        return Err(DownsampleError::InvalidVoxelSize(voxel_size));
    }
    let Some(bounds) = Bounds::from_points(pc.positions().iter().filter(|p| is_finite(p))) else {
        if !pc.is_empty() {
            warn!("no finite point among {}", pc.len());
        }
        return Ok(PointCloud::new());
    };

    let size = voxel_size as f64;
    let extent = bounds.extent();
    if let Some(&widest) = extent.iter().find(|&&e| e as f64 / size >= i32::MAX as f64) {
        return Err(DownsampleError::VoxelSizeTooSmall {
            voxel_size,
            extent: widest,
        });
    }
    let origin = bounds.min().cast::<f64>() - Vector3::repeat(size / 2.0);

    let mut voxels: HashMap<(i64, i64, i64), VoxelAccum> = HashMap::new();
    let mut dropped = 0;
    for (position, color) in pc.iter() {
        if !is_finite(position) {
            dropped += 1;
            continue;
        }
        let index = (position.cast::<f64>() - origin) / size;
        let key = (
            index.x.floor() as i64,
            index.y.floor() as i64,
            index.z.floor() as i64,
        );
        voxels.entry(key).or_default().add(position, color);
    }
    if dropped > 0 {
        warn!("dropped {} points with non-finite coordinates", dropped);
    }

    let mut keys: Vec<(i64, i64, i64)> = voxels.keys().copied().collect();
    keys.sort_unstable();

    let mut out = PointCloud::with_capacity(keys.len());
    for key in keys {
        let (position, color) = voxels[&key].centroid();
        out.push(position, color);
    }
    debug!(
        "downsampled {} points to {} with voxel size {}",
        pc.len(),
        out.len(),
        voxel_size
    );
    Ok(out)
}

fn is_finite(p: &Point3<f32>) -> bool {
    p.iter().all(|v| v.is_finite())
}
