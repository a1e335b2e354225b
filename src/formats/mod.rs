use std::fmt::Debug;

use nalgebra::Point3;
use thiserror::Error;

pub mod bounds;

use bounds::Bounds;

/// Raised when positions and colors stop being parallel arrays.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PointCloudError {
    #[error("{positions} positions but {colors} colors")]
    LengthMismatch { positions: usize, colors: usize },
}

/// A point cloud stored as two parallel arrays: one position and one color per point.
///
/// Colors are whatever the source stored (nominally 0-255 integers) until they are
/// normalized, see [crate::color::normalize].
#[derive(Clone, Default, PartialEq)]
pub struct PointCloud {
    positions: Vec<Point3<f32>>,
    colors: Vec<Point3<f32>>,
}

impl PointCloud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity),
            colors: Vec::with_capacity(capacity),
        }
    }

    pub fn from_parts(
        positions: Vec<Point3<f32>>,
        colors: Vec<Point3<f32>>,
    ) -> Result<Self, PointCloudError> {
        check_lengths(&positions, &colors)?;
        Ok(Self { positions, colors })
    }

    /// Replaces both arrays at once, keeping the old contents on error.
    pub fn replace(
        &mut self,
        positions: Vec<Point3<f32>>,
        colors: Vec<Point3<f32>>,
    ) -> Result<(), PointCloudError> {
        check_lengths(&positions, &colors)?;
        self.positions = positions;
        self.colors = colors;
        Ok(())
    }

    pub fn push(&mut self, position: Point3<f32>, color: Point3<f32>) {
        self.positions.push(position);
        self.colors.push(color);
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Point3<f32>] {
        &self.positions
    }

    pub fn colors(&self) -> &[Point3<f32>] {
        &self.colors
    }

    /// Mutable view of the colors. A slice cannot change length, so the arrays stay parallel.
    pub fn colors_mut(&mut self) -> &mut [Point3<f32>] {
        &mut self.colors
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Point3<f32>, &Point3<f32>)> {
        self.positions.iter().zip(self.colors.iter())
    }

    pub fn into_parts(self) -> (Vec<Point3<f32>>, Vec<Point3<f32>>) {
        (self.positions, self.colors)
    }

    /// Axis aligned bounds of the positions, `None` for an empty cloud.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of(&self.positions)
    }
}

fn check_lengths(
    positions: &[Point3<f32>],
    colors: &[Point3<f32>],
) -> Result<(), PointCloudError> {
    if positions.len() != colors.len() {
        return Err(PointCloudError::LengthMismatch {
            positions: positions.len(),
            colors: colors.len(),
        });
    }
    Ok(())
}

impl Debug for PointCloud {
    // first print the number of points in one line
    // then one point per line
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "PointCloud {{")?;
        writeln!(f, "   number_of_points: {}", self.len())?;
        for (p, c) in self.iter() {
            writeln!(
                f,
                "   ({}, {}, {}) rgb({}, {}, {})",
                p.x, p.y, p.z, c.x, c.y, c.z
            )?;
        }
        writeln!(f, "}}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_parts_rejects_uneven_arrays() {
        let err = PointCloud::from_parts(vec![Point3::origin(); 2], vec![Point3::origin()])
            .unwrap_err();
        assert_eq!(
            err,
            PointCloudError::LengthMismatch {
                positions: 2,
                colors: 1
            }
        );
    }

    #[test]
    fn replace_keeps_old_contents_on_error() {
        let mut pc = PointCloud::new();
        pc.push(Point3::new(1.0, 2.0, 3.0), Point3::new(4.0, 5.0, 6.0));

        assert!(pc.replace(vec![], vec![Point3::origin()]).is_err());
        assert_eq!(pc.len(), 1);
        assert_eq!(pc.positions()[0], Point3::new(1.0, 2.0, 3.0));

        pc.replace(vec![Point3::origin(); 3], vec![Point3::origin(); 3])
            .unwrap();
        assert_eq!(pc.len(), 3);
        assert_eq!(pc.colors().len(), 3);
    }

    #[test]
    fn empty_cloud_has_no_bounds() {
        assert!(PointCloud::new().bounds().is_none());
    }
}
