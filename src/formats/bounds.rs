use nalgebra::{Point3, Vector3};

/// Axis aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl Bounds {
    pub fn new(min_x: f32, max_x: f32, min_y: f32, max_y: f32, min_z: f32, max_z: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
            min_z,
            max_z,
        }
    }

    /// Smallest box holding every point, `None` when there are no points.
    pub fn of(points: &[Point3<f32>]) -> Option<Self> {
        Self::from_points(points)
    }

    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3<f32>>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bounds = Bounds::new(first.x, first.x, first.y, first.y, first.z, first.z);
        for point in points {
            bounds.min_x = bounds.min_x.min(point.x);
            bounds.max_x = bounds.max_x.max(point.x);
            bounds.min_y = bounds.min_y.min(point.y);
            bounds.max_y = bounds.max_y.max(point.y);
            bounds.min_z = bounds.min_z.min(point.z);
            bounds.max_z = bounds.max_z.max(point.z);
        }
        Some(bounds)
    }

    /// Corner with the smallest coordinates.
    pub fn min(&self) -> Point3<f32> {
        Point3::new(self.min_x, self.min_y, self.min_z)
    }

    pub fn center(&self) -> Point3<f32> {
        Point3::new(
            (self.max_x + self.min_x) / 2f32,
            (self.max_y + self.min_y) / 2f32,
            (self.max_z + self.min_z) / 2f32,
        )
    }

    pub fn extent(&self) -> Vector3<f32> {
        Vector3::new(
            self.max_x - self.min_x,
            self.max_y - self.min_y,
            self.max_z - self.min_z,
        )
    }

    /// Length of the box diagonal.
    pub fn diagonal(&self) -> f32 {
        self.extent().norm()
    }
}
