use nalgebra::Point3;

use crate::formats::PointCloud;

/// Divisor applied to stored 8-bit color channels.
///
/// 256 rather than 255: a stored 255 becomes 255/256 and never reaches 1.0.
/// Existing sequences were produced with this divisor, keep it.
pub const COLOR_DIVISOR: f32 = 256.0;

/// Scales a single color from stored 0-255 values into renderer range.
pub fn normalize_color(color: &Point3<f32>) -> Point3<f32> {
    *color / COLOR_DIVISOR
}

/// Scales every color of the cloud in place.
pub fn normalize(pc: &mut PointCloud) {
    for color in pc.colors_mut() {
        *color = normalize_color(color);
    }
}
