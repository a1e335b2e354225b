use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use ply_rs::ply::{
    Addable, DefaultElement, ElementDef, Encoding, Ply, Property, PropertyDef, PropertyType,
    ScalarType,
};

use super::layout::{Field, Layout};
use crate::formats::PointCloud;

type IOResult = Result<(), io::Error>;

/// Writes the point cloud into the file, replacing whatever was there
pub fn write_file<P: AsRef<Path>>(pc: &PointCloud, layout: &Layout, p: P) -> IOResult {
    let file = File::create(p)?;
    let mut writer = BufWriter::new(file);
    write(pc, layout, &mut writer)?;
    writer.flush()
}

/// Writes the point cloud into the provided writer
pub fn write<W: Write>(pc: &PointCloud, layout: &Layout, writer: &mut W) -> IOResult {
    match layout {
        Layout::Columns(fields) => write_columns(pc, fields, writer),
        Layout::Ply => write_ply(pc, writer),
    }
}

fn write_columns<W: Write>(pc: &PointCloud, fields: &[Field], writer: &mut W) -> IOResult {
    let mut s = String::new();
    for (position, color) in pc.iter() {
        s.clear();
        for field in fields {
            let v = if field.is_color() {
                color[field.component()]
            } else {
                position[field.component()]
            };
            // Display for f32 prints the shortest text that parses back to the same value
            s.push_str(&v.to_string());
            s.push(' ');
        }
        // Remove last whitespace
        s.pop();
        s.push('\n');
        writer.write_all(s.as_bytes())?;
    }
    Ok(())
}

fn write_ply<W: Write>(pc: &PointCloud, writer: &mut W) -> IOResult {
    let eight_bit = pc
        .colors()
        .iter()
        .all(|c| c.iter().all(|&v| v.fract() == 0.0 && (0.0..=255.0).contains(&v)));
    let color_type = if eight_bit {
        ScalarType::UChar
    } else {
        ScalarType::Float
    };

    let mut ply = {
        let mut ply = Ply::<DefaultElement>::new();
        ply.header.encoding = Encoding::Ascii;

        let mut point_element = ElementDef::new("vertex".to_string());
        for name in ["x", "y", "z"] {
            let p = PropertyDef::new(name.to_string(), PropertyType::Scalar(ScalarType::Float));
            point_element.properties.add(p);
        }
        for name in ["red", "green", "blue"] {
            let p = PropertyDef::new(name.to_string(), PropertyType::Scalar(color_type.clone()));
            point_element.properties.add(p);
        }
        ply.header.elements.add(point_element);

        let mut points = Vec::with_capacity(pc.len());
        for (position, color) in pc.iter() {
            let mut point = DefaultElement::new();
            point.insert("x".to_string(), Property::Float(position.x));
            point.insert("y".to_string(), Property::Float(position.y));
            point.insert("z".to_string(), Property::Float(position.z));
            for (name, v) in ["red", "green", "blue"].into_iter().zip(color.iter()) {
                let value = if eight_bit {
                    Property::UChar(*v as u8)
                } else {
                    Property::Float(*v)
                };
                point.insert(name.to_string(), value);
            }
            points.push(point);
        }

        ply.payload.insert("vertex".to_string(), points);
        ply.make_consistent()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("{e:?}")))?;
        ply
    };

    let w = ply_rs::writer::Writer::new();
    w.write_ply(writer, &mut ply)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::read;
    use nalgebra::Point3;

    fn sample() -> PointCloud {
        PointCloud::from_parts(
            vec![
                Point3::new(0.1, -2.5, 1e-7),
                Point3::new(1023.0, 512.25, 3.333_333_3),
                Point3::new(-0.0, 7.0, 8.0),
            ],
            vec![
                Point3::new(255.0, 0.0, 128.0),
                Point3::new(0.5, 0.25, 0.99609375),
                Point3::new(1.0, 2.0, 3.0),
            ],
        )
        .unwrap()
    }

    fn round_trip(pc: &PointCloud, layout: &Layout) -> PointCloud {
        let mut buf = Vec::new();
        write(pc, layout, &mut buf).unwrap();
        read(buf.as_slice(), layout).unwrap()
    }

    #[test]
    fn write_xyzrgb_lines() {
        let pc = PointCloud::from_parts(
            vec![Point3::new(1.0, 2.5, -3.0)],
            vec![Point3::new(255.0, 0.0, 7.0)],
        )
        .unwrap();
        let mut buf = Vec::new();
        write(&pc, &Layout::xyzrgb(), &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "1 2.5 -3 255 0 7\n");
    }

    #[test]
    fn columns_round_trip() {
        let pc = sample();
        for tag in ["xyzrgb", "rgbxyz", "zyxbgr"] {
            let layout: Layout = tag.parse().unwrap();
            assert_eq!(round_trip(&pc, &layout), pc, "layout {tag}");
        }
    }

    #[test]
    fn ply_round_trip() {
        let pc = sample();
        assert_eq!(round_trip(&pc, &Layout::Ply), pc);
    }

    #[test]
    fn ply_uses_uchar_for_eight_bit_colors() {
        let pc = PointCloud::from_parts(
            vec![Point3::new(1.0, 2.0, 3.0)],
            vec![Point3::new(255.0, 0.0, 7.0)],
        )
        .unwrap();
        let mut buf = Vec::new();
        write(&pc, &Layout::Ply, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("property uchar red"));
        assert_eq!(round_trip(&pc, &Layout::Ply), pc);
    }

    #[test]
    fn xyz_drops_colors() {
        let layout: Layout = "xyz".parse().unwrap();
        let back = round_trip(&sample(), &layout);
        assert_eq!(back.positions(), sample().positions());
        assert!(back.colors().iter().all(|c| *c == Point3::origin()));
    }

    #[test]
    fn write_file_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.xyzrgb");
        std::fs::write(&path, "stale contents that are much longer than the new ones\n").unwrap();
        let pc = PointCloud::from_parts(vec![Point3::origin()], vec![Point3::origin()]).unwrap();
        write_file(&pc, &Layout::xyzrgb(), &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "0 0 0 0 0 0\n");
    }
}
