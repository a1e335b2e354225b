use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use log::trace;
use nalgebra::Point3;
use ply_rs::parser;
use ply_rs::ply::{DefaultElement, Property};
use thiserror::Error;

use super::layout::{Field, Layout};
use crate::formats::PointCloud;

type Result<T> = std::result::Result<T, ReadError>;

/// Reads a [PointCloud] directly from a file given the path
pub fn read_file<P: AsRef<Path>>(p: P, layout: &Layout) -> Result<PointCloud> {
    let file = File::open(p).map_err(ReadError::IOError)?;
    read(file, layout)
}

/// Parses a [PointCloud] from the reader
/// ```
/// use pcseq::io::{read, Layout, ReadError};
///
/// fn main() -> Result<(), ReadError> {
///     let pc = read("0 0 0 255 0 0\n1 1 1 0 255 0\n".as_bytes(), &Layout::xyzrgb())?;
///     assert_eq!(pc.len(), 2);
///     Ok(())
/// }
/// ```
pub fn read<R: Read>(r: R, layout: &Layout) -> Result<PointCloud> {
    let mut reader = BufReader::new(r);
    match layout {
        Layout::Columns(fields) => Parser::new(reader, fields).parse(),
        Layout::Ply => read_ply(&mut reader),
    }
}

/// Represents the ways a point cloud file can fail to load.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    /// A line does not have as many numbers as the layout names.
    #[error("line {line}: expected {expected} fields, got {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: {value:?} is not a number")]
    InvalidNumber { line: usize, value: String },
    #[error("ply file has no {0:?} element")]
    MissingElement(String),
    #[error("vertex {index} has no numeric {property:?} property")]
    MissingProperty { index: usize, property: String },
}

struct Parser<'a, R: BufRead> {
    reader: R,
    fields: &'a [Field],
    line: String,
    line_number: usize,
}

impl<'a, R: BufRead> Parser<'a, R> {
    fn new(reader: R, fields: &'a [Field]) -> Self {
        Self {
            reader,
            fields,
            line: String::new(),
            line_number: 0,
        }
    }

    fn parse(mut self) -> Result<PointCloud> {
        let mut pc = PointCloud::new();
        while self.next_line()? {
            if self.line.trim().is_empty() {
                continue;
            }
            let (position, color) = self.parse_point()?;
            pc.push(position, color);
        }
        trace!("parsed {} points from {} lines", pc.len(), self.line_number);
        Ok(pc)
    }

    fn next_line(&mut self) -> Result<bool> {
        self.line.clear();
        let read = self.reader.read_line(&mut self.line)?;
        if read > 0 {
            self.line_number += 1;
        }
        Ok(read > 0)
    }

    fn parse_point(&self) -> Result<(Point3<f32>, Point3<f32>)> {
        let values = self.line.split_whitespace().collect::<Vec<_>>();
        if values.len() != self.fields.len() {
            return Err(ReadError::FieldCount {
                line: self.line_number,
                expected: self.fields.len(),
                found: values.len(),
            });
        }

        let mut position = Point3::origin();
        let mut color = Point3::origin();
        for (field, value) in self.fields.iter().zip(values) {
            let v = value.parse::<f32>().map_err(|_| ReadError::InvalidNumber {
                line: self.line_number,
                value: value.to_string(),
            })?;
            if field.is_color() {
                color[field.component()] = v;
            } else {
                position[field.component()] = v;
            }
        }
        Ok((position, color))
    }
}

fn read_ply<R: BufRead>(reader: &mut R) -> Result<PointCloud> {
    let vertex_parser = parser::Parser::<DefaultElement>::new();
    let ply = vertex_parser.read_ply(reader)?;

    let has_colors = ply
        .header
        .elements
        .get("vertex")
        .map(|element| element.properties.contains_key("red"))
        .ok_or_else(|| ReadError::MissingElement("vertex".to_string()))?;
    let vertices = ply
        .payload
        .get("vertex")
        .ok_or_else(|| ReadError::MissingElement("vertex".to_string()))?;

    let mut pc = PointCloud::with_capacity(vertices.len());
    for (index, vertex) in vertices.iter().enumerate() {
        let position = Point3::new(
            property(vertex, index, "x")?,
            property(vertex, index, "y")?,
            property(vertex, index, "z")?,
        );
        let color = if has_colors {
            Point3::new(
                property(vertex, index, "red")?,
                property(vertex, index, "green")?,
                property(vertex, index, "blue")?,
            )
        } else {
            Point3::origin()
        };
        pc.push(position, color);
    }
    Ok(pc)
}

fn property(vertex: &DefaultElement, index: usize, key: &str) -> Result<f32> {
    vertex
        .get(key)
        .and_then(scalar)
        .ok_or_else(|| ReadError::MissingProperty {
            index,
            property: key.to_string(),
        })
}

fn scalar(property: &Property) -> Option<f32> {
    match *property {
        Property::Char(v) => Some(v as f32),
        Property::UChar(v) => Some(v as f32),
        Property::Short(v) => Some(v as f32),
        Property::UShort(v) => Some(v as f32),
        Property::Int(v) => Some(v as f32),
        Property::UInt(v) => Some(v as f32),
        Property::Float(v) => Some(v),
        Property::Double(v) => Some(v as f32),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_read_fail(result: Result<PointCloud>, expected_line: usize) {
        match result {
            Ok(_) => panic!("Parsing should fail"),
            Err(ReadError::FieldCount { line, .. }) | Err(ReadError::InvalidNumber { line, .. }) => {
                assert_eq!(line, expected_line)
            }
            Err(e) => panic!("Unexpected error {e}"),
        }
    }

    #[test]
    fn read_xyzrgb_keeps_raw_colors() {
        let pc = read(
            "1 2 3 255 128 0\n-4.5 0.25 6 10 20 30\n".as_bytes(),
            &Layout::xyzrgb(),
        )
        .unwrap();
        assert_eq!(pc.len(), 2);
        assert_eq!(pc.positions()[1], Point3::new(-4.5, 0.25, 6.0));
        assert_eq!(pc.colors()[0], Point3::new(255.0, 128.0, 0.0));
    }

    #[test]
    fn read_follows_column_order() {
        let layout = "rgbxyz".parse().unwrap();
        let pc = read("7 8 9 1 2 3".as_bytes(), &layout).unwrap();
        assert_eq!(pc.positions()[0], Point3::new(1.0, 2.0, 3.0));
        assert_eq!(pc.colors()[0], Point3::new(7.0, 8.0, 9.0));
    }

    #[test]
    fn read_xyz_gives_black_points() {
        let layout = "xyz".parse().unwrap();
        let pc = read("1 2 3\n4 5 6\n".as_bytes(), &layout).unwrap();
        assert_eq!(pc.colors(), &[Point3::origin(), Point3::origin()]);
    }

    #[test]
    fn read_skips_blank_lines() {
        let pc = read("\n1 2 3 4 5 6\n   \n\n7 8 9 1 2 3".as_bytes(), &Layout::xyzrgb()).unwrap();
        assert_eq!(pc.len(), 2);
    }

    #[test]
    fn read_empty_input() {
        let pc = read("".as_bytes(), &Layout::xyzrgb()).unwrap();
        assert!(pc.is_empty());
    }

    #[test]
    fn read_fails_on_field_count() {
        assert_read_fail(read("1 2 3 4 5 6\n1 2 3\n".as_bytes(), &Layout::xyzrgb()), 2);
        assert_read_fail(read("1 2 3 4 5 6 7\n".as_bytes(), &Layout::xyzrgb()), 1);
    }

    #[test]
    fn read_fails_on_garbage() {
        assert_read_fail(read("\n1 2 3 4 five 6\n".as_bytes(), &Layout::xyzrgb()), 2);
    }

    #[test]
    fn read_ply_header_is_not_xyzrgb() {
        let ply = "ply\nformat ascii 1.0\nelement vertex 1\nproperty float x\n";
        assert!(read(ply.as_bytes(), &Layout::xyzrgb()).is_err());
    }

    #[test]
    fn read_ascii_ply() {
        let ply = "ply\n\
            format ascii 1.0\n\
            element vertex 2\n\
            property float x\n\
            property float y\n\
            property float z\n\
            property uchar red\n\
            property uchar green\n\
            property uchar blue\n\
            end_header\n\
            1 2 3 255 0 10\n\
            -1 -2 -3 0 1 2\n";
        let pc = read(ply.as_bytes(), &Layout::Ply).unwrap();
        assert_eq!(pc.len(), 2);
        assert_eq!(pc.positions()[1], Point3::new(-1.0, -2.0, -3.0));
        assert_eq!(pc.colors()[0], Point3::new(255.0, 0.0, 10.0));
    }

    #[test]
    fn read_ply_without_colors() {
        let ply = "ply\n\
            format ascii 1.0\n\
            element vertex 1\n\
            property double x\n\
            property double y\n\
            property double z\n\
            end_header\n\
            0.5 1.5 2.5\n";
        let pc = read(ply.as_bytes(), &Layout::Ply).unwrap();
        assert_eq!(pc.positions()[0], Point3::new(0.5, 1.5, 2.5));
        assert_eq!(pc.colors()[0], Point3::origin());
    }

    #[test]
    fn read_ply_without_vertices_fails() {
        let ply = "ply\n\
            format ascii 1.0\n\
            element face 0\n\
            property list uchar int vertex_indices\n\
            end_header\n";
        match read(ply.as_bytes(), &Layout::Ply) {
            Err(ReadError::MissingElement(name)) => assert_eq!(name, "vertex"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
