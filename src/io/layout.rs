use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// One numeric column of a text point cloud file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    X,
    Y,
    Z,
    R,
    G,
    B,
}

impl Field {
    const ALL: [Field; 6] = [Field::X, Field::Y, Field::Z, Field::R, Field::G, Field::B];

    fn from_char(c: char) -> Option<Field> {
        match c {
            'x' => Some(Field::X),
            'y' => Some(Field::Y),
            'z' => Some(Field::Z),
            'r' => Some(Field::R),
            'g' => Some(Field::G),
            'b' => Some(Field::B),
            _ => None,
        }
    }

    fn as_char(self) -> char {
        match self {
            Field::X => 'x',
            Field::Y => 'y',
            Field::Z => 'z',
            Field::R => 'r',
            Field::G => 'g',
            Field::B => 'b',
        }
    }

    pub fn is_color(self) -> bool {
        matches!(self, Field::R | Field::G | Field::B)
    }

    /// Index of the component inside its position or color triple.
    pub fn component(self) -> usize {
        match self {
            Field::X | Field::R => 0,
            Field::Y | Field::G => 1,
            Field::Z | Field::B => 2,
        }
    }
}

/// Names how a point cloud file is laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    /// Whitespace separated numbers, one point per line, in this column order.
    Columns(Vec<Field>),
    /// PLY file with a `vertex` element.
    Ply,
}

impl Layout {
    /// `x y z r g b`, the layout every sequence in this tool-kit uses by default.
    pub fn xyzrgb() -> Self {
        Layout::Columns(Field::ALL.to_vec())
    }

    pub fn has_colors(&self) -> bool {
        match self {
            Layout::Columns(fields) => fields.iter().any(|f| f.is_color()),
            Layout::Ply => true,
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Layout::xyzrgb()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("empty layout tag")]
    Empty,
    #[error("unknown field {0:?} in layout tag")]
    UnknownField(char),
    #[error("field {0:?} appears more than once in layout tag")]
    DuplicateField(char),
    #[error("layout tag is missing position field {0:?}")]
    MissingPosition(char),
    #[error("layout tag must name all of r, g, b or none of them")]
    PartialColor,
}

impl FromStr for Layout {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        if tag.is_empty() {
            return Err(LayoutError::Empty);
        }
        if tag == "ply" {
            return Ok(Layout::Ply);
        }

        let mut fields = Vec::with_capacity(tag.len());
        for c in tag.chars() {
            let field = Field::from_char(c).ok_or(LayoutError::UnknownField(c))?;
            if fields.contains(&field) {
                return Err(LayoutError::DuplicateField(c));
            }
            fields.push(field);
        }

        for position in [Field::X, Field::Y, Field::Z] {
            if !fields.contains(&position) {
                return Err(LayoutError::MissingPosition(position.as_char()));
            }
        }
        let colors = fields.iter().filter(|f| f.is_color()).count();
        if colors != 0 && colors != 3 {
            return Err(LayoutError::PartialColor);
        }

        Ok(Layout::Columns(fields))
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Columns(fields) => {
                for field in fields {
                    write!(f, "{}", field.as_char())?;
                }
                Ok(())
            }
            Layout::Ply => write!(f, "ply"),
        }
    }
}
