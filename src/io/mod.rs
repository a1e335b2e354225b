//! Reading and writing point cloud files.
//!
//! Every file is read according to a [Layout] tag. Column layouts such as `xyzrgb`
//! describe plain text files with one point per line; the `ply` tag selects the
//! [PLY format](http://paulbourke.net/dataformats/ply/).
//!
//! Colors are never rescaled on the way in or out; see [crate::color] for that.
//!
//! # Examples
//!
//! ```no_run
//! use pcseq::io::{read_file, write_file, Layout, ReadError};
//!
//! fn main() -> Result<(), ReadError> {
//!     let layout: Layout = "xyzrgb".parse().unwrap();
//!     let pc = read_file("frame_0001.xyzrgb", &layout)?;
//!     write_file(&pc, &layout, "copy_0001.xyzrgb")?;
//!     Ok(())
//! }
//! ```

mod layout;
mod reader;
mod writer;

pub use layout::{Field, Layout, LayoutError};
pub use reader::{read, read_file, ReadError};
pub use writer::{write, write_file};
