//! The jobs: walk a sequence, transform every frame, write it out or show it.
//!
//! Every job processes frames one at a time, in order, on the calling thread. The first
//! failure ends the job.

mod downsample;
mod normalize;
mod play;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use log::trace;

use crate::error::{Error, Result};
use crate::formats::PointCloud;
use crate::io::{read_file, write_file, Layout};

pub use downsample::downsample_sequence;
pub use normalize::normalize_sequence;
pub use play::{play_sequence, play_tiers};

/// What a batch job went through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub frames: usize,
    pub points_in: usize,
    pub points_out: usize,
}

impl BatchReport {
    fn record(&mut self, points_in: usize, points_out: usize) {
        self.frames += 1;
        self.points_in += points_in;
        self.points_out += points_out;
    }
}

fn load(path: &Path, layout: &Layout) -> Result<PointCloud> {
    let pc = read_file(path, layout).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    trace!("loaded {:?}: {} points", path, pc.len());
    Ok(pc)
}

fn save(pc: &PointCloud, layout: &Layout, path: &Path) -> Result<()> {
    write_file(pc, layout, path).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn create_output_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|source| Error::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// `<output_dir>/<prefix><file name of input>`
fn output_path(output_dir: &Path, prefix: &str, input: &Path) -> PathBuf {
    let mut name = OsString::from(prefix);
    name.push(input.file_name().unwrap_or_default());
    output_dir.join(name)
}
