use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::downsample::DownsampleError;
use crate::frame_dir::FrameDirError;
use crate::io::ReadError;
use crate::render::RenderError;

/// Everything that can stop a job. None of these are retried.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    FrameDir(#[from] FrameDirError),
    #[error("failed to load {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: ReadError,
    },
    #[error("failed to write {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot create output directory {path:?}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to downsample {path:?}")]
    Downsample {
        path: PathBuf,
        #[source]
        source: DownsampleError,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

pub type Result<T> = std::result::Result<T, Error>;
