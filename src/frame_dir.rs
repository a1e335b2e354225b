use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

#[derive(Error, Debug)]
#[error("cannot list directory {path:?}")]
pub struct FrameDirError {
    path: PathBuf,
    #[source]
    source: io::Error,
}

/// The frames of a sequence: the files of one directory in lexicographical order of their
/// names.
///
/// The directory is listed once, on [FrameDir::open]. Iterating yields full paths and
/// can be repeated; files are not opened here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameDir {
    dir: PathBuf,
    names: Vec<OsString>,
}

impl FrameDir {
    /// Lists every regular file of `dir`. Sub-directories are skipped, nothing else is
    /// filtered out.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, FrameDirError> {
        let dir = dir.as_ref().to_path_buf();
        let names = list_files(&dir).map_err(|source| FrameDirError {
            path: dir.clone(),
            source,
        })?;
        debug!("found {} frames in {:?}", names.len(), dir);
        Ok(Self::with_names(dir, names))
    }

    /// A sequence of the given file names inside `dir`, sorted the same way as [FrameDir::open].
    pub fn with_names<P: Into<PathBuf>>(dir: P, mut names: Vec<OsString>) -> Self {
        names.sort();
        Self {
            dir: dir.into(),
            names,
        }
    }

    /// The same file names looked up in another directory.
    pub fn rebase<P: Into<PathBuf>>(&self, dir: P) -> Self {
        Self {
            dir: dir.into(),
            names: self.names.clone(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Return number of frames
    pub fn count(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[OsString] {
        &self.names
    }

    pub fn paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.names.iter().map(move |name| self.dir.join(name))
    }
}

fn list_files(dir: &Path) -> io::Result<Vec<OsString>> {
    let mut names = vec![];
    for entry in dir.read_dir()? {
        let entry = entry?;
        if !entry.path().is_file() {
            // We do not recursively search
            continue;
        }
        names.push(entry.file_name());
    }
    Ok(names)
}
