use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Ensures the output directory is safe to write to.
///
/// # Errors
/// * `Error::OutputDirExistsError` - the directory exists and `clobber` is not set
pub fn get_output_dir<P: AsRef<Path>>(output_dir: P, clobber: bool) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    if output_dir.exists() && !clobber {
        return Err(Error::OutputDirExistsError {
            output_dir: output_dir.display().to_string(),
        });
    }
    Ok(output_dir.to_path_buf())
}

pub fn create_dir_all<P: AsRef<Path>>(dest_path: P) -> Result<()> {
    std::fs::create_dir_all(dest_path.as_ref()).map_err(Error::IoError)
}

/// Writes a file, creating its parent directories first.
pub fn write_file<C: AsRef<[u8]>, P: AsRef<Path>>(content: C, dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    if let Some(parent) = dest_path.parent() {
        create_dir_all(parent)?;
    }
    std::fs::write(dest_path, content).map_err(Error::IoError)
}

/// Copies a file, creating the parent directories of the destination first.
pub fn copy_file<P: AsRef<Path>>(source_path: P, dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    if let Some(parent) = dest_path.parent() {
        create_dir_all(parent)?;
    }
    std::fs::copy(source_path.as_ref(), dest_path).map(|_| ()).map_err(Error::IoError)
}

/// Snapshot of a set of files, written back when the guard goes out of scope.
///
/// Files that did not exist when the snapshot was taken are left alone.
#[derive(Debug)]
pub struct SavedFiles {
    root: PathBuf,
    contents: BTreeMap<String, Vec<u8>>,
    restored: bool,
}

impl SavedFiles {
    /// Reads the named files below `root`.
    pub fn snapshot<P, I, S>(root: P, names: I) -> Result<Self>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let root = root.as_ref().to_path_buf();
        let mut contents = BTreeMap::new();
        for name in names {
            let name = name.as_ref();
            let path = root.join(name);
            if path.is_file() {
                log::debug!("Saving '{}'", path.display());
                contents.insert(name.to_string(), std::fs::read(&path)?);
            }
        }
        Ok(Self { root, contents, restored: false })
    }

    /// Names of the files held by the snapshot.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.contents.keys().map(String::as_str)
    }

    /// Writes the saved contents back, reporting the first failure.
    pub fn restore(mut self) -> Result<()> {
        self.restored = true;
        self.write_back()
    }

    fn write_back(&self) -> Result<()> {
        for (name, content) in &self.contents {
            let path = self.root.join(name);
            log::debug!("Restoring '{}'", path.display());
            write_file(content, &path)?;
        }
        Ok(())
    }
}

impl Drop for SavedFiles {
    fn drop(&mut self) {
        if !self.restored {
            if let Err(e) = self.write_back() {
                log::error!("Failed to restore saved files: {e}");
            }
        }
    }
}
