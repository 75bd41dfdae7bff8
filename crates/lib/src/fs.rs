//! Filesystem collaborator.
//!
//! The orchestrator never touches the filesystem directly for build output; it
//! goes through [`FileSystem`] so every primitive reports success or failure as
//! an `io::Result` and the caller decides which domain error it becomes.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, trace};
use walkdir::WalkDir;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// What a path points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
  Missing,
  File,
  Directory,
  /// Exists but is neither a regular file nor a directory, or could not be inspected.
  Other,
}

pub trait FileSystem: Send + Sync {
  fn entry_kind(&self, path: &Path) -> EntryKind;

  /// Copy a single file. If `dst` is an existing directory the file is copied into it.
  fn copy_file(&self, src: &Path, dst: &Path) -> io::Result<()>;

  /// Recursively copy `src` into `dst`, merging with anything already there.
  fn copy_tree(&self, src: &Path, dst: &Path) -> io::Result<()>;

  fn remove_tree(&self, path: &Path) -> io::Result<()>;

  /// Create a single directory. Fails if it already exists.
  fn create_directory(&self, path: &Path) -> io::Result<()>;

  /// Create a directory and any missing parents.
  fn create_directory_all(&self, path: &Path) -> io::Result<()>;

  fn write_file(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

  /// Deflate the whole of `dir` into a zip archive at `archive`.
  fn archive_directory(&self, dir: &Path, archive: &Path) -> io::Result<()>;

  fn exists(&self, path: &Path) -> bool {
    self.entry_kind(path) != EntryKind::Missing
  }
}

/// [`FileSystem`] over the local disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
  fn entry_kind(&self, path: &Path) -> EntryKind {
    match fs::metadata(path) {
      Ok(meta) if meta.is_file() => EntryKind::File,
      Ok(meta) if meta.is_dir() => EntryKind::Directory,
      Ok(_) => EntryKind::Other,
      Err(e) if e.kind() == io::ErrorKind::NotFound => EntryKind::Missing,
      Err(_) => EntryKind::Other,
    }
  }

  fn copy_file(&self, src: &Path, dst: &Path) -> io::Result<()> {
    let target = if dst.is_dir() {
      let name = src
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "source has no file name"))?;
      dst.join(name)
    } else {
      dst.to_path_buf()
    };
    trace!(src = ?src, dst = ?target, "copying file");
    fs::copy(src, &target)?;
    Ok(())
  }

  fn copy_tree(&self, src: &Path, dst: &Path) -> io::Result<()> {
    debug!(src = ?src, dst = ?dst, "copying tree");
    fs::create_dir_all(dst)?;
    for entry in WalkDir::new(src).min_depth(1) {
      let entry = entry?;
      let relative = entry.path().strip_prefix(src).map_err(io::Error::other)?;
      let target = dst.join(relative);
      let file_type = entry.file_type();
      if file_type.is_dir() {
        fs::create_dir_all(&target)?;
      } else {
        fs::copy(entry.path(), &target)?;
      }
    }
    Ok(())
  }

  fn remove_tree(&self, path: &Path) -> io::Result<()> {
    debug!(path = ?path, "removing tree");
    fs::remove_dir_all(path)
  }

  fn create_directory(&self, path: &Path) -> io::Result<()> {
    fs::create_dir(path)
  }

  fn create_directory_all(&self, path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
  }

  fn write_file(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
    let parent = path
      .parent()
      .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "destination has no parent directory"))?;
    let mut tmp = temp_file_in(parent)?;
    tmp.write_all(contents)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
  }

  fn archive_directory(&self, dir: &Path, archive: &Path) -> io::Result<()> {
    debug!(dir = ?dir, archive = ?archive, "archiving directory");
    let file = File::create(archive)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
      let entry = entry?;
      let relative = entry.path().strip_prefix(dir).map_err(io::Error::other)?;
      let name = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/");

      if entry.file_type().is_dir() {
        zip.add_directory(format!("{}/", name), options).map_err(io::Error::other)?;
      } else if entry.file_type().is_file() {
        zip.start_file(name, options).map_err(io::Error::other)?;
        let mut source = File::open(entry.path())?;
        io::copy(&mut source, &mut zip)?;
      }
    }

    zip.finish().map_err(io::Error::other)?;
    Ok(())
  }
}

/// Temporary file that persists with the mode a plain `File::create` would give.
#[cfg(unix)]
fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
  use std::os::unix::fs::PermissionsExt;

  tempfile::Builder::new()
    .permissions(fs::Permissions::from_mode(0o666))
    .tempfile_in(dir)
}

#[cfg(not(unix))]
fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
  NamedTempFile::new_in(dir)
}
