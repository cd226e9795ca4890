mod tar_gz;
mod zip;

use crate::cleanup::CleanupGuard;
use crate::error::PackageError;
use crate::platform::Platform;
use crate::runtime::Runtime;
use anyhow::Result;
use log::{debug, info};
use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub use self::tar_gz::TarGzArchiver;
pub use self::zip::ZipArchiver;

/// One file to store in an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// File on disk to read the contents from
    pub source: PathBuf,
    /// Relative, `/`-separated name inside the archive
    pub name: String,
    /// Unix permission bits
    pub mode: u32,
}

impl ArchiveEntry {
    pub fn new(source: impl Into<PathBuf>, name: impl Into<String>, mode: u32) -> Self {
        Self {
            source: source.into(),
            name: name.into(),
            mode,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    TarGz,
}

impl ArchiveFormat {
    pub fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::Windows | Platform::Osx => ArchiveFormat::Zip,
            Platform::Linux => ArchiveFormat::TarGz,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ArchiveFormat::Zip => ZipArchiver.extension(),
            ArchiveFormat::TarGz => TarGzArchiver.extension(),
        }
    }
}

/// Trait for format-specific archive writers
pub trait Archiver: Send + Sync {
    /// File extension of the archives this writer produces, without the leading dot
    fn extension(&self) -> &'static str;

    /// Write `entries` into a new archive at `archive_path`, replacing any existing file
    fn write<R: Runtime>(
        &self,
        runtime: &R,
        archive_path: &Path,
        entries: &[ArchiveEntry],
    ) -> Result<()>;
}

/// Write an archive in `format` to `dest`.
///
/// The archive is written to a `.partial` sibling first and only renamed to
/// `dest` once it has been finished and flushed. On failure the partial file
/// is removed and `dest` is left untouched.
#[tracing::instrument(skip(runtime, entries))]
pub fn write_archive<R: Runtime>(
    runtime: &R,
    format: ArchiveFormat,
    dest: &Path,
    entries: &[ArchiveEntry],
) -> Result<()> {
    ensure_unique(entries)?;

    let partial = partial_path(dest);
    let guard = CleanupGuard::new(runtime, partial.clone());

    debug!("Writing {} entries to {:?}", entries.len(), partial);
    match format {
        ArchiveFormat::Zip => ZipArchiver.write(runtime, &partial, entries)?,
        ArchiveFormat::TarGz => TarGzArchiver.write(runtime, &partial, entries)?,
    }

    runtime.rename(&partial, dest)?;
    guard.success();

    info!("Wrote {}", dest.display());
    Ok(())
}

fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("archive"));
    name.push(".partial");
    dest.with_file_name(name)
}

fn ensure_unique(entries: &[ArchiveEntry]) -> Result<()> {
    let mut seen = HashSet::new();
    for entry in entries {
        if !seen.insert(entry.name.as_str()) {
            return Err(PackageError::DuplicateEntry(entry.name.clone()).into());
        }
    }
    Ok(())
}
