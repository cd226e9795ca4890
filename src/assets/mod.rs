//! Collect the files that go into an archive, with their entry names.

use anyhow::{Context, Result, anyhow};
use log::debug;
use std::path::Path;

use crate::archive::ArchiveEntry;
use crate::config::PackagerConfig;
use crate::runtime::{Runtime, entry_name};

/// Enumerate every file under the assets directory.
///
/// Entries are named relative to the project root (`assets/a.txt`,
/// `assets/sub/b.txt`) and sorted by name. Directories are skipped; their
/// contents are matched by the recursive glob.
#[tracing::instrument(skip(runtime, config))]
pub fn collect_assets<R: Runtime>(runtime: &R, config: &PackagerConfig) -> Result<Vec<ArchiveEntry>> {
    let assets_path = config.assets_path();
    if !runtime.is_dir(&assets_path) {
        return Err(anyhow!(
            "Assets directory not found: {}",
            assets_path.display()
        ));
    }

    let pattern = config.asset_pattern();
    debug!("Globbing assets with {}", pattern);

    let mut entries = Vec::new();
    for path in runtime.glob(&pattern)? {
        if !runtime.is_file(&path) {
            continue;
        }
        entries.push(entry_for(runtime, &path, config.project_dir())?);
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    debug!("Collected {} asset(s)", entries.len());
    Ok(entries)
}

/// Recursively walk `root`, hidden files included, naming entries relative to `base`.
pub fn collect_tree<R: Runtime>(runtime: &R, root: &Path, base: &Path) -> Result<Vec<ArchiveEntry>> {
    let mut entries = Vec::new();
    walk(runtime, root, base, &mut entries)
        .with_context(|| format!("Failed to walk {}", root.display()))?;
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

fn walk<R: Runtime>(
    runtime: &R,
    dir: &Path,
    base: &Path,
    entries: &mut Vec<ArchiveEntry>,
) -> Result<()> {
    for path in runtime.read_dir(dir)? {
        if runtime.is_dir(&path) {
            walk(runtime, &path, base, entries)?;
        } else {
            entries.push(entry_for(runtime, &path, base)?);
        }
    }
    Ok(())
}

fn entry_for<R: Runtime>(runtime: &R, path: &Path, base: &Path) -> Result<ArchiveEntry> {
    let name = entry_name(path, base).ok_or_else(|| {
        anyhow!(
            "{} is not under {}",
            path.display(),
            base.display()
        )
    })?;
    let mode = runtime.file_mode(path)?;
    Ok(ArchiveEntry::new(path, name, mode))
}
