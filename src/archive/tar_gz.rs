use crate::runtime::Runtime;
use anyhow::{Context, Result};
use flate2::Compression;
use flate2::write::GzEncoder;
use log::debug;
use std::io::Write;
use std::path::Path;
use tar::{Builder, EntryType, Header};

use super::{ArchiveEntry, Archiver};

/// Writer for gzip-compressed tar archives
pub struct TarGzArchiver;

impl Archiver for TarGzArchiver {
    fn extension(&self) -> &'static str {
        "tar.gz"
    }

    fn write<R: Runtime>(
        &self,
        runtime: &R,
        archive_path: &Path,
        entries: &[ArchiveEntry],
    ) -> Result<()> {
        let file = runtime.create_file(archive_path)?;
        let encoder = GzEncoder::new(file, Compression::default());
        let mut tar = Builder::new(encoder);

        for entry in entries {
            let data = runtime
                .read(&entry.source)
                .with_context(|| format!("Failed to read {:?}", entry.source))?;

            let mut header = Header::new_gnu();
            header.set_entry_type(EntryType::Regular);
            header.set_size(data.len() as u64);
            header.set_mode(entry.mode);
            header.set_mtime(0);

            debug!("Adding {} ({} bytes)", entry.name, data.len());
            tar.append_data(&mut header, &entry.name, data.as_slice())
                .with_context(|| format!("Failed to append tar entry {}", entry.name))?;
        }

        let encoder = tar.into_inner().context("Failed to finish tar stream")?;
        let mut file = encoder.finish().context("Failed to finish gzip stream")?;
        file.flush().context("Failed to flush archive")?;
        Ok(())
    }
}
