use crate::runtime::Runtime;
use anyhow::{Context, Result};
use log::debug;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use super::{ArchiveEntry, Archiver};

/// Writer for deflate-compressed .zip archives
pub struct ZipArchiver;

impl Archiver for ZipArchiver {
    fn extension(&self) -> &'static str {
        "zip"
    }

    fn write<R: Runtime>(
        &self,
        runtime: &R,
        archive_path: &Path,
        entries: &[ArchiveEntry],
    ) -> Result<()> {
        // zip crate requires Write + Seek, but Runtime::create_file returns Box<dyn Write + Send>
        // so the archive is assembled in memory and written out in one go
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut zip = ZipWriter::new(&mut buffer);

            for entry in entries {
                let data = runtime
                    .read(&entry.source)
                    .with_context(|| format!("Failed to read {:?}", entry.source))?;

                // Fixed timestamp keeps repeated builds byte-comparable
                let options = SimpleFileOptions::default()
                    .compression_method(CompressionMethod::Deflated)
                    .last_modified_time(DateTime::default())
                    .unix_permissions(entry.mode);

                debug!("Adding {} ({} bytes)", entry.name, data.len());
                zip.start_file(entry.name.as_str(), options)
                    .with_context(|| format!("Failed to start ZIP entry {}", entry.name))?;
                zip.write_all(&data)
                    .with_context(|| format!("Failed to write ZIP entry {}", entry.name))?;
            }

            zip.finish().context("Failed to finish ZIP archive")?;
        }

        runtime.write(archive_path, buffer.get_ref())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{MockRuntime, RealRuntime};
    use std::fs::{self, File};
    use std::io::Read;
    use tempfile::tempdir;
    use zip::ZipArchive;

    fn read_entries(path: &Path) -> Result<Vec<(String, Vec<u8>)>> {
        let mut archive = ZipArchive::new(File::open(path)?)?;
        let mut out = Vec::new();
        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let mut content = Vec::new();
            file.read_to_end(&mut content)?;
            out.push((file.name().to_string(), content));
        }
        Ok(out)
    }

    #[test]
    fn test_extension() {
        assert_eq!(ZipArchiver.extension(), "zip");
    }

    #[test]
    fn test_write_zip_entries() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("bin"), "binary")?;
        fs::write(dir.path().join("a.txt"), "asset a")?;

        let archive_path = dir.path().join("out.zip");
        let entries = vec![
            ArchiveEntry::new(dir.path().join("bin"), "work_timer.exe", 0o755),
            ArchiveEntry::new(dir.path().join("a.txt"), "assets/a.txt", 0o644),
        ];
        ZipArchiver.write(&RealRuntime, &archive_path, &entries)?;

        let read = read_entries(&archive_path)?;
        assert_eq!(
            read,
            vec![
                ("work_timer.exe".to_string(), b"binary".to_vec()),
                ("assets/a.txt".to_string(), b"asset a".to_vec()),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_write_zip_uses_deflate_and_modes() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("bin"), "binary ".repeat(64))?;

        let archive_path = dir.path().join("out.zip");
        let entries = vec![ArchiveEntry::new(dir.path().join("bin"), "work_timer", 0o755)];
        ZipArchiver.write(&RealRuntime, &archive_path, &entries)?;

        let mut archive = ZipArchive::new(File::open(&archive_path)?)?;
        let file = archive.by_index(0)?;
        assert_eq!(file.compression(), CompressionMethod::Deflated);
        assert_eq!(file.unix_mode().map(|m| m & 0o777), Some(0o755));
        Ok(())
    }

    #[test]
    fn test_write_zip_is_deterministic() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("a.txt"), "same")?;
        let entries = vec![ArchiveEntry::new(dir.path().join("a.txt"), "assets/a.txt", 0o644)];

        let first = dir.path().join("first.zip");
        let second = dir.path().join("second.zip");
        ZipArchiver.write(&RealRuntime, &first, &entries)?;
        ZipArchiver.write(&RealRuntime, &second, &entries)?;

        assert_eq!(fs::read(first)?, fs::read(second)?);
        Ok(())
    }

    #[test]
    fn test_write_zip_read_error_writes_nothing() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_read()
            .returning(|_| Err(anyhow::anyhow!("permission denied")));
        runtime.expect_write().never();

        let entries = vec![ArchiveEntry::new("/p/bin", "work_timer", 0o755)];
        let result = ZipArchiver.write(&runtime, Path::new("/p/out.zip"), &entries);
        assert!(result.is_err());
    }
}
