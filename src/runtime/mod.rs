//! Runtime abstraction for system operations.
//!
//! This module provides a trait-based abstraction over host queries and
//! filesystem operations, so the packaging pipeline can run against a mock.
//!
//! # Structure
//!
//! - `path` - Path helpers (normalize, archive entry names)
//! - `host` - Operating system, machine and working directory queries
//! - `fs` - File system operations (read, write, directory, glob)

mod fs;
mod host;
pub mod path;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use path::entry_name;

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // Host
    /// Raw operating system name, e.g. `linux`, `macos`, `windows`.
    fn os_name(&self) -> String;

    /// Raw machine (hardware) name as reported by the host, e.g. `x86_64`, `arm64`.
    fn machine(&self) -> Result<String>;

    fn current_dir(&self) -> Result<PathBuf>;

    // File System
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
    fn read(&self, path: &Path) -> Result<Vec<u8>>;
    fn rename(&self, from: &Path, to: &Path) -> Result<()>;
    fn remove_file(&self, path: &Path) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;
    fn is_file(&self, path: &Path) -> bool;
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;
    fn create_file(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>>;

    /// Unix permission bits of a file. Returns `0o644` on platforms without them.
    fn file_mode(&self, path: &Path) -> Result<u32>;

    /// Expand a glob pattern into the matching paths, in the order the glob yields them.
    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn os_name(&self) -> String {
        self.os_name_impl()
    }

    fn machine(&self) -> Result<String> {
        self.machine_impl()
    }

    fn current_dir(&self) -> Result<PathBuf> {
        self.current_dir_impl()
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.write_impl(path, contents)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.read_impl(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        self.rename_impl(from, to)
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        self.remove_file_impl(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.exists_impl(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.is_dir_impl(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.is_file_impl(path)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        self.read_dir_impl(path)
    }

    fn create_file(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>> {
        self.create_file_impl(path)
    }

    fn file_mode(&self, path: &Path) -> Result<u32> {
        self.file_mode_impl(path)
    }

    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        self.glob_impl(pattern)
    }
}
