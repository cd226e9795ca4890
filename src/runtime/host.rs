//! Operating system and machine information.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn os_name_impl(&self) -> String {
        env::consts::OS.to_string()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn machine_impl(&self) -> Result<String> {
        #[cfg(unix)]
        {
            let uts = nix::sys::utsname::uname().context("Failed to query uname")?;
            Ok(uts.machine().to_string_lossy().into_owned())
        }
        #[cfg(windows)]
        {
            // Same source Windows uses for its own machine name (AMD64, ARM64, x86)
            Ok(env::var("PROCESSOR_ARCHITECTURE")
                .unwrap_or_else(|_| env::consts::ARCH.to_string()))
        }
        #[cfg(not(any(unix, windows)))]
        {
            Ok(env::consts::ARCH.to_string())
        }
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn current_dir_impl(&self) -> Result<PathBuf> {
        env::current_dir().context("Failed to get current directory")
    }
}
