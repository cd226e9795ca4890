pub mod archive;
pub mod assets;
pub mod cleanup;
pub mod config;
pub mod error;
pub mod packager;
pub mod platform;
pub mod runtime;
pub mod toolchain;

pub use config::{MacosPackaging, PackagerConfig};
pub use error::PackageError;
pub use packager::{Packager, package};
