use anyhow::Result;
use clap::Parser;
use log::{error, info};
use std::process::ExitCode;
use work_timer_release::runtime::{RealRuntime, Runtime};
use work_timer_release::toolchain::CargoToolchain;
use work_timer_release::{PackageError, PackagerConfig, package};

/// work-timer-release - build and package work_timer for this machine
///
/// Run from the work_timer project root. Builds the release binary with cargo
/// and writes one archive into the current directory:
///
///   work-timer-windows-<arch>.zip
///   work-timer-osx-<arch>.zip        (contains the .app bundle)
///   work-timer-linux-amd64.tar.gz
///
/// Set RUST_LOG=debug for detailed output.
#[derive(Parser, Debug)]
#[command(author, version = env!("WORK_TIMER_RELEASE_VERSION"), about)]
struct Cli {}

fn run() -> Result<()> {
    let runtime = RealRuntime;
    let project_dir = runtime.current_dir()?;
    let config = PackagerConfig::new(&project_dir);
    let toolchain = CargoToolchain::new(&project_dir);

    let archive = package(&runtime, &toolchain, &config)?;
    info!("Created {}", archive.display());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let _cli = Cli::parse();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            let code = e
                .downcast_ref::<PackageError>()
                .map(PackageError::exit_code)
                .unwrap_or(1);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
