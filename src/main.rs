use std::path::PathBuf;

use clap::Parser;
use pthread_fixup::{patch_file, PatchError};
use tracing_subscriber::EnvFilter;

/// Patches the Emscripten-generated pyodide.asm.js to support spawning pthreads
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    /// The loader file, rewritten in place
    file: PathBuf,
}

fn main() -> Result<(), PatchError> {
    // Logs go to stderr, RUST_LOG=debug shows every matched anchor
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    patch_file(&cli.file)
}
