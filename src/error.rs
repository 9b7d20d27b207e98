use std::io;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum PatchError {
    /// The anchor line is missing, so the generated loader no longer looks the way the patches expect.
    #[error("failed to insert `{insertion}` after `{anchor}` - did not find the latter")]
    AnchorNotFound { anchor: String, insertion: String },

    #[error("could not read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("could not write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}
