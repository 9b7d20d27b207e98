use std::fs::{read_to_string, write};
use std::path::Path;

use tracing::info;

use crate::error::PatchError;
use crate::patching::patches::apply_all;

// Split the source into lines. A trailing newline leaves a final empty line behind.
pub fn document_from_source(source: &str) -> Vec<String> {
    source.split('\n').map(str::to_owned).collect()
}

pub fn source_from_document(lines: &[String]) -> String {
    let mut source = lines.join("\n");
    source.push('\n');

    source
}

pub fn load_document_from_file(path: &Path) -> Result<Vec<String>, PatchError> {
    let source = read_to_string(path).map_err(|source| PatchError::Read {
        path: path.to_owned(),
        source,
    })?;

    Ok(document_from_source(&source))
}

pub fn save_document_to_file(lines: &[String], path: &Path) -> Result<(), PatchError> {
    write(path, source_from_document(lines)).map_err(|source| PatchError::Write {
        path: path.to_owned(),
        source,
    })
}

/// # Runs every patch over an in-memory loader source.
pub fn patch_source(source: &str) -> Result<String, PatchError> {
    let mut lines = document_from_source(source);
    apply_all(&mut lines)?;

    Ok(source_from_document(&lines))
}

/// # Patches the loader at `path` in place.
///
/// The file is only rewritten once every patch has been applied in memory, so a
/// missing anchor leaves it untouched.
pub fn patch_file(path: &Path) -> Result<(), PatchError> {
    // Read the generated loader
    let mut lines = load_document_from_file(path)?;
    let original_len = lines.len();

    // Patch it
    apply_all(&mut lines)?;

    // Overwrite the original
    save_document_to_file(&lines, path)?;
    info!(
        "Patched {} ({} lines inserted)",
        path.display(),
        lines.len() - original_len
    );

    Ok(())
}
