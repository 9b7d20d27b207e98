//! # pthread fixup
//!
//! This crate patches the `pyodide.asm.js` loader generated by Emscripten so that it can
//! spawn pthreads. Every patch inserts a fixed block of JavaScript right after an anchor
//! line, and the whole run fails if an anchor is missing.
//! # Example
//! ```no_run
//! use std::path::Path;
//! use pthread_fixup::patch_file;
//!
//! # fn main() -> Result<(), pthread_fixup::PatchError> {
//! patch_file(Path::new("dist/pyodide.asm.js"))?; // supply your own path here
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod patching;
pub mod util;

pub use self::error::PatchError;
pub use self::patching::patcher::{Insertion, LinePatcher};
pub use self::patching::patches::{apply_all, Patch};
pub use self::util::document_from_source;
pub use self::util::load_document_from_file;
pub use self::util::patch_file;
pub use self::util::patch_source;
pub use self::util::save_document_to_file;
pub use self::util::source_from_document;
