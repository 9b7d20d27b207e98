use std::fmt::{Display, Formatter};

use tracing::info;

use super::patcher::{Insertion, LinePatcher};
use crate::error::PatchError;

/// # Patch enum
///
/// Each variant is one pass over the generated `pyodide.asm.js`, made of one or more
/// [`Insertion`]s. The passes must run in the order given by [`Patch::ALL`].
/// # Example
///
/// ```
/// use pthread_fixup::{util::document_from_source, Patch};
///
/// # fn main() -> Result<(), pthread_fixup::PatchError> {
/// let mut lines = document_from_source("var pthreadMainJs = _scriptName;\n");
/// Patch::PthreadMainJs.apply(&mut lines)?;
/// assert_eq!(lines.len(), 3);
/// # Ok(())
/// # }
/// ```
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Patch {
    SentinelStubs,
    PthreadMainJs,
    DynamicLibraryOffsets,
}

impl Patch {
    pub const ALL: [Patch; 3] = [
        Patch::SentinelStubs,
        Patch::PthreadMainJs,
        Patch::DynamicLibraryOffsets,
    ];

    /// # Applies every insertion of the patch to the document, in order.
    pub fn apply(self, lines: &mut Vec<String>) -> Result<(), PatchError> {
        lines.insert_all(self.insertions())?;
        info!("Applied {} patch", self);

        Ok(())
    }

    pub fn insertions(self) -> &'static [Insertion] {
        match self {
            Patch::SentinelStubs => SENTINEL_STUBS,
            Patch::PthreadMainJs => PTHREAD_MAIN_JS,
            Patch::DynamicLibraryOffsets => DYNAMIC_LIBRARY_OFFSETS,
        }
    }
}

impl Display for Patch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Patch::SentinelStubs => write!(f, "sentinel-stubs"),
            Patch::PthreadMainJs => write!(f, "pthread-main-js"),
            Patch::DynamicLibraryOffsets => write!(f, "dynamic-library-offsets"),
        }
    }
}

/// # Applies all patches in their required order.
pub fn apply_all(lines: &mut Vec<String>) -> Result<(), PatchError> {
    Patch::ALL.iter().try_for_each(|patch| patch.apply(lines))
}

// `is_sentinel` and `create_sentinel` don't resolve inside a pthread. The stubs only
// have to get linking through; threaded code is self-contained C that never calls them.
const SENTINEL_STUBS: &[Insertion] = &[Insertion::new(
    r#""env": wasmImports,"#,
    r#"
    ...(ENVIRONMENT_IS_PTHREAD && { "sentinel": {"is_sentinel":_is_sentinel, "create_sentinel":_create_sentinel} }), //stubs-won't actually work, but the linking will pass
"#,
)];

// Module["mainScriptUrlOrBlob"] can't be set from Pyodide, so the worker sets
// PTHREAD_MAIN_JS instead. Without it the pthread loads the worker script.
const PTHREAD_MAIN_JS: &[Insertion] = &[Insertion::new(
    "var pthreadMainJs = _scriptName;",
    r#"
    if(typeof PTHREAD_MAIN_JS !== 'undefined') {
        pthreadMainJs = PTHREAD_MAIN_JS;
    }
"#,
)];

// Libraries must land at the same wasmTable offset in the child as in the parent,
// or function pointers passed between them resolve to different functions.
const DYNAMIC_LIBRARY_OFFSETS: &[Insertion] = &[
    Insertion::new(
        "var moduleRtn;",
        r#"
  var myDynamicLibraryOffsets = {};
  var parentDynamicLibraryOffsets = {};
"#,
    ),
    Insertion::new(
        "dynamicLibraries = msgData.dynamicLibraries;",
        r#"
        //we use this to make sure dynamic libraries are loaded to the same wasmTable offset in this thread
        //as they are in the parent (this is not obviously going to happen since eg getEmptyTableSlot() grows the table
        //and could have been called in the parent in between dlopen/other module loading calls)
        if(msgData.dynamicLibraryOffsets !== undefined) {
          parentDynamicLibraryOffsets = msgData.dynamicLibraryOffsets;
        }
"#,
    ),
    Insertion::new(
        "dynamicLibraries,",
        r#"
      dynamicLibraryOffsets: myDynamicLibraryOffsets,
"#,
    ),
    Insertion::new(
        "}, localScope, handle) {",
        r#"
  if(ENVIRONMENT_IS_PTHREAD && parentDynamicLibraryOffsets !== undefined) {
    const offset = parentDynamicLibraryOffsets[libName];
    //offset<wasmTable.length means that we can't load the library to the right offset, so we give up.
    //note that it will fail, in practice, when a thread finishes and is reused since the library
    //is already loaded into that thread and wasmTable.length will be too high.
    //we don't really want to "properly" support this ATM though it's doable and would require to keep track
    //of the offsets of previously loaded libraries.
    if(offset === undefined || offset < wasmTable.length) {
      throw new Error(`failing to load dynamic library ${libName} - parent offset is ${offset}, wasmTable.length=${wasmTable.length} (NOTE: if you joined a thread and created a new one, it might have caused this error)`);
    }
    //make sure we load the dynamic library to the same offset as it was loaded to in the parent -
    //otherwise function pointers (indexes) will not match in the child & parent thread
    if(offset > wasmTable.length) {
      wasmTable.grow(offset - wasmTable.length);
    }
  }

  myDynamicLibraryOffsets[libName] = wasmTable.length;
"#,
    ),
];
