//! Finding conversation directories under an export root.
//!
//! A conversation directory is any directory that directly contains the
//! transcript file. Once found, its subdirectories are not searched: nested
//! folders of a conversation belong to it (e.g. media subfolders).

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{ChatweaveError, Result};

/// Returns every directory under `root` (including `root` itself) that
/// contains `file_name`, in depth-first order sorted by name.
///
/// Unreadable subdirectories are logged and skipped.
///
/// # Errors
///
/// [`ChatweaveError::InvalidConfig`] if `root` is not a directory.
///
/// # Example
///
/// ```rust,no_run
/// use chatweave::discovery::discover_transcripts;
///
/// # fn main() -> chatweave::Result<()> {
/// for dir in discover_transcripts("exports".as_ref(), "messages.txt")? {
///     println!("{}", dir.display());
/// }
/// # Ok(())
/// # }
/// ```
pub fn discover_transcripts(root: &Path, file_name: &str) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(ChatweaveError::invalid_config(format!(
            "{} is not a directory",
            root.display()
        )));
    }

    let mut found = Vec::new();
    let mut walker = WalkDir::new(root).sort_by_file_name().into_iter();

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable path");
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }

        if entry.path().join(file_name).is_file() {
            found.push(entry.into_path());
            walker.skip_current_dir();
        }
    }

    debug!(root = %root.display(), count = found.len(), "discovered transcripts");
    Ok(found)
}
