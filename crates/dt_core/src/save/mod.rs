//! File-backed persistence for roster and match documents.
//!
//! All writes go through `write_atomic`: temp file, flush, `sync_all`,
//! rename. A failed save leaves the previously persisted state untouched.

pub mod error;
pub mod match_store;
pub mod roster_store;

pub use error::StoreError;
pub use match_store::{MatchDocument, MatchStore, MatchSummary};
pub use roster_store::RosterStore;

use std::fs::File;
use std::io::Write;
use std::path::Path;

pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    {
        let mut file = File::create(&temp_path)?;
        file.write_all(bytes)?;
        file.flush()?;
        file.sync_all()?;
    }
    std::fs::rename(&temp_path, path)?;

    log::debug!("wrote {} bytes to {:?}", bytes.len(), path);
    Ok(())
}
