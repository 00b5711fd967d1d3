pub mod cli;
pub mod fetch;
pub mod history;
pub mod redact;

use std::path::{Path, PathBuf};

use crate::error::CliError;

/// A directory target keeps `default_name`; anything else is the file path.
pub(crate) fn resolve_out(out: &Path, default_name: &str) -> PathBuf {
    if out.is_dir() {
        out.join(default_name)
    } else {
        out.to_path_buf()
    }
}

pub(crate) async fn write_out(path: &Path, bytes: &[u8]) -> Result<(), CliError> {
    tokio::fs::write(path, bytes)
        .await
        .map_err(|source| CliError::Write {
            path: path.display().to_string(),
            source,
        })
}
