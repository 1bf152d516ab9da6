//! Logging setup.
//!
//! The terminal belongs to the game UI, so log output only goes to a file.

use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Install a global `tracing` subscriber writing to `path`.
///
/// With no path nothing is installed and every `tracing` macro stays a no-op.
/// `RUST_LOG` overrides the default `info` level.
pub fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("Failed to install log subscriber: {err}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_no_path_is_a_noop() {
        assert!(init_logging(None).is_ok());
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("snake.log");
        assert!(init_logging(Some(&path)).is_err());
    }
}
