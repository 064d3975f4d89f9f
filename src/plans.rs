//! Per-user plan artifacts on disk

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Deterministic artifact path for a caller-supplied identifier.
pub fn plan_path(dir: &Path, uid: &str) -> PathBuf {
    dir.join(format!("{uid}.txt"))
}

/// Write the artifact, creating the directory if needed. A prior plan for
/// the same uid is overwritten whole.
pub fn write_plan(dir: &Path, uid: &str, artifact: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create plan directory {}", dir.display()))?;
    let path = plan_path(dir, uid);
    fs::write(&path, artifact)
        .with_context(|| format!("Failed to write plan to {}", path.display()))?;
    Ok(path)
}

/// Read back a previously generated plan.
pub fn read_plan(dir: &Path, uid: &str) -> Result<String> {
    let path = plan_path(dir, uid);
    fs::read_to_string(&path).with_context(|| format!("No plan found at {}", path.display()))
}
