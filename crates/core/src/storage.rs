//! Artifact persistence.
//!
//! Writes downloaded image bytes to the output directory under the
//! filename convention from [`crate::naming`]. Existing files are
//! overwritten silently so a regeneration run replaces stale images.

use std::path::{Path, PathBuf};

use crate::id::ImageId;
use crate::naming::output_filename;

/// Write image bytes for `id` into `dir`, creating the directory if
/// needed. Returns the path of the written file.
pub fn write_artifact(dir: &Path, id: &ImageId, bytes: &[u8]) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(output_filename(id));
    std::fs::write(&path, bytes)?;
    Ok(path)
}
