use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, ViewerError};

pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp"];

/// Lists the supported images directly inside `root`, sorted by file name.
///
/// Subdirectories are not descended into. An empty listing is not an error.
pub fn collect_images(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(ViewerError::invalid_path(root, "does not exist"));
    }
    if !root.is_dir() {
        return Err(ViewerError::invalid_path(root, "is not a directory"));
    }
    // Surface permission problems up front; walkdir would only report them per entry.
    std::fs::read_dir(root).map_err(|err| ViewerError::invalid_path(root, err))?;

    let files = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file() && is_supported_image(entry.path()))
        .map(|entry| entry.into_path())
        .collect();
    Ok(files)
}

pub fn is_supported_image(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|s| s.to_ascii_lowercase()),
        Some(ref ext) if SUPPORTED_EXTENSIONS.contains(&ext.as_str())
    )
}

pub fn is_jpeg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|s| s.eq_ignore_ascii_case("jpg") || s.eq_ignore_ascii_case("jpeg"))
        .unwrap_or(false)
}
