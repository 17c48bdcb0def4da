//! Filesystem utilities

use std::path::Path;

use log::debug;

/// Check if a path points at a regular file
///
/// Used before opening the dataset so a wrong path fails with a clear message
/// instead of a driver error.
pub fn is_file(path: &str) -> bool {
    let found = Path::new(path).is_file();
    if !found {
        debug!("Not a regular file: {}", path);
    }
    found
}
