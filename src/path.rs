//! Path validation and URI construction.
//!
//! Paths arriving from the request layer are relative strings, `/`-joined
//! with no leading slash; the empty path denotes the share root. Every path
//! is checked for traversal sequences before a URI is ever built, for both
//! read and write actions.

use crate::error::{FaultKind, FaultRecord, OpResult};

/// Traversal sequences rejected anywhere inside a path.
const FORBIDDEN_SEGMENTS: &[&str] = &["/../", "\\..\\", "\\.\\", "/./"];

/// Traversal sequences rejected at the start of a path.
const FORBIDDEN_PREFIXES: &[&str] = &["..", "./", ".\\"];

/// Reject paths containing traversal sequences.
///
/// This is a purely syntactic check; it never resolves the path against the
/// remote filesystem. The empty path is valid and denotes the share root.
pub fn check_path_security(path: &str) -> OpResult<()> {
    for prefix in FORBIDDEN_PREFIXES {
        if path.starts_with(prefix) {
            return Err(FaultRecord::with_subject(FaultKind::InvalidPath, path));
        }
    }
    for segment in FORBIDDEN_SEGMENTS {
        if path.contains(segment) {
            return Err(FaultRecord::with_subject(FaultKind::InvalidPath, path));
        }
    }
    Ok(())
}

/// Build the remote URI for a validated path: `root + '/' + path`, without
/// duplicate slashes. This is the only place URIs are constructed.
pub fn build_uri(root: &str, path: &str) -> String {
    let root = root.trim_end_matches('/');
    if path.is_empty() {
        if root.is_empty() {
            "/".to_string()
        } else {
            root.to_string()
        }
    } else {
        format!("{}/{}", root, path)
    }
}

/// Join a directory path and a child name into a new relative path.
pub fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

/// The parent of a relative path, or `None` when the path has no `/`
/// (its parent is the share root).
pub fn parent_of(path: &str) -> Option<&str> {
    path.rfind('/').map(|idx| &path[..idx])
}

/// Split a relative path into `(parent, name)`. A path with no `/` lives
/// directly under the share root, so the parent is the empty path.
pub fn split_name(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(idx) => (&path[..idx], &path[idx + 1..]),
        None => ("", path),
    }
}
