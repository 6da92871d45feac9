//! Share operations split into focused modules.
//!
//! Every operation is a method on [`crate::session::ShareSession`] and is
//! best-effort: a failure partway through a sequence of remote calls is
//! reported, never rolled back. The remote protocol has no atomic
//! rename-into-place here, so a mid-copy fault can leave a partially written
//! destination file.

mod browse;
mod dir_ops;
mod transfer;
mod upload;

pub use transfer::{DownloadModel, COPY_CHUNK_SIZE};

use serde::Serialize;

use crate::error::NavTarget;
use crate::fs::entry::EntryKind;

/// Navigation target for the listing of `path`.
pub(crate) fn listing_of(path: &str) -> NavTarget {
    if path.is_empty() {
        NavTarget::Root
    } else {
        NavTarget::Listing(path.to_string())
    }
}

/// Successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Uploaded {
    /// The sanitized filename the content was stored under.
    pub filename: String,
    pub bytes: u64,
}

impl Uploaded {
    pub fn message(&self) -> String {
        format!("The file '{}' was uploaded successfully.", self.filename)
    }
}

/// Successful rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Renamed {
    /// Kind of the renamed entry; the message distinguishes file from
    /// directory by it.
    pub kind: EntryKind,
    pub from: String,
    pub to: String,
}

impl Renamed {
    pub fn message(&self) -> String {
        format!(
            "The {} '{}' was renamed to '{}' successfully.",
            self.kind.label(),
            self.from,
            self.to
        )
    }
}

/// Successful copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Copied {
    pub from: String,
    pub to: String,
    pub bytes: u64,
}

impl Copied {
    pub fn message(&self) -> String {
        format!("A copy of '{}' was created as '{}'.", self.from, self.to)
    }
}

/// Successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Removed {
    pub kind: EntryKind,
    pub name: String,
}

impl Removed {
    pub fn message(&self) -> String {
        format!(
            "The {} '{}' was deleted successfully.",
            self.kind.label(),
            self.name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_of() {
        assert_eq!(listing_of(""), NavTarget::Root);
        assert_eq!(listing_of("a/b"), NavTarget::Listing("a/b".to_string()));
    }

    #[test]
    fn test_outcome_messages_distinguish_kind() {
        let renamed = Renamed {
            kind: EntryKind::Directory,
            from: "old".to_string(),
            to: "new".to_string(),
        };
        assert!(renamed.message().contains("directory 'old'"));

        let removed = Removed {
            kind: EntryKind::File,
            name: "a.txt".to_string(),
        };
        assert!(removed.message().contains("file 'a.txt'"));
    }
}
