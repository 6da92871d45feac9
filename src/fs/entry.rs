//! Listing entry types and classification.

use std::time::SystemTime;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::remote::{DirentType, RawStat};

/// Entry kind enumeration for everything a share can list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Top-level network-exposed directory root.
    Share,
    /// Directory
    Directory,
    /// Regular file
    File,
    /// Symbolic link
    Link,
    /// Anything else the remote can report (printers, workgroups, servers)
    Unknown,
}

impl EntryKind {
    /// Classify a directory-entry type code.
    ///
    /// This is the single source of truth for entry types: listings and
    /// pre-operation checks both go through it. Only the exact regular-file
    /// code qualifies as `File`; printer/comms/IPC shares, workgroups and
    /// servers are `Unknown`, which keeps them out of every file-only action.
    pub fn from_dirent(kind: DirentType) -> Self {
        match kind {
            DirentType::Dir => EntryKind::Directory,
            DirentType::File => EntryKind::File,
            DirentType::Link => EntryKind::Link,
            DirentType::FileShare => EntryKind::Share,
            DirentType::Workgroup
            | DirentType::Server
            | DirentType::PrinterShare
            | DirentType::CommsShare
            | DirentType::IpcShare => EntryKind::Unknown,
        }
    }

    /// Classify POSIX-style mode bits from a stat result.
    pub fn from_mode(mode: u32) -> Self {
        match mode & 0o170_000 {
            0o040_000 => EntryKind::Directory,
            0o100_000 => EntryKind::File,
            0o120_000 => EntryKind::Link,
            _ => EntryKind::Unknown,
        }
    }

    /// Check if entries of this kind can be browsed into.
    pub fn is_container(&self) -> bool {
        matches!(self, EntryKind::Share | EntryKind::Directory)
    }

    /// Lowercase noun for user-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Share => "share",
            EntryKind::Directory => "directory",
            EntryKind::File => "file",
            EntryKind::Link => "link",
            EntryKind::Unknown => "item",
        }
    }
}

/// One listed item within a directory listing.
///
/// Created transiently per listing and owned by the listing response.
/// Listing entries carry `None` metadata (enumeration does not stat each
/// child); the view operation populates the full record from stat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub name: String,
    /// Relative path, `/`-joined, no leading slash.
    pub path: String,
    pub kind: EntryKind,
    pub size: Option<u64>,
    pub accessed: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    pub changed: Option<DateTime<Utc>>,
}

impl Entry {
    /// An entry as it appears in a directory listing: name and kind only.
    pub fn for_listing(name: impl Into<String>, parent: &str, kind: EntryKind) -> Self {
        let name = name.into();
        let path = crate::path::join(parent, &name);
        Entry {
            name,
            path,
            kind,
            size: None,
            accessed: None,
            modified: None,
            changed: None,
        }
    }

    /// An entry populated from a stat result, as used by the view action.
    pub fn from_stat(path: impl Into<String>, stat: &RawStat) -> Self {
        let path = path.into();
        let (_, name) = crate::path::split_name(&path);
        Entry {
            name: name.to_string(),
            kind: EntryKind::from_mode(stat.mode),
            size: Some(stat.size),
            accessed: stat.accessed.map(to_datetime),
            modified: stat.modified.map(to_datetime),
            changed: stat.changed.map(to_datetime),
            path,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

fn to_datetime(time: SystemTime) -> DateTime<Utc> {
    DateTime::<Utc>::from(time)
}
