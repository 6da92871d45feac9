//! Single-file view model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::fs::entry::Entry;
use crate::fs::listing::{crumbs_for, Crumb};
use crate::path::parent_of;

/// Stat-based model of one file, as produced by the view action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewModel {
    pub entry: Entry,
    /// Human-readable rendering of the size.
    pub size_human: String,
    pub accessed: Option<String>,
    pub modified: Option<String>,
    pub changed: Option<String>,
    /// Parent path, `None` for a file sitting directly in the share root.
    pub parent: Option<String>,
    pub crumbs: Vec<Crumb>,
}

impl ViewModel {
    pub(crate) fn new(entry: Entry) -> Self {
        ViewModel {
            size_human: human_size(entry.size.unwrap_or(0)),
            accessed: entry.accessed.map(format_timestamp),
            modified: entry.modified.map(format_timestamp),
            changed: entry.changed.map(format_timestamp),
            parent: parent_of(&entry.path).map(|p| p.to_string()),
            crumbs: crumbs_for(&entry.path),
            entry,
        }
    }
}

/// Render a byte count for humans: exact below 1 KB, one decimal above.
pub fn human_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes < KB {
        format!("{} bytes", bytes)
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else if bytes < GB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes < TB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else {
        format!("{:.1} TB", bytes as f64 / TB as f64)
    }
}

fn format_timestamp(time: DateTime<Utc>) -> String {
    time.format("%a %b %e %Y %H:%M:%S").to_string()
}
