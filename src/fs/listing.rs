//! Directory listing model.
//!
//! The lister produces an ordered presentation model: directories and shares
//! first, then files, each bucket sorted by name, plus the navigation data
//! (parent path, breadcrumbs, at-root flag) the presentation layer needs.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::fs::entry::Entry;
use crate::path::parent_of;

/// Platform artifact names suppressed under [`HiddenPolicy::Hide`].
const HIDDEN_ARTIFACTS: &[&str] = &["desktop.ini", "$RECYCLE.BIN", "RECYCLER", "Thumbs.db"];

/// Per-user toggle for showing dot-prefixed and platform-artifact entries.
///
/// Stored by the request layer (session-scoped) and passed into every browse
/// call; the engine itself keeps no preference state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HiddenPolicy {
    Show,
    #[default]
    Hide,
}

impl HiddenPolicy {
    /// Whether an entry name is suppressed under this policy.
    pub fn hides(&self, name: &str) -> bool {
        match self {
            HiddenPolicy::Show => false,
            HiddenPolicy::Hide => {
                name.starts_with('.')
                    || name.starts_with("~$")
                    || HIDDEN_ARTIFACTS.contains(&name)
            }
        }
    }
}

/// One breadcrumb segment: a path component paired with its cumulative path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Crumb {
    pub name: String,
    pub path: String,
}

/// Breadcrumb sequence for a relative path. The root itself is not a crumb.
pub fn crumbs_for(path: &str) -> Vec<Crumb> {
    if path.is_empty() {
        return Vec::new();
    }
    let mut crumbs = Vec::new();
    let mut cumulative = String::new();
    for segment in path.split('/') {
        if !cumulative.is_empty() {
            cumulative.push('/');
        }
        cumulative.push_str(segment);
        crumbs.push(Crumb {
            name: segment.to_string(),
            path: cumulative.clone(),
        });
    }
    crumbs
}

/// Ordered listing of one directory, ready for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingModel {
    /// The listed path, relative to the share root.
    pub path: String,
    /// Directories and shares first, then files, each sorted by name.
    pub entries: Vec<Entry>,
    /// Parent path, `None` at the share root.
    pub parent: Option<String>,
    pub crumbs: Vec<Crumb>,
    pub at_root: bool,
}

impl ListingModel {
    /// Assemble the final model from the two partitioned buckets.
    pub(crate) fn assemble(path: &str, mut dirs: Vec<Entry>, mut files: Vec<Entry>) -> Self {
        dirs.sort_by(|a, b| compare_names(&a.name, &b.name));
        files.sort_by(|a, b| compare_names(&a.name, &b.name));
        let mut entries = dirs;
        entries.append(&mut files);

        let parent = if path.is_empty() {
            None
        } else {
            Some(parent_of(path).unwrap_or("").to_string())
        };

        ListingModel {
            path: path.to_string(),
            entries,
            parent,
            crumbs: crumbs_for(path),
            at_root: path.is_empty(),
        }
    }
}

/// Case-insensitive name ordering with a stable lexicographic tie-break, so
/// `README` and `readme` sort together but deterministically.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
