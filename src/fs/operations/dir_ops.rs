//! Directory creation, rename and delete.

use tracing::info;

use crate::error::{FaultKind, FaultRecord, NavTarget, OpResult};
use crate::fs::entry::EntryKind;
use crate::fs::operations::{listing_of, Removed, Renamed};
use crate::path::{join, split_name};
use crate::policy::NamePolicy;
use crate::remote::RemoteFs;
use crate::session::ShareSession;

impl<R: RemoteFs> ShareSession<R> {
    /// Create a new directory inside `path`.
    pub fn make_dir(
        &self,
        path: &str,
        dir_name: &str,
        policy: &dyn NamePolicy,
    ) -> OpResult<String> {
        let nav = listing_of(path);
        policy
            .validate_name(dir_name)
            .map_err(|fault| fault.navigating(nav.clone()))?;

        let new_path = join(path, dir_name);
        let uri = self.uri_for(&new_path)?;
        info!(path = %new_path, "mkdir");

        self.remote()
            .mkdir(&uri, 0o755)
            .map_err(|fault| FaultRecord::from_remote(fault, dir_name, Some(nav)))?;
        Ok(dir_name.to_string())
    }

    /// Rename a file or directory in place.
    ///
    /// The source must be a regular file or a directory; shares, links and
    /// anything unclassified refuse with an invalid-item-type fault.
    pub fn rename_entry(
        &self,
        path: &str,
        new_name: &str,
        policy: &dyn NamePolicy,
    ) -> OpResult<Renamed> {
        let fallback = NavTarget::fallback_for(path);
        policy
            .validate_name(new_name)
            .map_err(|fault| fault.navigating(fallback.clone()))?;

        let old_uri = self.uri_for(path)?;
        let kind = self
            .entry_kind(&old_uri)
            .map_err(|fault| FaultRecord::from_remote(fault, path, Some(fallback.clone())))?;
        if !matches!(kind, EntryKind::File | EntryKind::Directory) {
            return Err(FaultRecord::with_subject(FaultKind::InvalidItemType, path)
                .navigating(fallback));
        }

        let (parent, old_name) = split_name(path);
        let new_path = join(parent, new_name);
        let new_uri = self.uri_for(&new_path)?;
        info!(from = %path, to = %new_path, "rename");

        self.remote()
            .rename(&old_uri, &new_uri)
            .map_err(|fault| FaultRecord::from_remote(fault, new_name, Some(fallback)))?;

        Ok(Renamed {
            kind,
            from: old_name.to_string(),
            to: new_name.to_string(),
        })
    }

    /// Delete a file or directory.
    ///
    /// Files are unlinked; directories are removed and surface not-empty when
    /// they still have children; anything else is an invalid item type.
    /// `invoked_from_view` changes only where a failure navigates (back to
    /// the file's view instead of the parent listing), never the operation
    /// itself.
    pub fn remove(&self, path: &str, invoked_from_view: bool) -> OpResult<Removed> {
        let uri = self.uri_for(path)?;
        info!(path, "delete");

        let fallback = if invoked_from_view {
            NavTarget::View(path.to_string())
        } else {
            NavTarget::fallback_for(path)
        };

        let kind = self
            .entry_kind(&uri)
            .map_err(|fault| FaultRecord::from_remote(fault, path, Some(fallback.clone())))?;
        match kind {
            EntryKind::File => self.remote().unlink(&uri),
            EntryKind::Directory => self.remote().rmdir(&uri),
            _ => {
                return Err(FaultRecord::with_subject(FaultKind::InvalidItemType, path)
                    .navigating(fallback));
            }
        }
        .map_err(|fault| FaultRecord::from_remote(fault, path, Some(fallback)))?;

        let (_, name) = split_name(path);
        Ok(Removed {
            kind,
            name: name.to_string(),
        })
    }
}
