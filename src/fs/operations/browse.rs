//! Directory browsing and single-file view.

use tracing::info;

use crate::error::{FaultKind, FaultRecord, NavTarget, OpResult};
use crate::fs::entry::{Entry, EntryKind};
use crate::fs::listing::{HiddenPolicy, ListingModel};
use crate::fs::view::ViewModel;
use crate::remote::RemoteFs;
use crate::session::ShareSession;

impl<R: RemoteFs> ShareSession<R> {
    /// List a directory.
    ///
    /// Enumerates the directory's children, classifies and filters them, and
    /// produces the ordered presentation model: directories and shares first,
    /// then files, each sorted by name. Self/parent markers never appear;
    /// administrative shares (names ending in `$`) are always skipped; the
    /// hidden-file policy decides whether dot-prefixed and platform-artifact
    /// entries show up.
    ///
    /// The raw entry sequence is one-shot and tied to the open directory
    /// handle, so it is consumed in full here; the handle is released when
    /// the stream drops, on success and error paths alike.
    pub fn browse(&self, path: &str, hidden: HiddenPolicy) -> OpResult<ListingModel> {
        let uri = self.uri_for(path)?;
        info!(path, "browse");

        let fallback = NavTarget::fallback_for(path);
        let stream = self
            .remote()
            .read_dir(&uri)
            .map_err(|fault| FaultRecord::from_remote(fault, path, Some(fallback.clone())))?;

        let mut dirs = Vec::new();
        let mut files = Vec::new();
        for dirent in stream {
            let dirent = dirent
                .map_err(|fault| FaultRecord::from_remote(fault, path, Some(fallback.clone())))?;
            if dirent.name == "." || dirent.name == ".." {
                continue;
            }
            if hidden.hides(&dirent.name) {
                continue;
            }
            let kind = EntryKind::from_dirent(dirent.kind);
            if kind == EntryKind::Share && dirent.name.ends_with('$') {
                continue;
            }
            let entry = Entry::for_listing(dirent.name, path, kind);
            if kind.is_container() {
                dirs.push(entry);
            } else {
                files.push(entry);
            }
        }

        Ok(ListingModel::assemble(path, dirs, files))
    }

    /// Stat one file and produce its view model.
    ///
    /// Only regular files have a view; anything else is an invalid item type.
    pub fn view(&self, path: &str) -> OpResult<ViewModel> {
        let uri = self.uri_for(path)?;
        info!(path, "view");

        let fallback = NavTarget::fallback_for(path);
        let stat = self
            .remote()
            .stat(&uri)
            .map_err(|fault| FaultRecord::from_remote(fault, path, Some(fallback.clone())))?;

        let entry = Entry::from_stat(path, &stat);
        if !entry.is_file() {
            return Err(
                FaultRecord::with_subject(FaultKind::InvalidItemType, path).navigating(fallback)
            );
        }
        Ok(ViewModel::new(entry))
    }
}
