//! Upload with overwrite guard.

use std::io::Write;

use tracing::info;

use crate::error::{FaultKind, FaultRecord, OpResult, RemoteFault};
use crate::fs::entry::EntryKind;
use crate::fs::operations::{listing_of, Uploaded};
use crate::path::join;
use crate::policy::NamePolicy;
use crate::remote::{fault_from_io, OpenMode, RemoteFs};
use crate::session::ShareSession;

impl<R: RemoteFs> ShareSession<R> {
    /// Upload a file into a directory.
    ///
    /// The raw filename is checked against the banned-extension policy, then
    /// sanitized and re-validated before any remote call. The destination is
    /// stat'd first: not-found is the expected success case meaning safe to
    /// create. An existing directory with the same name refuses the upload
    /// regardless of `overwrite`; an existing file requires `overwrite` to be
    /// replaced.
    ///
    /// The write is a single pass with no rollback; a mid-write fault can
    /// leave a truncated destination file.
    pub fn upload(
        &self,
        dest_dir: &str,
        raw_filename: &str,
        content: &[u8],
        overwrite: bool,
        policy: &dyn NamePolicy,
    ) -> OpResult<Uploaded> {
        let nav = listing_of(dest_dir);

        if raw_filename.is_empty() {
            return Err(FaultRecord::new(FaultKind::NoFileAttached).navigating(nav));
        }
        if policy.is_banned(raw_filename) {
            return Err(
                FaultRecord::with_subject(FaultKind::BannedFile, raw_filename).navigating(nav)
            );
        }

        let filename = policy.sanitize(raw_filename);
        policy
            .validate_name(&filename)
            .map_err(|fault| fault.navigating(nav.clone()))?;

        let dest_path = join(dest_dir, &filename);
        let dest_uri = self.uri_for(&dest_path)?;
        info!(path = %dest_path, bytes = content.len(), overwrite, "upload");

        match self.remote().stat(&dest_uri) {
            // Nothing in the way: safe to create.
            Err(RemoteFault::NotFound) => {}
            Err(fault) => {
                return Err(FaultRecord::from_remote(fault, dest_path, Some(nav)));
            }
            Ok(stat) => {
                if EntryKind::from_mode(stat.mode) == EntryKind::Directory {
                    return Err(
                        FaultRecord::with_subject(FaultKind::OverwriteDirectory, &filename)
                            .navigating(nav),
                    );
                }
                if !overwrite {
                    return Err(FaultRecord::with_subject(FaultKind::AlreadyExists, &filename)
                        .navigating(nav));
                }
            }
        }

        let mut handle = self
            .remote()
            .open(&dest_uri, OpenMode::CreateWriteTruncate)
            .map_err(|fault| {
                FaultRecord::from_remote(fault, dest_path.as_str(), Some(nav.clone()))
            })?;
        handle
            .write_all(content)
            .and_then(|_| handle.flush())
            .map_err(|err| {
                FaultRecord::from_remote(fault_from_io(&err), dest_path.as_str(), Some(nav.clone()))
            })?;

        Ok(Uploaded {
            filename,
            bytes: content.len() as u64,
        })
    }
}
