//! Streamed transfers: file copy and download.

use std::io::{Read, Write};

use tracing::info;

use crate::error::{FaultKind, FaultRecord, NavTarget, OpResult, RemoteFault};
use crate::fs::entry::EntryKind;
use crate::fs::operations::Copied;
use crate::mime::MimeResolver;
use crate::path::{join, split_name};
use crate::policy::NamePolicy;
use crate::remote::{fault_from_io, OpenMode, RemoteFs, RemoteHandle};
use crate::session::ShareSession;

/// Transfer unit for the copy loop.
pub const COPY_CHUNK_SIZE: usize = 1024;

/// An open file ready to be streamed to the requesting client.
///
/// The reader borrows the session's remote connection and releases the
/// underlying handle when dropped.
pub struct DownloadModel<'a> {
    pub filename: String,
    pub size: u64,
    pub mime: &'static str,
    /// Send as an attachment rather than rendering inline.
    pub attach: bool,
    pub reader: Box<dyn RemoteHandle + 'a>,
}

impl std::fmt::Debug for DownloadModel<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadModel")
            .field("filename", &self.filename)
            .field("size", &self.size)
            .field("mime", &self.mime)
            .field("attach", &self.attach)
            .field("reader", &"<remote handle>")
            .finish()
    }
}

impl<R: RemoteFs> ShareSession<R> {
    /// Copy a file to a sibling destination name.
    ///
    /// Only regular files can be copied. The destination must not exist:
    /// not-found on the pre-flight stat is the success precondition, and any
    /// other outcome is a conflict. Content is streamed in fixed-size chunks
    /// until the number of bytes transferred equals the source size captured
    /// at copy start; a shorter read before that point is a premature-EOF
    /// fault, never a silent truncation.
    ///
    /// A mid-stream fault aborts and reports against the destination URI,
    /// leaving whatever was already written in place.
    pub fn copy_file(
        &self,
        src_path: &str,
        dest_name: &str,
        policy: &dyn NamePolicy,
    ) -> OpResult<Copied> {
        let fallback = NavTarget::fallback_for(src_path);
        policy
            .validate_name(dest_name)
            .map_err(|fault| fault.navigating(fallback.clone()))?;

        let src_uri = self.uri_for(src_path)?;
        let stat = self
            .remote()
            .stat(&src_uri)
            .map_err(|fault| FaultRecord::from_remote(fault, src_path, Some(fallback.clone())))?;
        if EntryKind::from_mode(stat.mode) != EntryKind::File {
            return Err(FaultRecord::with_subject(FaultKind::InvalidItemCopy, src_path)
                .navigating(fallback));
        }
        // Completion is defined against the size observed here, before the
        // first read.
        let source_size = stat.size;

        let (parent, _) = split_name(src_path);
        let dest_path = join(parent, dest_name);
        let dest_uri = self.uri_for(&dest_path)?;
        info!(from = %src_path, to = %dest_path, bytes = source_size, "copy");

        match self.remote().stat(&dest_uri) {
            Err(RemoteFault::NotFound) => {}
            Err(fault) => {
                return Err(FaultRecord::from_remote(
                    fault,
                    dest_path,
                    Some(fallback),
                ));
            }
            Ok(_) => {
                return Err(FaultRecord::with_subject(FaultKind::AlreadyExists, dest_name)
                    .navigating(fallback));
            }
        }

        let mut source = self
            .remote()
            .open(&src_uri, OpenMode::Read)
            .map_err(|fault| FaultRecord::from_remote(fault, src_path, Some(fallback.clone())))?;
        let mut dest = self
            .remote()
            .open(&dest_uri, OpenMode::CreateWriteTruncate)
            .map_err(|fault| {
                FaultRecord::from_remote(fault, dest_uri.as_str(), Some(fallback.clone()))
            })?;

        let mut buf = [0u8; COPY_CHUNK_SIZE];
        let mut transferred = 0u64;
        while transferred < source_size {
            let want = (source_size - transferred).min(COPY_CHUNK_SIZE as u64) as usize;
            let n = source.read(&mut buf[..want]).map_err(|err| {
                FaultRecord::from_remote(
                    fault_from_io(&err),
                    dest_uri.as_str(),
                    Some(fallback.clone()),
                )
            })?;
            if n == 0 {
                // The source ended before the size captured at copy start was
                // reached; report rather than leave a silently short copy.
                return Err(FaultRecord::from_remote(
                    RemoteFault::Protocol(format!(
                        "source ended after {} of {} bytes",
                        transferred, source_size
                    )),
                    dest_uri.as_str(),
                    Some(fallback),
                ));
            }
            dest.write_all(&buf[..n]).map_err(|err| {
                FaultRecord::from_remote(
                    fault_from_io(&err),
                    dest_uri.as_str(),
                    Some(fallback.clone()),
                )
            })?;
            transferred += n as u64;
        }

        Ok(Copied {
            from: src_path.to_string(),
            to: dest_path,
            bytes: transferred,
        })
    }

    /// Open a file for download.
    ///
    /// Only regular files can be downloaded. The returned model carries the
    /// open read handle plus the metadata the presentation layer needs to
    /// build the response; `attach` is cleared only when the client asked for
    /// in-browser viewing and the resolved MIME type is viewable.
    pub fn open_download(
        &self,
        path: &str,
        in_browser: bool,
        mime: &dyn MimeResolver,
    ) -> OpResult<DownloadModel<'_>> {
        let uri = self.uri_for(path)?;
        info!(path, in_browser, "download");

        let fallback = NavTarget::fallback_for(path);
        let stat = self
            .remote()
            .stat(&uri)
            .map_err(|fault| FaultRecord::from_remote(fault, path, Some(fallback.clone())))?;
        if EntryKind::from_mode(stat.mode) != EntryKind::File {
            return Err(FaultRecord::with_subject(FaultKind::InvalidItemDownload, path)
                .navigating(fallback));
        }

        let (_, filename) = split_name(path);
        let info = mime.classify(filename);
        let attach = !(in_browser && mime.viewable_in_browser(info.mime));

        let reader = self
            .remote()
            .open(&uri, OpenMode::Read)
            .map_err(|fault| FaultRecord::from_remote(fault, path, Some(fallback)))?;

        Ok(DownloadModel {
            filename: filename.to_string(),
            size: stat.size,
            mime: info.mime,
            attach,
            reader,
        })
    }
}
