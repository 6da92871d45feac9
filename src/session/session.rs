//! Request-scoped share session.
//!
//! One [`ShareSession`] is constructed per request-handling invocation and
//! owns its remote connection context outright: no pooling, no cross-request
//! state, no locks. Handles opened through it borrow the session and are
//! released when dropped, on every exit path.

use crate::error::{FaultRecord, NavTarget, OpResult, RemoteFault};
use crate::fs::EntryKind;
use crate::path::{build_uri, check_path_security};
use crate::remote::RemoteFs;

#[cfg(feature = "smb")]
use crate::config::ShareTarget;
#[cfg(feature = "smb")]
use crate::remote::smb::SmbRemote;
#[cfg(feature = "smb")]
use crate::session::CredentialSource;

/// One authenticated connection context bound to a share root.
///
/// All engine operations (`browse`, `view`, `upload`, ...) are methods on
/// this type, implemented in `fs::operations`.
pub struct ShareSession<R: RemoteFs> {
    remote: R,
    root: String,
}

impl<R: RemoteFs> ShareSession<R> {
    /// Wrap an established remote connection. `root` is the share-root URI
    /// prefix every path is resolved against; backends whose connection
    /// already addresses the share pass an empty root.
    pub fn new(remote: R, root: impl Into<String>) -> Self {
        let mut root = root.into();
        while root.ends_with('/') {
            root.pop();
        }
        ShareSession { remote, root }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Validate a relative path and resolve it to a remote URI. Every
    /// operation goes through here before its first remote call.
    pub fn uri_for(&self, path: &str) -> OpResult<String> {
        check_path_security(path)?;
        Ok(build_uri(&self.root, path))
    }

    /// Stat a URI and classify the result. Trailing slashes are stripped
    /// first; they carry no information and some servers reject them.
    pub(crate) fn entry_kind(&self, uri: &str) -> Result<EntryKind, RemoteFault> {
        let uri = if uri.len() > 1 {
            uri.trim_end_matches('/')
        } else {
            uri
        };
        let stat = self.remote.stat(uri)?;
        Ok(EntryKind::from_mode(stat.mode))
    }
}

#[cfg(feature = "smb")]
impl ShareSession<SmbRemote> {
    /// Connect to an SMB share, asking the credential source for the
    /// requesting user's credentials.
    pub fn connect(target: &ShareTarget, source: &dyn CredentialSource) -> OpResult<Self> {
        let credentials = source.credentials()?;
        let remote = SmbRemote::connect(target, &credentials).map_err(|fault| {
            FaultRecord::from_remote(fault, target.root_uri(), Some(NavTarget::Root))
        })?;
        tracing::info!(share = %target.name, user = %credentials.username, "connected to share");
        // The pavao connection already addresses the share; paths resolve
        // against an empty root.
        Ok(ShareSession::new(remote, ""))
    }
}
