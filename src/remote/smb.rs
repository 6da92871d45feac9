//! pavao-backed SMB backend (requires the `smb` feature).
//!
//! Wraps one `SmbClient` connection to one share. Paths handed to pavao are
//! share-relative, so sessions over this backend use an empty root and URIs
//! of the form `/a/b`. pavao performs the byte-string conversion for the
//! libsmbclient boundary.

use pavao::{
    SmbClient, SmbCredentials, SmbDirentType, SmbError, SmbMode, SmbOpenOptions, SmbOptions,
};

use crate::config::ShareTarget;
use crate::error::RemoteFault;
use crate::remote::{
    fault_from_io, DirStream, DirentType, OpenMode, RawDirent, RawStat, RemoteFs, RemoteHandle,
};
use crate::session::ShareCredentials;

/// SMB [`RemoteFs`] implementation over a single authenticated connection.
pub struct SmbRemote {
    client: SmbClient,
}

impl SmbRemote {
    /// Connect to a share with the given credentials.
    pub fn connect(
        target: &ShareTarget,
        credentials: &ShareCredentials,
    ) -> Result<Self, RemoteFault> {
        let client = SmbClient::new(
            SmbCredentials::default()
                .server(format!("smb://{}", target.server))
                .share(format!("/{}", target.share))
                .username(&credentials.username)
                .password(&credentials.password)
                .workgroup(&credentials.domain),
            SmbOptions::default().one_share_per_server(true),
        )
        .map_err(fault_from_smb)?;
        Ok(SmbRemote { client })
    }
}

/// Classify a pavao failure. Syscall-level errors arrive as io errors
/// carrying the server's errno; everything else is a protocol fault.
fn fault_from_smb(err: SmbError) -> RemoteFault {
    match err {
        SmbError::Io(io) => fault_from_io(&io),
        other => RemoteFault::Protocol(other.to_string()),
    }
}

fn dirent_type(kind: SmbDirentType) -> DirentType {
    match kind {
        SmbDirentType::Workgroup => DirentType::Workgroup,
        SmbDirentType::Server => DirentType::Server,
        SmbDirentType::FileShare => DirentType::FileShare,
        SmbDirentType::PrinterShare => DirentType::PrinterShare,
        SmbDirentType::CommsShare => DirentType::CommsShare,
        SmbDirentType::Ipc => DirentType::IpcShare,
        SmbDirentType::Dir => DirentType::Dir,
        SmbDirentType::File => DirentType::File,
        SmbDirentType::SymLink => DirentType::Link,
    }
}

impl RemoteFs for SmbRemote {
    fn stat(&self, uri: &str) -> Result<RawStat, RemoteFault> {
        let stat = self.client.stat(uri).map_err(fault_from_smb)?;
        Ok(RawStat {
            size: stat.size,
            mode: u32::from(stat.mode),
            accessed: Some(stat.accessed),
            modified: Some(stat.modified),
            changed: Some(stat.changed),
        })
    }

    fn read_dir(&self, uri: &str) -> Result<DirStream<'_>, RemoteFault> {
        // pavao materializes the enumeration into a vector; the one-shot
        // stream contract is preserved at the seam.
        let entries = self.client.list_dir(uri).map_err(fault_from_smb)?;
        Ok(DirStream::new(entries.into_iter().map(|dirent| {
            Ok(RawDirent {
                name: dirent.name().to_string(),
                kind: dirent_type(dirent.get_type()),
            })
        })))
    }

    fn open(&self, uri: &str, mode: OpenMode) -> Result<Box<dyn RemoteHandle + '_>, RemoteFault> {
        let options = match mode {
            OpenMode::Read => SmbOpenOptions::default().read(true),
            OpenMode::CreateWrite => SmbOpenOptions::default().write(true).create(true),
            OpenMode::CreateWriteTruncate => SmbOpenOptions::default()
                .write(true)
                .create(true)
                .truncate(true),
        };
        let file = self.client.open_with(uri, options).map_err(fault_from_smb)?;
        Ok(Box::new(file))
    }

    fn rename(&self, old_uri: &str, new_uri: &str) -> Result<(), RemoteFault> {
        self.client.rename(old_uri, new_uri).map_err(fault_from_smb)
    }

    fn unlink(&self, uri: &str) -> Result<(), RemoteFault> {
        self.client.unlink(uri).map_err(fault_from_smb)
    }

    fn rmdir(&self, uri: &str) -> Result<(), RemoteFault> {
        self.client.rmdir(uri).map_err(fault_from_smb)
    }

    fn mkdir(&self, uri: &str, mode: u32) -> Result<(), RemoteFault> {
        self.client
            .mkdir(uri, SmbMode::from(mode))
            .map_err(fault_from_smb)
    }
}
