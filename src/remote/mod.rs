//! Remote filesystem seam.
//!
//! [`RemoteFs`] is the blocking primitive surface the rest of the engine is
//! written against: stat, one-shot directory enumeration, open, rename,
//! unlink, rmdir, mkdir — all addressed by URI strings (UTF-8 at this
//! boundary; byte conversion for the wire is the backend's concern). Every
//! backend failure is classified into a [`RemoteFault`] before it leaves
//! this layer.

#[cfg(any(test, feature = "mock"))]
pub mod memory;
#[cfg(feature = "smb")]
pub mod smb;

use std::io::{Read, Seek, Write};
use std::time::SystemTime;

use crate::error::RemoteFault;

/// How a file handle is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Open an existing file for reading.
    Read,
    /// Create the file if missing, open for writing.
    CreateWrite,
    /// Create the file if missing, open for writing, truncate any existing
    /// content.
    CreateWriteTruncate,
}

/// Raw stat result from a remote primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawStat {
    /// Size in bytes.
    pub size: u64,
    /// POSIX-style mode bits; the file-type bits drive classification.
    pub mode: u32,
    pub accessed: Option<SystemTime>,
    pub modified: Option<SystemTime>,
    pub changed: Option<SystemTime>,
}

/// Remote directory-entry type codes, as exposed by the SMB client layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DirentType {
    Workgroup = 1,
    Server = 2,
    FileShare = 3,
    PrinterShare = 4,
    CommsShare = 5,
    IpcShare = 6,
    Dir = 7,
    File = 8,
    Link = 9,
}

impl DirentType {
    /// Create from the wire-level type code.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(DirentType::Workgroup),
            2 => Some(DirentType::Server),
            3 => Some(DirentType::FileShare),
            4 => Some(DirentType::PrinterShare),
            5 => Some(DirentType::CommsShare),
            6 => Some(DirentType::IpcShare),
            7 => Some(DirentType::Dir),
            8 => Some(DirentType::File),
            9 => Some(DirentType::Link),
            _ => None,
        }
    }
}

/// One raw entry from a directory enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDirent {
    pub name: String,
    pub kind: DirentType,
}

/// An open remote file handle. Released when dropped.
pub trait RemoteHandle: Read + Write + Seek {}

impl<T: Read + Write + Seek> RemoteHandle for T {}

/// A lazy, finite, one-shot sequence of directory entries.
///
/// The stream is tied to the underlying directory handle: it is not
/// restartable, and dropping it releases the handle whether or not it was
/// fully consumed.
pub struct DirStream<'a> {
    inner: Box<dyn Iterator<Item = Result<RawDirent, RemoteFault>> + 'a>,
}

impl<'a> DirStream<'a> {
    pub fn new(inner: impl Iterator<Item = Result<RawDirent, RemoteFault>> + 'a) -> Self {
        DirStream {
            inner: Box::new(inner),
        }
    }
}

impl Iterator for DirStream<'_> {
    type Item = Result<RawDirent, RemoteFault>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// Blocking remote-filesystem primitives over a single authenticated
/// connection.
///
/// All methods take `&self`: the connection context is owned by one request
/// worker and never shared, and open handles borrow it for their lifetime.
pub trait RemoteFs {
    fn stat(&self, uri: &str) -> Result<RawStat, RemoteFault>;

    fn read_dir(&self, uri: &str) -> Result<DirStream<'_>, RemoteFault>;

    fn open(&self, uri: &str, mode: OpenMode) -> Result<Box<dyn RemoteHandle + '_>, RemoteFault>;

    fn rename(&self, old_uri: &str, new_uri: &str) -> Result<(), RemoteFault>;

    fn unlink(&self, uri: &str) -> Result<(), RemoteFault>;

    fn rmdir(&self, uri: &str) -> Result<(), RemoteFault>;

    fn mkdir(&self, uri: &str, mode: u32) -> Result<(), RemoteFault>;
}

/// Classify an io-level failure into a [`RemoteFault`].
///
/// `ErrorKind` carries most of the information; raw OS errno fills in the
/// cases the kind mapping leaves generic.
pub fn fault_from_io(err: &std::io::Error) -> RemoteFault {
    use std::io::ErrorKind;

    match err.kind() {
        ErrorKind::NotFound => return RemoteFault::NotFound,
        ErrorKind::PermissionDenied => return RemoteFault::PermissionDenied,
        ErrorKind::AlreadyExists => return RemoteFault::AlreadyExists,
        ErrorKind::TimedOut => return RemoteFault::TimedOut,
        ErrorKind::StorageFull => return RemoteFault::NoSpace,
        ErrorKind::DirectoryNotEmpty => return RemoteFault::NotEmpty,
        _ => {}
    }

    match err.raw_os_error() {
        Some(2) => RemoteFault::NotFound,          // ENOENT
        Some(13) => RemoteFault::PermissionDenied, // EACCES
        Some(17) => RemoteFault::AlreadyExists,    // EEXIST
        Some(28) => RemoteFault::NoSpace,          // ENOSPC
        Some(39) => RemoteFault::NotEmpty,         // ENOTEMPTY
        Some(110) => RemoteFault::TimedOut,        // ETIMEDOUT
        _ => RemoteFault::Protocol(err.to_string()),
    }
}
