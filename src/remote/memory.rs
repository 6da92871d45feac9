//! In-memory remote filesystem backend.
//!
//! Backs the engine's tests (and the `mock` feature) with a tree of
//! URI-keyed entries plus fault injection, so every operation contract can
//! be exercised without a live SMB server.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::rc::Rc;

use crate::error::RemoteFault;
use crate::remote::{DirStream, DirentType, OpenMode, RawDirent, RawStat, RemoteFs, RemoteHandle};

/// One entry in the in-memory tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemEntry {
    Dir,
    File(Vec<u8>),
    Share,
    PrinterShare,
    Link,
}

impl MemEntry {
    fn dirent_type(&self) -> DirentType {
        match self {
            MemEntry::Dir => DirentType::Dir,
            MemEntry::File(_) => DirentType::File,
            MemEntry::Share => DirentType::FileShare,
            MemEntry::PrinterShare => DirentType::PrinterShare,
            MemEntry::Link => DirentType::Link,
        }
    }

    fn mode(&self) -> u32 {
        match self {
            MemEntry::Dir | MemEntry::Share => 0o040_755,
            MemEntry::File(_) => 0o100_644,
            MemEntry::Link => 0o120_777,
            // Printer shares stat with no recognizable file-type bits.
            MemEntry::PrinterShare => 0,
        }
    }
}

#[derive(Default)]
struct Inner {
    entries: BTreeMap<String, MemEntry>,
    /// URIs that fail with the given fault on any primitive call.
    faults: HashMap<String, RemoteFault>,
    /// Override of the size reported by stat, to simulate a source that
    /// shrinks between stat and read.
    size_overrides: HashMap<String, u64>,
}

/// In-memory [`RemoteFs`] implementation.
#[derive(Default)]
pub struct MemoryRemote {
    inner: Rc<RefCell<Inner>>,
}

impl MemoryRemote {
    /// An empty tree with a directory at `root`.
    pub fn with_root(root: &str) -> Self {
        let remote = MemoryRemote::default();
        remote.put(root, MemEntry::Dir);
        remote
    }

    /// Insert or replace an entry at a URI.
    pub fn put(&self, uri: &str, entry: MemEntry) {
        self.inner
            .borrow_mut()
            .entries
            .insert(uri.to_string(), entry);
    }

    pub fn add_dir(&self, uri: &str) {
        self.put(uri, MemEntry::Dir);
    }

    pub fn add_file(&self, uri: &str, content: &[u8]) {
        self.put(uri, MemEntry::File(content.to_vec()));
    }

    /// Any primitive touching `uri` fails with `fault`.
    pub fn inject_fault(&self, uri: &str, fault: RemoteFault) {
        self.inner
            .borrow_mut()
            .faults
            .insert(uri.to_string(), fault);
    }

    /// Make stat report `size` for `uri` regardless of actual content.
    pub fn override_size(&self, uri: &str, size: u64) {
        self.inner
            .borrow_mut()
            .size_overrides
            .insert(uri.to_string(), size);
    }

    /// Current content of a file entry, if present.
    pub fn file_content(&self, uri: &str) -> Option<Vec<u8>> {
        match self.inner.borrow().entries.get(uri) {
            Some(MemEntry::File(content)) => Some(content.clone()),
            _ => None,
        }
    }

    pub fn contains(&self, uri: &str) -> bool {
        self.inner.borrow().entries.contains_key(uri)
    }

    fn check_fault(&self, uri: &str) -> Result<(), RemoteFault> {
        match self.inner.borrow().faults.get(uri) {
            Some(fault) => Err(fault.clone()),
            None => Ok(()),
        }
    }

    /// Whether a URI has children in the tree.
    fn has_children(&self, uri: &str) -> bool {
        let prefix = format!("{}/", uri.trim_end_matches('/'));
        self.inner
            .borrow()
            .entries
            .keys()
            .any(|k| k.starts_with(&prefix))
    }

    fn parent_exists(&self, uri: &str) -> bool {
        match uri.trim_end_matches('/').rfind('/') {
            Some(idx) => {
                let parent = &uri[..idx];
                parent.is_empty()
                    || matches!(
                        self.inner.borrow().entries.get(parent),
                        Some(MemEntry::Dir) | Some(MemEntry::Share)
                    )
            }
            None => true,
        }
    }
}

impl RemoteFs for MemoryRemote {
    fn stat(&self, uri: &str) -> Result<RawStat, RemoteFault> {
        self.check_fault(uri)?;
        let inner = self.inner.borrow();
        let entry = inner.entries.get(uri).ok_or(RemoteFault::NotFound)?;
        let size = match inner.size_overrides.get(uri) {
            Some(size) => *size,
            None => match entry {
                MemEntry::File(content) => content.len() as u64,
                _ => 0,
            },
        };
        Ok(RawStat {
            size,
            mode: entry.mode(),
            accessed: Some(std::time::UNIX_EPOCH),
            modified: Some(std::time::UNIX_EPOCH),
            changed: Some(std::time::UNIX_EPOCH),
        })
    }

    fn read_dir(&self, uri: &str) -> Result<DirStream<'_>, RemoteFault> {
        self.check_fault(uri)?;
        let inner = self.inner.borrow();
        match inner.entries.get(uri) {
            Some(MemEntry::Dir) | Some(MemEntry::Share) => {}
            Some(_) => return Err(RemoteFault::NotFound),
            None => return Err(RemoteFault::NotFound),
        }

        let prefix = format!("{}/", uri.trim_end_matches('/'));
        // Real enumerations include the self/parent markers; emit them so
        // the lister has to skip them.
        let mut dirents = vec![
            Ok(RawDirent {
                name: ".".to_string(),
                kind: DirentType::Dir,
            }),
            Ok(RawDirent {
                name: "..".to_string(),
                kind: DirentType::Dir,
            }),
        ];
        for (key, entry) in inner.entries.range(prefix.clone()..) {
            if !key.starts_with(&prefix) {
                break;
            }
            let rest = &key[prefix.len()..];
            if rest.is_empty() || rest.contains('/') {
                continue;
            }
            dirents.push(Ok(RawDirent {
                name: rest.to_string(),
                kind: entry.dirent_type(),
            }));
        }
        Ok(DirStream::new(dirents.into_iter()))
    }

    fn open(&self, uri: &str, mode: OpenMode) -> Result<Box<dyn RemoteHandle + '_>, RemoteFault> {
        self.check_fault(uri)?;
        let mut inner = self.inner.borrow_mut();
        match mode {
            OpenMode::Read => match inner.entries.get(uri) {
                Some(MemEntry::File(_)) => {}
                Some(_) => return Err(RemoteFault::PermissionDenied),
                None => return Err(RemoteFault::NotFound),
            },
            OpenMode::CreateWrite | OpenMode::CreateWriteTruncate => {
                if matches!(inner.entries.get(uri), Some(MemEntry::Dir)) {
                    return Err(RemoteFault::PermissionDenied);
                }
                drop(inner);
                if !self.parent_exists(uri) {
                    return Err(RemoteFault::NotFound);
                }
                inner = self.inner.borrow_mut();
                let entry = inner
                    .entries
                    .entry(uri.to_string())
                    .or_insert_with(|| MemEntry::File(Vec::new()));
                if mode == OpenMode::CreateWriteTruncate {
                    *entry = MemEntry::File(Vec::new());
                }
            }
        }
        Ok(Box::new(MemFile {
            inner: Rc::clone(&self.inner),
            uri: uri.to_string(),
            pos: 0,
        }))
    }

    fn rename(&self, old_uri: &str, new_uri: &str) -> Result<(), RemoteFault> {
        self.check_fault(old_uri)?;
        self.check_fault(new_uri)?;
        let mut inner = self.inner.borrow_mut();
        let entry = inner.entries.remove(old_uri).ok_or(RemoteFault::NotFound)?;
        inner.entries.insert(new_uri.to_string(), entry);
        // Children move with a renamed directory.
        let old_prefix = format!("{}/", old_uri);
        let moved: Vec<(String, MemEntry)> = inner
            .entries
            .iter()
            .filter(|(k, _)| k.starts_with(&old_prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        for (key, value) in moved {
            inner.entries.remove(&key);
            let new_key = format!("{}/{}", new_uri, &key[old_prefix.len()..]);
            inner.entries.insert(new_key, value);
        }
        Ok(())
    }

    fn unlink(&self, uri: &str) -> Result<(), RemoteFault> {
        self.check_fault(uri)?;
        let mut inner = self.inner.borrow_mut();
        match inner.entries.get(uri) {
            Some(MemEntry::File(_)) | Some(MemEntry::Link) => {
                inner.entries.remove(uri);
                Ok(())
            }
            Some(_) => Err(RemoteFault::PermissionDenied),
            None => Err(RemoteFault::NotFound),
        }
    }

    fn rmdir(&self, uri: &str) -> Result<(), RemoteFault> {
        self.check_fault(uri)?;
        if self.has_children(uri) {
            return Err(RemoteFault::NotEmpty);
        }
        let mut inner = self.inner.borrow_mut();
        match inner.entries.get(uri) {
            Some(MemEntry::Dir) => {
                inner.entries.remove(uri);
                Ok(())
            }
            Some(_) => Err(RemoteFault::PermissionDenied),
            None => Err(RemoteFault::NotFound),
        }
    }

    fn mkdir(&self, uri: &str, _mode: u32) -> Result<(), RemoteFault> {
        self.check_fault(uri)?;
        if self.inner.borrow().entries.contains_key(uri) {
            return Err(RemoteFault::AlreadyExists);
        }
        if !self.parent_exists(uri) {
            return Err(RemoteFault::NotFound);
        }
        self.put(uri, MemEntry::Dir);
        Ok(())
    }
}

/// Open-file handle into the in-memory tree.
struct MemFile {
    inner: Rc<RefCell<Inner>>,
    uri: String,
    pos: u64,
}

impl Read for MemFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let inner = self.inner.borrow();
        if let Some(fault) = inner.faults.get(&self.uri) {
            return Err(io::Error::other(fault.to_string()));
        }
        let content = match inner.entries.get(&self.uri) {
            Some(MemEntry::File(content)) => content,
            _ => return Err(io::Error::new(io::ErrorKind::NotFound, "no such file")),
        };
        let start = (self.pos as usize).min(content.len());
        let n = (content.len() - start).min(buf.len());
        buf[..n].copy_from_slice(&content[start..start + n]);
        self.pos += n as u64;
        Ok(n)
    }
}

impl Write for MemFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self.inner.borrow_mut();
        if let Some(fault) = inner.faults.get(&self.uri) {
            return Err(io::Error::other(fault.to_string()));
        }
        let content = match inner.entries.get_mut(&self.uri) {
            Some(MemEntry::File(content)) => content,
            _ => return Err(io::Error::new(io::ErrorKind::NotFound, "no such file")),
        };
        let start = self.pos as usize;
        if content.len() < start + buf.len() {
            content.resize(start + buf.len(), 0);
        }
        content[start..start + buf.len()].copy_from_slice(buf);
        self.pos += buf.len() as u64;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for MemFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let len = match self.inner.borrow().entries.get(&self.uri) {
            Some(MemEntry::File(content)) => content.len() as u64,
            _ => 0,
        };
        let new_pos = match pos {
            SeekFrom::Start(offset) => offset as i64,
            SeekFrom::End(offset) => len as i64 + offset,
            SeekFrom::Current(offset) => self.pos as i64 + offset,
        };
        if new_pos < 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "seek before start",
            ));
        }
        self.pos = new_pos as u64;
        Ok(self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_stat_and_listing() {
        let remote = MemoryRemote::with_root("smb://srv/share");
        remote.add_dir("smb://srv/share/docs");
        remote.add_file("smb://srv/share/readme.txt", b"hello");

        let stat = remote.stat("smb://srv/share/readme.txt").unwrap();
        assert_eq!(stat.size, 5);

        let names: Vec<String> = remote
            .read_dir("smb://srv/share")
            .unwrap()
            .map(|d| d.unwrap().name)
            .collect();
        assert!(names.contains(&".".to_string()));
        assert!(names.contains(&"docs".to_string()));
        assert!(names.contains(&"readme.txt".to_string()));

        assert_eq!(
            remote.stat("smb://srv/share/missing").unwrap_err(),
            RemoteFault::NotFound
        );
    }

    #[test]
    fn test_write_then_read() {
        let remote = MemoryRemote::with_root("smb://srv/share");
        {
            let mut handle = remote
                .open("smb://srv/share/new.txt", OpenMode::CreateWriteTruncate)
                .unwrap();
            handle.write_all(b"payload").unwrap();
        }
        let mut handle = remote
            .open("smb://srv/share/new.txt", OpenMode::Read)
            .unwrap();
        let mut out = Vec::new();
        handle.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"payload");
    }

    #[test]
    fn test_rmdir_not_empty() {
        let remote = MemoryRemote::with_root("smb://srv/share");
        remote.add_dir("smb://srv/share/docs");
        remote.add_file("smb://srv/share/docs/a.txt", b"x");
        assert_eq!(
            remote.rmdir("smb://srv/share/docs").unwrap_err(),
            RemoteFault::NotEmpty
        );
        remote.unlink("smb://srv/share/docs/a.txt").unwrap();
        remote.rmdir("smb://srv/share/docs").unwrap();
        assert!(!remote.contains("smb://srv/share/docs"));
    }

    #[test]
    fn test_fault_injection() {
        let remote = MemoryRemote::with_root("smb://srv/share");
        remote.add_file("smb://srv/share/locked.txt", b"x");
        remote.inject_fault("smb://srv/share/locked.txt", RemoteFault::PermissionDenied);
        assert_eq!(
            remote.stat("smb://srv/share/locked.txt").unwrap_err(),
            RemoteFault::PermissionDenied
        );
    }
}
