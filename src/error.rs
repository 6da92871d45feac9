//! Fault taxonomy for the share operation engine.
//!
//! Every failure a remote primitive can produce is classified into a
//! [`RemoteFault`] at the call site, then translated into a [`FaultRecord`]
//! carrying the user-facing fault kind and, for recoverable faults, a
//! navigation target so the caller can redirect somewhere sane instead of a
//! dead end.

use serde::Serialize;
use thiserror::Error;

/// A classified failure from a remote filesystem primitive.
///
/// Nothing unclassified crosses the remote seam: backends map their native
/// errors onto exactly one of these variants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteFault {
    /// The file or directory does not exist.
    #[error("no such file or directory")]
    NotFound,

    /// The connected user may not perform the operation.
    #[error("permission denied")]
    PermissionDenied,

    /// The server is out of space (or quota is exhausted).
    #[error("no space left on device")]
    NoSpace,

    /// The target already exists.
    #[error("file or directory already exists")]
    AlreadyExists,

    /// A directory could not be removed because it has children.
    #[error("directory not empty")]
    NotEmpty,

    /// The remote call timed out.
    #[error("operation timed out")]
    TimedOut,

    /// Anything the protocol layer could not classify.
    #[error("protocol error: {0}")]
    Protocol(String),
}

/// Where to send the user after a recoverable fault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "target", content = "path", rename_all = "snake_case")]
pub enum NavTarget {
    /// The share root listing.
    Root,
    /// The listing of a directory path.
    Listing(String),
    /// The single-file view of a path.
    View(String),
}

impl NavTarget {
    /// Fallback target for a failed operation on `path`: the parent listing
    /// when one can be derived, otherwise the share root.
    pub fn fallback_for(path: &str) -> NavTarget {
        match crate::path::parent_of(path) {
            Some(parent) => NavTarget::Listing(parent.to_string()),
            None => NavTarget::Root,
        }
    }
}

/// The closed set of user-facing fault kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
    PermissionDenied,
    NotFound,
    NoSpace,
    AlreadyExists,
    NotEmpty,
    TimedOut,
    InvalidItemType,
    InvalidItemDownload,
    InvalidItemCopy,
    InvalidPath,
    BannedFile,
    NoFileAttached,
    OverwriteDirectory,
    Fatal,
}

impl FaultKind {
    /// Fixed user-facing title for this fault kind.
    pub fn title(&self) -> &'static str {
        match self {
            FaultKind::PermissionDenied => "Permission denied",
            FaultKind::NotFound => "No such file or directory",
            FaultKind::NoSpace => "No space left on device",
            FaultKind::AlreadyExists => "File or directory already exists",
            FaultKind::NotEmpty => "The directory is not empty",
            FaultKind::TimedOut => "Timed out",
            FaultKind::InvalidItemType => "Invalid item type",
            FaultKind::InvalidItemDownload => "Invalid item type",
            FaultKind::InvalidItemCopy => "Invalid item type",
            FaultKind::InvalidPath => "Invalid path",
            FaultKind::BannedFile => "Banned file type",
            FaultKind::NoFileAttached => "No file attached",
            FaultKind::OverwriteDirectory => "Unable to upload file",
            FaultKind::Fatal => "Sorry, something went wrong",
        }
    }

    /// Fixed user-facing message, with the offending subject spliced in
    /// where the message refers to one.
    pub fn message(&self, subject: Option<&str>) -> String {
        let subject = subject.unwrap_or("the item");
        match self {
            FaultKind::PermissionDenied => {
                "You do not have permission to perform the action.".to_string()
            }
            FaultKind::NotFound => {
                format!("The file or directory '{}' was not found.", subject)
            }
            FaultKind::NoSpace => {
                "There is no space left on the server. You may have exceeded your quota."
                    .to_string()
            }
            FaultKind::AlreadyExists => format!(
                "The file or directory '{}' which you attempted to create already exists.",
                subject
            ),
            FaultKind::NotEmpty => format!(
                "The directory '{}' is not empty so cannot be deleted.",
                subject
            ),
            FaultKind::TimedOut => {
                "The current operation timed out. Please try again later.".to_string()
            }
            FaultKind::InvalidItemType => {
                "You tried to perform an action on an invalid item type - i.e. a share or printer."
                    .to_string()
            }
            FaultKind::InvalidItemDownload => {
                "You tried to download an item other than a file.".to_string()
            }
            FaultKind::InvalidItemCopy => {
                "You tried to copy an item other than a file.".to_string()
            }
            FaultKind::InvalidPath => {
                "You tried to navigate to an invalid or illegal path.".to_string()
            }
            FaultKind::BannedFile => {
                "The file type you are trying to upload is banned from being uploaded.".to_string()
            }
            FaultKind::NoFileAttached => {
                "You did not attach a file when attempting to upload.".to_string()
            }
            FaultKind::OverwriteDirectory => format!(
                "A directory already exists with the same name as the file '{}' you are trying to upload.",
                subject
            ),
            FaultKind::Fatal => "An unexpected internal error occurred.".to_string(),
        }
    }

    /// Fatal faults are terminal for the request; everything else is
    /// recoverable and should carry a navigation target.
    pub fn is_fatal(&self) -> bool {
        matches!(self, FaultKind::Fatal)
    }
}

/// A user-facing fault produced by translating a failure at the point where
/// a remote call (or a pre-flight check) failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaultRecord {
    pub kind: FaultKind,
    /// The offending path or name, when the message refers to one.
    pub subject: Option<String>,
    /// Where to send the user afterwards. `None` means render in place.
    pub navigate_to: Option<NavTarget>,
}

impl FaultRecord {
    /// A fault with no subject and no navigation target.
    pub fn new(kind: FaultKind) -> Self {
        FaultRecord {
            kind,
            subject: None,
            navigate_to: None,
        }
    }

    /// A fault about a specific path or name.
    pub fn with_subject(kind: FaultKind, subject: impl Into<String>) -> Self {
        FaultRecord {
            kind,
            subject: Some(subject.into()),
            navigate_to: None,
        }
    }

    /// Attach a navigation target.
    pub fn navigating(mut self, target: NavTarget) -> Self {
        self.navigate_to = Some(target);
        self
    }

    /// Translate a classified remote fault into a user-facing record.
    ///
    /// This is the single translation point for remote failures. Unclassified
    /// protocol errors become `Fatal` and are logged with their diagnostic
    /// detail here; the record itself only ever carries the generic message.
    pub fn from_remote(
        fault: RemoteFault,
        subject: impl Into<String>,
        navigate_to: Option<NavTarget>,
    ) -> Self {
        let subject = subject.into();
        let kind = match fault {
            RemoteFault::NotFound => FaultKind::NotFound,
            RemoteFault::PermissionDenied => FaultKind::PermissionDenied,
            RemoteFault::NoSpace => FaultKind::NoSpace,
            RemoteFault::AlreadyExists => FaultKind::AlreadyExists,
            RemoteFault::NotEmpty => FaultKind::NotEmpty,
            RemoteFault::TimedOut => FaultKind::TimedOut,
            RemoteFault::Protocol(detail) => {
                tracing::error!(subject = %subject, %detail, "unclassified remote fault");
                return FaultRecord {
                    kind: FaultKind::Fatal,
                    subject: Some(subject),
                    navigate_to: None,
                };
            }
        };
        FaultRecord {
            kind,
            subject: Some(subject),
            navigate_to,
        }
    }

    /// The rendered message for this record.
    pub fn message(&self) -> String {
        self.kind.message(self.subject.as_deref())
    }
}

impl std::fmt::Display for FaultRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind.title(), self.message())
    }
}

impl std::error::Error for FaultRecord {}

/// Result type for engine operations.
pub type OpResult<T> = std::result::Result<T, FaultRecord>;
