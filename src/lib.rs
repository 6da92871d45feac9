//! # sharegate
//!
//! Remote share operation engine for a browser-based SMB/CIFS gateway.
//!
//! The engine turns a stateless request (path + action) into a correctly
//! sequenced set of blocking calls against a remote share:
//!
//! - **Path safety**: traversal sequences are rejected syntactically before
//!   any URI is built, for read and write actions alike.
//! - **Sessions**: one [`ShareSession`] per request-handling invocation,
//!   owning its connection context outright. No pooling, no cross-request
//!   state; handles are released on every exit path.
//! - **Listings**: directory enumeration with classification and filtering,
//!   producing an ordered model (directories and shares before files,
//!   alphabetic, hidden-file suppression) plus breadcrumb navigation data.
//! - **Operations**: upload with an overwrite guard, rename, chunked
//!   stream copy, delete, mkdir, view and download.
//! - **Faults**: every remote failure is classified into a closed taxonomy
//!   at the call site; recoverable faults carry a navigation target so the
//!   caller can redirect somewhere sane instead of a dead end.
//!
//! HTTP routing, HTML templating, credential storage and the SMB wire
//! protocol itself are collaborators behind traits. The stock SMB backend
//! (`pavao`, wrapping libsmbclient) is gated behind the `smb` feature so the
//! engine builds and tests without a native SMB stack present.
//!
//! ## Example
//!
//! ```ignore
//! use sharegate::{GatewayConfig, HiddenPolicy, ShareSession, StandardNamePolicy};
//!
//! let config = GatewayConfig::from_path("gateway.toml")?;
//! let target = config.share("homes").expect("share configured");
//!
//! // `credentials` is the application's CredentialSource implementation.
//! let session = ShareSession::connect(target, &credentials)?;
//!
//! let listing = session.browse("Documents", HiddenPolicy::Hide)?;
//! for entry in &listing.entries {
//!     println!("{:?}\t{}", entry.kind, entry.name);
//! }
//!
//! let policy = config.name_policy();
//! session.upload("Documents", "report.pdf", &bytes, false, &policy)?;
//! ```
//!
//! Operations are best-effort sequences of remote calls, not transactions:
//! a failure partway through a copy leaves a partially written destination
//! file, which is reported rather than masked.

pub mod config;
pub mod error;
pub mod fs;
pub mod mime;
pub mod path;
pub mod policy;
pub mod remote;
pub mod session;

// Re-export commonly used types
pub use config::{ConfigError, GatewayConfig, ShareTarget};
pub use error::{FaultKind, FaultRecord, NavTarget, OpResult, RemoteFault};
pub use fs::{
    Copied, Crumb, DownloadModel, Entry, EntryKind, HiddenPolicy, ListingModel, Removed, Renamed,
    Uploaded, ViewModel,
};
pub use mime::{ExtensionMimeResolver, MimeInfo, MimeResolver};
pub use policy::{NamePolicy, StandardNamePolicy};
pub use remote::{DirentType, OpenMode, RawDirent, RawStat, RemoteFs, RemoteHandle};
pub use session::{CredentialSource, ShareCredentials, ShareSession};
