//! Listing and view models plus the share operations on `ShareSession`.

pub mod entry;
pub mod listing;
mod operations;
pub mod view;

pub use entry::{Entry, EntryKind};
pub use listing::{Crumb, HiddenPolicy, ListingModel};
pub use operations::{Copied, DownloadModel, Removed, Renamed, Uploaded, COPY_CHUNK_SIZE};
pub use view::{human_size, ViewModel};
