//! MIME type and icon annotation collaborator.
//!
//! Consumed only to annotate listings, views and downloads; never to alter
//! a filesystem operation. The engine itself touches this in exactly one
//! place: deciding whether a download may be rendered in the browser rather
//! than sent as an attachment.

/// A coarse file-type tag plus the resolved MIME type for a filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimeInfo {
    /// Coarse tag for templating ("document", "image", ...).
    pub tag: &'static str,
    /// The MIME type string.
    pub mime: &'static str,
}

/// Filename-to-MIME resolution and presentation annotations.
pub trait MimeResolver {
    /// Classify a filename into a file-type tag and MIME type.
    fn classify(&self, filename: &str) -> MimeInfo;

    /// Icon tag for a MIME type.
    fn icon_for(&self, mime: &str) -> &'static str;

    /// Whether a MIME type is safe and useful to render inline in a browser.
    fn viewable_in_browser(&self, mime: &str) -> bool;
}

/// Extension-table resolver covering the formats the gateway commonly
/// serves. Unrecognized extensions fall back to `application/octet-stream`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionMimeResolver;

/// `(extension, tag, mime)` — extensions lowercase, without dots.
const MIME_TABLE: &[(&str, &str, &str)] = &[
    ("txt", "text", "text/plain"),
    ("log", "text", "text/plain"),
    ("md", "text", "text/plain"),
    ("csv", "text", "text/csv"),
    ("html", "text", "text/html"),
    ("htm", "text", "text/html"),
    ("pdf", "document", "application/pdf"),
    ("doc", "document", "application/msword"),
    ("docx", "document", "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
    ("xls", "document", "application/vnd.ms-excel"),
    ("xlsx", "document", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
    ("ppt", "document", "application/vnd.ms-powerpoint"),
    ("pptx", "document", "application/vnd.openxmlformats-officedocument.presentationml.presentation"),
    ("jpg", "image", "image/jpeg"),
    ("jpeg", "image", "image/jpeg"),
    ("png", "image", "image/png"),
    ("gif", "image", "image/gif"),
    ("bmp", "image", "image/bmp"),
    ("svg", "image", "image/svg+xml"),
    ("mp3", "audio", "audio/mpeg"),
    ("wav", "audio", "audio/wav"),
    ("mp4", "video", "video/mp4"),
    ("mkv", "video", "video/x-matroska"),
    ("avi", "video", "video/x-msvideo"),
    ("zip", "archive", "application/zip"),
    ("gz", "archive", "application/gzip"),
    ("tar", "archive", "application/x-tar"),
    ("7z", "archive", "application/x-7z-compressed"),
];

/// MIME types a browser can render inline.
const VIEWABLE: &[&str] = &[
    "text/plain",
    "text/html",
    "text/csv",
    "application/pdf",
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/bmp",
    "image/svg+xml",
    "audio/mpeg",
    "video/mp4",
];

impl MimeResolver for ExtensionMimeResolver {
    fn classify(&self, filename: &str) -> MimeInfo {
        let ext = filename
            .rsplit_once('.')
            .map(|(_, e)| e.to_ascii_lowercase())
            .unwrap_or_default();
        for (table_ext, tag, mime) in MIME_TABLE {
            if *table_ext == ext {
                return MimeInfo { tag, mime };
            }
        }
        MimeInfo {
            tag: "file",
            mime: "application/octet-stream",
        }
    }

    fn icon_for(&self, mime: &str) -> &'static str {
        if mime.starts_with("image/") {
            "icon-picture"
        } else if mime.starts_with("audio/") {
            "icon-music"
        } else if mime.starts_with("video/") {
            "icon-film"
        } else if mime.starts_with("text/") {
            "icon-file-text"
        } else if mime == "application/pdf" {
            "icon-book"
        } else {
            "icon-file"
        }
    }

    fn viewable_in_browser(&self, mime: &str) -> bool {
        VIEWABLE.contains(&mime)
    }
}
