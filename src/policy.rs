//! Filename policy collaborator.
//!
//! The engine never decides on its own which filenames are acceptable; it
//! asks a [`NamePolicy`]. [`StandardNamePolicy`] is the stock
//! implementation: a configurable banned-extension list plus a conservative
//! sanitizer for names arriving from a browser upload form.

use crate::error::{FaultKind, FaultRecord, OpResult};
use crate::path::check_path_security;

/// Extensions refused for upload when no list is configured.
const DEFAULT_BANNED_EXTENSIONS: &[&str] = &[
    "exe", "com", "dll", "msi", "scr", "bat", "cmd", "pif", "cpl", "vbs",
];

/// Policy decisions about user-supplied file and directory names.
pub trait NamePolicy {
    /// Whether a filename is refused outright (typically by extension).
    fn is_banned(&self, filename: &str) -> bool;

    /// Reduce a raw filename to a safe filesystem-compatible form.
    fn sanitize(&self, filename: &str) -> String;

    /// Validate a user-entered file or directory name.
    fn validate_name(&self, name: &str) -> OpResult<()>;
}

/// Stock policy: extension denylist + ASCII-allowlist sanitizer.
#[derive(Debug, Clone)]
pub struct StandardNamePolicy {
    banned_extensions: Vec<String>,
}

impl StandardNamePolicy {
    /// Policy with a caller-supplied banned-extension list (lowercase,
    /// without leading dots).
    pub fn new(banned_extensions: impl IntoIterator<Item = String>) -> Self {
        StandardNamePolicy {
            banned_extensions: banned_extensions
                .into_iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    /// Policy with the default banned-extension list.
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_BANNED_EXTENSIONS.iter().map(|e| e.to_string()))
    }
}

impl Default for StandardNamePolicy {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl NamePolicy for StandardNamePolicy {
    fn is_banned(&self, filename: &str) -> bool {
        match filename.rsplit_once('.') {
            Some((_, ext)) => {
                let ext = ext.to_ascii_lowercase();
                self.banned_extensions.iter().any(|b| *b == ext)
            }
            None => false,
        }
    }

    /// Keep ASCII alphanumerics, `.`, `-` and `_`; everything else becomes
    /// `_`. Any path component prefix (browsers on some platforms submit
    /// full client-side paths) is stripped first, and leading dots are
    /// removed so a sanitized name can never be a hidden or relative entry.
    fn sanitize(&self, filename: &str) -> String {
        let base = filename
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(filename);

        let mut out = String::with_capacity(base.len());
        let mut last_was_sub = false;
        for ch in base.chars() {
            if ch.is_ascii_alphanumeric() || ch == '.' || ch == '-' || ch == '_' {
                out.push(ch);
                last_was_sub = false;
            } else if !last_was_sub {
                out.push('_');
                last_was_sub = true;
            }
        }
        out.trim_matches(|c| c == '.' || c == '_' || c == ' ').to_string()
    }

    fn validate_name(&self, name: &str) -> OpResult<()> {
        if name.is_empty()
            || name == "."
            || name == ".."
            || name.contains('/')
            || name.contains('\\')
        {
            return Err(FaultRecord::with_subject(FaultKind::InvalidPath, name));
        }
        check_path_security(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banned_extensions() {
        let policy = StandardNamePolicy::with_defaults();
        assert!(policy.is_banned("setup.exe"));
        assert!(policy.is_banned("SETUP.EXE"));
        assert!(policy.is_banned("archive.tar.scr"));
        assert!(!policy.is_banned("report.pdf"));
        assert!(!policy.is_banned("no_extension"));

        let custom = StandardNamePolicy::new(vec![".iso".to_string()]);
        assert!(custom.is_banned("image.iso"));
        assert!(!custom.is_banned("setup.exe"));
    }

    #[test]
    fn test_sanitize() {
        let policy = StandardNamePolicy::with_defaults();
        assert_eq!(policy.sanitize("report.pdf"), "report.pdf");
        assert_eq!(policy.sanitize("my report (final).pdf"), "my_report_final_.pdf");
        assert_eq!(policy.sanitize("C:\\Users\\jo\\notes.txt"), "notes.txt");
        assert_eq!(policy.sanitize("tmp/../../etc/passwd"), "passwd");
        assert_eq!(policy.sanitize(".hidden"), "hidden");
        assert_eq!(policy.sanitize("..."), "");
    }

    #[test]
    fn test_validate_name() {
        let policy = StandardNamePolicy::with_defaults();
        assert!(policy.validate_name("report.pdf").is_ok());
        assert!(policy.validate_name("with space.txt").is_ok());
        for bad in ["", ".", "..", "a/b", "a\\b", "../x"] {
            let err = policy.validate_name(bad).unwrap_err();
            assert_eq!(err.kind, FaultKind::InvalidPath, "name: {:?}", bad);
        }
    }
}
