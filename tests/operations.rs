//! End-to-end operation contracts against the in-memory backend.
//!
//! Run with `--features mock`.

use sharegate::remote::memory::{MemEntry, MemoryRemote};
use sharegate::{
    EntryKind, FaultKind, HiddenPolicy, NavTarget, RemoteFault, ShareSession, StandardNamePolicy,
};

const ROOT: &str = "smb://srv/share";

fn uri(path: &str) -> String {
    format!("{}/{}", ROOT, path)
}

fn session() -> ShareSession<MemoryRemote> {
    ShareSession::new(MemoryRemote::with_root(ROOT), ROOT)
}

#[test]
fn test_listing_order_and_filtering() {
    let session = session();
    let remote = session.remote();
    remote.add_dir(&uri("beta"));
    remote.add_dir(&uri("Alpha"));
    remote.put(&uri("media"), MemEntry::Share);
    remote.put(&uri("admin$"), MemEntry::Share);
    remote.add_file(&uri("zulu.txt"), b"z");
    remote.add_file(&uri("Apple.txt"), b"a");
    remote.add_file(&uri(".secret"), b"s");
    remote.add_file(&uri("Thumbs.db"), b"t");
    remote.add_file(&uri("desktop.ini"), b"d");
    remote.add_file(&uri("~$draft.docx"), b"w");

    let listing = session.browse("", HiddenPolicy::Hide).unwrap();
    let names: Vec<&str> = listing.entries.iter().map(|e| e.name.as_str()).collect();
    // Directories and shares first (alphabetic), then files (alphabetic).
    assert_eq!(names, ["Alpha", "beta", "media", "Apple.txt", "zulu.txt"]);
    assert!(listing.at_root);
    assert_eq!(listing.parent, None);

    let kinds: Vec<EntryKind> = listing.entries.iter().map(|e| e.kind).collect();
    assert_eq!(kinds[2], EntryKind::Share);
    assert_eq!(kinds[3], EntryKind::File);

    // Showing hidden files reveals the dot-file and artifacts, but the
    // administrative share stays hidden.
    let listing = session.browse("", HiddenPolicy::Show).unwrap();
    let names: Vec<&str> = listing.entries.iter().map(|e| e.name.as_str()).collect();
    assert!(names.contains(&".secret"));
    assert!(names.contains(&"Thumbs.db"));
    assert!(!names.contains(&"admin$"));
    assert!(!names.contains(&"."));
    assert!(!names.contains(&".."));
}

#[test]
fn test_listing_navigation_data() {
    let session = session();
    let remote = session.remote();
    remote.add_dir(&uri("docs"));
    remote.add_dir(&uri("docs/2024"));
    remote.add_file(&uri("docs/2024/notes.txt"), b"n");

    let listing = session.browse("docs/2024", HiddenPolicy::Hide).unwrap();
    assert!(!listing.at_root);
    assert_eq!(listing.parent.as_deref(), Some("docs"));
    assert_eq!(listing.crumbs.len(), 2);
    assert_eq!(listing.crumbs[0].path, "docs");
    assert_eq!(listing.crumbs[1].path, "docs/2024");
    assert_eq!(listing.entries[0].path, "docs/2024/notes.txt");
}

#[test]
fn test_browse_failure_navigation_fallback() {
    let session = session();
    session.remote().add_dir(&uri("a"));

    let err = session.browse("missing", HiddenPolicy::Hide).unwrap_err();
    assert_eq!(err.kind, FaultKind::NotFound);
    assert_eq!(err.navigate_to, Some(NavTarget::Root));

    let err = session.browse("a/missing", HiddenPolicy::Hide).unwrap_err();
    assert_eq!(err.kind, FaultKind::NotFound);
    assert_eq!(err.navigate_to, Some(NavTarget::Listing("a".to_string())));
}

#[test]
fn test_path_traversal_rejected_before_any_remote_call() {
    let session = session();
    let policy = StandardNamePolicy::with_defaults();

    for path in ["../etc", "a/../b", "./x", "a/./b"] {
        assert_eq!(
            session.browse(path, HiddenPolicy::Hide).unwrap_err().kind,
            FaultKind::InvalidPath
        );
        assert_eq!(
            session.remove(path, false).unwrap_err().kind,
            FaultKind::InvalidPath
        );
        assert_eq!(
            session.view(path).unwrap_err().kind,
            FaultKind::InvalidPath
        );
    }
    // Upload destination directories are validated too.
    assert_eq!(
        session
            .upload("../outside", "a.txt", b"x", false, &policy)
            .unwrap_err()
            .kind,
        FaultKind::InvalidPath
    );
}

#[test]
fn test_upload_overwrite_guard() {
    let session = session();
    let policy = StandardNamePolicy::with_defaults();
    let remote = session.remote();
    remote.add_dir(&uri("docs"));
    remote.add_dir(&uri("docs/report.pdf"));

    // An existing directory wins over the overwrite flag, both ways.
    for overwrite in [false, true] {
        let err = session
            .upload("docs", "report.pdf", b"pdf", overwrite, &policy)
            .unwrap_err();
        assert_eq!(err.kind, FaultKind::OverwriteDirectory);
        assert_eq!(err.navigate_to, Some(NavTarget::Listing("docs".to_string())));
    }

    remote.add_file(&uri("docs/notes.txt"), b"old");
    let err = session
        .upload("docs", "notes.txt", b"new", false, &policy)
        .unwrap_err();
    assert_eq!(err.kind, FaultKind::AlreadyExists);
    assert_eq!(remote.file_content(&uri("docs/notes.txt")).unwrap(), b"old");

    let uploaded = session
        .upload("docs", "notes.txt", b"new", true, &policy)
        .unwrap();
    assert_eq!(uploaded.bytes, 3);
    assert_eq!(remote.file_content(&uri("docs/notes.txt")).unwrap(), b"new");

    let uploaded = session
        .upload("docs", "fresh.txt", b"fresh", false, &policy)
        .unwrap();
    assert_eq!(uploaded.filename, "fresh.txt");
    assert_eq!(remote.file_content(&uri("docs/fresh.txt")).unwrap(), b"fresh");
}

#[test]
fn test_upload_filename_policy() {
    let session = session();
    let policy = StandardNamePolicy::with_defaults();

    let err = session
        .upload("", "", b"x", false, &policy)
        .unwrap_err();
    assert_eq!(err.kind, FaultKind::NoFileAttached);
    assert_eq!(err.navigate_to, Some(NavTarget::Root));

    let err = session
        .upload("", "setup.exe", b"x", false, &policy)
        .unwrap_err();
    assert_eq!(err.kind, FaultKind::BannedFile);

    // Client-side path prefixes are stripped by sanitization.
    let uploaded = session
        .upload("", "C:\\Users\\jo\\report.pdf", b"pdf", false, &policy)
        .unwrap();
    assert_eq!(uploaded.filename, "report.pdf");
    assert!(session.remote().contains(&uri("report.pdf")));
}

#[test]
fn test_copy_completeness() {
    // Empty, exactly one chunk, partial final chunk, many chunks.
    for size in [0usize, 1, 1024, 1025, 10000] {
        let session = session();
        let policy = StandardNamePolicy::with_defaults();
        let content: Vec<u8> = (0..size).map(|i| (i % 251) as u8).collect();
        session.remote().add_file(&uri("data.bin"), &content);

        let copied = session
            .copy_file("data.bin", "data-copy.bin", &policy)
            .unwrap();
        assert_eq!(copied.bytes, size as u64, "size: {}", size);
        assert_eq!(copied.to, "data-copy.bin");
        assert_eq!(
            session.remote().file_content(&uri("data-copy.bin")).unwrap(),
            content,
            "size: {}",
            size
        );
    }
}

#[test]
fn test_copy_preconditions() {
    let session = session();
    let policy = StandardNamePolicy::with_defaults();
    let remote = session.remote();
    remote.add_dir(&uri("docs"));
    remote.add_file(&uri("docs/a.txt"), b"abc");
    remote.add_file(&uri("docs/taken.txt"), b"x");

    // Only regular files can be copied.
    let err = session.copy_file("docs", "docs2", &policy).unwrap_err();
    assert_eq!(err.kind, FaultKind::InvalidItemCopy);

    // The destination must not exist.
    let err = session
        .copy_file("docs/a.txt", "taken.txt", &policy)
        .unwrap_err();
    assert_eq!(err.kind, FaultKind::AlreadyExists);
    assert_eq!(err.navigate_to, Some(NavTarget::Listing("docs".to_string())));

    // The copy lands next to the source.
    session.copy_file("docs/a.txt", "b.txt", &policy).unwrap();
    assert_eq!(remote.file_content(&uri("docs/b.txt")).unwrap(), b"abc");
}

#[test]
fn test_copy_premature_eof_is_fatal() {
    let session = session();
    let policy = StandardNamePolicy::with_defaults();
    let remote = session.remote();
    remote.add_file(&uri("short.bin"), b"only four kilo... not really");
    // Stat claims more than the source can deliver.
    remote.override_size(&uri("short.bin"), 4096);

    let err = session
        .copy_file("short.bin", "short-copy.bin", &policy)
        .unwrap_err();
    assert_eq!(err.kind, FaultKind::Fatal);
    // Reported against the destination URI.
    assert_eq!(err.subject.as_deref(), Some(uri("short-copy.bin").as_str()));
}

#[test]
fn test_delete_type_dispatch() {
    let session = session();
    let remote = session.remote();
    remote.add_file(&uri("gone.txt"), b"x");
    remote.add_dir(&uri("dir"));
    remote.add_dir(&uri("full"));
    remote.add_file(&uri("full/child.txt"), b"c");
    remote.put(&uri("ln"), MemEntry::Link);

    let removed = session.remove("gone.txt", false).unwrap();
    assert_eq!(removed.kind, EntryKind::File);
    assert!(!remote.contains(&uri("gone.txt")));
    assert!(removed.message().contains("file 'gone.txt'"));

    let removed = session.remove("dir", false).unwrap();
    assert_eq!(removed.kind, EntryKind::Directory);
    assert!(!remote.contains(&uri("dir")));

    let err = session.remove("full", false).unwrap_err();
    assert_eq!(err.kind, FaultKind::NotEmpty);
    assert!(remote.contains(&uri("full")));

    let err = session.remove("ln", false).unwrap_err();
    assert_eq!(err.kind, FaultKind::InvalidItemType);
    assert!(remote.contains(&uri("ln")));
}

#[test]
fn test_delete_view_flag_changes_only_navigation() {
    let session = session();
    let remote = session.remote();
    remote.add_dir(&uri("docs"));
    remote.inject_fault(&uri("docs/locked.txt"), RemoteFault::PermissionDenied);

    let err = session.remove("docs/locked.txt", false).unwrap_err();
    assert_eq!(err.kind, FaultKind::PermissionDenied);
    assert_eq!(err.navigate_to, Some(NavTarget::Listing("docs".to_string())));

    let err = session.remove("docs/locked.txt", true).unwrap_err();
    assert_eq!(err.kind, FaultKind::PermissionDenied);
    assert_eq!(
        err.navigate_to,
        Some(NavTarget::View("docs/locked.txt".to_string()))
    );
}

#[test]
fn test_rename_distinguishes_kind() {
    let session = session();
    let policy = StandardNamePolicy::with_defaults();
    let remote = session.remote();
    remote.add_file(&uri("docs.txt"), b"x");
    remote.add_dir(&uri("stuff"));
    remote.add_file(&uri("stuff/inner.txt"), b"i");
    remote.put(&uri("printer"), MemEntry::PrinterShare);

    let renamed = session.rename_entry("docs.txt", "notes.txt", &policy).unwrap();
    assert_eq!(renamed.kind, EntryKind::File);
    assert!(renamed.message().contains("file 'docs.txt'"));
    assert!(remote.contains(&uri("notes.txt")));
    assert!(!remote.contains(&uri("docs.txt")));

    let renamed = session.rename_entry("stuff", "things", &policy).unwrap();
    assert_eq!(renamed.kind, EntryKind::Directory);
    assert!(renamed.message().contains("directory 'stuff'"));
    assert!(remote.contains(&uri("things/inner.txt")));

    let err = session
        .rename_entry("printer", "other", &policy)
        .unwrap_err();
    assert_eq!(err.kind, FaultKind::InvalidItemType);

    let err = session
        .rename_entry("notes.txt", "a/b", &policy)
        .unwrap_err();
    assert_eq!(err.kind, FaultKind::InvalidPath);
}

#[test]
fn test_make_dir() {
    let session = session();
    let policy = StandardNamePolicy::with_defaults();

    let name = session.make_dir("", "projects", &policy).unwrap();
    assert_eq!(name, "projects");
    assert!(session.remote().contains(&uri("projects")));

    let err = session.make_dir("", "projects", &policy).unwrap_err();
    assert_eq!(err.kind, FaultKind::AlreadyExists);

    let err = session.make_dir("", "..", &policy).unwrap_err();
    assert_eq!(err.kind, FaultKind::InvalidPath);
}

#[test]
fn test_view_requires_file() {
    let session = session();
    let remote = session.remote();
    remote.add_dir(&uri("docs"));
    remote.add_file(&uri("docs/report.pdf"), &[0u8; 2048]);

    let view = session.view("docs/report.pdf").unwrap();
    assert_eq!(view.entry.kind, EntryKind::File);
    assert_eq!(view.entry.size, Some(2048));
    assert_eq!(view.size_human, "2.0 KB");
    assert_eq!(view.parent.as_deref(), Some("docs"));
    assert_eq!(view.crumbs.len(), 2);

    let err = session.view("docs").unwrap_err();
    assert_eq!(err.kind, FaultKind::InvalidItemType);
    assert_eq!(err.navigate_to, Some(NavTarget::Root));
}

#[test]
fn test_download_attach_semantics() {
    use std::io::Read;

    let session = session();
    let resolver = sharegate::ExtensionMimeResolver;
    let remote = session.remote();
    remote.add_file(&uri("notes.txt"), b"hello");
    remote.add_file(&uri("bundle.zip"), b"zip");
    remote.add_dir(&uri("docs"));

    let mut download = session
        .open_download("notes.txt", true, &resolver)
        .unwrap();
    assert_eq!(download.filename, "notes.txt");
    assert_eq!(download.size, 5);
    assert_eq!(download.mime, "text/plain");
    assert!(!download.attach);
    let mut body = Vec::new();
    download.reader.read_to_end(&mut body).unwrap();
    assert_eq!(body, b"hello");

    // Not viewable in a browser: always an attachment.
    let download = session
        .open_download("bundle.zip", true, &resolver)
        .unwrap();
    assert!(download.attach);

    // Viewable, but the client did not ask for in-browser rendering.
    let download = session
        .open_download("notes.txt", false, &resolver)
        .unwrap();
    assert!(download.attach);

    let err = session.open_download("docs", true, &resolver).unwrap_err();
    assert_eq!(err.kind, FaultKind::InvalidItemDownload);
}
