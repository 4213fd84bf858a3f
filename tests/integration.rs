use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sessiondir::{FileEntry, MimeTable, WorkingDirBuilder, WorkingDirectory, output};
use std::fs;
use std::io;
use tempfile::tempdir;
#[test]
fn integration_full_listing() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".hidden"), "ignored").unwrap();
    fs::write(dir.path().join("notes.txt"), "line1\r\nline2").unwrap();
    fs::write(dir.path().join("huge.txt"), "B".repeat(4096)).unwrap();
    fs::write(dir.path().join("image.png"), vec![0x89, b'P', b'N', b'G', 0, 0]).unwrap();
    let options = WorkingDirBuilder::new(dir.path())
        .text_size_limit(1024)
        .max_concurrency(2)
        .build();
    let listing = WorkingDirectory::new(options).unwrap().list_all().unwrap();
    assert_eq!(listing.len(), 3);
    assert!(!listing.contains_key(".hidden"));
    assert_eq!(
        listing["notes.txt"],
        FileEntry {
            is_text: true,
            content: Some(STANDARD.encode("line1\nline2")),
        }
    );
    assert_eq!(
        listing["huge.txt"],
        FileEntry {
            is_text: true,
            content: None,
        }
    );
    assert_eq!(
        listing["image.png"],
        FileEntry {
            is_text: false,
            content: None,
        }
    );
}
#[test]
fn integration_listing_is_not_recursive() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/lib.txt"), "inner").unwrap();
    fs::create_dir(dir.path().join(".git")).unwrap();
    fs::write(dir.path().join("top.txt"), "outer").unwrap();
    let options = WorkingDirBuilder::new(dir.path()).build();
    let listing = WorkingDirectory::new(options).unwrap().list_all().unwrap();
    assert_eq!(listing.len(), 2);
    assert!(!listing["src"].is_text);
    assert!(listing["top.txt"].is_text);
    assert!(!listing.contains_key("lib.txt"));
}
#[test]
fn integration_listing_reflects_each_call() {
    let dir = tempdir().unwrap();
    let options = WorkingDirBuilder::new(dir.path())
        .mime_types(MimeTable::new().define("text/x-octave", ["m"]))
        .build();
    let wd = WorkingDirectory::new(options).unwrap();
    assert!(wd.list_all().unwrap().is_empty());
    wd.save_file("run.m", b"disp(42)\r\n").unwrap();
    let listing = wd.list_all().unwrap();
    assert_eq!(
        listing["run.m"].content.as_deref(),
        Some(STANDARD.encode("disp(42)\n").as_str())
    );
    wd.rename_file("run.m", "octave-tmp").unwrap();
    assert!(wd.list_all().unwrap().is_empty());
}
#[test]
fn integration_missing_root_fails() {
    let dir = tempdir().unwrap();
    let options = WorkingDirBuilder::new(dir.path().join("absent")).build();
    assert!(WorkingDirectory::new(options).unwrap().list_all().is_err());
}
#[test]
fn integration_root_is_file_fails() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("plain.txt");
    fs::write(&file, "not a directory").unwrap();
    let options = WorkingDirBuilder::new(&file).build();
    let err = WorkingDirectory::new(options).unwrap().list_all().unwrap_err();
    assert_eq!(err.io_kind(), Some(io::ErrorKind::NotADirectory));
}
#[cfg(unix)]
#[test]
fn integration_one_failing_entry_fails_listing() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("good.txt"), "fine").unwrap();
    std::os::unix::fs::symlink(dir.path().join("nowhere"), dir.path().join("broken.txt")).unwrap();
    let options = WorkingDirBuilder::new(dir.path()).build();
    let result = WorkingDirectory::new(options).unwrap().list_all();
    match result {
        Err(err) => assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound)),
        Ok(listing) => panic!("expected failure, got {} entries", listing.len()),
    }
}
#[test]
fn integration_json_output() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "a").unwrap();
    fs::write(dir.path().join("b.bin"), vec![0, 1]).unwrap();
    let listing = WorkingDirectory::new(WorkingDirBuilder::new(dir.path()).build())
        .unwrap()
        .list_all()
        .unwrap();
    let json = output::format_listing(&listing, output::OutputFormat::Json, false);
    assert_eq!(json, r#"{"a.txt":{"isText":true,"content":"YQ=="},"b.bin":{"isText":false}}"#);
}
