use unitfile::fstab::{Fstab, FstabLine, MountEntry, DEFAULT_MOUNT_OPTIONS};
use unitfile::{Comment, Document, Error, Placement};

const TABLE: &str = "\
# /etc/fstab: static file system information
UUID=1111 / ext4 errors=remount-ro 0 1
UUID=2222 none swap sw 0 0
tmpfs /tmp tmpfs defaults,noatime 0 0
";

#[test]
fn test_read_table() {
    let mut table = Fstab::new();
    table.read_str(TABLE);

    assert_eq!(table.comments().count(), 1);
    assert_eq!(table.entries().count(), 3);

    let root = table.get("UUID=1111").unwrap();
    assert_eq!(root.dir(), "/");
    assert_eq!(root.fs_type(), "ext4");
    assert_eq!(root.options(), "errors=remount-ro");
    assert_eq!(root.dump(), 0);
    assert_eq!(root.pass(), 1);
}

#[test]
fn test_render_uses_tabs() {
    let mut table = Fstab::new();
    table.read_str(TABLE);
    let rendered = table.to_string();
    println!("Rendered:\n{}", rendered);

    assert!(rendered.contains("UUID=1111\t/\text4\terrors=remount-ro\t0\t1\n"));
    assert!(rendered.starts_with("# /etc/fstab: static file system information\n"));

    let mut again = Fstab::new();
    again.read_str(&rendered);
    assert_eq!(again, table);
}

#[test]
fn test_malformed_rows_are_kept_as_comments() {
    let mut table = Fstab::new();
    table.read_str("too few fields 0 0\n/dev/sda1 / ext4 defaults zero 1\n/a /b c d 0 0 extra\n");

    assert_eq!(table.entries().count(), 0);
    let texts: Vec<&str> = table.comments().map(Comment::text).collect();
    assert_eq!(
        texts,
        [
            "too few fields 0 0",
            "/dev/sda1 / ext4 defaults zero 1",
            "/a /b c d 0 0 extra"
        ]
    );
}

#[test]
fn test_continuation_is_not_supported() {
    let mut table = Fstab::new();
    table.read_str("/dev/sda1 / ext4 \\\ndefaults 0 1\n");
    assert_eq!(table.entries().count(), 0);
    assert_eq!(table.comments().count(), 2);
}

#[test]
fn test_new_entry_defaults() {
    let entry = MountEntry::new("/dev/sdc1", "/media/usb", "vfat");
    assert_eq!(entry.options(), DEFAULT_MOUNT_OPTIONS);
    assert_eq!((entry.dump(), entry.pass()), (0, 0));
}

#[test]
fn test_editing_table() {
    let mut table = Fstab::with_header();
    table.append(MountEntry::new("/dev/sda1", "/", "ext4").with_pass(1));
    table
        .append_at(
            Comment::new("data disk"),
            "/dev/sda1",
            Placement::After,
        )
        .unwrap();
    table.append(MountEntry::new("/dev/sdb1", "/data", "xfs"));

    // Re-adding a file system replaces its row.
    table.append(MountEntry::new("/dev/sdb1", "/srv", "xfs").with_options("defaults"));
    assert_eq!(table.entries().count(), 2);
    assert_eq!(table.get("/dev/sdb1").unwrap().dir(), "/srv");

    assert_eq!(
        table.get("/dev/missing"),
        Err(Error::NoOption("/dev/missing".to_string()))
    );

    let last_two: Vec<&FstabLine> = table.lines().iter().rev().take(2).collect();
    assert_eq!(
        last_two[0],
        &FstabLine::Entry(MountEntry::new("/dev/sdb1", "/srv", "xfs").with_options("defaults"))
    );
    assert_eq!(last_two[1], &FstabLine::Comment(Comment::new("data disk")));
}

#[test]
fn test_write_path_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("etc").join("fstab");

    let mut table = Fstab::with_header();
    table.append(MountEntry::new("/dev/sda1", "/", "ext4"));
    let written = table.write_path(&path).unwrap();
    assert_eq!(written, table.to_string().len());

    let mut back = Fstab::new();
    back.read_path(&path).unwrap();
    assert_eq!(back, table);
}
