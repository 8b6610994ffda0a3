//! Maintaining an fstab-style mount table.
//!
//! Run with: cargo run --example mount_table

use std::error::Error;
use unitfile::fstab::{Fstab, MountEntry};
use unitfile::{Comment, Document, Placement};

fn main() -> Result<(), Box<dyn Error>> {
    let mut table = Fstab::with_header();
    table.read_str(
        "UUID=1111 / ext4 errors=remount-ro 0 1\n\
         UUID=2222 none swap sw 0 0\n\
         this row is broken\n",
    );

    println!("Entries:");
    for entry in table.entries() {
        println!("  {} on {} ({})", entry.file_system(), entry.dir(), entry.fs_type());
    }
    println!("Comments: {}\n", table.comments().count());

    // New rows get automount defaults
    table.append(MountEntry::new("/dev/sdb1", "/data", "xfs"));
    table.append_at(
        Comment::new("backup disk"),
        "/dev/sdb1",
        Placement::Before,
    )?;

    // Re-adding a file system replaces its row
    table.append(MountEntry::new("/dev/sdb1", "/srv/data", "xfs").with_options("defaults"));

    let removed = table.remove_entry("UUID=2222")?;
    println!("Removed swap on {}\n", removed.file_system());

    println!("Rendered:\n{}", table);

    Ok(())
}
