//! Mount tables in the six-column `fstab` format.
//!
//! An fstab document is a flat list of comments and [`MountEntry`] rows. There
//! are no sections and no line continuation. A row is recognized only when it
//! has exactly six whitespace-separated fields and the last two are integers;
//! anything else is kept as a comment.
//!
//! Rows are keyed by their file system (first column). Appending a row for a
//! file system that is already present replaces the existing row in place.
//!
//! ## Examples
//!
//! ```rust
//! use unitfile::fstab::{Fstab, MountEntry};
//! use unitfile::Document;
//!
//! let mut table = Fstab::new();
//! table.read_str("# root\nUUID=abc / ext4 defaults 0 1\n");
//! table.append(MountEntry::new("/dev/sdb1", "/mnt/data", "xfs"));
//!
//! assert_eq!(table.get("UUID=abc").unwrap().dir(), "/");
//! assert_eq!(table.entries().count(), 2);
//! ```

use crate::continuation::Continued;
use crate::document::Document;
use crate::error::{Error, LineError, Result};
use crate::line::{Comment, LineKind};
use crate::options::UnitOptions;
use crate::section::Placement;
use serde::Serialize;
use std::fmt;

/// Mount options used by [`MountEntry::new`].
pub const DEFAULT_MOUNT_OPTIONS: &str = "defaults,lazytime,noauto,x-systemd.automount";

const HEADER: &str = "#
# /etc/fstab: static file system information
#
# <file system>\t<dir>\t<type>\t<options>\t<dump>\t<pass>
";

/// One row of a mount table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MountEntry {
    file_system: String,
    dir: String,
    fs_type: String,
    options: String,
    dump: i32,
    pass: i32,
}

impl MountEntry {
    /// Creates a row with [`DEFAULT_MOUNT_OPTIONS`] and zero dump/pass values.
    pub fn new(
        file_system: impl Into<String>,
        dir: impl Into<String>,
        fs_type: impl Into<String>,
    ) -> Self {
        MountEntry {
            file_system: file_system.into(),
            dir: dir.into(),
            fs_type: fs_type.into(),
            options: DEFAULT_MOUNT_OPTIONS.to_string(),
            dump: 0,
            pass: 0,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: impl Into<String>) -> Self {
        self.options = options.into();
        self
    }

    #[must_use]
    pub fn with_dump(mut self, dump: i32) -> Self {
        self.dump = dump;
        self
    }

    #[must_use]
    pub fn with_pass(mut self, pass: i32) -> Self {
        self.pass = pass;
        self
    }

    #[must_use]
    pub fn file_system(&self) -> &str {
        &self.file_system
    }

    #[must_use]
    pub fn dir(&self) -> &str {
        &self.dir
    }

    #[must_use]
    pub fn fs_type(&self) -> &str {
        &self.fs_type
    }

    #[must_use]
    pub fn options(&self) -> &str {
        &self.options
    }

    #[must_use]
    pub fn dump(&self) -> i32 {
        self.dump
    }

    #[must_use]
    pub fn pass(&self) -> i32 {
        self.pass
    }
}

impl LineKind for MountEntry {
    fn test(line: &str, options: &UnitOptions) -> bool {
        Self::parse(line, options).is_ok()
    }

    fn parse(line: &str, _options: &UnitOptions) -> std::result::Result<Self, LineError> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [file_system, dir, fs_type, options, dump, pass] = fields[..] else {
            return Err(LineError);
        };

        Ok(MountEntry {
            file_system: file_system.to_string(),
            dir: dir.to_string(),
            fs_type: fs_type.to_string(),
            options: options.to_string(),
            dump: dump.parse().map_err(|_| LineError)?,
            pass: pass.parse().map_err(|_| LineError)?,
        })
    }

    fn render(&self, out: &mut String, _options: &UnitOptions) {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\t{}\n",
            self.file_system, self.dir, self.fs_type, self.options, self.dump, self.pass
        ));
    }
}

impl fmt::Display for MountEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_to_string(&UnitOptions::fstab()))
    }
}

/// A line of a mount table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FstabLine {
    Comment(Comment),
    Entry(MountEntry),
}

impl FstabLine {
    #[must_use]
    pub fn as_entry(&self) -> Option<&MountEntry> {
        match self {
            FstabLine::Entry(entry) => Some(entry),
            FstabLine::Comment(_) => None,
        }
    }

    #[must_use]
    pub fn as_comment(&self) -> Option<&Comment> {
        match self {
            FstabLine::Comment(comment) => Some(comment),
            FstabLine::Entry(_) => None,
        }
    }

    /// Classifies a logical line; blank lines yield `None`.
    #[must_use]
    pub fn classify(line: &str, options: &UnitOptions) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let token = Comment::parse(line, options)
            .map(FstabLine::Comment)
            .or_else(|_| MountEntry::parse(line, options).map(FstabLine::Entry))
            .unwrap_or_else(|_| {
                tracing::trace!(line, "unrecognized mount row kept as comment");
                FstabLine::Comment(Comment::wrap(line, options))
            });
        Some(token)
    }

    fn render(&self, out: &mut String, options: &UnitOptions) {
        match self {
            FstabLine::Comment(comment) => comment.render(out, options),
            FstabLine::Entry(entry) => entry.render(out, options),
        }
    }
}

impl From<Comment> for FstabLine {
    fn from(comment: Comment) -> Self {
        FstabLine::Comment(comment)
    }
}

impl From<MountEntry> for FstabLine {
    fn from(entry: MountEntry) -> Self {
        FstabLine::Entry(entry)
    }
}

/// A mount table document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Fstab {
    lines: Vec<FstabLine>,
    #[serde(skip)]
    options: UnitOptions,
}

impl Default for Fstab {
    fn default() -> Self {
        Self::new()
    }
}

impl Fstab {
    /// Creates an empty mount table.
    #[must_use]
    pub fn new() -> Self {
        Fstab {
            lines: Vec::new(),
            options: UnitOptions::fstab(),
        }
    }

    /// Creates a mount table seeded with the conventional header comments.
    ///
    /// ```rust
    /// use unitfile::fstab::Fstab;
    ///
    /// let table = Fstab::with_header();
    /// assert!(table.to_string().starts_with("#\n# /etc/fstab: static"));
    /// ```
    #[must_use]
    pub fn with_header() -> Self {
        let mut table = Self::new();
        table.read_str(HEADER);
        table
    }

    #[must_use]
    pub fn lines(&self) -> &[FstabLine] {
        &self.lines
    }

    pub fn entries(&self) -> impl Iterator<Item = &MountEntry> {
        self.lines.iter().filter_map(FstabLine::as_entry)
    }

    pub fn comments(&self) -> impl Iterator<Item = &Comment> {
        self.lines.iter().filter_map(FstabLine::as_comment)
    }

    fn position(&self, file_system: &str) -> Option<usize> {
        self.lines.iter().position(
            |line| matches!(line, FstabLine::Entry(e) if e.file_system() == file_system),
        )
    }

    /// Returns the row for the given file system.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoOption`] if there is no such row.
    pub fn get(&self, file_system: &str) -> Result<&MountEntry> {
        self.entries()
            .find(|entry| entry.file_system() == file_system)
            .ok_or_else(|| Error::no_option(file_system))
    }

    /// Mutable variant of [`Fstab::get`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoOption`] if there is no such row.
    pub fn get_mut(&mut self, file_system: &str) -> Result<&mut MountEntry> {
        self.lines
            .iter_mut()
            .find_map(|line| match line {
                FstabLine::Entry(entry) if entry.file_system() == file_system => Some(entry),
                _ => None,
            })
            .ok_or_else(|| Error::no_option(file_system))
    }

    /// Appends a line at the end of the table.
    ///
    /// A row for a file system that is already present replaces that row.
    pub fn append(&mut self, line: impl Into<FstabLine>) {
        if let Some(line) = self.replace_duplicate(line.into()) {
            self.lines.push(line);
        }
    }

    /// Inserts a line next to the row of the `anchor` file system.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoOption`] if `anchor` has no row. Nothing is
    /// modified on error.
    pub fn append_at(
        &mut self,
        line: impl Into<FstabLine>,
        anchor: &str,
        placement: Placement,
    ) -> Result<()> {
        let index = self
            .position(anchor)
            .ok_or_else(|| Error::no_option(anchor))?;
        if let Some(line) = self.replace_duplicate(line.into()) {
            self.lines.insert(placement.offset(index), line);
        }
        Ok(())
    }

    fn replace_duplicate(&mut self, line: FstabLine) -> Option<FstabLine> {
        match line {
            FstabLine::Entry(entry) => match self.get_mut(entry.file_system()) {
                Ok(existing) => {
                    *existing = entry;
                    None
                }
                Err(_) => Some(FstabLine::Entry(entry)),
            },
            comment => Some(comment),
        }
    }

    /// Removes the first line equal to `line` and returns it.
    pub fn remove(&mut self, line: &FstabLine) -> Option<FstabLine> {
        let index = self.lines.iter().position(|l| l == line)?;
        Some(self.lines.remove(index))
    }

    /// Removes the row of the given file system.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoOption`] if there is no such row.
    pub fn remove_entry(&mut self, file_system: &str) -> Result<MountEntry> {
        let index = self
            .position(file_system)
            .ok_or_else(|| Error::no_option(file_system))?;
        match self.lines.remove(index) {
            FstabLine::Entry(entry) => Ok(entry),
            FstabLine::Comment(_) => unreachable!("position only matches entries"),
        }
    }
}

impl Document for Fstab {
    fn read<I>(&mut self, lines: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let options = self.options.clone();
        let before = self.lines.len();
        for line in Continued::new(lines, &options) {
            if let Some(token) = FstabLine::classify(&line, &options) {
                self.append(token);
            }
        }
        tracing::debug!(lines = self.lines.len() - before, "read mount table");
    }

    fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            line.render(&mut out, &self.options);
        }
        out
    }
}

impl fmt::Display for Fstab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> UnitOptions {
        UnitOptions::fstab()
    }

    #[test]
    fn test_row_requires_six_fields() {
        assert!(MountEntry::test("/dev/sda1 / ext4 defaults 0 1", &options()));
        assert!(!MountEntry::test("/dev/sda1 / ext4 defaults 0", &options()));
        assert!(!MountEntry::test("/dev/sda1 / ext4 defaults 0 1 extra", &options()));
    }

    #[test]
    fn test_row_requires_integer_dump_and_pass() {
        assert!(!MountEntry::test("/dev/sda1 / ext4 defaults x 1", &options()));
        assert!(!MountEntry::test("/dev/sda1 / ext4 defaults 0 y", &options()));
        assert!(MountEntry::test("/dev/sda1\t/\text4\tdefaults\t-1\t2", &options()));
    }

    #[test]
    fn test_invalid_rows_degrade_to_comments() {
        let line = FstabLine::classify("/dev/sda1 / ext4", &options()).unwrap();
        assert_eq!(line, FstabLine::Comment(Comment::new("/dev/sda1 / ext4")));
        assert_eq!(FstabLine::classify("   ", &options()), None);
    }

    #[test]
    fn test_render_is_tab_separated() {
        let entry = MountEntry::new("/dev/sdb1", "/mnt", "xfs")
            .with_options("rw")
            .with_pass(2);
        assert_eq!(entry.to_string(), "/dev/sdb1\t/mnt\txfs\trw\t0\t2\n");
    }

    #[test]
    fn test_duplicate_row_replaces_in_place() {
        let mut table = Fstab::new();
        table.read_str("a /a ext4 defaults 0 0\nb /b ext4 defaults 0 0\n");
        table.append(MountEntry::new("a", "/other", "xfs"));

        let dirs: Vec<&str> = table.entries().map(MountEntry::dir).collect();
        assert_eq!(dirs, ["/other", "/b"]);
    }

    #[test]
    fn test_append_at_and_remove() {
        let mut table = Fstab::new();
        table.append(MountEntry::new("b", "/b", "ext4"));
        table
            .append_at(MountEntry::new("a", "/a", "ext4"), "b", Placement::Before)
            .unwrap();
        table
            .append_at(Comment::new("after b"), "b", Placement::After)
            .unwrap();
        assert!(table
            .append_at(Comment::new("x"), "missing", Placement::After)
            .is_err());

        let systems: Vec<&str> = table.entries().map(MountEntry::file_system).collect();
        assert_eq!(systems, ["a", "b"]);
        assert_eq!(table.comments().count(), 1);

        let removed = table.remove_entry("a").unwrap();
        assert_eq!(removed.dir(), "/a");
        assert!(matches!(table.get("a"), Err(Error::NoOption(_))));
        assert!(table.remove(&FstabLine::Comment(Comment::new("after b"))).is_some());
    }

    #[test]
    fn test_header_round_trip() {
        let table = Fstab::with_header();
        assert_eq!(table.comments().count(), 4);
        assert_eq!(table.to_string(), HEADER);
    }
}
