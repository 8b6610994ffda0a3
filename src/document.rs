//! The read/write contract shared by every document format.
//!
//! A format implements [`Document::read`] (consume logical input lines) and
//! [`Document::render`]; text, reader, and file handling come for free as
//! provided methods.
//!
//! ## Examples
//!
//! ```rust
//! use unitfile::{Document, Unit};
//!
//! let mut unit = Unit::new();
//! unit.read_str("[main]\nkey=value\n");
//!
//! let mut buffer = Vec::new();
//! unit.write_to(&mut buffer).unwrap();
//! assert_eq!(buffer, b"[main]\nkey=value\n");
//! ```

use crate::error::Result;
use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::Path;

/// A text document that can be read from lines and rendered back.
pub trait Document {
    /// Feeds physical text lines into the document.
    ///
    /// Reading never fails: unrecognized lines are kept as comments.
    fn read<I>(&mut self, lines: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>;

    /// Renders the whole document as text.
    fn render(&self) -> String;

    /// Reads a document from a string.
    fn read_str(&mut self, text: &str) {
        self.read(text.lines());
    }

    /// Reads a document from any reader, line by line.
    ///
    /// # Errors
    ///
    /// Returns the first I/O error of the reader, including invalid UTF-8.
    /// Lines read before the error stay in the document.
    fn read_reader<R: Read>(&mut self, reader: R) -> Result<()> {
        let mut failure = None;
        let lines = io::BufReader::new(reader)
            .lines()
            .map_while(|line| match line {
                Ok(line) => Some(line),
                Err(err) => {
                    failure = Some(err);
                    None
                }
            });
        self.read(lines);

        match failure {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    /// Reads a document from a file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be opened or read.
    fn read_path<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "reading document");
        let file = fs::File::open(path)?;
        self.read_reader(file)
    }

    /// Writes the rendered document to a writer and returns the byte count.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if writing fails.
    fn write_to<W: Write>(&self, mut writer: W) -> Result<usize> {
        let text = self.render();
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(text.len())
    }

    /// Writes the rendered document to a file, creating missing parent
    /// directories, and returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if a directory or the file cannot be created or
    /// written.
    fn write_path<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = fs::File::create(path)?;
        let written = self.write_to(io::BufWriter::new(file))?;
        tracing::debug!(path = %path.display(), bytes = written, "wrote document");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::Unit;
    use std::io::Cursor;

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "device gone"))
        }
    }

    #[test]
    fn test_read_reader_streams_lines() {
        let mut unit = Unit::new();
        unit.read_reader(Cursor::new("[a]\r\nk=1\\\r\n  2\r\n")).unwrap();
        assert_eq!(unit.get(Some("a")).unwrap().get("k").unwrap().value(), "1 2");
    }

    #[test]
    fn test_read_reader_surfaces_first_error() {
        let mut unit = Unit::new();
        let result = unit.read_reader(Cursor::new("[a]\nk=1\n").chain(Broken));

        assert!(matches!(result, Err(Error::Io(msg)) if msg.contains("device gone")));
        assert_eq!(unit.get(Some("a")).unwrap().get("k").unwrap().value(), "1");
    }

    #[test]
    fn test_write_to_counts_bytes() {
        let unit = crate::from_str("[a]\nk=1\n");
        let mut buffer = Vec::new();
        assert_eq!(unit.write_to(&mut buffer).unwrap(), 8);
        assert_eq!(buffer, b"[a]\nk=1\n");
    }
}
