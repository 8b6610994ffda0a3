//! # unitfile
//!
//! A comment-preserving reader and writer for INI-style configuration files
//! ("unit files") and fstab-style mount tables.
//!
//! ## Key Features
//!
//! - **Lossless reading**: Lines that are not comments, headers or options are
//!   kept as comments instead of being dropped
//! - **Merge on duplicate**: Repeated options and sections are combined, never
//!   duplicated
//! - **Line continuation**: Trailing `\` joins physical lines without ever
//!   swallowing the next header or assignment
//! - **Ordered editing**: Insert sections and options before or after an anchor
//! - **Two dialects**: INI-style units and six-column mount tables share one
//!   [`Document`] contract
//!
//! ## Quick Start
//!
//! ```rust
//! use unitfile::{Document, OptionLine};
//!
//! let mut unit = unitfile::from_str(
//!     "# managed file\n[Service]\nExecStart=/usr/bin/app \\\n  --verbose\n",
//! );
//!
//! let service = unit.get_mut(Some("Service")).unwrap();
//! assert_eq!(service.get("ExecStart").unwrap().value(), "/usr/bin/app --verbose");
//! service.append(OptionLine::single("Restart", "always"));
//!
//! assert_eq!(
//!     unit.render(),
//!     "# managed file\n\n[Service]\nExecStart=/usr/bin/app --verbose\nRestart=always\n"
//! );
//! ```
//!
//! ### Merging Duplicates
//!
//! ```rust
//! let unit = unitfile::from_str("[a]\nk=1\nk=2\nk=1\n");
//! let k = unit.get(Some("a")).unwrap().get("k").unwrap();
//! assert_eq!(k.values(), ["1", "2"]);
//! ```
//!
//! ### Files
//!
//! ```rust,no_run
//! use unitfile::Document;
//!
//! let mut unit = unitfile::from_path("/etc/app/app.conf")?;
//! unit.get_mut(Some("main"))?
//!     .append(unitfile::OptionLine::single("debug", true));
//! unit.write_path("/etc/app/app.conf")?;
//! # Ok::<(), unitfile::Error>(())
//! ```
//!
//! ## Modules
//!
//! - [`grammar`] describes the accepted text format
//! - [`classify`] and [`continuation`] are the tokenizing stages
//! - [`unit`] and [`section`] hold the document model
//! - [`fstab`] implements mount tables on the same base

pub mod classify;
pub mod continuation;
pub mod document;
pub mod error;
pub mod fstab;
pub mod grammar;
pub mod line;
pub mod options;
pub mod section;
pub mod unit;

pub use classify::Token;
pub use document::Document;
pub use error::{Error, LineError, Result};
pub use line::{Comment, Line, LineKind, OptionLine, ToOptionValue};
pub use options::{Delimiter, UnitOptions};
pub use section::{Placement, Section};
pub use unit::Unit;

use std::io;
use std::path::Path;

/// Parses a unit from a string.
///
/// Parsing never fails; unrecognized lines are kept as comments.
///
/// # Examples
///
/// ```rust
/// let unit = unitfile::from_str("[a]\nx=1\n");
/// assert!(unit.get(Some("a")).is_ok());
/// ```
#[must_use]
pub fn from_str(text: &str) -> Unit {
    let mut unit = Unit::new();
    unit.read_str(text);
    unit
}

/// Parses a unit from a string with custom options.
///
/// # Examples
///
/// ```rust
/// use unitfile::{from_str_with_options, UnitOptions};
///
/// let options = UnitOptions::new().with_continuation(None);
/// let unit = from_str_with_options("k=a\\\nb\n", options);
/// assert_eq!(unit.get(None).unwrap().get("k").unwrap().value(), "a\\");
/// ```
#[must_use]
pub fn from_str_with_options(text: &str, options: UnitOptions) -> Unit {
    let mut unit = Unit::with_options(options);
    unit.read_str(text);
    unit
}

/// Parses a unit from an I/O stream.
///
/// # Errors
///
/// Returns an error if reading from the reader fails.
pub fn from_reader<R: io::Read>(reader: R) -> Result<Unit> {
    let mut unit = Unit::new();
    unit.read_reader(reader)?;
    Ok(unit)
}

/// Parses a unit from a file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Unit> {
    let mut unit = Unit::new();
    unit.read_path(path)?;
    Ok(unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_from_str_defaults() {
        let unit = from_str("top=1\n[s]\nk=v\n");
        assert_eq!(unit.get(None).unwrap().get("top").unwrap().value(), "1");
        assert_eq!(unit.get(Some("s")).unwrap().get("k").unwrap().value(), "v");
    }

    #[test]
    fn test_from_reader() {
        let unit = from_reader(Cursor::new(b"[s]\nk=v\n")).unwrap();
        assert_eq!(unit.to_string(), "[s]\nk=v\n");
    }

    #[test]
    fn test_from_reader_rejects_invalid_utf8() {
        let result = from_reader(Cursor::new(vec![0xff, 0xfe, 0x00]));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_from_path_missing_file() {
        let result = from_path("/definitely/not/here.conf");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
