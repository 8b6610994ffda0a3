//! Error types for reading, querying, and writing unit files.
//!
//! Parsing itself never fails: a line that is not a recognized comment, section
//! header, or option is kept as a comment so no input text is lost. Errors are
//! reserved for structural misuse of the document model and for I/O.
//!
//! ## Error Categories
//!
//! - **Lookup failures**: [`Error::NoSection`] and [`Error::NoOption`] when a
//!   requested section or option does not exist
//! - **Uniqueness violations**: [`Error::DuplicateSection`] when appending a
//!   section whose name is already taken
//! - **Construction failures**: [`Error::InvalidLine`] when a built comment or
//!   option would render as something else, such as text with a line break
//! - **I/O Errors**: file reading/writing failures
//!
//! Every structural check runs before the document is touched, so an `Err`
//! always leaves the document exactly as it was.
//!
//! ## Examples
//!
//! ```rust
//! use unitfile::Error;
//!
//! let unit = unitfile::from_str("[main]\nkey=value\n");
//! let missing = unit.get(Some("other"));
//! assert!(matches!(missing, Err(Error::NoSection(_))));
//! ```

use thiserror::Error;

/// Represents all possible errors raised by the document model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// A section lookup failed. `None` names the anonymous section.
    #[error("No section: {}", display_section(.0))]
    NoSection(Option<String>),

    /// An option lookup failed.
    #[error("No option {0:?}")]
    NoOption(String),

    /// A section with this name is already part of the document.
    #[error("Section already exists: {}", display_section(.0))]
    DuplicateSection(Option<String>),

    /// A constructed line would not read back as itself, for example because
    /// its text spans several lines.
    #[error("Invalid line: {0}")]
    InvalidLine(String),
}

fn display_section(name: &Option<String>) -> String {
    match name {
        Some(name) => format!("{name:?}"),
        None => "<anonymous>".to_string(),
    }
}

impl Error {
    /// Creates a missing-section error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use unitfile::Error;
    ///
    /// let err = Error::no_section(Some("network"));
    /// assert_eq!(err.to_string(), "No section: \"network\"");
    /// ```
    pub fn no_section(name: Option<&str>) -> Self {
        Error::NoSection(name.map(str::to_string))
    }

    /// Creates a missing-option error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use unitfile::Error;
    ///
    /// let err = Error::no_option("Restart");
    /// assert!(err.to_string().contains("Restart"));
    /// ```
    pub fn no_option(name: &str) -> Self {
        Error::NoOption(name.to_string())
    }

    /// Creates a duplicate-section error.
    pub fn duplicate_section(name: Option<&str>) -> Self {
        Error::DuplicateSection(name.map(str::to_string))
    }

    /// Creates an error for a line that cannot be rendered faithfully.
    pub fn invalid_line(msg: &str) -> Self {
        Error::InvalidLine(msg.to_string())
    }

    /// Creates an I/O error for file reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::io(&err.to_string())
    }
}

/// Signals that a piece of text does not match the grammar of a line variant.
///
/// Only used between the variant parsers and the classifier, which answers it
/// by trying the next variant and finally falling back to a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("line does not match the expected grammar")]
pub struct LineError;

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_section_message() {
        assert_eq!(
            Error::no_section(None).to_string(),
            "No section: <anonymous>"
        );
        assert_eq!(
            Error::duplicate_section(Some("a")).to_string(),
            "Section already exists: \"a\""
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(msg) if msg.contains("gone")));
    }
}
