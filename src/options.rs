//! Dialect and formatting options for unit files.
//!
//! This module provides types to customize how documents are read and rendered:
//!
//! - [`UnitOptions`]: Main configuration struct
//! - [`Delimiter`]: The separator between an option name and its value
//!
//! Two presets cover the supported dialects: [`UnitOptions::ini`] (the default)
//! and [`UnitOptions::fstab`].
//!
//! ## Examples
//!
//! ```rust
//! use unitfile::{Document, Unit, UnitOptions};
//!
//! let mut unit = Unit::with_options(UnitOptions::new().with_spacing(true));
//! unit.read_str("[main]\nkey=value\n");
//! assert_eq!(unit.to_string(), "[main]\nkey = value\n");
//! ```

use serde::Serialize;

/// Separator between an option name and its value.
///
/// # Examples
///
/// ```rust
/// use unitfile::Delimiter;
///
/// assert_eq!(Delimiter::Equals.as_char(), '=');
/// assert_eq!(Delimiter::from_char(':'), Some(Delimiter::Colon));
/// assert_eq!(Delimiter::from_char('|'), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize)]
pub enum Delimiter {
    #[default]
    Equals,
    Colon,
}

impl Delimiter {
    /// Every character accepted as a delimiter when parsing.
    pub const CHARS: [char; 2] = ['=', ':'];

    /// Returns the character representation of this delimiter.
    #[must_use]
    pub const fn as_char(&self) -> char {
        match self {
            Delimiter::Equals => '=',
            Delimiter::Colon => ':',
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '=' => Some(Delimiter::Equals),
            ':' => Some(Delimiter::Colon),
            _ => None,
        }
    }
}

/// Configuration for reading and rendering a document.
///
/// Controls which characters introduce comments, whether physical lines may
/// be continued with a trailing marker, and how option lines are spaced.
///
/// # Examples
///
/// ```rust
/// use unitfile::UnitOptions;
///
/// // INI dialect: `#` and `;` comments, `\` continuation
/// let options = UnitOptions::new();
/// assert_eq!(options.primary_comment_marker(), '#');
///
/// // fstab dialect: `#` comments, no continuation
/// let options = UnitOptions::fstab();
/// assert_eq!(options.continuation, None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitOptions {
    /// Characters that start a comment. The first one is used when rendering.
    pub comment_markers: Vec<char>,
    /// Trailing character that joins a physical line with the next one.
    pub continuation: Option<char>,
    /// Render `name = value` instead of `name=value`.
    pub spacing: bool,
}

impl Default for UnitOptions {
    fn default() -> Self {
        UnitOptions {
            comment_markers: vec!['#', ';'],
            continuation: Some('\\'),
            spacing: false,
        }
    }
}

impl UnitOptions {
    /// Creates default options (INI dialect).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use unitfile::UnitOptions;
    ///
    /// let options = UnitOptions::new();
    /// assert_eq!(options.comment_markers, vec!['#', ';']);
    /// assert_eq!(options.continuation, Some('\\'));
    /// assert!(!options.spacing);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for INI-style unit files. Same as [`UnitOptions::new`].
    #[must_use]
    pub fn ini() -> Self {
        Self::default()
    }

    /// Options for fstab-style mount tables.
    #[must_use]
    pub fn fstab() -> Self {
        UnitOptions {
            comment_markers: vec!['#'],
            continuation: None,
            spacing: false,
        }
    }

    /// Sets the comment markers. The first marker is the one rendered.
    ///
    /// An empty list is ignored so that comments can always be rendered.
    #[must_use]
    pub fn with_comment_markers(mut self, markers: &[char]) -> Self {
        if !markers.is_empty() {
            self.comment_markers = markers.to_vec();
        }
        self
    }

    /// Sets or disables the line continuation marker.
    #[must_use]
    pub fn with_continuation(mut self, marker: Option<char>) -> Self {
        self.continuation = marker;
        self
    }

    /// Enables spaces around the delimiter when rendering options.
    #[must_use]
    pub fn with_spacing(mut self, spacing: bool) -> Self {
        self.spacing = spacing;
        self
    }

    /// Returns the marker used when rendering comments.
    #[must_use]
    pub fn primary_comment_marker(&self) -> char {
        self.comment_markers.first().copied().unwrap_or('#')
    }

    /// Returns `true` if `line`, once trimmed, starts with a comment marker.
    #[must_use]
    pub fn is_comment(&self, line: &str) -> bool {
        line.trim_start().starts_with(self.comment_markers.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_markers_are_ignored() {
        let options = UnitOptions::new().with_comment_markers(&[]);
        assert_eq!(options.comment_markers, vec!['#', ';']);

        let options = UnitOptions::new().with_comment_markers(&['!']);
        assert!(options.is_comment("  ! note"));
        assert!(!options.is_comment("# note"));
    }

    #[test]
    fn test_presets() {
        assert_eq!(UnitOptions::ini(), UnitOptions::default());
        assert!(UnitOptions::ini().is_comment("; note"));
        assert!(!UnitOptions::fstab().is_comment("; note"));
    }
}
