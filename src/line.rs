//! Line variants held by a section.
//!
//! Every classified logical line becomes one of the types in this module (or a
//! [`Section`](crate::Section) header). Each variant implements [`LineKind`],
//! the shared contract of probing text, parsing it, and rendering itself back.
//!
//! ## Examples
//!
//! ```rust
//! use unitfile::{Comment, LineKind, OptionLine, UnitOptions};
//!
//! let options = UnitOptions::new();
//! let option = OptionLine::parse("Restart = always", &options).unwrap();
//! assert_eq!(option.name(), "Restart");
//! assert_eq!(option.values(), ["always"]);
//!
//! assert!(Comment::test("; legacy comment", &options));
//! ```

use crate::error::{Error, LineError};
use crate::options::{Delimiter, UnitOptions};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// `name`, delimiter and `value`; the name stops at the first delimiter.
static OPTION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<name>.*?)\s*(?P<delim>[=:])\s*(?P<value>.*)$")
        .expect("option pattern is a valid regex")
});

fn has_line_break(text: &str) -> bool {
    text.contains(|c: char| c == '\n' || c == '\r')
}

/// Shared contract of every line variant.
pub trait LineKind: Sized {
    /// Returns `true` if `line` matches this variant's grammar.
    fn test(line: &str, options: &UnitOptions) -> bool;

    /// Parses `line` as this variant.
    ///
    /// # Errors
    ///
    /// Returns [`LineError`] if the line does not match the grammar.
    fn parse(line: &str, options: &UnitOptions) -> Result<Self, LineError>;

    /// Appends the rendered form, including the trailing newline, to `out`.
    fn render(&self, out: &mut String, options: &UnitOptions);

    /// Renders this line into a fresh string.
    fn render_to_string(&self, options: &UnitOptions) -> String {
        let mut out = String::new();
        self.render(&mut out, options);
        out
    }
}

/// A comment line.
///
/// # Examples
///
/// ```rust
/// use unitfile::{Comment, LineKind, UnitOptions};
///
/// let options = UnitOptions::new();
/// let comment = Comment::parse(";   spaced out", &options).unwrap();
/// assert_eq!(comment.text(), "spaced out");
/// assert_eq!(comment.render_to_string(&options), "# spaced out\n");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize)]
pub struct Comment {
    text: String,
}

impl Comment {
    /// Creates a comment with the given text. The text may be empty.
    ///
    /// # Panics
    ///
    /// Panics if the text contains a line break. Use [`Comment::try_new`] to
    /// handle that case.
    pub fn new(text: impl Into<String>) -> Self {
        Self::try_new(text).unwrap_or_else(|err| panic!("{err}"))
    }

    /// Creates a comment, rejecting text that would render as several lines.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLine`] if the text contains a line break.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use unitfile::{Comment, Error};
    ///
    /// assert!(Comment::try_new("fine").is_ok());
    /// assert!(matches!(Comment::try_new("two\nlines"), Err(Error::InvalidLine(_))));
    /// ```
    pub fn try_new(text: impl Into<String>) -> Result<Self, Error> {
        let text = text.into();
        if has_line_break(&text) {
            return Err(Error::invalid_line(&format!(
                "comment text {text:?} contains a line break"
            )));
        }
        Ok(Comment { text })
    }

    /// Wraps arbitrary text as a comment, stripping a leading marker if present.
    ///
    /// This never fails and is how unrecognized lines are preserved.
    #[must_use]
    pub fn wrap(line: &str, options: &UnitOptions) -> Self {
        Self::parse(line, options).unwrap_or_else(|_| Comment {
            text: line.trim().to_string(),
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl LineKind for Comment {
    fn test(line: &str, options: &UnitOptions) -> bool {
        options.is_comment(line)
    }

    fn parse(line: &str, options: &UnitOptions) -> Result<Self, LineError> {
        let line = line.trim();
        let mut chars = line.chars();
        match chars.next() {
            Some(c) if options.comment_markers.contains(&c) => Ok(Comment {
                text: chars.as_str().trim().to_string(),
            }),
            _ => Err(LineError),
        }
    }

    fn render(&self, out: &mut String, options: &UnitOptions) {
        out.push(options.primary_comment_marker());
        if !self.text.is_empty() {
            out.push(' ');
            out.push_str(&self.text);
        }
        out.push('\n');
    }
}

/// Conversion of typed values into their textual option form.
///
/// Booleans become `yes`/`no`, integers are rendered in decimal, and floats
/// always carry six fractional digits.
///
/// # Examples
///
/// ```rust
/// use unitfile::ToOptionValue;
///
/// assert_eq!(true.to_option_value(), "yes");
/// assert_eq!(42u16.to_option_value(), "42");
/// assert_eq!(1.5f64.to_option_value(), "1.500000");
/// ```
pub trait ToOptionValue {
    fn to_option_value(&self) -> String;
}

impl ToOptionValue for bool {
    fn to_option_value(&self) -> String {
        let text = if *self { "yes" } else { "no" };
        text.to_string()
    }
}

macro_rules! impl_to_option_value_int {
    ($($ty:ty),*) => {
        $(
            impl ToOptionValue for $ty {
                fn to_option_value(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_to_option_value_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl ToOptionValue for f32 {
    fn to_option_value(&self) -> String {
        format!("{:.6}", self)
    }
}

impl ToOptionValue for f64 {
    fn to_option_value(&self) -> String {
        format!("{:.6}", self)
    }
}

impl ToOptionValue for str {
    fn to_option_value(&self) -> String {
        self.to_string()
    }
}

impl ToOptionValue for String {
    fn to_option_value(&self) -> String {
        self.clone()
    }
}

impl<T: ToOptionValue + ?Sized> ToOptionValue for &T {
    fn to_option_value(&self) -> String {
        (**self).to_option_value()
    }
}

/// An option (`name=value`) line.
///
/// An option holds one or more values. Repeated assignments of the same name
/// are merged into a single option, which renders one line per value.
///
/// # Examples
///
/// ```rust
/// use unitfile::{LineKind, OptionLine, UnitOptions};
///
/// let mut option = OptionLine::new("After", ["network.target"]);
/// option.merge(OptionLine::new("After", ["network.target", "dbus.service"]));
/// assert_eq!(option.values(), ["network.target", "dbus.service"]);
///
/// let rendered = option.render_to_string(&UnitOptions::new());
/// assert_eq!(rendered, "After=network.target\nAfter=dbus.service\n");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OptionLine {
    name: String,
    values: Vec<String>,
    delimiter: Delimiter,
}

impl OptionLine {
    /// Creates an option from typed values.
    ///
    /// # Panics
    ///
    /// Panics wherever [`OptionLine::try_new`] would return an error.
    pub fn new<I, V>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToOptionValue,
    {
        Self::try_new(name, values).unwrap_or_else(|err| panic!("{err}"))
    }

    /// Creates an option from typed values, rejecting input that would not
    /// read back as the same option.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLine`] if `values` is empty, if the name
    /// contains a delimiter, or if the name or a value contains a line break.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use unitfile::{Error, OptionLine};
    ///
    /// assert!(OptionLine::try_new("Wants", ["a.service", "b.service"]).is_ok());
    /// assert!(matches!(OptionLine::try_new("a=b", ["c"]), Err(Error::InvalidLine(_))));
    /// assert!(matches!(OptionLine::try_new("k", Vec::<u8>::new()), Err(Error::InvalidLine(_))));
    /// ```
    pub fn try_new<I, V>(name: impl Into<String>, values: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = V>,
        V: ToOptionValue,
    {
        let name = name.into();
        if has_line_break(&name) || name.contains(&Delimiter::CHARS[..]) {
            return Err(Error::invalid_line(&format!(
                "option name {name:?} contains a delimiter or line break"
            )));
        }

        let values: Vec<String> = values.into_iter().map(|v| v.to_option_value()).collect();
        if values.is_empty() {
            return Err(Error::invalid_line(&format!(
                "option {name:?} needs at least one value"
            )));
        }
        for value in &values {
            check_value(&name, value)?;
        }

        Ok(OptionLine {
            name,
            values,
            delimiter: Delimiter::default(),
        })
    }

    /// Creates an option holding a single typed value.
    pub fn single(name: impl Into<String>, value: impl ToOptionValue) -> Self {
        Self::new(name, [value])
    }

    /// Sets the delimiter used when rendering.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Returns the last assigned value, the one that wins for single-valued
    /// settings.
    #[must_use]
    pub fn value(&self) -> &str {
        self.values.last().map_or("", String::as_str)
    }

    #[must_use]
    pub fn delimiter(&self) -> Delimiter {
        self.delimiter
    }

    /// Merges the values of `other` into this option.
    ///
    /// Values already present are skipped; new ones are appended in order.
    pub fn merge(&mut self, other: OptionLine) {
        for value in other.values {
            if !self.values.contains(&value) {
                self.values.push(value);
            }
        }
    }

    /// Adds a single value unless it is already present.
    ///
    /// # Panics
    ///
    /// Panics if the value contains a line break.
    pub fn push_value(&mut self, value: impl ToOptionValue) {
        let value = value.to_option_value();
        if let Err(err) = check_value(&self.name, &value) {
            panic!("{err}");
        }
        if !self.values.contains(&value) {
            self.values.push(value);
        }
    }

    /// Interprets the value as a boolean.
    ///
    /// Accepts `1`/`0`, `yes`/`no`, `true`/`false` and `on`/`off`, ignoring case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use unitfile::OptionLine;
    ///
    /// assert_eq!(OptionLine::single("a", "On").as_bool(), Some(true));
    /// assert_eq!(OptionLine::single("a", false).as_bool(), Some(false));
    /// assert_eq!(OptionLine::single("a", "maybe").as_bool(), None);
    /// ```
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self.value().to_ascii_lowercase().as_str() {
            "1" | "yes" | "true" | "on" => Some(true),
            "0" | "no" | "false" | "off" => Some(false),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        self.value().parse().ok()
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        self.value().parse().ok()
    }
}

fn check_value(name: &str, value: &str) -> Result<(), Error> {
    if has_line_break(value) {
        return Err(Error::invalid_line(&format!(
            "value {value:?} of option {name:?} contains a line break"
        )));
    }
    Ok(())
}

impl LineKind for OptionLine {
    fn test(line: &str, _options: &UnitOptions) -> bool {
        OPTION_PATTERN.is_match(line.trim())
    }

    fn parse(line: &str, _options: &UnitOptions) -> Result<Self, LineError> {
        let captures = OPTION_PATTERN.captures(line.trim()).ok_or(LineError)?;
        let delimiter = captures
            .name("delim")
            .and_then(|m| m.as_str().chars().next())
            .and_then(Delimiter::from_char)
            .ok_or(LineError)?;

        Ok(OptionLine {
            name: captures["name"].to_string(),
            values: vec![captures["value"].to_string()],
            delimiter,
        })
    }

    fn render(&self, out: &mut String, options: &UnitOptions) {
        for value in &self.values {
            out.push_str(&self.name);
            if options.spacing {
                out.push(' ');
                out.push(self.delimiter.as_char());
                out.push(' ');
            } else {
                out.push(self.delimiter.as_char());
            }
            out.push_str(value);
            out.push('\n');
        }
    }
}

/// A line stored inside a section: a comment or an option.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Line {
    Comment(Comment),
    Option(OptionLine),
}

impl Line {
    #[must_use]
    pub fn is_comment(&self) -> bool {
        matches!(self, Line::Comment(_))
    }

    #[must_use]
    pub fn is_option(&self) -> bool {
        matches!(self, Line::Option(_))
    }

    #[must_use]
    pub fn as_comment(&self) -> Option<&Comment> {
        match self {
            Line::Comment(comment) => Some(comment),
            Line::Option(_) => None,
        }
    }

    #[must_use]
    pub fn as_option(&self) -> Option<&OptionLine> {
        match self {
            Line::Option(option) => Some(option),
            Line::Comment(_) => None,
        }
    }

    pub fn render(&self, out: &mut String, options: &UnitOptions) {
        match self {
            Line::Comment(comment) => comment.render(out, options),
            Line::Option(option) => option.render(out, options),
        }
    }
}

impl From<Comment> for Line {
    fn from(comment: Comment) -> Self {
        Line::Comment(comment)
    }
}

impl From<OptionLine> for Line {
    fn from(option: OptionLine) -> Self {
        Line::Option(option)
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_to_string(&UnitOptions::default()))
    }
}

impl fmt::Display for OptionLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_to_string(&UnitOptions::default()))
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.render(&mut out, &UnitOptions::default());
        f.write_str(&out)
    }
}
