//! Sections: a header plus the ordered comments and options below it.
//!
//! A section keeps at most one [`OptionLine`] per name. Appending an option whose
//! name is already present merges the values into the existing line instead of
//! adding a second one, so the first position of the option is kept.
//!
//! ## Examples
//!
//! ```rust
//! use unitfile::{Comment, OptionLine, Placement, Section};
//!
//! let mut section = Section::new("Service");
//! section.append(OptionLine::single("Type", "simple"));
//! section.append(OptionLine::single("ExecStart", "/usr/bin/app"));
//! section
//!     .append_at(Comment::new("restart policy"), "ExecStart", Placement::After)
//!     .unwrap();
//!
//! assert_eq!(
//!     section.to_string(),
//!     "[Service]\nType=simple\nExecStart=/usr/bin/app\n# restart policy\n"
//! );
//! ```

use crate::error::{Error, LineError, Result};
use crate::line::{Comment, Line, LineKind, OptionLine};
use crate::options::UnitOptions;
use serde::Serialize;
use std::fmt;

/// Where to insert a line relative to an anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Placement {
    #[default]
    Before,
    After,
}

impl Placement {
    pub(crate) fn offset(self, anchor: usize) -> usize {
        match self {
            Placement::Before => anchor,
            Placement::After => anchor + 1,
        }
    }
}

/// A named section, or the anonymous preamble holding lines that appear
/// before the first header.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize)]
pub struct Section {
    name: Option<String>,
    lines: Vec<Line>,
}

impl Section {
    /// Creates an empty named section.
    pub fn new(name: impl Into<String>) -> Self {
        Section {
            name: Some(name.into()),
            lines: Vec::new(),
        }
    }

    /// Creates an empty anonymous section.
    #[must_use]
    pub fn anonymous() -> Self {
        Section::default()
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.name.is_none()
    }

    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn options(&self) -> impl Iterator<Item = &OptionLine> {
        self.lines.iter().filter_map(Line::as_option)
    }

    pub fn comments(&self) -> impl Iterator<Item = &Comment> {
        self.lines.iter().filter_map(Line::as_comment)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns `true` if the section should be rendered: always for named
    /// sections, only when it holds lines for the anonymous one.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.name.is_some() || !self.lines.is_empty()
    }

    #[must_use]
    pub fn contains(&self, option_name: &str) -> bool {
        self.position(option_name).is_some()
    }

    fn position(&self, option_name: &str) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| matches!(line, Line::Option(o) if o.name() == option_name))
    }

    /// Returns the option with the given name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoOption`] if the section has no such option.
    pub fn get(&self, option_name: &str) -> Result<&OptionLine> {
        self.options()
            .find(|option| option.name() == option_name)
            .ok_or_else(|| Error::no_option(option_name))
    }

    /// Mutable variant of [`Section::get`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoOption`] if the section has no such option.
    pub fn get_mut(&mut self, option_name: &str) -> Result<&mut OptionLine> {
        self.lines
            .iter_mut()
            .find_map(|line| match line {
                Line::Option(option) if option.name() == option_name => Some(option),
                _ => None,
            })
            .ok_or_else(|| Error::no_option(option_name))
    }

    /// Appends a line at the end of the section.
    ///
    /// An option whose name already exists is merged into the existing option.
    pub fn append(&mut self, line: impl Into<Line>) {
        if let Some(line) = self.merge_duplicate(line.into()) {
            self.lines.push(line);
        }
    }

    /// Inserts a line next to the option named `anchor`.
    ///
    /// If `line` is an option whose name already exists, it is merged into the
    /// existing option and `anchor`/`placement` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoOption`] if `anchor` does not exist. The anchor is
    /// checked first, so a failed call never modifies the section.
    pub fn append_at(
        &mut self,
        line: impl Into<Line>,
        anchor: &str,
        placement: Placement,
    ) -> Result<()> {
        let index = self
            .position(anchor)
            .ok_or_else(|| Error::no_option(anchor))?;

        if let Some(line) = self.merge_duplicate(line.into()) {
            self.lines.insert(placement.offset(index), line);
        }
        Ok(())
    }

    /// Merges `line` into an existing option of the same name.
    ///
    /// Hands the line back if there was nothing to merge with.
    fn merge_duplicate(&mut self, line: Line) -> Option<Line> {
        match line {
            Line::Option(incoming) => match self.get_mut(incoming.name()) {
                Ok(existing) => {
                    existing.merge(incoming);
                    None
                }
                Err(_) => Some(Line::Option(incoming)),
            },
            comment => Some(comment),
        }
    }

    /// Removes the first line equal to `line` and returns it.
    pub fn remove(&mut self, line: &Line) -> Option<Line> {
        let index = self.lines.iter().position(|l| l == line)?;
        Some(self.lines.remove(index))
    }

    /// Removes the option with the given name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoOption`] if the section has no such option.
    pub fn remove_option(&mut self, option_name: &str) -> Result<OptionLine> {
        let index = self
            .position(option_name)
            .ok_or_else(|| Error::no_option(option_name))?;
        match self.lines.remove(index) {
            Line::Option(option) => Ok(option),
            Line::Comment(_) => unreachable!("position only matches options"),
        }
    }
}

impl LineKind for Section {
    fn test(line: &str, _options: &UnitOptions) -> bool {
        let line = line.trim();
        line.starts_with('[') && line.ends_with(']')
    }

    fn parse(line: &str, options: &UnitOptions) -> std::result::Result<Self, LineError> {
        if !Self::test(line, options) {
            return Err(LineError);
        }
        let name = line.trim().trim_matches(|c| c == '[' || c == ']').trim();
        Ok(Section::new(name))
    }

    fn render(&self, out: &mut String, options: &UnitOptions) {
        if let Some(name) = &self.name {
            out.push('[');
            out.push_str(name);
            out.push_str("]\n");
        }
        for line in &self.lines {
            line.render(out, options);
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_to_string(&UnitOptions::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header() {
        let options = UnitOptions::ini();
        assert_eq!(Section::parse(" [Unit] ", &options).unwrap().name(), Some("Unit"));
        assert_eq!(Section::parse("[ spaced ]", &options).unwrap().name(), Some("spaced"));
        assert_eq!(Section::parse("[open", &options), Err(LineError));
    }

    #[test]
    fn test_append_merges_duplicate_option() {
        let mut section = Section::new("a");
        section.append(OptionLine::single("k", 1));
        section.append(Comment::new("between"));
        section.append(OptionLine::single("k", 2));
        section.append(OptionLine::single("k", 1));

        assert_eq!(section.len(), 2);
        assert_eq!(section.get("k").unwrap().values(), ["1", "2"]);
        assert_eq!(section.to_string(), "[a]\nk=1\nk=2\n# between\n");
    }

    #[test]
    fn test_append_at_before_and_after() {
        let mut section = Section::new("a");
        section.append(OptionLine::single("b", 1));
        section
            .append_at(OptionLine::single("a", 0), "b", Placement::Before)
            .unwrap();
        section
            .append_at(OptionLine::single("c", 2), "b", Placement::After)
            .unwrap();

        let names: Vec<&str> = section.options().map(OptionLine::name).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn test_append_at_merge_overrides_position() {
        let mut section = Section::new("a");
        section.append(OptionLine::single("x", 1));
        section.append(OptionLine::single("y", 1));
        section
            .append_at(OptionLine::single("y", 2), "x", Placement::Before)
            .unwrap();

        let names: Vec<&str> = section.options().map(OptionLine::name).collect();
        assert_eq!(names, ["x", "y"]);
        assert_eq!(section.get("y").unwrap().values(), ["1", "2"]);
    }

    #[test]
    fn test_append_at_missing_anchor_leaves_section_untouched() {
        let mut section = Section::new("a");
        section.append(OptionLine::single("x", 1));
        let before = section.clone();

        let err = section
            .append_at(OptionLine::single("x", 2), "missing", Placement::After)
            .unwrap_err();
        assert_eq!(err, Error::no_option("missing"));
        assert_eq!(section, before);
    }

    #[test]
    fn test_get_and_remove() {
        let mut section = Section::new("a");
        section.append(Comment::new("c"));
        section.append(OptionLine::single("x", 1));

        assert!(matches!(section.get("nope"), Err(Error::NoOption(_))));
        assert!(section.contains("x"));

        let removed = section.remove(&Line::Comment(Comment::new("c")));
        assert_eq!(removed, Some(Line::Comment(Comment::new("c"))));
        assert_eq!(section.remove(&Line::Comment(Comment::new("c"))), None);

        let option = section.remove_option("x").unwrap();
        assert_eq!(option.value(), "1");
        assert!(section.is_empty());
        assert!(section.remove_option("x").is_err());
    }

    #[test]
    fn test_visibility() {
        assert!(Section::new("named").is_visible());
        let mut anonymous = Section::anonymous();
        assert!(!anonymous.is_visible());
        anonymous.append(Comment::new("preamble"));
        assert!(anonymous.is_visible());
        assert_eq!(anonymous.to_string(), "# preamble\n");
    }
}
