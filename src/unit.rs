//! The INI-style document model.
//!
//! A [`Unit`] is an ordered collection of [`Section`]s: an optional anonymous
//! preamble, always first, followed by named sections in insertion order.
//! Section names are unique; a header that repeats an earlier name while
//! reading continues that earlier section instead of creating a new one.
//!
//! ## Reading
//!
//! [`Document::read`] runs every physical line through the continuation joiner
//! and the classifier. A cursor starts at the anonymous section and moves only
//! when a section header is seen; comments and options are appended to the
//! section under the cursor, merging repeated options.
//!
//! ## Examples
//!
//! ```rust
//! use unitfile::{Document, Unit};
//!
//! let mut unit = Unit::empty();
//! unit.read_str("[a]\nk=1\n[b]\nx=0\n[a]\nk=2\nk=1\n");
//!
//! assert_eq!(unit.section_names().collect::<Vec<_>>(), [Some("a"), Some("b")]);
//! assert_eq!(unit.get(Some("a")).unwrap().get("k").unwrap().values(), ["1", "2"]);
//! ```

use crate::classify::classify;
use crate::continuation::Continued;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::line::LineKind;
use crate::options::UnitOptions;
use crate::section::{Placement, Section};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// An INI-style document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Unit {
    preamble: Option<Section>,
    sections: IndexMap<String, Section>,
    #[serde(skip)]
    options: UnitOptions,
}

impl Default for Unit {
    fn default() -> Self {
        Self::new()
    }
}

impl Unit {
    /// Creates a document seeded with an empty anonymous section.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(UnitOptions::default())
    }

    /// Creates a seeded document using custom options.
    #[must_use]
    pub fn with_options(options: UnitOptions) -> Self {
        Unit {
            preamble: Some(Section::anonymous()),
            sections: IndexMap::new(),
            options,
        }
    }

    /// Creates a document without any section, not even the anonymous one.
    #[must_use]
    pub fn empty() -> Self {
        Self::empty_with_options(UnitOptions::default())
    }

    /// Creates a document without any section using custom options.
    ///
    /// ```rust
    /// use unitfile::{Document, Unit, UnitOptions};
    ///
    /// let mut unit = Unit::empty_with_options(UnitOptions::fstab());
    /// assert!(unit.is_empty());
    /// unit.read_str("[a]\nk=v \\\n");
    /// assert_eq!(unit.get(Some("a")).unwrap().get("k").unwrap().value(), "v \\");
    /// ```
    #[must_use]
    pub fn empty_with_options(options: UnitOptions) -> Self {
        Unit {
            preamble: None,
            sections: IndexMap::new(),
            options,
        }
    }

    #[must_use]
    pub fn options(&self) -> &UnitOptions {
        &self.options
    }

    /// Iterates over all sections, the anonymous one first.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.preamble.iter().chain(self.sections.values())
    }

    /// Iterates over section names in document order; `None` is the anonymous
    /// section.
    pub fn section_names(&self) -> impl Iterator<Item = Option<&str>> {
        self.sections().map(Section::name)
    }

    /// Number of sections, including the anonymous one if present.
    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.preamble.is_some()) + self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains(&self, name: Option<&str>) -> bool {
        match name {
            None => self.preamble.is_some(),
            Some(name) => self.sections.contains_key(name),
        }
    }

    /// Returns the section with the given name; `None` selects the anonymous
    /// section.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSection`] if there is no such section.
    pub fn get(&self, name: Option<&str>) -> Result<&Section> {
        let section = match name {
            None => self.preamble.as_ref(),
            Some(name) => self.sections.get(name),
        };
        section.ok_or_else(|| Error::no_section(name))
    }

    /// Mutable variant of [`Unit::get`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSection`] if there is no such section.
    pub fn get_mut(&mut self, name: Option<&str>) -> Result<&mut Section> {
        let section = match name {
            None => self.preamble.as_mut(),
            Some(name) => self.sections.get_mut(name),
        };
        section.ok_or_else(|| Error::no_section(name))
    }

    /// Appends a section at the end of the document.
    ///
    /// An anonymous section always becomes the first section.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateSection`] if a section with the same name
    /// already exists.
    pub fn append(&mut self, section: Section) -> Result<()> {
        self.check_unique(&section)?;
        match section.name() {
            None => self.preamble = Some(section),
            Some(name) => {
                self.sections.insert(name.to_string(), section);
            }
        }
        Ok(())
    }

    /// Inserts a section before or after the section named `anchor`.
    ///
    /// An anonymous section ignores the anchor and always becomes the first
    /// section.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateSection`] if a section with the same name
    /// already exists, or [`Error::NoSection`] if `anchor` does not exist.
    /// Nothing is modified on error.
    pub fn append_at(
        &mut self,
        section: Section,
        anchor: &str,
        placement: Placement,
    ) -> Result<()> {
        self.check_unique(&section)?;
        let Some(name) = section.name().map(str::to_string) else {
            self.preamble = Some(section);
            return Ok(());
        };

        let index = self
            .sections
            .get_index_of(anchor)
            .ok_or_else(|| Error::no_section(Some(anchor)))?;
        self.sections
            .shift_insert(placement.offset(index), name, section);
        Ok(())
    }

    fn check_unique(&self, section: &Section) -> Result<()> {
        if self.contains(section.name()) {
            return Err(Error::duplicate_section(section.name()));
        }
        Ok(())
    }

    /// Removes a section and returns it; `None` removes the anonymous section.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSection`] if there is no such section.
    pub fn remove(&mut self, name: Option<&str>) -> Result<Section> {
        let section = match name {
            None => self.preamble.take(),
            Some(name) => self.sections.shift_remove(name),
        };
        section.ok_or_else(|| Error::no_section(name))
    }

    /// Returns the section a reading cursor points at, creating the
    /// anonymous section on demand.
    fn cursor_section(&mut self, cursor: Option<&str>) -> &mut Section {
        match cursor {
            None => self.preamble.get_or_insert_with(Section::anonymous),
            Some(name) => self
                .sections
                .entry(name.to_string())
                .or_insert_with(|| Section::new(name)),
        }
    }
}

impl Document for Unit {
    fn read<I>(&mut self, lines: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let options = self.options.clone();
        let mut cursor: Option<String> = None;
        let mut tokens = 0usize;

        for line in Continued::new(lines, &options) {
            let Some(token) = classify(&line, &options) else {
                continue;
            };
            tokens += 1;

            match token.into_line() {
                Ok(line) => self.cursor_section(cursor.as_deref()).append(line),
                Err(section) => {
                    let name = section.name().map(str::to_string);
                    if !self.contains(name.as_deref()) {
                        // New headers keep their encounter order.
                        self.cursor_section(name.as_deref());
                    }
                    cursor = name;
                }
            }
        }

        tracing::debug!(tokens, sections = self.len(), "read unit");
    }

    fn render(&self) -> String {
        let mut out = String::new();
        for (i, section) in self.sections().filter(|s| s.is_visible()).enumerate() {
            if i > 0 {
                out.push('\n');
            }
            section.render(&mut out, &self.options);
        }
        out
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
