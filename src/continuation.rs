//! Joining of continued physical lines into logical lines.
//!
//! A physical line ending with the continuation marker (`\` by default) is
//! glued to the next one with a single space. A continuation can never merge
//! two independent tokens: if the next fragment looks like the start of a new
//! comment, section header or option, the pending line is emitted first.
//! A doubled marker (`\\`) at the end of a line is literal text.
//!
//! [`Continued`] is a single-pass iterator. It owns its source, so it cannot be
//! shared between two consumers; reading again needs a fresh source.
//!
//! ```rust
//! use unitfile::continuation::Continued;
//! use unitfile::UnitOptions;
//!
//! let options = UnitOptions::new();
//! let lines: Vec<String> = Continued::new(["k=foo\\", "bar", "", "x=1"], &options).collect();
//! assert_eq!(lines, ["k=foo bar", "x=1"]);
//! ```

use crate::classify::is_token;
use crate::options::UnitOptions;
use std::iter::FusedIterator;

/// Iterator adapter producing logical lines from physical ones.
pub struct Continued<'a, I> {
    lines: I,
    options: &'a UnitOptions,
    pending: String,
    done: bool,
}

impl<'a, I> Continued<'a, I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    pub fn new<T>(lines: T, options: &'a UnitOptions) -> Self
    where
        T: IntoIterator<IntoIter = I, Item = I::Item>,
    {
        Continued {
            lines: lines.into_iter(),
            options,
            pending: String::new(),
            done: false,
        }
    }

    /// Strips the continuation marker, if continuation is enabled and present.
    ///
    /// A doubled marker is a literal and does not continue the line. Stripping
    /// repeats until the fragment no longer ends in a lone marker, so a joined
    /// line never renders as a continued one.
    fn strip_marker<'l>(&self, line: &'l str) -> Option<&'l str> {
        let marker = self.options.continuation?;
        if !is_continued(line, marker) {
            return None;
        }

        let mut fragment = line;
        while is_continued(fragment, marker) {
            fragment = fragment[..fragment.len() - marker.len_utf8()].trim_end();
        }
        Some(fragment)
    }

    fn take_pending(&mut self) -> String {
        std::mem::take(&mut self.pending)
    }

    /// Consumes one trimmed physical line, returning a completed logical line
    /// if this step produced one.
    fn step(&mut self, line: &str) -> Option<String> {
        if self.pending.is_empty() {
            if line.is_empty() {
                return None;
            }
            return match self.strip_marker(line) {
                Some(fragment) => {
                    // A lone marker leaves nothing to continue.
                    self.pending = fragment.to_string();
                    None
                }
                None => Some(line.to_string()),
            };
        }

        if line.is_empty() {
            return Some(self.take_pending());
        }

        if let Some(fragment) = self.strip_marker(line) {
            if is_token(fragment, self.options) {
                let complete = self.take_pending();
                self.pending = fragment.to_string();
                return Some(complete);
            }
            self.join(fragment);
            return None;
        }

        if is_token(line, self.options) {
            let complete = self.take_pending();
            self.pending = line.to_string();
            return Some(complete);
        }

        self.join(line);
        Some(self.take_pending())
    }

    fn join(&mut self, fragment: &str) {
        if !fragment.is_empty() {
            self.pending.push(' ');
            self.pending.push_str(fragment);
        }
    }
}

/// Returns `true` if `line` ends with `marker` not preceded by another marker.
fn is_continued(line: &str, marker: char) -> bool {
    let mut tail = line.chars().rev();
    tail.next() == Some(marker) && tail.next() != Some(marker)
}

impl<I> Iterator for Continued<'_, I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }

        while let Some(line) = self.lines.next() {
            if let Some(complete) = self.step(line.as_ref().trim()) {
                return Some(complete);
            }
        }

        self.done = true;
        if self.pending.is_empty() {
            None
        } else {
            Some(self.take_pending())
        }
    }
}

impl<I> FusedIterator for Continued<'_, I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
}
