//! Line classification.
//!
//! Decides which kind of token a logical line is. Detection order is comment,
//! section header, option; anything else falls back to a comment holding the
//! raw text, so classification never fails and no input is dropped.
//!
//! ```rust
//! use unitfile::classify::{classify, Token};
//! use unitfile::UnitOptions;
//!
//! let options = UnitOptions::new();
//! assert!(matches!(classify("[Service]", &options), Some(Token::Section(_))));
//! assert!(matches!(classify("Type=simple", &options), Some(Token::Option(_))));
//! assert!(matches!(classify("stray words", &options), Some(Token::Comment(_))));
//! assert!(classify("   ", &options).is_none());
//! ```

use crate::line::{Comment, Line, LineKind, OptionLine};
use crate::options::UnitOptions;
use crate::section::Section;

/// A classified logical line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Comment(Comment),
    Section(Section),
    Option(OptionLine),
}

impl Token {
    /// Converts a comment or option token into a section line.
    ///
    /// Returns the section back as `Err` since sections cannot be nested.
    pub fn into_line(self) -> Result<Line, Section> {
        match self {
            Token::Comment(comment) => Ok(Line::Comment(comment)),
            Token::Option(option) => Ok(Line::Option(option)),
            Token::Section(section) => Err(section),
        }
    }
}

/// Classifies a logical line.
///
/// Returns `None` for blank lines.
#[must_use]
pub fn classify(line: &str, options: &UnitOptions) -> Option<Token> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let token = Comment::parse(line, options)
        .map(Token::Comment)
        .or_else(|_| Section::parse(line, options).map(Token::Section))
        .or_else(|_| OptionLine::parse(line, options).map(Token::Option))
        .unwrap_or_else(|_| {
            tracing::trace!(line, "unrecognized line kept as comment");
            Token::Comment(Comment::wrap(line, options))
        });

    Some(token)
}

/// Returns `true` if `line` starts a new token of its own.
///
/// This is the lightweight probe the continuation joiner uses to avoid
/// swallowing a header or assignment into a continued value.
#[must_use]
pub fn is_token(line: &str, options: &UnitOptions) -> bool {
    Comment::test(line, options) || Section::test(line, options) || OptionLine::test(line, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ini() -> UnitOptions {
        UnitOptions::ini()
    }

    #[test]
    fn test_comment_wins_over_option() {
        let token = classify("# key=value", &ini()).unwrap();
        assert_eq!(token, Token::Comment(Comment::new("key=value")));
    }

    #[test]
    fn test_section_wins_over_option() {
        let token = classify("[a=b]", &ini()).unwrap();
        assert!(matches!(token, Token::Section(ref s) if s.name() == Some("a=b")));
    }

    #[test]
    fn test_fallback_is_lossless() {
        let token = classify("  dangling text  ", &ini()).unwrap();
        assert_eq!(token, Token::Comment(Comment::new("dangling text")));
    }

    #[test]
    fn test_blank_lines_are_not_tokens() {
        assert_eq!(classify("", &ini()), None);
        assert_eq!(classify(" \t ", &ini()), None);
    }

    #[test]
    fn test_is_token() {
        assert!(is_token("; note", &ini()));
        assert!(is_token("[b]", &ini()));
        assert!(is_token("x = 1", &ini()));
        assert!(!is_token("bar", &ini()));
        assert!(!is_token("", &ini()));
    }

    #[test]
    fn test_dialect_changes_comment_detection() {
        let token = classify("; not a comment here", &UnitOptions::fstab()).unwrap();
        assert_eq!(token, Token::Comment(Comment::new("; not a comment here")));
    }

    #[test]
    fn test_into_line() {
        let line = Token::Option(OptionLine::single("a", 1)).into_line();
        assert_eq!(line, Ok(Line::Option(OptionLine::single("a", 1))));
        assert!(Token::Section(Section::new("s")).into_line().is_err());
    }
}
