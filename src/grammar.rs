//! Unit File Grammar
//!
//! This module documents the text format accepted and produced by this crate.
//!
//! # Overview
//!
//! A unit file is a line-oriented, INI-style configuration document: optional
//! preamble lines, then named sections holding comments and `name=value`
//! options. The reader is lenient. Every non-blank line ends up in the model,
//! and lines that fit no rule are kept as comments.
//!
//! # Core Syntax
//!
//! ```text
//! document       := line*
//! line           := comment | section-header | option-line | blank
//! comment        := ws* comment-marker ws* text
//! section-header := ws* '[' name ']' ws*
//! option-line    := ws* name ws* delim ws* value
//! comment-marker := '#' | ';'
//! delim          := '=' | ':'
//! ```
//!
//! ## Detection Order
//!
//! Each logical line is trimmed and tested in this order:
//!
//! 1. **Comment**: starts with a comment marker
//! 2. **Section header**: starts with `[` and ends with `]`
//! 3. **Option**: contains a delimiter; the name runs up to the *first* `=` or `:`
//! 4. **Fallback**: the whole line becomes a comment
//!
//! So `# a=b` is a comment, `[a=b]` is a header named `a=b`, and
//! `url = http://host:80` is the option `url` with value `http://host:80`.
//!
//! ## Line Continuation
//!
//! A physical line ending with `\` continues on the next line; the fragments
//! are joined with one space:
//!
//! ```text
//! ExecStart=/usr/bin/app \
//!     --verbose
//! ```
//!
//! reads as `ExecStart=/usr/bin/app --verbose`. A continuation stops early
//! when:
//!
//! - the next line is blank
//! - the next line is itself a comment, header or option (it starts a new
//!   logical line instead of being swallowed)
//! - the input ends
//!
//! A line ending with a doubled marker (`\\`) is not continued; both
//! backslashes stay in the value. Any lone markers left at the end of a
//! fragment after trimming are stripped as well, so a value never ends in a
//! single `\`.
//!
//! # Duplicates
//!
//! | Situation | Result |
//! |-----------|--------|
//! | Same option twice in a section | One option, values merged in first-seen order |
//! | Same value assigned again | Ignored |
//! | Same section header twice | One section, later lines appended to it |
//!
//! ```text
//! [a]            →    [a]
//! k=1                 k=1
//! k=2                 k=2
//! k=1                 x=0
//! [a]
//! x=0
//! ```
//!
//! # Rendering
//!
//! - Comments render with the primary marker (`#`) and a single space
//! - Options render as `name=value`, one line per value, keeping the parsed
//!   delimiter
//! - Named sections render their `[name]` header; the anonymous preamble has
//!   none and is skipped when empty
//! - Consecutive sections are separated by one blank line
//!
//! Blank lines and whitespace inside lines are normalized, so output is
//! structurally, not byte-for-byte, identical to the input.
//!
//! # Mount Tables
//!
//! The [`fstab`](crate::fstab) dialect shares comments and the document
//! contract but has no sections and no continuation. A data row is exactly six
//! whitespace-separated fields whose last two parse as integers:
//!
//! ```text
//! # <file system>  <dir>  <type>  <options>  <dump>  <pass>
//! UUID=1234        /      ext4    defaults   0       1
//! ```
//!
//! Rows render tab-separated. Anything else is a comment.

// This module contains only documentation; no implementation code
