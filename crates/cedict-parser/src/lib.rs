//! Parse CC-CEDICT dictionary records with full fidelity and zero-copy text.
//!
//! A record has the shape
//! `Traditional Simplified [pin1 yin1] /gloss one/gloss two/`. The parser
//! slices the headwords, the raw pinyin field and every gloss out of the
//! line, detects the pinyin dialect from the bracket depth (`[...]` is V1,
//! `[[...]]` is V2) and decodes the pinyin into classified syllables.
//!
//! Parsing is pure: a line goes in, an [`Entry`] borrowing from it or a
//! [`ParseError`] naming the line comes out. A [`Parser`] owns the frozen
//! pinyin [`Lexicon`] so it can be built once and shared between threads;
//! the free [`parse`] function rebuilds it on every call.
//!
//! # Features
//! - Both pinyin dialects, including `{…}` letter escapes, hyphenated idiom
//!   clumps, the `xx5` unknown-reading sentinel and the `u:` spelling of `ü`.
//! - Validation: tone-marked (precomposed) pinyin and sounds outside the
//!   lexicon are rejected.
//! - Streaming: [`Parser::records`] and [`Parser::open`] walk a whole
//!   dictionary file line by line, and [`Stats`] tallies the outcome.
//!
//! # Example
//! ```rust
//! use cedict_parser::Parser;
//! use cedict_types::FormatVersion;
//!
//! let parser = Parser::new();
//! let entry = parser.parse("打算 打算 [[zen3me5 hui2shi4 r5]] /words/").unwrap();
//! assert_eq!(entry.format_version, FormatVersion::V2);
//! assert_eq!(entry.pinyin[0].to_string(), "zen3me5");
//! assert_eq!(entry.gloss, vec!["words"]);
//! ```
//!
//! For a runnable demo, see `cargo run -p cedict-parser --example stats -- <cedict_ts.u8>`.

use std::borrow::Cow;

use cedict_pinyin::{Lexicon, PinyinError, check_no_diacritics, check_sounds, segment};
use cedict_types::{Entry, FormatVersion};
use thiserror::Error;

mod records;
mod scan;

pub use records::{Record, Records, Stats};

/// What went wrong with a line.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ParseErrorKind {
    #[error("comment line")]
    Comment,
    #[error("empty line")]
    Empty,
    #[error("found pinyin section before completing traditional section")]
    PinyinBeforeTraditional,
    #[error("found pinyin section before completing simplified section")]
    PinyinBeforeSimplified,
    #[error("found gloss section before pinyin section")]
    GlossBeforePinyin,
    /// Something other than brackets or spaces between the pinyin and the first `/`.
    #[error("failed to read gloss for line ({0})")]
    GlossLeadIn(String),
    #[error("malformed pinyin (cannot determine version) ({open} {close})")]
    BracketMismatch { open: usize, close: usize },
    /// Balanced brackets, but neither one nor two deep.
    #[error("malformed pinyin (unrecognized version)")]
    UnrecognizedVersion(usize),
    #[error("no traditional/simplified found")]
    NoHeadword,
    #[error("no pinyin found")]
    NoPinyin,
    #[error("no gloss found")]
    NoGloss,
    #[error(transparent)]
    Pinyin(#[from] PinyinError),
}

impl ParseErrorKind {
    /// Short diagnostic tag without any interpolated data.
    pub fn tag(&self) -> &'static str {
        match self {
            ParseErrorKind::Comment => "comment line",
            ParseErrorKind::Empty => "empty line",
            ParseErrorKind::PinyinBeforeTraditional => {
                "found pinyin section before completing traditional section"
            }
            ParseErrorKind::PinyinBeforeSimplified => {
                "found pinyin section before completing simplified section"
            }
            ParseErrorKind::GlossBeforePinyin => "found gloss section before pinyin section",
            ParseErrorKind::GlossLeadIn(_) => "failed to read gloss for line",
            ParseErrorKind::BracketMismatch { .. } => "malformed pinyin (cannot determine version)",
            ParseErrorKind::UnrecognizedVersion(_) => "malformed pinyin (unrecognized version)",
            ParseErrorKind::NoHeadword => "no traditional/simplified found",
            ParseErrorKind::NoPinyin => "no pinyin found",
            ParseErrorKind::NoGloss => "no gloss found",
            ParseErrorKind::Pinyin(err) => err.tag(),
        }
    }
}

/// A line that could not be parsed, together with the line itself.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("{kind}")]
pub struct ParseError {
    kind: ParseErrorKind,
    line: String,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, line: impl Into<String>) -> Self {
        Self {
            kind,
            line: line.into(),
        }
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    /// The offending line, verbatim.
    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn tag(&self) -> &'static str {
        self.kind.tag()
    }

    /// Comment and blank lines are expected in dictionary files and carry no record.
    pub fn is_skip(&self) -> bool {
        matches!(self.kind, ParseErrorKind::Comment | ParseErrorKind::Empty)
    }
}

/// Reusable parser handle holding the frozen pinyin lexicon.
#[derive(Clone, Debug, Default)]
pub struct Parser {
    lexicon: Lexicon,
}

impl Parser {
    pub fn new() -> Self {
        Self {
            lexicon: Lexicon::new(),
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Parse one record. The entry borrows its text from `line`.
    pub fn parse<'a>(&self, line: &'a str) -> Result<Entry<'a>, ParseError> {
        self.parse_entry(line)
            .map_err(|kind| ParseError::new(kind, line))
    }

    fn parse_entry<'a>(&self, line: &'a str) -> Result<Entry<'a>, ParseErrorKind> {
        if line.starts_with('#') {
            return Err(ParseErrorKind::Comment);
        }
        if line.chars().all(char::is_whitespace) {
            return Err(ParseErrorKind::Empty);
        }

        let fields = scan::scan(line)?;

        if fields.open_brackets != fields.close_brackets {
            return Err(ParseErrorKind::BracketMismatch {
                open: fields.open_brackets,
                close: fields.close_brackets,
            });
        }
        let format_version = match fields.open_brackets {
            1 => FormatVersion::V1,
            2 => FormatVersion::V2,
            depth => return Err(ParseErrorKind::UnrecognizedVersion(depth)),
        };

        // Record-shape checks come before any pinyin decoding.
        if fields.traditional.is_empty() || fields.simplified.is_empty() {
            return Err(ParseErrorKind::NoHeadword);
        }
        if fields.pinyin_raw.is_empty() {
            return Err(ParseErrorKind::NoPinyin);
        }
        if fields.gloss.is_empty() {
            return Err(ParseErrorKind::NoGloss);
        }

        // Checked before segmenting so tone-marked input always reports as such.
        check_no_diacritics(fields.pinyin_raw)?;
        let pinyin = segment(fields.pinyin_raw, format_version)?;
        if pinyin.is_empty() {
            return Err(ParseErrorKind::NoPinyin);
        }
        check_sounds(&self.lexicon, &pinyin)?;

        Ok(Entry {
            traditional: Cow::Borrowed(fields.traditional),
            simplified: Cow::Borrowed(fields.simplified),
            pinyin,
            pinyin_raw: Cow::Borrowed(fields.pinyin_raw),
            gloss: fields.gloss.into_iter().map(Cow::Borrowed).collect(),
            format_version,
        })
    }
}

/// Build a reusable [`Parser`].
pub fn new_parser() -> Parser {
    Parser::new()
}

/// Parse one record with a throwaway [`Parser`].
///
/// Builds the lexicon on every call; keep a [`Parser`] around when parsing
/// more than a handful of lines.
pub fn parse(line: &str) -> Result<Entry<'_>, ParseError> {
    Parser::new().parse(line)
}
