//! Pinyin micro-grammar for CC-CEDICT records.
//!
//! The pinyin field of a record comes in two dialects. Single brackets
//! (`[ci2 dian3]`) hold one syllable per space-separated atom; double brackets
//! (`[[ci2dian3]]`) concatenate the syllables of a word, splitting on tone
//! digits, hyphens (`e-ren2`) and brace escapes (`{e}ren2`).
//!
//! # How it works
//! 1. [`segment`] cuts the field into words and each word into atoms.
//! 2. [`decode_atom`] strips the tone digit, rewrites `u:` to `v`, trims
//!    escapes and classifies the atom as a [`SyllableKind`].
//! 3. [`check_no_diacritics`] and [`check_sounds`] validate the field and the
//!    decoded sounds against the [`Lexicon`].
//!
//! # Example
//! ```rust
//! use cedict_pinyin::{Lexicon, check_sounds, segment};
//! use cedict_types::FormatVersion;
//!
//! let words = segment("zen3me5 hui2shi4 r5", FormatVersion::V2).unwrap();
//! assert_eq!(words.len(), 3);
//! assert!(check_sounds(&Lexicon::new(), &words).is_ok());
//! ```
//!
//! [`SyllableKind`]: cedict_types::SyllableKind

use thiserror::Error;

pub mod lexicon;
pub mod segment;
pub mod syllable;
pub mod validate;

pub use lexicon::{Lexicon, SOUNDS};
pub use segment::segment;
pub use syllable::decode_atom;
pub use validate::{check_no_diacritics, check_sounds};

/// Failure while decoding or validating the pinyin field.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum PinyinError {
    #[error("malformed pinyin (no atom)")]
    NoAtom,
    /// An atom opens `{` without closing `}` or the reverse.
    #[error("malformed pinyin")]
    UnbalancedBraces,
    /// A digit sits inside a multi-character sound (`fu2fan4` in single brackets).
    #[error("malformed pinyin v1")]
    DigitInSound,
    #[error("malformed pinyin v2 - no dots")]
    MiddleDot,
    #[error("malformed pinyin - no diacritics")]
    Diacritic(char),
    #[error("malformed pinyin - unrecognized pinyin value (check for ambiguity)")]
    UnrecognizedSound(String),
}

impl PinyinError {
    /// Short diagnostic tag, stable across releases.
    pub fn tag(&self) -> &'static str {
        match self {
            PinyinError::NoAtom => "malformed pinyin (no atom)",
            PinyinError::UnbalancedBraces => "malformed pinyin",
            PinyinError::DigitInSound => "malformed pinyin v1",
            PinyinError::MiddleDot => "malformed pinyin v2 - no dots",
            PinyinError::Diacritic(_) => "malformed pinyin - no diacritics",
            PinyinError::UnrecognizedSound(_) => {
                "malformed pinyin - unrecognized pinyin value (check for ambiguity)"
            }
        }
    }
}
