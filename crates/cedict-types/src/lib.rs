//! Shared, zero-copy types that mirror a CC-CEDICT dictionary record.
//!
//! A record such as `海嘯 海啸 [hai3 xiao4] /tsunami/` becomes an [`Entry`]
//! whose text fields borrow from the source line. Pinyin is kept twice:
//! verbatim in [`Entry::pinyin_raw`] and decoded into [`PinyinWord`]s of
//! classified [`Syllable`]s.
//!
//! Text is held as [`Cow`] so a parsed entry borrows by default, syllable
//! sounds own their text only when the `u:` umlaut spelling was rewritten to
//! `v`, and [`Entry::into_owned`] detaches an entry from its line.
//!
//! ```rust
//! use cedict_types::{Syllable, SyllableKind, Tone};
//!
//! let syl = Syllable::new("hai", Tone::T3, SyllableKind::Normal);
//! assert_eq!(syl.to_string(), "hai3");
//! assert_eq!(Tone::from_digit('5'), Some(Tone::T5));
//! ```

use std::borrow::Cow;
use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Tone digit trailing a pinyin syllable; `None` when the atom had no digit.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(into = "u8"))]
pub enum Tone {
    #[default]
    None,
    T1,
    T2,
    T3,
    T4,
    /// Neutral tone.
    T5,
}

impl Tone {
    /// Parse a tone digit. Only `'1'..='5'` are tones.
    pub fn from_digit(c: char) -> Option<Self> {
        match c {
            '1' => Some(Tone::T1),
            '2' => Some(Tone::T2),
            '3' => Some(Tone::T3),
            '4' => Some(Tone::T4),
            '5' => Some(Tone::T5),
            _ => None,
        }
    }

    /// Tone number as written in CEDICT, or `None` for a toneless syllable.
    pub fn number(self) -> Option<u8> {
        match self {
            Tone::None => None,
            Tone::T1 => Some(1),
            Tone::T2 => Some(2),
            Tone::T3 => Some(3),
            Tone::T4 => Some(4),
            Tone::T5 => Some(5),
        }
    }

    pub fn is_none(self) -> bool {
        self == Tone::None
    }
}

impl From<Tone> for u8 {
    fn from(tone: Tone) -> Self {
        tone.number().unwrap_or(0)
    }
}

/// How a decoded pinyin atom should be read.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "lowercase"))]
pub enum SyllableKind {
    /// The `xx5` sentinel for an unknown reading.
    Unknown,
    /// Alphabetic sound carrying a tone.
    Normal,
    /// Alphabetic sound without a tone, e.g. the letter `Q` used as a word.
    Alphabet,
    /// Anything else that survives inside the pinyin field, e.g. `,`.
    Special,
}

/// One classified pinyin atom.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Syllable<'a> {
    pub sound: Cow<'a, str>,
    pub tone: Tone,
    pub kind: SyllableKind,
}

impl<'a> Syllable<'a> {
    pub fn new(sound: impl Into<Cow<'a, str>>, tone: Tone, kind: SyllableKind) -> Self {
        Self {
            sound: sound.into(),
            tone,
            kind,
        }
    }

    /// The `xx5` placeholder used by CEDICT for readings nobody has supplied.
    pub fn unknown() -> Self {
        Self::new("xx", Tone::T5, SyllableKind::Unknown)
    }

    pub fn into_owned(self) -> Syllable<'static> {
        Syllable {
            sound: owned(self.sound),
            tone: self.tone,
            kind: self.kind,
        }
    }
}

impl fmt::Display for Syllable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sound)?;
        if let Some(n) = self.tone.number() {
            write!(f, "{n}")?;
        }
        Ok(())
    }
}

/// One space-delimited clump of the pinyin field.
///
/// Single-bracket records always hold exactly one syllable per word;
/// double-bracket records may concatenate several.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(transparent))]
pub struct PinyinWord<'a> {
    pub syllables: Vec<Syllable<'a>>,
}

impl<'a> PinyinWord<'a> {
    pub fn new(syllables: Vec<Syllable<'a>>) -> Self {
        Self { syllables }
    }

    pub fn len(&self) -> usize {
        self.syllables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.syllables.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Syllable<'a>> {
        self.syllables.iter()
    }

    pub fn into_owned(self) -> PinyinWord<'static> {
        PinyinWord {
            syllables: self
                .syllables
                .into_iter()
                .map(Syllable::into_owned)
                .collect(),
        }
    }
}

impl fmt::Display for PinyinWord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for syl in &self.syllables {
            write!(f, "{syl}")?;
        }
        Ok(())
    }
}

/// Pinyin encoding detected from the bracket depth around the pinyin field.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum FormatVersion {
    /// `[ci2 dian3]`: one syllable per space-separated atom.
    V1,
    /// `[[ci2dian3]]`: syllables concatenated inside each word.
    V2,
}

impl FormatVersion {
    /// Number of brackets on each side of the pinyin field.
    pub fn bracket_depth(self) -> usize {
        match self {
            FormatVersion::V1 => 1,
            FormatVersion::V2 => 2,
        }
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FormatVersion::V1 => "V1",
            FormatVersion::V2 => "V2",
        })
    }
}

/// Complete dictionary record with every text field borrowed from its line.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Entry<'a> {
    pub traditional: Cow<'a, str>,
    pub simplified: Cow<'a, str>,
    pub pinyin: Vec<PinyinWord<'a>>,
    /// Exactly the text between the outer pinyin brackets.
    pub pinyin_raw: Cow<'a, str>,
    /// Glosses in source order, without their delimiting slashes.
    pub gloss: Vec<Cow<'a, str>>,
    pub format_version: FormatVersion,
}

impl<'a> Entry<'a> {
    /// Iterate every syllable across all pinyin words.
    pub fn syllables(&self) -> impl Iterator<Item = &Syllable<'a>> + '_ {
        self.pinyin.iter().flat_map(|word| word.iter())
    }

    /// Copy the borrowed fields so the entry can outlive its source line.
    pub fn into_owned(self) -> Entry<'static> {
        Entry {
            traditional: owned(self.traditional),
            simplified: owned(self.simplified),
            pinyin: self.pinyin.into_iter().map(PinyinWord::into_owned).collect(),
            pinyin_raw: owned(self.pinyin_raw),
            gloss: self.gloss.into_iter().map(owned).collect(),
            format_version: self.format_version,
        }
    }
}

fn owned(text: Cow<'_, str>) -> Cow<'static, str> {
    Cow::Owned(text.into_owned())
}

impl fmt::Display for Entry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let depth = self.format_version.bracket_depth();
        write!(
            f,
            "{} {} {}{}{} /",
            self.traditional,
            self.simplified,
            "[".repeat(depth),
            self.pinyin_raw,
            "]".repeat(depth)
        )?;
        for gloss in &self.gloss {
            write!(f, "{gloss}/")?;
        }
        Ok(())
    }
}
