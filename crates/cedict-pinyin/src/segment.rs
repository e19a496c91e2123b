use cedict_types::{FormatVersion, PinyinWord};

use crate::PinyinError;
use crate::syllable::decode_atom;

/// Middle dot separating the parts of a transliterated foreign name.
pub const MIDDLE_DOT: &str = "·";

/// Split a pinyin field into words and decode every atom.
///
/// `raw` is the text between the outer brackets, without the brackets.
pub fn segment(raw: &str, version: FormatVersion) -> Result<Vec<PinyinWord<'_>>, PinyinError> {
    match version {
        FormatVersion::V1 => segment_v1(raw),
        FormatVersion::V2 => segment_v2(raw),
    }
}

/// `[ci2 dian3]`: every space-separated token is exactly one atom.
fn segment_v1(raw: &str) -> Result<Vec<PinyinWord<'_>>, PinyinError> {
    raw.split(' ')
        .map(|atom| decode_atom(atom).map(|syl| PinyinWord::new(vec![syl])))
        .collect()
}

/// `[[ci2dian3]]`: tokens hold several atoms split by tone digits, hyphens
/// and `{…}` escapes.
fn segment_v2(raw: &str) -> Result<Vec<PinyinWord<'_>>, PinyinError> {
    let mut words = Vec::new();
    for word in raw.split(' ') {
        let atoms = split_word(word);
        if atoms.is_empty() {
            return Err(PinyinError::NoAtom);
        }
        let mut syllables = Vec::with_capacity(atoms.len());
        for atom in atoms {
            let syl = decode_atom(atom)?;
            if syl.sound == MIDDLE_DOT {
                return Err(PinyinError::MiddleDot);
            }
            // Every digit closes an atom, so it has to be a tone.
            if syl.tone.is_none() && atom.ends_with(|c: char| c.is_ascii_digit()) {
                return Err(PinyinError::DigitInSound);
            }
            syllables.push(syl);
        }
        words.push(PinyinWord::new(syllables));
    }
    Ok(words)
}

/// Cut one V2 word into atoms.
///
/// A digit ends an atom and stays in it as the tone. A `}` ends an atom that
/// opened a brace, and a `-` ends the atom before it. Whatever is left after
/// the last split point (`r`, `Q`, `,`) becomes a final atom.
pub fn split_word(word: &str) -> Vec<&str> {
    let mut atoms = Vec::new();
    let mut start = 0;
    let mut brace_open = false;
    for (idx, c) in word.char_indices() {
        if c == '{' {
            brace_open = true;
        }
        if c.is_ascii_digit() || (brace_open && c == '}') || c == '-' {
            let end = idx + c.len_utf8();
            atoms.push(clean_atom(&word[start..end]));
            start = end;
            brace_open = false;
        }
    }
    if start < word.len() {
        atoms.push(&word[start..]);
    }
    atoms
}

/// Strip the `{…}` escape or the trailing separator hyphen from an atom.
///
/// An atom that would clean to nothing (a lone `-`, `{}`) is kept verbatim.
fn clean_atom(atom: &str) -> &str {
    let cleaned = if let Some(inner) = atom.strip_prefix('{').and_then(|a| a.strip_suffix('}')) {
        inner
    } else if let Some(stem) = atom.strip_suffix('-') {
        stem
    } else {
        atom
    };
    if cleaned.is_empty() { atom } else { cleaned }
}
