use std::borrow::Cow;

use cedict_types::{Syllable, SyllableKind, Tone};

use crate::PinyinError;

/// Literal CEDICT uses when the reading of a character is unknown.
pub const UNKNOWN_ATOM: &str = "xx5";

/// Decode one already-delimited pinyin atom (`ci2`, `{e}`, `xx5`, `Q`, `,`).
///
/// The sound borrows from `atom` unless the `u:` spelling of `ü` had to be
/// rewritten to `v`.
pub fn decode_atom(atom: &str) -> Result<Syllable<'_>, PinyinError> {
    if atom.is_empty() {
        return Err(PinyinError::NoAtom);
    }
    if atom == UNKNOWN_ATOM {
        return Ok(Syllable::unknown());
    }

    let (sound, tone) = split_tone(atom);
    if sound.is_empty() {
        // A bare tone digit has no sound to carry it.
        return Err(PinyinError::NoAtom);
    }

    // Trims only touch the ends of the sound, so they commute with the umlaut rewrite.
    let starts_braced = sound.starts_with('{');
    let ends_braced = sound.ends_with('}');
    if starts_braced != ends_braced {
        return Err(PinyinError::UnbalancedBraces);
    }
    let sound = if starts_braced && sound.len() >= 2 {
        &sound[1..sound.len() - 1]
    } else {
        sound
    };
    let sound = match sound.strip_suffix('-') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => sound,
    };
    let sound = rewrite_umlaut(sound);

    let alphabetic = !sound.is_empty() && sound.bytes().all(|b| b.is_ascii_alphabetic());
    let has_digit = sound.bytes().any(|b| b.is_ascii_digit());
    if has_digit && sound.chars().count() != 1 {
        return Err(PinyinError::DigitInSound);
    }

    let kind = match (alphabetic, tone) {
        (true, Tone::None) => SyllableKind::Alphabet,
        (true, _) => SyllableKind::Normal,
        (false, _) => SyllableKind::Special,
    };

    Ok(Syllable { sound, tone, kind })
}

/// Split a trailing `1..=5` tone digit off an atom.
fn split_tone(atom: &str) -> (&str, Tone) {
    match atom.char_indices().next_back() {
        Some((idx, c)) => match Tone::from_digit(c) {
            Some(tone) => (&atom[..idx], tone),
            None => (atom, Tone::None),
        },
        None => (atom, Tone::None),
    }
}

fn rewrite_umlaut(sound: &str) -> Cow<'_, str> {
    if sound.contains("u:") {
        Cow::Owned(sound.replace("u:", "v"))
    } else {
        Cow::Borrowed(sound)
    }
}
