use unicode_normalization::UnicodeNormalization;

use cedict_types::{PinyinWord, SyllableKind};

use crate::PinyinError;
use crate::lexicon::Lexicon;

/// Reject precomposed letters such as `ǎ`: CEDICT pinyin is ASCII plus tone
/// digits, so every character must already be its own NFD decomposition.
pub fn check_no_diacritics(raw: &str) -> Result<(), PinyinError> {
    for c in raw.chars() {
        if !std::iter::once(c).nfd().eq(std::iter::once(c)) {
            return Err(PinyinError::Diacritic(c));
        }
    }
    Ok(())
}

/// Every `normal` syllable must be a legal pinyin sound.
///
/// Catches V2 clumps such as `eren2` that only split correctly with an
/// explicit `{e}` or hyphen.
pub fn check_sounds(lexicon: &Lexicon, words: &[PinyinWord<'_>]) -> Result<(), PinyinError> {
    for syl in words.iter().flat_map(|w| w.iter()) {
        if syl.kind == SyllableKind::Normal && !lexicon.contains(&syl.sound) {
            return Err(PinyinError::UnrecognizedSound(syl.sound.to_string()));
        }
    }
    Ok(())
}
