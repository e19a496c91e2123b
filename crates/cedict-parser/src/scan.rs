use crate::ParseErrorKind;

const TRAD_END: char = ' ';
const SIMP_END: char = ' ';
const PINYIN_START: char = '[';
const PINYIN_END: char = ']';
const GLOSS_DELIM: char = '/';

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Section {
    Traditional,
    Simplified,
    IntoPinyin,
    Pinyin,
    OutOfPinyin,
    Gloss,
}

/// Raw fields of one record, before any pinyin decoding.
#[derive(Debug, Default)]
pub(crate) struct Fields<'a> {
    pub traditional: &'a str,
    pub simplified: &'a str,
    pub pinyin_raw: &'a str,
    pub gloss: Vec<&'a str>,
    pub open_brackets: usize,
    pub close_brackets: usize,
}

/// Walk a record left to right, slicing each section out of `line`.
///
/// Sections are contiguous, so the scan tracks the byte offset where the
/// current one started instead of copying characters into a buffer.
pub(crate) fn scan(line: &str) -> Result<Fields<'_>, ParseErrorKind> {
    let mut fields = Fields::default();
    let mut section = Section::Traditional;
    let mut start = 0;
    let mut chars = line.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        let next = idx + c.len_utf8();
        match section {
            Section::Traditional => match c {
                PINYIN_START => return Err(ParseErrorKind::PinyinBeforeTraditional),
                TRAD_END => {
                    fields.traditional = &line[start..idx];
                    start = next;
                    section = Section::Simplified;
                }
                _ => {}
            },
            Section::Simplified => match c {
                PINYIN_START => return Err(ParseErrorKind::PinyinBeforeSimplified),
                SIMP_END => {
                    fields.simplified = &line[start..idx];
                    start = next;
                    section = Section::IntoPinyin;
                }
                _ => {}
            },
            Section::IntoPinyin => match c {
                GLOSS_DELIM => return Err(ParseErrorKind::GlossBeforePinyin),
                PINYIN_START => {
                    fields.open_brackets += 1;
                    if chars.peek().is_some_and(|&(_, n)| n != PINYIN_START) {
                        start = next;
                        section = Section::Pinyin;
                    }
                }
                _ => {}
            },
            Section::Pinyin => {
                if c == PINYIN_END {
                    fields.close_brackets += 1;
                    fields.pinyin_raw = &line[start..idx];
                    section = Section::OutOfPinyin;
                }
            }
            Section::OutOfPinyin => match c {
                PINYIN_END => fields.close_brackets += 1,
                ' ' => {}
                GLOSS_DELIM => {
                    start = next;
                    section = Section::Gloss;
                }
                _ => return Err(ParseErrorKind::GlossLeadIn(line.to_string())),
            },
            Section::Gloss => {
                if c == GLOSS_DELIM {
                    fields.gloss.push(&line[start..idx]);
                    start = next;
                }
            }
        }
    }

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_every_section() {
        let fields = scan("海嘯 海啸 [hai3 xiao4] /tsunami/huge wave/").unwrap();
        assert_eq!(fields.traditional, "海嘯");
        assert_eq!(fields.simplified, "海啸");
        assert_eq!(fields.pinyin_raw, "hai3 xiao4");
        assert_eq!(fields.gloss, vec!["tsunami", "huge wave"]);
        assert_eq!((fields.open_brackets, fields.close_brackets), (1, 1));
    }

    #[test]
    fn counts_double_brackets() {
        let fields = scan("打算 打算 [[zen3me5]] /words/").unwrap();
        assert_eq!(fields.pinyin_raw, "zen3me5");
        assert_eq!((fields.open_brackets, fields.close_brackets), (2, 2));
    }

    #[test]
    fn brackets_inside_gloss_are_plain_text() {
        let fields = scan("㗂 㗂 [sheng3] /variant of 省[sheng3]/tight-lipped/").unwrap();
        assert_eq!(fields.gloss, vec!["variant of 省[sheng3]", "tight-lipped"]);
        assert_eq!((fields.open_brackets, fields.close_brackets), (1, 1));
    }

    #[test]
    fn drops_unterminated_trailing_gloss() {
        let fields = scan("海嘯 海啸 [hai3 xiao4] /tsunami/unterminated").unwrap();
        assert_eq!(fields.gloss, vec!["tsunami"]);
    }

    #[test]
    fn unclosed_bracket_at_end_of_line_never_enters_pinyin() {
        let fields = scan("海嘯 海啸 [").unwrap();
        assert_eq!((fields.open_brackets, fields.close_brackets), (1, 0));
        assert_eq!(fields.pinyin_raw, "");
    }

    #[test]
    fn rejects_out_of_order_sections() {
        assert_eq!(
            scan("海嘯[hai3] 海啸 /x/").unwrap_err(),
            ParseErrorKind::PinyinBeforeTraditional
        );
        assert_eq!(
            scan("浮泛 [fu2 fan4] /x/").unwrap_err(),
            ParseErrorKind::PinyinBeforeSimplified
        );
        assert_eq!(
            scan("浮泛 浮泛 /to float about/").unwrap_err(),
            ParseErrorKind::GlossBeforePinyin
        );
        let line = "浮泛 浮泛 [fu2 fan4] x/to float about/";
        assert_eq!(
            scan(line).unwrap_err(),
            ParseErrorKind::GlossLeadIn(line.to_string())
        );
    }
}
