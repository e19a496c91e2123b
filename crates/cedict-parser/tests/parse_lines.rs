use std::path::PathBuf;

use cedict_parser::{ParseErrorKind, Parser, Stats, parse};
use cedict_pinyin::PinyinError;
use cedict_pinyin::segment::split_word;
use cedict_types::{FormatVersion, Syllable, SyllableKind, Tone};

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("cedict_sample.u8")
}

fn sounds(entry: &cedict_types::Entry<'_>) -> Vec<Vec<(String, Tone, SyllableKind)>> {
    entry
        .pinyin
        .iter()
        .map(|word| {
            word.iter()
                .map(|s| (s.sound.to_string(), s.tone, s.kind))
                .collect()
        })
        .collect()
}

fn normal(sound: &str, tone: Tone) -> (String, Tone, SyllableKind) {
    (sound.to_string(), tone, SyllableKind::Normal)
}

#[test]
fn parses_single_gloss_v1_record() {
    let entry = parse("海嘯 海啸 [hai3 xiao4] /tsunami/").expect("parse tsunami");
    assert_eq!(entry.traditional, "海嘯");
    assert_eq!(entry.simplified, "海啸");
    assert_eq!(entry.pinyin_raw, "hai3 xiao4");
    assert_eq!(entry.format_version, FormatVersion::V1);
    assert_eq!(
        sounds(&entry),
        vec![vec![normal("hai", Tone::T3)], vec![normal("xiao", Tone::T4)]]
    );
    assert_eq!(entry.gloss, vec!["tsunami"]);
}

#[test]
fn keeps_gloss_order() {
    let entry = parse(
        "浮泛 浮泛 [fu2 fan4] /to float about/(of a feeling) to show on the face/(of speech, friendship etc) shallow/vague/",
    )
    .expect("parse 浮泛");
    assert_eq!(
        entry.gloss,
        vec![
            "to float about",
            "(of a feeling) to show on the face",
            "(of speech, friendship etc) shallow",
            "vague",
        ]
    );
}

#[test]
fn pinyin_inside_gloss_is_left_alone() {
    let entry = parse("㗂 㗂 [sheng3] /variant of 省[sheng3]/tight-lipped/").expect("parse 㗂");
    assert_eq!(entry.gloss[0], "variant of 省[sheng3]");
    assert_eq!(entry.pinyin_raw, "sheng3");
}

#[test]
fn rewrites_umlaut_in_v2() {
    let entry = parse("打算 打算 [[nu:3]] /words/").expect("parse nu:3");
    assert_eq!(entry.format_version, FormatVersion::V2);
    assert_eq!(sounds(&entry), vec![vec![normal("nv", Tone::T3)]]);
    assert_eq!(entry.pinyin_raw, "nu:3");
}

#[test]
fn groups_v2_syllables_into_words() {
    let entry = parse("打算 打算 [[zen3me5 hui2shi4 r5]] /words/").expect("parse 怎么回事儿");
    assert_eq!(
        sounds(&entry),
        vec![
            vec![normal("zen", Tone::T3), normal("me", Tone::T5)],
            vec![normal("hui", Tone::T2), normal("shi", Tone::T4)],
            vec![normal("r", Tone::T5)],
        ]
    );
}

#[test]
fn toneless_letter_is_alphabet() {
    let entry = parse("3Q 3Q [[san1 Q]] /thx/").expect("parse 3Q");
    assert_eq!(
        sounds(&entry),
        vec![
            vec![normal("san", Tone::T1)],
            vec![("Q".to_string(), Tone::None, SyllableKind::Alphabet)],
        ]
    );
}

#[test]
fn brace_escape_and_hyphen_disambiguate() {
    for line in [
        "e人 e人 [[{e}ren2]] /(slang) extroverted person/",
        "e人 e人 [[e-ren2]] /(slang) extroverted person/",
    ] {
        let entry = parse(line).expect(line);
        assert_eq!(
            sounds(&entry),
            vec![vec![
                ("e".to_string(), Tone::None, SyllableKind::Alphabet),
                normal("ren", Tone::T2),
            ]]
        );
    }
}

#[test]
fn ambiguous_v2_clump_is_rejected() {
    let err = parse("e人 e人 [[eren2]] /(slang) extroverted person/").unwrap_err();
    assert_eq!(
        err.kind(),
        &ParseErrorKind::Pinyin(PinyinError::UnrecognizedSound("eren".into()))
    );
    assert_eq!(
        err.to_string(),
        "malformed pinyin - unrecognized pinyin value (check for ambiguity)"
    );
}

#[test]
fn middle_dot_inside_v2_is_rejected() {
    let err = parse(
        "大衛·艾登堡 大卫·艾登堡 [[Da4wei4 · Ai4deng1bao3]] /David Attenborough (1926-), British naturalist and broadcaster/",
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "malformed pinyin v2 - no dots");
}

#[test]
fn unknown_reading_sentinel() {
    let entry = parse("打算 打算 [xx5] /words/").expect("parse xx5");
    assert_eq!(entry.format_version, FormatVersion::V1);
    assert_eq!(entry.pinyin.len(), 1);
    assert_eq!(entry.pinyin[0].syllables, vec![Syllable::unknown()]);
}

#[test]
fn concatenated_v1_pinyin_is_rejected() {
    let err = parse("浮泛 浮泛 [fu2fan4] /to float about/vague/").unwrap_err();
    assert_eq!(err.to_string(), "malformed pinyin v1");
}

#[test]
fn triple_brackets_are_not_a_version() {
    let err = parse("浮泛 浮泛 [[[fu2 fan4]]] /to float about/vague/").unwrap_err();
    assert_eq!(err.kind(), &ParseErrorKind::UnrecognizedVersion(3));
    assert_eq!(err.to_string(), "malformed pinyin (unrecognized version)");
}

#[test]
fn precomposed_tone_marks_are_rejected() {
    for line in [
        "海嘯 海啸 [hǎi xiào] /tsunami/",
        "海嘯 海啸 [[hǎi3xiào4]] /tsunami/",
        "女 女 [nǚ3] /female/",
    ] {
        let err = parse(line).unwrap_err();
        assert_eq!(err.tag(), "malformed pinyin - no diacritics", "{line}");
    }
}

#[test]
fn section_order_errors() {
    let cases = [
        ("浮泛[fu2] 浮泛 /x/", "found pinyin section before completing traditional section"),
        ("浮泛 [fu2 fan4] /x/", "found pinyin section before completing simplified section"),
        ("浮泛 浮泛 /to float about/", "found gloss section before pinyin section"),
        ("浮泛 浮泛 [fu2 fan4] ", "no gloss found"),
        ("浮泛 浮泛 [fu2 fan4 /x/", "malformed pinyin (cannot determine version)"),
    ];
    for (line, tag) in cases {
        let err = parse(line).unwrap_err();
        assert_eq!(err.tag(), tag, "{line}");
        assert_eq!(err.line(), line);
    }

    let line = "浮泛 浮泛 [fu2 fan4] x /x/";
    assert_eq!(
        parse(line).unwrap_err().to_string(),
        format!("failed to read gloss for line ({line})")
    );
}

#[test]
fn v1_words_hold_one_syllable_and_normal_syllables_are_legal() {
    let parser = Parser::new();
    for record in parser.open(fixture()).expect("open fixture") {
        let record = record.expect("read fixture line");
        let Ok(entry) = record.result else { continue };

        assert!(!entry.traditional.is_empty());
        assert!(!entry.simplified.is_empty());
        assert!(!entry.pinyin_raw.is_empty());
        assert!(!entry.pinyin.is_empty());
        assert!(!entry.gloss.is_empty());
        if entry.format_version == FormatVersion::V1 {
            assert!(entry.pinyin.iter().all(|w| w.len() == 1), "{}", record.line);
        }
        for syl in entry.syllables() {
            if syl.kind == SyllableKind::Normal {
                assert!(parser.lexicon().contains(&syl.sound), "{}", record.line);
                assert!(!syl.tone.is_none());
                assert!(!syl.sound.contains(':'));
            }
        }
    }
}

#[test]
fn v2_atoms_ending_in_a_digit_carry_a_tone_and_a_sound() {
    let parser = Parser::new();
    let mut checked = 0;
    for record in parser.open(fixture()).expect("open fixture") {
        let record = record.expect("read fixture line");
        let Ok(entry) = record.result else { continue };
        if entry.format_version != FormatVersion::V2 {
            continue;
        }
        let raw_words: Vec<&str> = entry.pinyin_raw.split(' ').collect();
        assert_eq!(raw_words.len(), entry.pinyin.len(), "{}", record.line);
        for (raw_word, word) in raw_words.iter().zip(&entry.pinyin) {
            let atoms = split_word(raw_word);
            assert_eq!(atoms.len(), word.len(), "{}", record.line);
            for (atom, syl) in atoms.iter().zip(word.iter()) {
                if atom.ends_with(|c: char| c.is_ascii_digit()) {
                    assert!(matches!(syl.tone.number(), Some(1..=5)), "{atom} in {}", record.line);
                    assert!(!syl.sound.is_empty(), "{atom} in {}", record.line);
                    checked += 1;
                }
            }
        }
    }
    assert!(checked > 0);
}

#[test]
fn bare_digits_in_v2_are_rejected() {
    let err = parse("a a [[3]] /x/").unwrap_err();
    assert_eq!(err.kind(), &ParseErrorKind::Pinyin(PinyinError::NoAtom));
    assert_eq!(err.to_string(), "malformed pinyin (no atom)");

    let err = parse("a a [[0]] /x/").unwrap_err();
    assert_eq!(err.kind(), &ParseErrorKind::Pinyin(PinyinError::DigitInSound));
}

#[test]
fn reparsing_the_rendered_entry_is_identity() {
    let parser = Parser::new();
    for record in parser.open(fixture()).expect("open fixture") {
        let record = record.expect("read fixture line");
        let Ok(entry) = record.result else { continue };
        let rendered = entry.to_string();
        assert_eq!(rendered, record.line);
        let reparsed = parser.parse(&rendered).expect("reparse");
        assert_eq!(reparsed, entry);
    }
}

#[test]
fn tallies_the_fixture() {
    let parser = Parser::new();
    let mut stats = Stats::default();
    for record in parser.open(fixture()).expect("open fixture") {
        stats.record(&record.expect("read fixture line").result);
    }
    assert_eq!(stats.v1, 6);
    assert_eq!(stats.v2, 5);
    assert_eq!(stats.skipped, 9);
    assert_eq!(stats.failures.get("malformed pinyin v1"), Some(&1));
    assert_eq!(
        stats
            .failures
            .get("malformed pinyin - unrecognized pinyin value (check for ambiguity)"),
        Some(&1)
    );
}

#[test]
fn one_parser_serves_many_threads() {
    let parser = &Parser::new();
    let lines = [
        "海嘯 海啸 [hai3 xiao4] /tsunami/",
        "打算 打算 [[zen3me5 hui2shi4 r5]] /words/",
        "3Q 3Q [[san1 Q]] /thx/",
        "打算 打算 [xx5] /words/",
    ];
    std::thread::scope(|scope| {
        let handles: Vec<_> = lines
            .iter()
            .map(|line| scope.spawn(move || parser.parse(line).map(|e| e.pinyin.len())))
            .collect();
        let counts: Vec<usize> = handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap())
            .collect();
        assert_eq!(counts, vec![2, 3, 2, 1]);
    });
}
