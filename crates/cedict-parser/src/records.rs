use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use anyhow::{Context, Result};
use cedict_types::{Entry, FormatVersion};

use crate::{ParseError, Parser};

/// Outcome of one line of a dictionary stream.
#[derive(Clone, Debug)]
pub struct Record {
    /// 1-based line number.
    pub line_no: usize,
    pub line: String,
    pub result: Result<Entry<'static>, ParseError>,
}

/// Iterator over the lines of a CEDICT stream, see [`Parser::records`].
pub struct Records<'p, R> {
    parser: &'p Parser,
    lines: Lines<R>,
    line_no: usize,
}

impl Parser {
    /// Parse every line of `reader`.
    ///
    /// Items are `Err` only when reading fails; lines that do not parse come
    /// back as a [`Record`] holding the [`ParseError`].
    pub fn records<R: BufRead>(&self, reader: R) -> Records<'_, R> {
        Records {
            parser: self,
            lines: reader.lines(),
            line_no: 0,
        }
    }

    /// Open a dictionary file (usually `cedict_ts.u8`) for streaming.
    pub fn open(&self, path: impl AsRef<Path>) -> Result<Records<'_, BufReader<File>>> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
        Ok(self.records(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for Records<'_, R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let read = self.lines.next()?;
        self.line_no += 1;
        let mut line = match read.with_context(|| format!("read line {}", self.line_no)) {
            Ok(line) => line,
            Err(err) => return Some(Err(err)),
        };
        if line.ends_with('\r') {
            line.pop();
        }
        if self.line_no == 1
            && let Some(stripped) = line.strip_prefix('\u{feff}')
        {
            line = stripped.to_string();
        }

        let result = self.parser.parse(&line).map(Entry::into_owned);
        Some(Ok(Record {
            line_no: self.line_no,
            line,
            result,
        }))
    }
}

/// Running tally of a dictionary stream.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    pub v1: usize,
    pub v2: usize,
    /// Comment and blank lines.
    pub skipped: usize,
    /// Failed lines per error tag.
    pub failures: BTreeMap<&'static str, usize>,
}

impl Stats {
    pub fn record(&mut self, result: &Result<Entry<'_>, ParseError>) {
        match result {
            Ok(entry) => match entry.format_version {
                FormatVersion::V1 => self.v1 += 1,
                FormatVersion::V2 => self.v2 += 1,
            },
            Err(err) if err.is_skip() => self.skipped += 1,
            Err(err) => *self.failures.entry(err.tag()).or_default() += 1,
        }
    }

    pub fn entries(&self) -> usize {
        self.v1 + self.v2
    }

    pub fn failed(&self) -> usize {
        self.failures.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "\u{feff}# CC-CEDICT\r\n\
        海嘯 海啸 [hai3 xiao4] /tsunami/\r\n\
        \r\n\
        打算 打算 [[nu:3]] /words/\n\
        e人 e人 [[eren2]] /(slang) extroverted person/\n";

    #[test]
    fn streams_lines_with_numbers() {
        let parser = Parser::new();
        let records: Vec<Record> = parser
            .records(Cursor::new(SAMPLE))
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(records.len(), 5);
        assert_eq!(records[0].line, "# CC-CEDICT");
        assert!(records[0].result.as_ref().unwrap_err().is_skip());

        let tsunami = records[1].result.as_ref().unwrap();
        assert_eq!(records[1].line_no, 2);
        assert_eq!(tsunami.gloss, vec!["tsunami"]);

        assert_eq!(records[3].result.as_ref().unwrap().pinyin[0].syllables[0].sound, "nv");
        assert_eq!(
            records[4].result.as_ref().unwrap_err().tag(),
            "malformed pinyin - unrecognized pinyin value (check for ambiguity)"
        );
    }

    #[test]
    fn tallies_outcomes() {
        let parser = Parser::new();
        let mut stats = Stats::default();
        for record in parser.records(Cursor::new(SAMPLE)) {
            stats.record(&record.unwrap().result);
        }
        assert_eq!(stats.v1, 1);
        assert_eq!(stats.v2, 1);
        assert_eq!(stats.entries(), 2);
        assert_eq!(stats.skipped, 2);
        assert_eq!(stats.failed(), 1);
    }

    #[test]
    fn invalid_utf8_is_a_read_error() {
        let parser = Parser::new();
        let bytes: &[u8] = b"\xff\xfe bad\n";
        let first = parser.records(bytes).next().unwrap();
        assert!(first.is_err());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = Parser::new()
            .open("/definitely/not/here/cedict_ts.u8")
            .err()
            .unwrap();
        assert!(err.to_string().contains("cedict_ts.u8"));
    }
}
