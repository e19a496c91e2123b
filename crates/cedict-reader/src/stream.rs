//! Parse a whole dictionary stream and print the entries.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use cedict_parser::{Parser, Stats};
use cedict_types::Entry;
use clap::ValueEnum;
use serde::Serialize;
use tracing::{debug, info, warn};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Format version, a tab, then the record as it appears in the dictionary.
    #[default]
    Text,
    /// One JSON object per entry.
    Json,
    Debug,
}

#[derive(Serialize)]
struct JsonLine<'e, 'a> {
    line_no: usize,
    entry: &'e Entry<'a>,
}

/// Parse every line of `reader` and write each entry to `out`.
///
/// Failed lines are logged and counted. With `strict` the first failure
/// (other than a comment or blank line) aborts the run.
pub fn run<R, W>(
    parser: &Parser,
    reader: R,
    mut out: W,
    format: OutputFormat,
    strict: bool,
) -> Result<Stats>
where
    R: BufRead,
    W: Write,
{
    let mut stats = Stats::default();
    for record in parser.records(reader) {
        let record = record?;
        stats.record(&record.result);
        match &record.result {
            Ok(entry) => write_entry(&mut out, record.line_no, entry, format)
                .with_context(|| format!("write line {}", record.line_no))?,
            Err(err) if err.is_skip() => debug!("line {}: {}", record.line_no, err.tag()),
            Err(err) => {
                warn!("line {}: {} ({})", record.line_no, err, record.line);
                if strict {
                    return Err(anyhow::Error::new(err.clone())
                        .context(format!("line {}", record.line_no)));
                }
            }
        }
    }
    out.flush().context("flush output")?;

    info!(
        "parsed {} entries ({} v1, {} v2), {} skipped, {} failed",
        stats.entries(),
        stats.v1,
        stats.v2,
        stats.skipped,
        stats.failed()
    );
    for (tag, count) in &stats.failures {
        info!("  {}: {}", tag, count);
    }
    Ok(stats)
}

fn write_entry<W: Write>(
    out: &mut W,
    line_no: usize,
    entry: &Entry<'_>,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{}\t{}", entry.format_version, entry)?,
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, &JsonLine { line_no, entry })?;
            writeln!(out)?;
        }
        OutputFormat::Debug => writeln!(out, "{:?}", entry)?,
    }
    Ok(())
}
