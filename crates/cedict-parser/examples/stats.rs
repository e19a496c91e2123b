use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use cedict_parser::{Parser, Stats};

fn main() -> Result<()> {
    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: cargo run -p cedict-parser --example stats -- <path-to-cedict_ts.u8>")?;

    let parser = Parser::new();
    let mut stats = Stats::default();
    let mut syllables = 0usize;
    let mut glosses = 0usize;
    let mut longest: Option<(usize, String)> = None;

    for record in parser
        .open(&path)
        .with_context(|| format!("loading CEDICT from {}", path.display()))?
    {
        let record = record?;
        if let Ok(entry) = &record.result {
            syllables += entry.syllables().count();
            glosses += entry.gloss.len();
            let count = entry.gloss.len();
            if longest.as_ref().is_none_or(|(n, _)| count > *n) {
                longest = Some((count, entry.traditional.to_string()));
            }
        }
        stats.record(&record.result);
    }

    println!("Dictionary   : {}", path.display());
    println!("Entries      : {}", stats.entries());
    println!("  V1 records : {}", stats.v1);
    println!("  V2 records : {}", stats.v2);
    println!("Skipped lines: {}", stats.skipped);
    println!("Syllables    : {}", syllables);
    println!("Glosses      : {}", glosses);
    if let Some((count, word)) = longest {
        println!("Most glosses : {} ({})", word, count);
    }
    println!("Failed lines : {}", stats.failed());
    for (tag, count) in &stats.failures {
        println!("  {:<70} {}", tag, count);
    }

    Ok(())
}
