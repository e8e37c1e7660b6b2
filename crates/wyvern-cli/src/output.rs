//! Result rendering.

use anyhow::Result;
use std::io::Write;
use wyvern_query::{Card, Record, SearchEnv, Value};

const ABSENT: &str = "-";
const COLUMNS: [&str; 3] = ["name", "set", "rarity"];

fn cell(value: Value<'_>) -> String {
    match value {
        Value::String(s) => s.to_string(),
        Value::Number(n) => n.to_string(),
        Value::None => ABSENT.to_string(),
    }
}

fn row(card: &Card) -> String {
    COLUMNS
        .iter()
        .map(|column| cell(card.field(column)))
        .collect::<Vec<_>>()
        .join("\t")
}

/// Writes one tab-separated row per card, under a heading per group when
/// the environment groups results.
pub fn write_text(out: &mut dyn Write, env: &SearchEnv, results: Vec<&Card>) -> Result<()> {
    if env.grouping.is_empty() {
        for card in results {
            writeln!(out, "{}", row(card))?;
        }
        return Ok(());
    }

    for group in env.group(results) {
        let heading = env
            .grouping
            .iter()
            .zip(&group.key)
            .map(|(field, value)| format!("{field}={}", value.as_deref().unwrap_or(ABSENT)))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(out, "{heading} ({})", group.records.len())?;
        for card in group.records {
            writeln!(out, "  {}", row(card))?;
        }
    }
    Ok(())
}

/// Writes the matching cards as a pretty-printed JSON array.
pub fn write_json(out: &mut dyn Write, results: &[&Card]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, results)?;
    writeln!(out)?;
    Ok(())
}
