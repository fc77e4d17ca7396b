//! Turns raw CSV rows into drill tables.
//!
//! - Words tables are already shaped as first word → second key → word and
//!   only need rows without a first key removed.
//! - Edges/Corners tables label rows and columns like `В (UB)`; only the
//!   leading letter is kept.

use crate::models::{is_filled, DrillRow, Mode, RawRow, EDGE_FIRST_FIELD, FIRST_FIELD, SENTINEL};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref LEADING_LETTER: Regex = Regex::new(r"^([А-Яа-яЁё])").unwrap();
}

/// Extract the leading Cyrillic letter from a label like "В (UB)"
pub fn extract_letter(label: &str) -> Option<&str> {
    LEADING_LETTER
        .captures(label)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Process raw rows for a mode
pub fn process(rows: &[RawRow], mode: Mode) -> Vec<DrillRow> {
    let processed = match mode {
        Mode::Words => process_words(rows),
        Mode::Edges | Mode::Corners => process_edges_corners(rows),
    };
    log::debug!(
        "Processed {} of {} rows for {} mode",
        processed.len(),
        rows.len(),
        mode
    );
    processed
}

fn process_words(rows: &[RawRow]) -> Vec<DrillRow> {
    rows.iter()
        .filter_map(|row| {
            let first = row.get(FIRST_FIELD).filter(|v| is_filled(v))?;
            let entries = row
                .cells
                .iter()
                .filter(|(header, _)| header != FIRST_FIELD)
                .cloned()
                .collect();
            Some(DrillRow {
                first: first.to_string(),
                entries,
            })
        })
        .collect()
}

fn process_edges_corners(rows: &[RawRow]) -> Vec<DrillRow> {
    rows.iter()
        .filter_map(|row| {
            let label = row
                .get(EDGE_FIRST_FIELD)
                .filter(|v| !v.is_empty())
                .or_else(|| row.get(FIRST_FIELD))?;
            let first = extract_letter(label).filter(|l| *l != SENTINEL)?;

            let entries = row
                .cells
                .iter()
                .filter(|(header, _)| header != EDGE_FIRST_FIELD && header != FIRST_FIELD)
                .filter_map(|(header, value)| {
                    let second = extract_letter(header)?;
                    is_filled(value).then(|| (second.to_string(), value.clone()))
                })
                .collect();

            Some(DrillRow {
                first: first.to_string(),
                entries,
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "processor_tests.rs"]
mod tests;
