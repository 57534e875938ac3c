//! Pipe-delimited sponsors-file input.
//!
//! The registry dump carries one row per trial sponsor with `nct_id`,
//! `name`, and `agency_class` columns. Only `INDUSTRY` rows become
//! resolution queries.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use spl_core::SponsorQuery;

#[derive(Debug, Clone, Deserialize)]
pub struct SponsorRow {
    #[serde(default)]
    pub nct_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub agency_class: String,
}

/// Read all rows from a sponsors file. Malformed rows are skipped with a
/// logged reason; only an unreadable file fails the run.
pub fn read_sponsors(path: &Path) -> anyhow::Result<Vec<SponsorRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'|')
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("failed to open sponsors file {}", path.display()))?;

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        match record {
            Ok(row) => rows.push(row),
            Err(error) => {
                tracing::warn!(%error, "skipping malformed sponsors row");
            }
        }
    }
    Ok(rows)
}

/// Turn raw rows into the ordered query list: industry sponsors only,
/// sorted by NCT id, optionally filtered by a case-insensitive substring
/// of the name and capped at `limit` records.
pub fn industry_queries(
    mut rows: Vec<SponsorRow>,
    limit: Option<usize>,
    filter: Option<&str>,
) -> Vec<SponsorQuery> {
    rows.retain(|row| {
        row.agency_class == "INDUSTRY" && !row.nct_id.is_empty() && !row.name.trim().is_empty()
    });
    rows.sort_by(|a, b| a.nct_id.cmp(&b.nct_id));

    if let Some(needle) = filter {
        let needle = needle.to_lowercase();
        rows.retain(|row| row.name.to_lowercase().contains(&needle));
    }
    if let Some(limit) = limit {
        rows.truncate(limit);
    }

    rows.into_iter()
        .map(|row| SponsorQuery::new(row.nct_id, row.name))
        .collect()
}
