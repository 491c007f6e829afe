//! Report generation
//!
//! Renders a search outcome either as a human-readable listing, one block per
//! location, or as JSON for tooling.

use anyhow::Result;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use ref_finder_core::{Inspectable, ObjectKind, ObjectSummary, SearchOutcome, SearchScope};
use serde::Serialize;
use std::fmt::Write;

/// Serializable view of a search outcome
#[derive(Debug, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub target: Option<ObjectSummary>,
    pub scope: SearchScope,
    pub scanned: usize,
    pub skipped: usize,
    pub locations: IndexMap<String, Vec<ReportEntry>>,
}

#[derive(Debug, Serialize)]
pub struct ReportEntry {
    pub id: u64,
    pub name: String,
    pub kind: ObjectKind,
    pub field: String,
}

impl Report {
    pub fn from_outcome<O: Inspectable>(outcome: &SearchOutcome<O>, generated_at: DateTime<Utc>) -> Self {
        let locations = outcome
            .locations
            .iter()
            .map(|(location, matches)| {
                let entries = matches
                    .iter()
                    .map(|m| ReportEntry {
                        id: m.object.handle().id(),
                        name: m.object.name().to_string(),
                        kind: m.object.kind(),
                        field: m.path.to_string(),
                    })
                    .collect();
                (location.clone(), entries)
            })
            .collect();

        Self {
            generated_at,
            target: outcome.target.clone(),
            scope: outcome.scope,
            scanned: outcome.scanned,
            skipped: outcome.skipped,
            locations,
        }
    }

    fn total(&self) -> usize {
        self.locations.values().map(Vec::len).sum()
    }
}

/// Render the report as JSON
pub fn render_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Render the report as a plain-text listing
pub fn render_txt(report: &Report) -> Result<String> {
    let mut out = String::new();
    let target = match &report.target {
        Some(t) => format!("{} ({}, {})", t.name, t.kind, t.handle),
        None => "<none>".to_string(),
    };

    writeln!(out, "═══════════════════════════════════════════════")?;
    writeln!(out, "  References to {}", target)?;
    writeln!(out, "  Scope: {}", report.scope)?;
    writeln!(out, "═══════════════════════════════════════════════\n")?;

    for (location, entries) in &report.locations {
        if entries.is_empty() {
            writeln!(out, "No references were found in {}", location)?;
            continue;
        }
        writeln!(out, "List of references for {}", location)?;
        for entry in entries {
            writeln!(out, "  • {} (#{}) via {}", entry.name, entry.id, entry.field)?;
        }
    }

    writeln!(
        out,
        "\n{} reference(s) in {} location(s), {} object(s) scanned, {} skipped",
        report.total(),
        report.locations.len(),
        report.scanned,
        report.skipped
    )?;
    Ok(out)
}
