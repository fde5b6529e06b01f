pub mod barcodes;
pub mod events;
pub mod fields;
pub mod positional;
pub mod text;

use std::path::Path;

use tracing::{debug, info};

use crate::error::{ReportError, Result, Stage};
use crate::layout::{ReportLayout, MINKNOW_22_05};
use crate::model::RunReport;
use text::LineSequence;

/// How a report is checked once extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    pub check_version: bool,
    /// Overrides the layout's pinned version when set.
    pub expected_version: Option<String>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions {
            check_version: true,
            expected_version: None,
        }
    }
}

/// Read and extract one report from disk.
pub fn read_report(path: &Path, opts: &ExtractOptions) -> Result<RunReport> {
    let html = std::fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
    debug!(path = %path.display(), bytes = html.len(), "read report");
    parse_report(&html, opts)
}

/// HTML -> lines -> stages -> checked report.
pub fn parse_report(html: &str, opts: &ExtractOptions) -> Result<RunReport> {
    let layout = &*MINKNOW_22_05;
    let lines = LineSequence::from_html(html);
    let report = extract_run_data(&lines, layout)?;

    if opts.check_version {
        let expected = opts
            .expected_version
            .as_deref()
            .unwrap_or(layout.expected_version);
        check_version(&report, layout, expected)?;
    }

    info!(
        layout = layout.name,
        stats = report.stats.len(),
        barcodes = report.barcode_reads.as_ref().map_or(0, |b| b.len()),
        events = report.event_log.len(),
        "extracted run report"
    );
    Ok(report)
}

/// Run every extraction stage and assemble the result. No version check.
pub fn extract_run_data(lines: &LineSequence, layout: &ReportLayout) -> Result<RunReport> {
    let mut stats = positional::extract(lines, layout)?;
    stats.extend(fields::locate(lines, layout.labels)?);
    let barcode_reads = barcodes::extract(lines, layout)?;
    let event_log = events::extract(lines, layout)?;

    Ok(RunReport {
        stats,
        barcode_reads: (!barcode_reads.is_empty()).then_some(barcode_reads),
        event_log,
    })
}

/// Compare the report's software version, component by component, with `expected`.
///
/// Components are compared as written, so `22.5.7` does not satisfy `22.05.7`.
pub fn check_version(report: &RunReport, layout: &ReportLayout, expected: &str) -> Result<()> {
    let found = report.stat(layout.version_field).ok_or_else(|| {
        ReportError::malformed(
            Stage::Version,
            format!("no {:?} field in stats", layout.version_field),
        )
    })?;

    let found_parts = version_triple(found).ok_or_else(|| {
        ReportError::malformed(
            Stage::Version,
            format!("{found:?} is not a major.minor.patch version"),
        )
    })?;
    let expected_parts = version_triple(expected).ok_or_else(|| {
        ReportError::malformed(
            Stage::Version,
            format!("expected version {expected:?} is not major.minor.patch"),
        )
    })?;

    if found_parts != expected_parts {
        return Err(ReportError::UnsupportedVersion {
            found: found.to_string(),
            expected: expected.to_string(),
        });
    }
    Ok(())
}

/// True for `major.minor.patch` with all-digit components.
pub fn is_version_triple(v: &str) -> bool {
    version_triple(v).is_some()
}

fn version_triple(v: &str) -> Option<[&str; 3]> {
    let mut parts = v.split('.');
    let triple = [parts.next()?, parts.next()?, parts.next()?];
    if parts.next().is_some() {
        return None;
    }
    triple
        .iter()
        .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
        .then_some(triple)
}

// ── Tests ──
