//! Report -> JSON file, one at a time or as a parallel batch.
//!
//! A JSON file is only written once the whole report has been extracted and
//! checked, so a failing report never leaves partial output behind.

use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::warn;

use crate::error::{ReportError, Result};
use crate::output::{default_output_path, output_path_in, render_json};
use crate::parser::{read_report, ExtractOptions};

/// Extract, check and write one report. Returns the JSON written.
pub fn convert_one(
    report: &Path,
    output: &Path,
    opts: &ExtractOptions,
    pretty: bool,
) -> Result<Vec<u8>> {
    if same_file(report, output) {
        return Err(ReportError::OutputIsInput(output.to_path_buf()));
    }
    let data = read_report(report, opts)?;
    let bytes = render_json(&data, pretty)?;
    std::fs::write(output, &bytes).map_err(|e| ReportError::io(output, e))?;
    Ok(bytes)
}

/// Outcome of a batch run, in input order.
pub struct BatchOutcome {
    pub results: Vec<(PathBuf, Result<PathBuf>)>,
}

impl BatchOutcome {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn failed(&self) -> usize {
        self.results.iter().filter(|(_, r)| r.is_err()).count()
    }

    pub fn converted(&self) -> usize {
        self.total() - self.failed()
    }
}

/// One independent pipeline per report; a failing report does not stop the others.
pub fn convert_batch(
    reports: &[PathBuf],
    out_dir: Option<&Path>,
    opts: &ExtractOptions,
    pretty: bool,
) -> BatchOutcome {
    let pb = ProgressBar::new(reports.len() as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")
    {
        pb.set_style(style.progress_chars("#>-"));
    }

    let results: Vec<_> = reports
        .par_iter()
        .map(|report| {
            let output = match out_dir {
                Some(dir) => output_path_in(dir, report),
                None => default_output_path(report),
            };
            let res = convert_one(report, &output, opts, pretty).map(|_| output);
            pb.inc(1);
            (report.clone(), res)
        })
        .collect();

    pb.finish_and_clear();

    for (report, res) in &results {
        if let Err(e) = res {
            warn!(report = %report.display(), "{}", e);
        }
    }
    BatchOutcome { results }
}

/// Paths as written, or canonicalized when both exist.
fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
