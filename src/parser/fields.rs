use tracing::debug;

use super::text::LineSequence;
use crate::error::{ReportError, Result, Stage};
use crate::model::StatsRecord;

/// Capture the line after each known label.
///
/// Only a label's first occurrence counts; if the same label appears again
/// later in the report, that later value is never read. Keys come out in
/// document order.
pub fn locate(lines: &LineSequence, labels: &[&str]) -> Result<StatsRecord> {
    let mut stats = StatsRecord::new();

    for (idx, line) in lines.iter().enumerate() {
        if !labels.contains(&line) || stats.contains_key(line) {
            continue;
        }
        let value = lines.get(idx + 1).ok_or_else(|| {
            ReportError::malformed(Stage::Fields, format!("label {line:?} is the last line"))
        })?;
        stats.insert(line, value.to_string());
    }

    debug!(found = stats.len(), known = labels.len(), "labelled fields");
    Ok(stats)
}
