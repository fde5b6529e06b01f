use tracing::debug;

use super::text::LineSequence;
use crate::error::{ReportError, Result, Stage};
use crate::layout::ReportLayout;
use crate::model::BarcodeRecord;

/// Read counts per barcode, keyed by barcode number without its leading zero.
pub fn extract(lines: &LineSequence, layout: &ReportLayout) -> Result<BarcodeRecord> {
    let mut reads = BarcodeRecord::new();

    for line in lines.iter().filter(|l| layout.barcode_line.is_match(l)) {
        let id = layout
            .barcode_id
            .captures(line)
            .map(|c| c[1].to_string())
            .ok_or_else(|| ReportError::malformed(Stage::Barcodes, format!("no id in {line:?}")))?;
        let count = layout
            .barcode_reads
            .captures(line)
            .map(|c| c[1].to_string())
            .ok_or_else(|| {
                ReportError::malformed(Stage::Barcodes, format!("no read count in {line:?}"))
            })?;
        reads.insert(id, count);
    }

    debug!(barcodes = reads.len(), "barcode reads");
    Ok(reads)
}
