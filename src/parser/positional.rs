//! Fields with no label of their own, recovered by pattern and by fixed
//! offset from a pattern match.

use regex::Regex;
use tracing::debug;

use super::text::LineSequence;
use crate::error::{ReportError, Result, Stage};
use crate::layout::ReportLayout;
use crate::model::StatsRecord;

pub fn extract(lines: &LineSequence, layout: &ReportLayout) -> Result<StatsRecord> {
    let mut stats = StatsRecord::new();

    let (_, instrument) = first_match(lines, &layout.instrument, Stage::Instrument)?;
    stats.insert("Instrument", instrument.to_string());

    let (_, summary) = first_match(lines, &layout.run_summary, Stage::RunSummary)?;
    let parts: Vec<&str> = summary.split(layout.run_summary_separator).collect();
    if parts.len() != layout.run_summary_keys.len() {
        return Err(ReportError::malformed(
            Stage::RunSummary,
            format!(
                "expected {} segments, found {} in {summary:?}",
                layout.run_summary_keys.len(),
                parts.len()
            ),
        ));
    }
    for (key, value) in layout.run_summary_keys.iter().zip(parts) {
        stats.insert(*key, value.to_string());
    }

    let (_, run_id_line) = first_match(lines, &layout.protocol_run_id, Stage::ProtocolRunId)?;
    stats.insert(
        "Protocol run ID",
        capture(&layout.protocol_run_id, run_id_line, Stage::ProtocolRunId)?,
    );

    let (idx, base_calls) = first_match(lines, &layout.base_calls, Stage::BaseCalls)?;
    stats.insert(
        "Min Q score",
        capture(&layout.base_calls, base_calls, Stage::BaseCalls)?,
    );
    for (offset, key) in ["Bases called", "Bases uncalled"].into_iter().enumerate() {
        let value = lines.get(idx + 1 + offset).ok_or_else(|| {
            ReportError::malformed(
                Stage::BaseCalls,
                format!("report ends before the {} value", key.to_lowercase()),
            )
        })?;
        stats.insert(key, value.to_string());
    }

    debug!(fields = stats.len(), "positional fields");
    Ok(stats)
}

fn first_match<'a>(lines: &'a LineSequence, re: &Regex, stage: Stage) -> Result<(usize, &'a str)> {
    lines
        .find(|l| re.is_match(l))
        .ok_or_else(|| ReportError::malformed(stage, format!("no line matches /{}/", re.as_str())))
}

fn capture(re: &Regex, line: &str, stage: Stage) -> Result<String> {
    re.captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .ok_or_else(|| ReportError::malformed(stage, format!("no value in {line:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::MINKNOW_22_05;

    const HEADER: &str = "\
Run report
MinION Mk1B
16:03:22 · ecoli_run · sample_a · MN34567
Protocol run ID: 5c1f0e2a
Bases called (min Q score: 9)
11.2 Gb
1.2 Gb";

    fn extract_text(raw: &str) -> Result<StatsRecord> {
        extract(&LineSequence::from_text(raw), &MINKNOW_22_05)
    }

    #[test]
    fn header_fields() {
        let stats = extract_text(HEADER).unwrap();
        let get = |k: &str| stats.get(k).map(String::as_str);
        assert_eq!(get("Instrument"), Some("MinION Mk1B"));
        assert_eq!(get("Duration"), Some("16:03:22"));
        assert_eq!(get("Experiment name"), Some("ecoli_run"));
        assert_eq!(get("Sample name"), Some("sample_a"));
        assert_eq!(get("Position"), Some("MN34567"));
        assert_eq!(get("Protocol run ID"), Some("5c1f0e2a"));
        assert_eq!(get("Min Q score"), Some("9"));
        assert_eq!(get("Bases called"), Some("11.2 Gb"));
        assert_eq!(get("Bases uncalled"), Some("1.2 Gb"));
    }

    #[test]
    fn key_order() {
        let stats = extract_text(HEADER).unwrap();
        let keys: Vec<_> = stats.keys().collect();
        assert_eq!(
            keys,
            [
                "Instrument",
                "Duration",
                "Experiment name",
                "Sample name",
                "Position",
                "Protocol run ID",
                "Min Q score",
                "Bases called",
                "Bases uncalled",
            ]
        );
    }

    #[test]
    fn promethion() {
        let raw = HEADER.replace("MinION Mk1B", "PromethION 24");
        let stats = extract_text(&raw).unwrap();
        assert_eq!(stats.get("Instrument").map(String::as_str), Some("PromethION 24"));
    }

    #[test]
    fn missing_instrument() {
        let raw = HEADER.replace("MinION Mk1B", "Unknown device");
        let err = extract_text(&raw).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Instrument));
    }

    #[test]
    fn five_segment_summary_rejected() {
        let raw = HEADER.replace("· MN34567", "· MN34567 · extra");
        let err = extract_text(&raw).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::RunSummary));
    }

    #[test]
    fn missing_protocol_run_id() {
        let raw = HEADER.replace("Protocol run ID: 5c1f0e2a\n", "");
        let err = extract_text(&raw).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::ProtocolRunId));
    }

    #[test]
    fn truncated_after_base_calls() {
        let raw = HEADER.trim_end_matches("\n1.2 Gb");
        let err = extract_text(raw).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::BaseCalls));
        assert!(err.to_string().contains("bases uncalled"));
    }

    #[test]
    fn short_input_fails() {
        assert!(extract_text("").is_err());
        assert!(extract_text("MinION Mk1B").is_err());
    }
}
