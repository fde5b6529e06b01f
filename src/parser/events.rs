use tracing::{debug, warn};

use super::text::LineSequence;
use crate::error::{ReportError, Result, Stage};
use crate::layout::ReportLayout;
use crate::model::{Event, EventLogRecord};

/// Everything from the anchor line to the end of the report, read as
/// fixed-width records of `[subject, level, time, message]`.
pub fn extract(lines: &LineSequence, layout: &ReportLayout) -> Result<EventLogRecord> {
    let start = lines.position(layout.event_anchor).ok_or_else(|| {
        ReportError::malformed(
            Stage::EventLog,
            format!("anchor line {:?} not found", layout.event_anchor),
        )
    })?;
    let tail = &lines.lines()[start..];
    let width = layout.event_width;

    if tail.len() % width != 0 {
        return Err(ReportError::malformed(
            Stage::EventLog,
            format!(
                "{} lines after {:?} is not a multiple of {width}",
                tail.len(),
                layout.event_anchor
            ),
        ));
    }

    let mut log = EventLogRecord::new();
    for group in tail.chunks_exact(width) {
        let event = Event {
            subject: group[0].clone(),
            message: group[3].clone(),
        };
        let time = &group[2];
        if let Some(prev) = log.insert(time.clone(), event) {
            warn!(time = %time, dropped = %prev.subject, "duplicate event timestamp");
        }
    }

    debug!(events = log.len(), "event log");
    Ok(log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::MINKNOW_22_05;

    const LOG: &str = "\
Reads generated
4.2 M
Disk space
Warning
June 2, 2022 14:02:11
Available disk space is low
Flow cell
Info
June 2, 2022 14:05:42
Flow cell check passed";

    fn extract_text(raw: &str) -> Result<EventLogRecord> {
        extract(&LineSequence::from_text(raw), &MINKNOW_22_05)
    }

    #[test]
    fn events_in_report_order() {
        let log = extract_text(LOG).unwrap();
        let times: Vec<_> = log.keys().collect();
        assert_eq!(times, ["June 2, 2022 14:02:11", "June 2, 2022 14:05:42"]);
        let first = log.get("June 2, 2022 14:02:11").unwrap();
        assert_eq!(first.subject, "Disk space");
        assert_eq!(first.message, "Available disk space is low");
    }

    #[test]
    fn ragged_tail_is_malformed() {
        let raw = format!("{LOG}\nTrailing footer");
        let err = extract_text(&raw).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::EventLog));
    }

    #[test]
    fn missing_anchor_is_malformed() {
        let err = extract_text("Run status\nComplete").unwrap_err();
        assert_eq!(err.stage(), Some(Stage::EventLog));
    }

    #[test]
    fn duplicate_timestamp_keeps_last() {
        let raw = "Disk space\nWarning\n12:00\nfirst\nPores\nInfo\n12:00\nsecond";
        let log = extract_text(raw).unwrap();
        assert_eq!(log.len(), 1);
        let ev = log.get("12:00").unwrap();
        assert_eq!(ev.subject, "Pores");
        assert_eq!(ev.message, "second");
    }
}
