use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::{ReportError, Result};
use crate::model::RunReport;

/// `run.html` -> `run.json`, next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("json")
}

/// Output path for `input` inside `dir`.
pub fn output_path_in(dir: &Path, input: &Path) -> PathBuf {
    let name = input.file_name().map(Path::new).unwrap_or(input);
    dir.join(default_output_path(name))
}

/// JSON bytes; pretty output uses a four-space indent.
pub fn render_json(report: &RunReport, pretty: bool) -> Result<Vec<u8>> {
    if !pretty {
        return Ok(serde_json::to_vec(report)?);
    }
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    report.serialize(&mut ser)?;
    Ok(buf)
}

pub fn write_report(report: &RunReport, path: &Path, pretty: bool) -> Result<()> {
    let bytes = render_json(report, pretty)?;
    std::fs::write(path, bytes).map_err(|e| ReportError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Event, FieldMap};

    fn small_report() -> RunReport {
        let mut stats = FieldMap::new();
        stats.insert("Run status", "Complete".to_string());
        let mut event_log = FieldMap::new();
        event_log.insert(
            "12:00:00",
            Event {
                subject: "Disk space".into(),
                message: "OK".into(),
            },
        );
        RunReport {
            stats,
            barcode_reads: None,
            event_log,
        }
    }

    #[test]
    fn default_path_replaces_extension() {
        assert_eq!(
            default_output_path(Path::new("runs/report_MN34567.html")),
            PathBuf::from("runs/report_MN34567.json")
        );
        assert_eq!(default_output_path(Path::new("report")), PathBuf::from("report.json"));
    }

    #[test]
    fn out_dir_uses_file_name() {
        assert_eq!(
            output_path_in(Path::new("out"), Path::new("/data/a/run.html")),
            PathBuf::from("out/run.json")
        );
    }

    #[test]
    fn pretty_uses_four_spaces() {
        let bytes = render_json(&small_report(), true).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("{\n    \"stats\": {\n        \"Run status\": \"Complete\""));
        assert!(!text.contains("barcode_reads"));
    }

    #[test]
    fn compact_is_one_line() {
        let bytes = render_json(&small_report(), false).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            r#"{"stats":{"Run status":"Complete"},"event_log":{"12:00:00":{"Disk space":"OK"}}}"#
        );
    }

    #[test]
    fn write_then_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        let report = small_report();
        write_report(&report, &path, true).unwrap();
        let back: RunReport = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn unwritable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("run.json");
        let err = write_report(&small_report(), &path, true).unwrap_err();
        assert!(matches!(err, ReportError::Io { .. }));
    }
}
