//! Static description of one MinKNOW report layout: the labels, patterns and
//! anchors the extraction stages rely on.

use std::sync::LazyLock;

use regex::Regex;

pub struct ReportLayout {
    pub name: &'static str,
    /// Labels whose value is the line right after them.
    pub labels: &'static [&'static str],
    pub instrument: Regex,
    pub run_summary: Regex,
    pub run_summary_separator: &'static str,
    pub run_summary_keys: &'static [&'static str],
    pub protocol_run_id: Regex,
    pub base_calls: Regex,
    pub barcode_line: Regex,
    pub barcode_id: Regex,
    pub barcode_reads: Regex,
    pub event_anchor: &'static str,
    /// Lines per event: subject, level, time, message.
    pub event_width: usize,
    pub version_field: &'static str,
    pub expected_version: &'static str,
}

const MINKNOW_LABELS: &[&str] = &[
    "Estimated bases",
    "Data produced",
    "Reads generated",
    "Estimated N50",
    "Elapsed time",
    "Run status",
    "Flow Cell type",
    "Flow Cell ID",
    "Kit type",
    "Specified run length",
    "Active channel selection",
    "Pore scan freq.",
    "Bias voltage (initial)",
    "Bias voltage (final)",
    "Reserved pores",
    "Basecalling",
    "FAST5 output",
    "FAST5 reads per file",
    "FASTQ output",
    "FASTQ reads per file",
    "BAM output",
    "Bulk file output",
    "Data location",
    "MinKNOW",
    "Bream",
    "Configuration",
    "Guppy",
    "MinKNOW Core",
];

pub static MINKNOW_22_05: LazyLock<ReportLayout> = LazyLock::new(|| ReportLayout {
    name: "MinKNOW 22.05",
    labels: MINKNOW_LABELS,
    instrument: Regex::new(r"(?:Prometh|Min)ION").unwrap(),
    run_summary: Regex::new(r"^.+:.+:.+ · .+ · .+ · .+$").unwrap(),
    run_summary_separator: " · ",
    run_summary_keys: &["Duration", "Experiment name", "Sample name", "Position"],
    protocol_run_id: Regex::new(r"Protocol run ID: (.+)").unwrap(),
    base_calls: Regex::new(r"Bases called \(min Q score: (\d+)\)").unwrap(),
    barcode_line: Regex::new(r"^barcode\d{2}").unwrap(),
    barcode_id: Regex::new(r"barcode0?(\d+)").unwrap(),
    barcode_reads: Regex::new(r"Reads: (\d+)").unwrap(),
    event_anchor: "Disk space",
    event_width: 4,
    version_field: "MinKNOW",
    expected_version: "22.05.7",
});

impl ReportLayout {
    pub fn is_label(&self, line: &str) -> bool {
        self.labels.contains(&line)
    }
}
