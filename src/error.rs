use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

/// Extraction stage that rejected a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fields,
    Instrument,
    RunSummary,
    ProtocolRunId,
    BaseCalls,
    Barcodes,
    EventLog,
    Version,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Fields => "fields",
            Stage::Instrument => "instrument",
            Stage::RunSummary => "run summary",
            Stage::ProtocolRunId => "protocol run id",
            Stage::BaseCalls => "base calls",
            Stage::Barcodes => "barcodes",
            Stage::EventLog => "event log",
            Stage::Version => "version",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("{}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed report ({stage}): {reason}")]
    Malformed { stage: Stage, reason: String },
    #[error("unsupported MinKNOW version {found} (expected {expected})")]
    UnsupportedVersion { found: String, expected: String },
    #[error("output {} would overwrite the report", .0.display())]
    OutputIsInput(PathBuf),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReportError {
    pub fn malformed(stage: Stage, reason: impl Into<String>) -> Self {
        Self::Malformed {
            stage,
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Stage that failed, for malformed-report errors.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::Malformed { stage, .. } => Some(*stage),
            Self::UnsupportedVersion { .. } => Some(Stage::Version),
            _ => None,
        }
    }
}
