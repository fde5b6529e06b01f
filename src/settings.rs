use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::layout::MINKNOW_22_05;
use crate::parser::{is_version_triple, ExtractOptions};

const DEFAULT_FILE: &str = "nanostat.toml";

/// Runtime settings: defaults, then the settings file, then `NANOSTAT_*` env vars.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub expected_version: String,
    pub check_version: bool,
    pub pretty: bool,
}

impl Settings {
    /// `file` replaces `./nanostat.toml`; an explicit file must exist.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let source = match file {
            Some(path) => File::from(path).required(true),
            None => File::from(Path::new(DEFAULT_FILE)).required(false),
        };
        let settings: Settings = Config::builder()
            .set_default("expected_version", MINKNOW_22_05.expected_version)?
            .set_default("check_version", true)?
            .set_default("pretty", true)?
            .add_source(source)
            .add_source(Environment::with_prefix("NANOSTAT"))
            .build()?
            .try_deserialize()?;
        validate_version(&settings.expected_version).map_err(ConfigError::Message)?;
        Ok(settings)
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            check_version: self.check_version,
            expected_version: Some(self.expected_version.clone()),
        }
    }
}

/// Reject an expected version that is not `major.minor.patch`.
///
/// Also used as the clap value parser for `--expect-version`.
pub fn validate_version(v: &str) -> Result<String, String> {
    if is_version_triple(v) {
        Ok(v.to_string())
    } else {
        Err(format!("expected_version {v:?} is not a major.minor.patch version"))
    }
}
