//! Spreadsheet import behaviour.

use std::fmt::Write;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Month/day/year, the layout the spreadsheets are exported with.
fn default_date_format() -> String {
    "%m/%d/%Y".to_string()
}

const fn default_abort_on_store_error() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImportConfig {
    /// `chrono` format used to parse and render date columns.
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Map and reconcile every row without persisting anything.
    #[serde(default)]
    pub dry_run: bool,

    /// Stop the batch on the first store failure instead of recording it
    /// against the row and moving on.
    #[serde(default = "default_abort_on_store_error")]
    pub abort_on_store_error: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            dry_run: false,
            abort_on_store_error: default_abort_on_store_error(),
        }
    }
}

impl ImportConfig {
    /// The format must render a date that parses back to the same date.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let sample = NaiveDate::from_ymd_opt(2013, 11, 28).unwrap_or_default();
        let mut rendered = String::new();
        let parses_back = write!(rendered, "{}", sample.format(&self.date_format)).is_ok()
            && NaiveDate::parse_from_str(&rendered, &self.date_format).ok() == Some(sample);
        if parses_back {
            Ok(())
        } else {
            Err(ConfigError::InvalidValue {
                field: "import.date_format".into(),
                reason: format!("'{}' does not round-trip a calendar date", self.date_format),
            })
        }
    }
}
