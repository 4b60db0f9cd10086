//! Configuration types for reading and rendering schedules.

use crate::timeline::Activity;

/// Layout of the delimited task file and the tables written back out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsvFormat {
    /// Column separator
    pub delimiter: char,
    /// Separator between names inside the dependencies column
    pub dependency_separator: char,
    /// Whether the first input line is a header to skip
    pub has_header: bool,
}

impl Default for CsvFormat {
    fn default() -> Self {
        Self {
            delimiter: ',',
            dependency_separator: ';',
            has_header: true,
        }
    }
}

impl CsvFormat {
    /// Build a format from optional overrides, falling back to defaults.
    pub fn new(
        delimiter: Option<char>,
        dependency_separator: Option<char>,
        has_header: Option<bool>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            delimiter: delimiter.unwrap_or(defaults.delimiter),
            dependency_separator: dependency_separator.unwrap_or(defaults.dependency_separator),
            has_header: has_header.unwrap_or(defaults.has_header),
        }
    }
}

/// Cell markers used in the timeline table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimelineSymbols {
    pub critical: String,
    pub active: String,
    pub inactive: String,
}

impl Default for TimelineSymbols {
    fn default() -> Self {
        Self {
            critical: "C".to_string(),
            active: "X".to_string(),
            inactive: "O".to_string(),
        }
    }
}

impl TimelineSymbols {
    pub fn symbol(&self, activity: Activity) -> &str {
        match activity {
            Activity::Critical => &self.critical,
            Activity::Active => &self.active,
            Activity::Inactive => &self.inactive,
        }
    }
}
