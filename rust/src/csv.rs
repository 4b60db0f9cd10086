//! Delimited text input and output for the command-line front end.
//!
//! Input rows look like:
//!
//! ```text
//! task,duration,dependencies
//! a,2,
//! b,3,a
//! c,2,a
//! d,5,b;c
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::config::{CsvFormat, TimelineSymbols};
use crate::models::TaskRecord;
use crate::schedule::Schedule;
use crate::timeline::Timeline;

/// Header row of the task table.
pub const TASK_TABLE_HEADER: [&str; 7] = ["task", "duration", "ES", "EF", "LS", "LF", "slack"];

/// Errors raised while reading task rows. Line numbers are 1-based.
#[derive(Error, Debug)]
pub enum CsvError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: missing {field} field")]
    MissingField { line: usize, field: &'static str },
    #[error("line {line}: invalid duration {value:?}")]
    InvalidDuration { line: usize, value: String },
    #[error("line {line}: empty task name")]
    EmptyName { line: usize },
}

/// Read task records from any buffered reader.
pub fn read_tasks<R: BufRead>(reader: R, format: &CsvFormat) -> Result<Vec<TaskRecord>, CsvError> {
    let mut tasks = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        if format.has_header && idx == 0 {
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }
        tasks.push(parse_row(&line, line_no, format)?);
    }

    debug!(tasks = tasks.len(), "task rows read");
    Ok(tasks)
}

/// Read task records from a file.
pub fn read_tasks_from_path(path: &Path, format: &CsvFormat) -> Result<Vec<TaskRecord>, CsvError> {
    let file = File::open(path)?;
    read_tasks(BufReader::new(file), format)
}

fn parse_row(line: &str, line_no: usize, format: &CsvFormat) -> Result<TaskRecord, CsvError> {
    let mut fields = line.split(format.delimiter).map(str::trim);

    let name = fields.next().unwrap_or_default();
    if name.is_empty() {
        return Err(CsvError::EmptyName { line: line_no });
    }

    let raw_duration = fields.next().ok_or(CsvError::MissingField {
        line: line_no,
        field: "duration",
    })?;
    let duration = raw_duration
        .parse::<u64>()
        .map_err(|_| CsvError::InvalidDuration {
            line: line_no,
            value: raw_duration.to_string(),
        })?;

    let dependencies = fields
        .next()
        .map(|deps| split_dependencies(deps, format.dependency_separator))
        .unwrap_or_default();

    Ok(TaskRecord {
        name: name.to_string(),
        duration,
        dependencies,
    })
}

/// Split a dependency cell, dropping empty items.
pub fn split_dependencies(cell: &str, separator: char) -> Vec<String> {
    cell.split(separator)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Write `task,duration,ES,EF,LS,LF,slack`, one row per task in input order.
pub fn write_task_table<W: Write>(
    mut writer: W,
    schedule: &Schedule,
    format: &CsvFormat,
) -> io::Result<()> {
    let sep = format.delimiter.to_string();
    writeln!(writer, "{}", TASK_TABLE_HEADER.join(sep.as_str()))?;

    for t in schedule {
        let row = [
            t.name.clone(),
            t.duration.to_string(),
            t.early_start.to_string(),
            t.early_finish.to_string(),
            t.late_start.to_string(),
            t.late_finish.to_string(),
            t.slack.to_string(),
        ];
        writeln!(writer, "{}", row.join(sep.as_str()))?;
    }
    writer.flush()
}

/// Write the timeline grid: a `Task,0,1,...` header then one row per task.
pub fn write_timeline<W: Write>(
    mut writer: W,
    timeline: &Timeline<'_>,
    format: &CsvFormat,
    symbols: &TimelineSymbols,
) -> io::Result<()> {
    let sep = format.delimiter;

    write!(writer, "Task")?;
    for t in 0..timeline.length() {
        write!(writer, "{sep}{t}")?;
    }
    writeln!(writer)?;

    for row in timeline.rows() {
        write!(writer, "{}", row.name())?;
        for cell in row.cells() {
            write!(writer, "{sep}{}", symbols.symbol(cell))?;
        }
        writeln!(writer)?;
    }
    writer.flush()
}
