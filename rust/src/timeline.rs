//! Per-time-unit activity grid, a simplified Gantt chart.
//!
//! Cells are derived from each task's `[ES, EF)` interval when read, so a
//! timeline costs one row handle per task however long the project runs.

use crate::models::ScheduledTask;
use crate::schedule::Schedule;

/// State of one task during one time unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Activity {
    Inactive,
    Active,
    Critical,
}

/// One task's row over `0..length`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimelineRow<'a> {
    task: &'a ScheduledTask,
    length: u64,
}

impl<'a> TimelineRow<'a> {
    pub fn name(&self) -> &'a str {
        &self.task.name
    }

    /// State during time unit `t`. A task occupies `[ES, EF)`; zero-duration
    /// tasks occupy nothing.
    pub fn activity_at(&self, t: u64) -> Activity {
        match (self.task.is_active_at(t), self.task.critical) {
            (false, _) => Activity::Inactive,
            (true, true) => Activity::Critical,
            (true, false) => Activity::Active,
        }
    }

    /// Cells for time units `0..length`, in order.
    pub fn cells(&self) -> impl Iterator<Item = Activity> + 'a {
        let row = *self;
        (0..self.length).map(move |t| row.activity_at(t))
    }
}

/// Activity grid spanning `0..project_finish`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timeline<'a> {
    length: u64,
    tasks: &'a [ScheduledTask],
}

impl<'a> Timeline<'a> {
    pub fn from_schedule(schedule: &'a Schedule) -> Self {
        Self {
            length: schedule.project_finish(),
            tasks: schedule.tasks(),
        }
    }

    /// Number of time units (columns).
    pub fn length(&self) -> u64 {
        self.length
    }

    /// Rows in input order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = TimelineRow<'a>> + 'a {
        let length = self.length;
        self.tasks.iter().map(move |task| TimelineRow { task, length })
    }
}
