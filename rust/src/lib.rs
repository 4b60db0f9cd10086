//! Critical Path Method scheduling.
//!
//! Builds a dependency graph from task records, runs the forward and backward
//! passes, and returns a [`Schedule`] with ES/EF/LS/LF, slack and the critical
//! path for every task.
//!
//! ```
//! use critpath::{compute_schedule, TaskRecord};
//!
//! let schedule = compute_schedule(&[
//!     TaskRecord::new("a", 2, Vec::<String>::new()),
//!     TaskRecord::new("b", 3, ["a"]),
//!     TaskRecord::new("c", 2, ["a"]),
//!     TaskRecord::new("d", 5, ["b", "c"]),
//! ])
//! .unwrap();
//!
//! assert_eq!(schedule.project_finish(), 10);
//! assert_eq!(schedule.critical_path(), ["a", "b", "d"]);
//! assert_eq!(schedule.get("c").unwrap().slack, 1);
//! ```

pub mod backward_pass;
pub mod config;
pub mod csv;
mod error;
pub mod forward_pass;
pub mod graph;
mod interner;
pub mod logging;
mod models;
#[cfg(feature = "python")]
mod python;
mod schedule;
pub mod slack;
pub mod timeline;

pub use backward_pass::{backward_pass, BackwardPassResult, LateTimes};
pub use config::{CsvFormat, TimelineSymbols};
pub use error::{CpmError, InvariantViolation};
pub use forward_pass::{forward_pass, EarlyTimes, ForwardPassResult};
pub use graph::DependencyGraph;
pub use interner::NodeId;
pub use models::{ScheduledTask, TaskRecord};
pub use schedule::{compute_schedule, Schedule};
pub use slack::{classify, SlackResult};
pub use timeline::{Activity, Timeline, TimelineRow};
