//! JSON loading and report output.
//!
//! These are thin collaborators around the planning core: the loader turns
//! an input document into a [`Backlog`](crate::model::Backlog) and sprints,
//! the writers turn a [`Schedule`](crate::planner::Schedule) into a
//! machine-readable summary or a human-readable report.
//!
//! Only available with the `serde` feature.

mod input;
mod output;
mod report;

pub use input::{load_path, load_str};
pub use output::{write_summary, ScheduleSummary, SprintSummary};
pub use report::render_report;
