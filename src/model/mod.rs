//! Domain entities: stories, sprints, and the backlog arena.
//!
//! # Key Components
//!
//! - [`Story`]: a unit of backlog work with size, priority, date window,
//!   optional assignee and dependent (child) stories
//! - [`Sprint`]: a time-boxed capacity bucket with optional per-assignee
//!   budgets
//! - [`Backlog`]: owns the stories in input order and resolves child ids
//!
//! # Dependency Direction
//!
//! If story B depends on story A, A is B's *parent* and B is A's *child*.
//! Edges are stored on the parent, pointing at the dependents.

mod backlog;
mod sprint;
mod story;

pub use backlog::Backlog;
pub use sprint::{Sprint, SprintId, SprintIdGenerator};
pub use story::Story;

use chrono::NaiveDate;

/// Start date of a story with no earliest-start constraint.
pub const NO_START: NaiveDate = NaiveDate::MIN;

/// Deadline of a story with no deadline.
pub const NO_DEADLINE: NaiveDate = NaiveDate::MAX;

/// Start date that no sprint can reach. Dependents of a story that failed
/// to place are pushed here.
pub const UNREACHABLE: NaiveDate = NaiveDate::MAX;

/// The calendar day before `date`, saturating at the earliest representable date.
pub(crate) fn day_before(date: NaiveDate) -> NaiveDate {
    date.pred_opt().unwrap_or(NaiveDate::MIN)
}
