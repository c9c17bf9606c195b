//! Constrained greedy slotting of ordered stories into ordered sprints.
//!
//! For each story in slotting order, the first sprint (in end-date order)
//! that satisfies every constraint receives it:
//!
//! - **Capacity**: `available_capacity >= size`
//! - **Calendar**: the sprint window overlaps `[start_date, deadline]`
//! - **Assignee budget**: if the story's assignee has a budget in that
//!   sprint, the remaining budget must cover the size
//!
//! After each attempt the story's children get their start date raised to
//! the start of the sprint the story landed in, or to an unreachable date
//! if it did not land anywhere. A sprint given only an end date counts as
//! starting the day after the previous sprint ends. With the calendar
//! enforced, a child therefore never precedes its parent.
//!
//! This is a one-pass heuristic: no backtracking, and no guarantee of a
//! minimal sprint count or minimal overflow.

mod config;
mod runner;

pub use config::SlotConfig;
pub use runner::{SlotResult, SlotRunner};
