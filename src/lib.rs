//! Dependency-aware greedy sprint planning.
//!
//! Assigns a backlog of stories (size, priority, deadline, date window,
//! optional assignee, dependents) to an ordered sequence of capacity-bounded
//! sprints, producing a feasible near-greedy schedule plus the list of
//! stories that could not be placed.
//!
//! The pipeline has three stages, each consuming the previous one's output:
//!
//! - **Normalization** ([`normalize`]): tightens priority and deadline of
//!   every story so it is never less urgent than its dependents.
//! - **Ordering** ([`ordering`]): one deterministic total order by
//!   priority (desc), deadline (asc), size (desc), built from stable passes.
//! - **Slotting** ([`slotting`]): first-fit placement under sprint
//!   capacity, calendar window, and per-assignee budgets, pushing
//!   dependents behind their parent's sprint as it goes.
//!
//! [`planner`] wires the stages together. With the `serde` feature, [`io`]
//! loads JSON input and writes JSON / text reports.
//!
//! # Example
//!
//! ```
//! use u_sprint::model::{Backlog, Sprint, SprintIdGenerator, Story};
//! use chrono::NaiveDate;
//!
//! let day = |m, d| NaiveDate::from_ymd_opt(2024, m, d).unwrap();
//! let mut ids = SprintIdGenerator::new();
//! let sprints = vec![
//!     Sprint::new(ids.next_id(), day(1, 1), day(1, 14), 8.0).unwrap(),
//!     Sprint::new(ids.next_id(), day(1, 15), day(1, 28), 8.0).unwrap(),
//! ];
//! let backlog = Backlog::new(vec![
//!     Story::new("api", 5.0).unwrap().with_child("ui"),
//!     Story::new("ui", 5.0).unwrap().with_priority(3.0),
//!     Story::new("docs", 2.0).unwrap(),
//! ])
//! .unwrap();
//!
//! let schedule = u_sprint::planner::plan(backlog, sprints).unwrap();
//! assert_eq!(schedule.sprints()[0].stories(), &["api", "docs"]);
//! assert_eq!(schedule.sprints()[1].stories(), &["ui"]);
//! assert!(schedule.is_complete());
//! ```
//!
//! # Preconditions
//!
//! The dependency graph must be acyclic; cycles are reported as
//! [`PlanError::CyclicDependency`] by normalization. Everything runs
//! sequentially on exclusively owned data.

pub mod error;
#[cfg(feature = "serde")]
pub mod io;
pub mod model;
pub mod normalize;
pub mod ordering;
pub mod planner;
pub mod slotting;

pub use error::{PlanError, Result};
