//! Error types for sprint planning.

use chrono::NaiveDate;
use thiserror::Error;

/// All errors that can occur while building or planning a backlog.
///
/// An unplaceable story is **not** an error: it is reported through the
/// overflow list of the slotting result.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Story size is negative or not a finite number.
    #[error("story {id}: invalid size {size}")]
    InvalidSize { id: String, size: f64 },

    /// Story priority is not a finite number.
    #[error("story {id}: priority must be finite, got {priority}")]
    InvalidPriority { id: String, priority: f64 },

    /// Sprint (or per-assignee) capacity is negative or not finite.
    #[error("{owner}: invalid capacity {capacity}")]
    InvalidCapacity { owner: String, capacity: f64 },

    /// A start/end date pair is inverted or uses a reserved sentinel.
    #[error("{owner}: invalid window {start} .. {end}")]
    InvalidWindow {
        owner: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    /// Two stories share the same id.
    #[error("duplicate story id: {0}")]
    DuplicateStory(String),

    /// A story lists a child id that is not in the backlog.
    #[error("story {parent}: unknown dependent story {child}")]
    UnknownStory { parent: String, child: String },

    /// The dependency graph contains a cycle through this story.
    #[error("cyclic dependency detected at story {id}")]
    CyclicDependency { id: String },

    /// Input document could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Schedule summary could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(String),

    /// Reading or writing a file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PlanError>;
