//! Story entity.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use super::{SprintId, NO_DEADLINE, NO_START};
use crate::error::{PlanError, Result};

/// A unit of backlog work.
///
/// Size and priority are validated: size must be finite and non-negative,
/// priority must be finite. Priority and deadline may only be tightened by
/// the normalizer; the start date only by slotting back-propagation.
///
/// # Examples
///
/// ```
/// use u_sprint::model::Story;
/// use chrono::NaiveDate;
///
/// let story = Story::new("LOGIN", 3.0)
///     .unwrap()
///     .with_priority(2.0)
///     .with_deadline(NaiveDate::from_ymd_opt(2024, 5, 31).unwrap())
///     .with_assignee("alice")
///     .with_child("LOGOUT");
/// assert_eq!(story.size(), 3.0);
/// assert!(!story.is_normalized());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Story {
    /// Unique, stable identifier.
    pub id: String,
    /// Optional display name.
    pub name: Option<String>,
    /// Person who must perform the work, if any.
    pub assignee: Option<String>,
    /// Passthrough display fields (e.g. "epic").
    pub additional_fields: BTreeMap<String, String>,
    pub(crate) size: f64,
    pub(crate) priority: f64,
    pub(crate) start_date: NaiveDate,
    pub(crate) end_date: NaiveDate,
    pub(crate) children: BTreeSet<String>,
    pub(crate) is_normalized: bool,
    pub(crate) assigned_sprint_id: Option<SprintId>,
}

impl Story {
    /// Creates an unconstrained story with priority 0.
    ///
    /// Returns [`PlanError::InvalidSize`] for a negative or non-finite size.
    pub fn new(id: impl Into<String>, size: f64) -> Result<Self> {
        let id = id.into();
        if !size.is_finite() || size < 0.0 {
            return Err(PlanError::InvalidSize { id, size });
        }
        Ok(Self {
            id,
            name: None,
            assignee: None,
            additional_fields: BTreeMap::new(),
            size,
            priority: 0.0,
            start_date: NO_START,
            end_date: NO_DEADLINE,
            children: BTreeSet::new(),
            is_normalized: true,
            assigned_sprint_id: None,
        })
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the priority (higher is scheduled earlier).
    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the deadline (last day the work may end).
    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.end_date = deadline;
        self
    }

    /// Sets the earliest date the work may begin.
    pub fn with_start_date(mut self, start: NaiveDate) -> Self {
        self.start_date = start;
        self
    }

    /// Sets the assignee.
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Adds a dependent story: `child` cannot be scheduled before this one.
    pub fn with_child(mut self, child: impl Into<String>) -> Self {
        self.children.insert(child.into());
        self.is_normalized = false;
        self
    }

    /// Adds a passthrough display field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional_fields.insert(key.into(), value.into());
        self
    }

    /// Effort consumed from sprint capacity.
    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn priority(&self) -> f64 {
        self.priority
    }

    /// Earliest permissible start date.
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Latest permissible end date.
    pub fn deadline(&self) -> NaiveDate {
        self.end_date
    }

    /// Ids of the stories that depend on this one, ordered by id.
    pub fn children(&self) -> impl Iterator<Item = &str> {
        self.children.iter().map(String::as_str)
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Whether priority/deadline propagation from children has been applied.
    pub fn is_normalized(&self) -> bool {
        self.is_normalized
    }

    /// The sprint this story was slotted into, if any.
    pub fn assigned_sprint(&self) -> Option<SprintId> {
        self.assigned_sprint_id
    }

    /// Checks the entity invariants.
    pub fn validate(&self) -> Result<()> {
        if !self.size.is_finite() || self.size < 0.0 {
            return Err(PlanError::InvalidSize {
                id: self.id.clone(),
                size: self.size,
            });
        }
        if !self.priority.is_finite() {
            return Err(PlanError::InvalidPriority {
                id: self.id.clone(),
                priority: self.priority,
            });
        }
        if self.start_date > self.end_date {
            return Err(PlanError::InvalidWindow {
                owner: format!("story {}", self.id),
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }
}
