//! Sprint entity and id generation.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

use super::{NO_START, UNREACHABLE};
use crate::error::{PlanError, Result};

/// Identifier of a sprint, increasing in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SprintId(pub u32);

impl fmt::Display for SprintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out consecutive sprint ids starting at 1.
///
/// Ids are scoped to one generator; there is no process-wide counter.
#[derive(Debug, Clone)]
pub struct SprintIdGenerator {
    next: u32,
}

impl SprintIdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Returns the next id.
    pub fn next_id(&mut self) -> SprintId {
        let id = SprintId(self.next);
        self.next += 1;
        id
    }
}

impl Default for SprintIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// A time-boxed capacity bucket.
///
/// `available_capacity` starts equal to `total_capacity` and is decremented
/// as stories are placed; it never goes negative. Per-assignee budgets work
/// the same way; an assignee without a budget is unconstrained.
///
/// # Examples
///
/// ```
/// use u_sprint::model::{Sprint, SprintId};
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 1, 14).unwrap();
/// let sprint = Sprint::new(SprintId(1), start, end, 15.0)
///     .unwrap()
///     .with_assignee_capacity("alice", 5.0)
///     .unwrap();
/// assert_eq!(sprint.available_capacity(), 15.0);
/// assert!(sprint.can_fit(5.0, Some("alice")));
/// assert!(!sprint.can_fit(6.0, Some("alice")));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Sprint {
    /// Optional display name.
    pub name: Option<String>,
    pub(crate) id: SprintId,
    pub(crate) start_date: NaiveDate,
    pub(crate) end_date: NaiveDate,
    pub(crate) total_capacity: f64,
    pub(crate) available_capacity: f64,
    pub(crate) assignee_total_capacities: BTreeMap<String, f64>,
    pub(crate) assignee_available_capacities: BTreeMap<String, f64>,
    pub(crate) stories: Vec<String>,
}

fn check_capacity(owner: impl FnOnce() -> String, capacity: f64) -> Result<()> {
    if !capacity.is_finite() || capacity < 0.0 {
        return Err(PlanError::InvalidCapacity {
            owner: owner(),
            capacity,
        });
    }
    Ok(())
}

impl Sprint {
    /// Creates an empty sprint over `[start_date, end_date]`.
    ///
    /// The window must not be inverted, and `end_date` must be earlier than
    /// the latest representable date, which is reserved as unreachable.
    pub fn new(
        id: SprintId,
        start_date: NaiveDate,
        end_date: NaiveDate,
        capacity: f64,
    ) -> Result<Self> {
        check_capacity(|| format!("sprint {id}"), capacity)?;
        if start_date > end_date || end_date >= UNREACHABLE {
            return Err(PlanError::InvalidWindow {
                owner: format!("sprint {id}"),
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            name: None,
            id,
            start_date,
            end_date,
            total_capacity: capacity,
            available_capacity: capacity,
            assignee_total_capacities: BTreeMap::new(),
            assignee_available_capacities: BTreeMap::new(),
            stories: Vec::new(),
        })
    }

    /// Creates a sprint that only models an end date.
    pub fn ending(id: SprintId, end_date: NaiveDate, capacity: f64) -> Result<Self> {
        Self::new(id, NO_START, end_date, capacity)
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds (or replaces) a per-assignee capacity budget.
    pub fn with_assignee_capacity(
        mut self,
        assignee: impl Into<String>,
        capacity: f64,
    ) -> Result<Self> {
        let assignee = assignee.into();
        check_capacity(|| format!("sprint {} assignee {assignee}", self.id), capacity)?;
        self.assignee_total_capacities
            .insert(assignee.clone(), capacity);
        self.assignee_available_capacities.insert(assignee, capacity);
        Ok(self)
    }

    pub fn id(&self) -> SprintId {
        self.id
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn total_capacity(&self) -> f64 {
        self.total_capacity
    }

    pub fn available_capacity(&self) -> f64 {
        self.available_capacity
    }

    /// Capacity consumed by placed stories.
    pub fn used_capacity(&self) -> f64 {
        self.total_capacity - self.available_capacity
    }

    /// Ids of the placed stories, in placement order.
    pub fn stories(&self) -> &[String] {
        &self.stories
    }

    /// Remaining budget for `assignee`, or `None` if unconstrained.
    pub fn assignee_available(&self, assignee: &str) -> Option<f64> {
        self.assignee_available_capacities.get(assignee).copied()
    }

    /// `(assignee, used, total)` for every configured assignee budget.
    pub fn assignee_workload(&self) -> impl Iterator<Item = (&str, f64, f64)> {
        self.assignee_total_capacities
            .iter()
            .map(move |(name, &total)| {
                let available = self
                    .assignee_available_capacities
                    .get(name)
                    .copied()
                    .unwrap_or(total);
                (name.as_str(), total - available, total)
            })
    }

    /// True once no capacity is left.
    pub fn is_full(&self) -> bool {
        self.available_capacity <= 0.0
    }

    /// Whether the sprint window overlaps `[start, end]`.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.end_date >= start && self.start_date <= end
    }

    /// Whether a story of `size` fits both the sprint capacity and the
    /// assignee's budget (if the assignee has one in this sprint).
    pub fn can_fit(&self, size: f64, assignee: Option<&str>) -> bool {
        if self.available_capacity < size {
            return false;
        }
        match assignee.and_then(|a| self.assignee_available(a)) {
            Some(budget) => budget >= size,
            None => true,
        }
    }

    /// Records a placement. The caller has already checked the fit.
    pub(crate) fn place(&mut self, story_id: &str, size: f64, assignee: Option<&str>) {
        self.available_capacity -= size;
        if let Some(budget) = assignee.and_then(|a| self.assignee_available_capacities.get_mut(a)) {
            *budget -= size;
        }
        self.stories.push(story_id.to_string());
    }
}
