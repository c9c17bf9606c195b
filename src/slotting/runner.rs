//! Greedy slotting engine.
//!
//! # Algorithm
//!
//! 1. Partition sprints into *active* and *full* (zero capacity left)
//! 2. For each story in slotting order:
//!    a. If no sprint is active, every remaining story overflows
//!    b. Scan active sprints in order; take the first that admits the story
//!    c. Place it (capacity, assignee budget, story list), or record overflow
//!    d. Raise each child's start date to the chosen sprint's effective
//!       start, or to the unreachable date if the story was not placed
//!    e. Move the chosen sprint to *full* if it has no capacity left
//!
//! Stories are placed in one pass; a placed story is never moved.
//!
//! A sprint without a modeled start date (see [`Sprint::ending`]) starts,
//! for propagation purposes, the day after the previous sprint ends.

use chrono::NaiveDate;
use tracing::{debug, info, trace};

use super::config::SlotConfig;
use crate::model::{Backlog, Sprint, SprintId, Story, NO_START, UNREACHABLE};

/// Result of a slotting run.
///
/// Sprint contents are recorded on the sprints themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotResult {
    /// Ids of stories that fit no sprint, in slotting order.
    pub overflow: Vec<String>,
    /// Number of stories placed.
    pub placed: usize,
    /// Sprints found to be out of capacity, in the order observed.
    pub full_sprints: Vec<SprintId>,
    /// Whether slotting stopped early because every sprint was full.
    pub early_terminated: bool,
}

/// Capacity slotter.
pub struct SlotRunner;

impl SlotRunner {
    /// Slots backlog stories into sprints.
    ///
    /// `order` lists backlog indices in slotting order (see
    /// [`Orderer`](crate::ordering::Orderer)); `sprints` must already be in
    /// the order they should be tried, normally ascending end date.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_sprint::model::{Backlog, Sprint, SprintId, Story};
    /// use u_sprint::slotting::{SlotConfig, SlotRunner};
    /// use chrono::NaiveDate;
    ///
    /// let end = NaiveDate::from_ymd_opt(2024, 1, 14).unwrap();
    /// let mut sprints = vec![Sprint::ending(SprintId(1), end, 4.0).unwrap()];
    /// let mut backlog = Backlog::new(vec![
    ///     Story::new("A", 3.0).unwrap(),
    ///     Story::new("B", 3.0).unwrap(),
    /// ])
    /// .unwrap();
    ///
    /// let result = SlotRunner::run(&mut backlog, &[0, 1], &mut sprints, &SlotConfig::default());
    /// assert_eq!(sprints[0].stories(), &["A".to_string()]);
    /// assert_eq!(result.overflow, vec!["B".to_string()]);
    /// ```
    pub fn run(
        backlog: &mut Backlog,
        order: &[usize],
        sprints: &mut [Sprint],
        config: &SlotConfig,
    ) -> SlotResult {
        let mut result = SlotResult::default();
        let starts = effective_starts(sprints);

        let (mut active, full): (Vec<usize>, Vec<usize>) = (0..sprints.len())
            .partition(|&k| !(config.prune_full_sprints && sprints[k].is_full()));
        result
            .full_sprints
            .extend(full.iter().map(|&k| sprints[k].id()));

        for (pos, &i) in order.iter().enumerate() {
            if active.is_empty() {
                result
                    .overflow
                    .extend(order[pos..].iter().map(|&j| backlog.at(j).id.clone()));
                result.early_terminated = true;
                debug!(
                    remaining = order.len() - pos,
                    "All sprints full, overflowing remaining stories"
                );
                break;
            }

            let story = backlog.at(i);
            let target = active
                .iter()
                .copied()
                .find(|&k| admits(&sprints[k], story, config));

            let id = story.id.clone();
            let children: Vec<String> = story.children.iter().cloned().collect();

            match target {
                Some(k) => {
                    let sprint = &mut sprints[k];
                    sprint.place(&id, story.size, story.assignee.as_deref());
                    debug!(
                        story = %id,
                        sprint = %sprint.id(),
                        remaining = sprint.available_capacity(),
                        "Placed story"
                    );
                    backlog.at_mut(i).assigned_sprint_id = Some(sprint.id());
                    result.placed += 1;
                }
                None => {
                    trace!(story = %id, "No sprint admits story");
                    result.overflow.push(id);
                }
            }

            if config.propagate_start_dates {
                let earliest = target.map_or(UNREACHABLE, |k| starts[k]);
                for child in &children {
                    let Some(c) = backlog.index_of(child) else {
                        continue;
                    };
                    let child = backlog.at_mut(c);
                    if child.start_date < earliest {
                        trace!(story = %child.id, start = %earliest, "Raised start date");
                        child.start_date = earliest;
                    }
                }
            }

            if let Some(k) = target {
                if config.prune_full_sprints && sprints[k].is_full() {
                    active.retain(|&a| a != k);
                    result.full_sprints.push(sprints[k].id());
                    trace!(sprint = %sprints[k].id(), "Sprint full");
                }
            }
        }

        info!(
            placed = result.placed,
            overflow = result.overflow.len(),
            full_sprints = result.full_sprints.len(),
            "Slotting complete"
        );
        result
    }
}

/// Start date of each sprint as seen by start-date propagation.
///
/// An unmodeled start becomes the day after the previous sprint's end.
fn effective_starts(sprints: &[Sprint]) -> Vec<NaiveDate> {
    let mut starts = Vec::with_capacity(sprints.len());
    let mut previous_end: Option<NaiveDate> = None;
    for sprint in sprints {
        let start = match previous_end {
            Some(end) if sprint.start_date() == NO_START => {
                end.succ_opt().unwrap_or(UNREACHABLE)
            }
            _ => sprint.start_date(),
        };
        starts.push(start);
        previous_end = Some(sprint.end_date());
    }
    starts
}

/// Whether `sprint` can take `story` under the configured constraints.
fn admits(sprint: &Sprint, story: &Story, config: &SlotConfig) -> bool {
    if config.enforce_calendar && !sprint.overlaps(story.start_date, story.end_date) {
        return false;
    }
    let assignee = if config.enforce_assignee_capacity {
        story.assignee.as_deref()
    } else {
        None
    };
    sprint.can_fit(story.size, assignee)
}
