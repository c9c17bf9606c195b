//! Normalization pass over a backlog.
//!
//! # Algorithm
//!
//! For each story in backlog order:
//! 1. Skip it if already normalized (no children, or done earlier)
//! 2. Look up the aggregate `(max priority, min deadline)` for its sorted
//!    child-id set in the run-local cache
//! 3. On a miss, normalize each child recursively, then aggregate and cache
//! 4. Raise priority / lower deadline to satisfy the bounds, mark normalized
//!
//! A story re-entered while still on the DFS path means the dependency
//! graph has a cycle; the pass stops with [`PlanError::CyclicDependency`].

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use tracing::{debug, trace};

use crate::error::{PlanError, Result};
use crate::model::{day_before, Backlog};

/// Statistics of one normalization run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    /// Stories marked normalized by this run (stories with children only).
    pub normalized: usize,
    /// Stories whose priority was raised.
    pub priority_raised: usize,
    /// Stories whose deadline was pulled earlier.
    pub deadline_tightened: usize,
    /// Aggregates reused from the cache.
    pub cache_hits: usize,
    /// Aggregates computed from scratch.
    pub cache_misses: usize,
}

#[derive(Debug, Clone, Copy)]
struct ChildAggregate {
    max_priority: f64,
    min_deadline: NaiveDate,
}

/// State of one run; the cache does not outlive it.
struct Pass<'a> {
    backlog: &'a mut Backlog,
    cache: HashMap<Vec<String>, ChildAggregate>,
    visiting: HashSet<usize>,
    report: NormalizeReport,
}

/// Dependency normalizer.
pub struct Normalizer;

impl Normalizer {
    /// Normalizes every story in the backlog in place.
    ///
    /// Running it again on the same backlog is a no-op.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_sprint::model::{Backlog, Story};
    /// use u_sprint::normalize::Normalizer;
    /// use chrono::NaiveDate;
    ///
    /// let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
    /// let mut backlog = Backlog::new(vec![
    ///     Story::new("A", 1.0).unwrap().with_deadline(day(10)).with_child("B"),
    ///     Story::new("B", 1.0).unwrap().with_deadline(day(5)).with_priority(2.0),
    /// ])
    /// .unwrap();
    ///
    /// Normalizer::run(&mut backlog).unwrap();
    /// let a = backlog.get("A").unwrap();
    /// assert_eq!(a.priority(), 2.0);
    /// assert_eq!(a.deadline(), day(4));
    /// ```
    pub fn run(backlog: &mut Backlog) -> Result<NormalizeReport> {
        let mut pass = Pass {
            backlog,
            cache: HashMap::new(),
            visiting: HashSet::new(),
            report: NormalizeReport::default(),
        };

        for i in 0..pass.backlog.len() {
            pass.normalize(i)?;
        }

        debug!(
            normalized = pass.report.normalized,
            priority_raised = pass.report.priority_raised,
            deadline_tightened = pass.report.deadline_tightened,
            cache_hits = pass.report.cache_hits,
            cache_misses = pass.report.cache_misses,
            "Normalized backlog"
        );
        Ok(pass.report)
    }
}

impl Pass<'_> {
    fn normalize(&mut self, i: usize) -> Result<()> {
        if self.backlog.at(i).is_normalized {
            return Ok(());
        }
        if !self.visiting.insert(i) {
            return Err(PlanError::CyclicDependency {
                id: self.backlog.at(i).id.clone(),
            });
        }

        let key: Vec<String> = self.backlog.at(i).children.iter().cloned().collect();
        let aggregate = match self.cache.get(&key) {
            Some(&cached) => {
                self.report.cache_hits += 1;
                cached
            }
            None => {
                self.report.cache_misses += 1;
                let computed = self.aggregate(&key)?;
                self.cache.insert(key, computed);
                computed
            }
        };

        let story = self.backlog.at_mut(i);
        if story.priority < aggregate.max_priority {
            trace!(
                story = %story.id,
                from = story.priority,
                to = aggregate.max_priority,
                "Raised priority"
            );
            story.priority = aggregate.max_priority;
            self.report.priority_raised += 1;
        }
        let limit = day_before(aggregate.min_deadline);
        if story.end_date > limit {
            trace!(story = %story.id, from = %story.end_date, to = %limit, "Tightened deadline");
            story.end_date = limit;
            self.report.deadline_tightened += 1;
        }
        story.is_normalized = true;
        self.report.normalized += 1;

        self.visiting.remove(&i);
        Ok(())
    }

    fn aggregate(&mut self, children: &[String]) -> Result<ChildAggregate> {
        let mut aggregate = ChildAggregate {
            max_priority: f64::NEG_INFINITY,
            min_deadline: NaiveDate::MAX,
        };
        for id in children {
            let Some(c) = self.backlog.index_of(id) else {
                continue;
            };
            self.normalize(c)?;
            let child = self.backlog.at(c);
            aggregate.max_priority = aggregate.max_priority.max(child.priority);
            aggregate.min_deadline = aggregate.min_deadline.min(child.end_date);
        }
        Ok(aggregate)
    }
}
