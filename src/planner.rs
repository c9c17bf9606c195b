//! End-to-end planning pipeline: normalize → order → slot.
//!
//! Each stage runs to completion before the next one starts. The backlog
//! and sprints are moved into the planner and returned, mutated, inside
//! the [`Schedule`].

use tracing::info;

use crate::error::Result;
use crate::model::{Backlog, Sprint, SprintId, Story};
use crate::normalize::{NormalizeReport, Normalizer};
use crate::ordering::Orderer;
use crate::slotting::{SlotConfig, SlotResult, SlotRunner};

/// Configuration of a planning run.
///
/// # Examples
///
/// ```
/// use u_sprint::planner::PlanConfig;
/// use u_sprint::slotting::SlotConfig;
///
/// let config = PlanConfig::default()
///     .with_normalization(false)
///     .with_slotting(SlotConfig::default().with_calendar(false));
/// assert!(!config.normalize);
/// assert!(config.sort_sprints);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanConfig {
    /// Run dependency normalization before ordering.
    pub normalize: bool,
    /// Stably sort sprints by ascending end date before slotting.
    pub sort_sprints: bool,
    /// Slotting constraints.
    pub slotting: SlotConfig,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            normalize: true,
            sort_sprints: true,
            slotting: SlotConfig::default(),
        }
    }
}

impl PlanConfig {
    /// Enables or disables dependency normalization.
    pub fn with_normalization(mut self, enabled: bool) -> Self {
        self.normalize = enabled;
        self
    }

    /// Enables or disables sorting sprints by end date.
    pub fn with_sprint_sorting(mut self, enabled: bool) -> Self {
        self.sort_sprints = enabled;
        self
    }

    /// Sets the slotting configuration.
    pub fn with_slotting(mut self, slotting: SlotConfig) -> Self {
        self.slotting = slotting;
        self
    }
}

/// Outcome of a planning run.
#[derive(Debug, Clone)]
pub struct Schedule {
    backlog: Backlog,
    sprints: Vec<Sprint>,
    order: Vec<usize>,
    slotting: SlotResult,
    normalization: Option<NormalizeReport>,
}

impl Schedule {
    /// Sprints in slotting order, with their placed stories.
    pub fn sprints(&self) -> &[Sprint] {
        &self.sprints
    }

    pub fn sprint(&self, id: SprintId) -> Option<&Sprint> {
        self.sprints.iter().find(|s| s.id() == id)
    }

    /// The backlog after normalization and start-date propagation.
    pub fn backlog(&self) -> &Backlog {
        &self.backlog
    }

    pub fn story(&self, id: &str) -> Option<&Story> {
        self.backlog.get(id)
    }

    /// Story ids in the order slotting considered them.
    pub fn slotting_order(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|&i| self.backlog.at(i).id.as_str())
    }

    /// Ids of stories that could not be placed, in slotting order.
    pub fn overflow(&self) -> &[String] {
        &self.slotting.overflow
    }

    /// Stories that could not be placed, in slotting order.
    pub fn overflow_stories(&self) -> impl Iterator<Item = &Story> {
        self.slotting
            .overflow
            .iter()
            .filter_map(|id| self.backlog.get(id))
    }

    /// True if every story was placed.
    pub fn is_complete(&self) -> bool {
        self.slotting.overflow.is_empty()
    }

    pub fn slot_result(&self) -> &SlotResult {
        &self.slotting
    }

    /// Normalization statistics, if normalization ran.
    pub fn normalize_report(&self) -> Option<&NormalizeReport> {
        self.normalization.as_ref()
    }

    /// Splits the schedule into its backlog and sprints.
    pub fn into_parts(self) -> (Backlog, Vec<Sprint>) {
        (self.backlog, self.sprints)
    }
}

/// Planning pipeline.
pub struct Planner {
    config: PlanConfig,
}

impl Planner {
    pub fn new(config: PlanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlanConfig {
        &self.config
    }

    /// Runs normalize → order → slot over the backlog and sprints.
    ///
    /// Fails only if normalization finds a dependency cycle.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_sprint::model::{Backlog, Sprint, SprintIdGenerator, Story};
    /// use u_sprint::planner::{PlanConfig, Planner};
    /// use chrono::NaiveDate;
    ///
    /// let day = |m, d| NaiveDate::from_ymd_opt(2024, m, d).unwrap();
    /// let mut ids = SprintIdGenerator::new();
    /// let sprints = vec![
    ///     Sprint::new(ids.next_id(), day(1, 1), day(1, 14), 5.0).unwrap(),
    ///     Sprint::new(ids.next_id(), day(1, 15), day(1, 28), 5.0).unwrap(),
    /// ];
    /// let backlog = Backlog::new(vec![
    ///     Story::new("design", 4.0).unwrap().with_child("build"),
    ///     Story::new("build", 5.0).unwrap().with_priority(1.0),
    /// ])
    /// .unwrap();
    ///
    /// let schedule = Planner::new(PlanConfig::default()).plan(backlog, sprints).unwrap();
    /// assert!(schedule.is_complete());
    /// assert_eq!(schedule.sprints()[0].stories(), &["design".to_string()]);
    /// assert_eq!(schedule.sprints()[1].stories(), &["build".to_string()]);
    /// ```
    pub fn plan(&self, mut backlog: Backlog, mut sprints: Vec<Sprint>) -> Result<Schedule> {
        let normalization = if self.config.normalize {
            Some(Normalizer::run(&mut backlog)?)
        } else {
            None
        };

        let order = Orderer::standard().order_backlog(&backlog);

        if self.config.sort_sprints {
            sprints.sort_by_key(|s| s.end_date());
        }

        let slotting = SlotRunner::run(&mut backlog, &order, &mut sprints, &self.config.slotting);

        info!(
            stories = backlog.len(),
            sprints = sprints.len(),
            placed = slotting.placed,
            overflow = slotting.overflow.len(),
            "Planned backlog"
        );

        Ok(Schedule {
            backlog,
            sprints,
            order,
            slotting,
            normalization,
        })
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(PlanConfig::default())
    }
}

/// Plans with the default configuration.
pub fn plan(backlog: Backlog, sprints: Vec<Sprint>) -> Result<Schedule> {
    Planner::default().plan(backlog, sprints)
}
