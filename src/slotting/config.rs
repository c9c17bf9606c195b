//! Slotting configuration.

/// Which constraints the slotter enforces.
///
/// All switches default to on. Disabling the calendar check and start-date
/// propagation gives the capacity-only variant, where only sprint and
/// assignee budgets matter.
///
/// # Examples
///
/// ```
/// use u_sprint::slotting::SlotConfig;
///
/// let config = SlotConfig::default()
///     .with_calendar(false)
///     .with_start_date_propagation(false);
/// assert!(!config.enforce_calendar);
/// assert!(config.enforce_assignee_capacity);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotConfig {
    /// Require the sprint window to overlap the story window.
    pub enforce_calendar: bool,
    /// Respect per-assignee budgets.
    pub enforce_assignee_capacity: bool,
    /// Push children's start dates behind their parent's sprint.
    pub propagate_start_dates: bool,
    /// Drop sprints with no capacity left from further consideration.
    pub prune_full_sprints: bool,
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            enforce_calendar: true,
            enforce_assignee_capacity: true,
            propagate_start_dates: true,
            prune_full_sprints: true,
        }
    }
}

impl SlotConfig {
    /// Enables or disables the calendar window check.
    pub fn with_calendar(mut self, enabled: bool) -> Self {
        self.enforce_calendar = enabled;
        self
    }

    /// Enables or disables per-assignee budgets.
    pub fn with_assignee_capacity(mut self, enabled: bool) -> Self {
        self.enforce_assignee_capacity = enabled;
        self
    }

    /// Enables or disables start-date back-propagation to children.
    pub fn with_start_date_propagation(mut self, enabled: bool) -> Self {
        self.propagate_start_dates = enabled;
        self
    }

    /// Enables or disables pruning of full sprints.
    pub fn with_pruning(mut self, enabled: bool) -> Self {
        self.prune_full_sprints = enabled;
        self
    }
}
