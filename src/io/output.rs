//! Machine-readable schedule summary.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{PlanError, Result};
use crate::planner::Schedule;

/// Compact per-sprint result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SprintSummary {
    pub id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Placed story ids, in placement order.
    pub stories: Vec<String>,
    pub total_capacity: f64,
    pub available_capacity: f64,
    /// Capacity used per configured assignee.
    pub assignee_workload: BTreeMap<String, f64>,
}

/// Deterministic summary of a schedule: the same input always produces
/// the same document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleSummary {
    pub sprints: Vec<SprintSummary>,
    /// Ids of stories that could not be placed, in slotting order.
    pub remaining: Vec<String>,
}

impl ScheduleSummary {
    pub fn from_schedule(schedule: &Schedule) -> Self {
        let sprints = schedule
            .sprints()
            .iter()
            .map(|sprint| SprintSummary {
                id: sprint.id().0,
                name: sprint.name.clone(),
                stories: sprint.stories().to_vec(),
                total_capacity: sprint.total_capacity(),
                available_capacity: sprint.available_capacity(),
                assignee_workload: sprint
                    .assignee_workload()
                    .map(|(name, used, _)| (name.to_string(), used))
                    .collect(),
            })
            .collect();
        Self {
            sprints,
            remaining: schedule.overflow().to_vec(),
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| PlanError::Serialize(e.to_string()))
    }
}

/// Writes the schedule summary as pretty-printed JSON.
pub fn write_summary(schedule: &Schedule, path: impl AsRef<Path>) -> Result<()> {
    let json = ScheduleSummary::from_schedule(schedule).to_json()?;
    fs::write(path, json)?;
    Ok(())
}
