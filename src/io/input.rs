//! Input document loading.
//!
//! ```json
//! {
//!   "sprints": [
//!     {"name": "S1", "start_date": "2024-01-01", "end_date": "2024-01-14",
//!      "capacity": 15, "assignee_capacities": {"X": 3}}
//!   ],
//!   "stories": [
//!     {"id": "A", "size": 3, "priority": 1, "end_date": "2024-02-01",
//!      "assignee": "X", "prerequisite_for": ["B"], "epic": "Login"}
//!   ]
//! }
//! ```
//!
//! Story ids may be strings or numbers. Keys not listed above are kept as
//! display fields on the story.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::error::{PlanError, Result};
use crate::model::{Backlog, Sprint, SprintIdGenerator, Story, NO_START};

#[derive(Debug, Deserialize)]
struct InputDocument {
    #[serde(default)]
    sprints: Vec<SprintRecord>,
    #[serde(default)]
    stories: Vec<StoryRecord>,
}

#[derive(Debug, Deserialize)]
struct SprintRecord {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    start_date: Option<NaiveDate>,
    end_date: NaiveDate,
    capacity: f64,
    #[serde(default)]
    assignee_capacities: BTreeMap<String, f64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoryKey {
    Text(String),
    Number(serde_json::Number),
}

impl StoryKey {
    fn into_id(self) -> String {
        match self {
            StoryKey::Text(s) => s,
            StoryKey::Number(n) => n.to_string(),
        }
    }
}

fn default_size() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
struct StoryRecord {
    id: StoryKey,
    #[serde(default)]
    name: Option<String>,
    #[serde(default = "default_size")]
    size: f64,
    #[serde(default)]
    priority: f64,
    #[serde(default)]
    start_date: Option<NaiveDate>,
    #[serde(default, alias = "deadline")]
    end_date: Option<NaiveDate>,
    #[serde(default)]
    assignee: Option<String>,
    #[serde(default)]
    prerequisite_for: Vec<StoryKey>,
    #[serde(flatten)]
    extra: BTreeMap<String, serde_json::Value>,
}

impl StoryRecord {
    fn into_story(self) -> Result<Story> {
        let mut story = Story::new(self.id.into_id(), self.size)?.with_priority(self.priority);
        if let Some(name) = self.name {
            story = story.with_name(name);
        }
        if let Some(start) = self.start_date {
            story = story.with_start_date(start);
        }
        if let Some(end) = self.end_date {
            story = story.with_deadline(end);
        }
        if let Some(assignee) = self.assignee {
            story = story.with_assignee(assignee);
        }
        for child in self.prerequisite_for {
            story = story.with_child(child.into_id());
        }
        for (key, value) in self.extra {
            let text = match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            story = story.with_field(key, text);
        }
        Ok(story)
    }
}

/// Parses an input document into a backlog and sprints (in file order).
///
/// # Examples
///
/// ```
/// let input = r#"{
///     "sprints": [{"end_date": "2024-01-14", "capacity": 10}],
///     "stories": [{"id": 1, "size": 2, "prerequisite_for": [2]}, {"id": 2}]
/// }"#;
/// let (backlog, sprints) = u_sprint::io::load_str(input).unwrap();
/// assert_eq!(backlog.len(), 2);
/// assert_eq!(sprints.len(), 1);
/// assert!(backlog.get("1").unwrap().has_children());
/// ```
pub fn load_str(input: &str) -> Result<(Backlog, Vec<Sprint>)> {
    let document: InputDocument =
        serde_json::from_str(input).map_err(|e| PlanError::Parse(e.to_string()))?;

    let mut ids = SprintIdGenerator::new();
    let mut sprints = Vec::with_capacity(document.sprints.len());
    for record in document.sprints {
        let start = record.start_date.unwrap_or(NO_START);
        let mut sprint = Sprint::new(ids.next_id(), start, record.end_date, record.capacity)?;
        if let Some(name) = record.name {
            sprint = sprint.with_name(name);
        }
        for (assignee, capacity) in record.assignee_capacities {
            sprint = sprint.with_assignee_capacity(assignee, capacity)?;
        }
        sprints.push(sprint);
    }

    let stories = document
        .stories
        .into_iter()
        .map(StoryRecord::into_story)
        .collect::<Result<Vec<_>>>()?;
    let backlog = Backlog::new(stories)?;

    debug!(
        stories = backlog.len(),
        sprints = sprints.len(),
        "Loaded input document"
    );
    Ok((backlog, sprints))
}

/// Reads and parses an input document from a file.
pub fn load_path(path: impl AsRef<Path>) -> Result<(Backlog, Vec<Sprint>)> {
    let text = fs::read_to_string(path)?;
    load_str(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SprintId, NO_DEADLINE};

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[test]
    fn test_full_document() {
        let input = r#"{
            "sprints": [
                {"name": "S1", "start_date": "2024-01-01", "end_date": "2024-01-14",
                 "capacity": 15, "assignee_capacities": {"X": 3}},
                {"end_date": "2024-01-28", "capacity": 15.5}
            ],
            "stories": [
                {"id": "A", "name": "Login", "size": 3, "priority": 1.5,
                 "start_date": "2024-01-02", "end_date": "2024-02-01",
                 "assignee": "X", "prerequisite_for": ["B"], "epic": "Auth", "points": 8},
                {"id": "B"}
            ]
        }"#;

        let (backlog, sprints) = load_str(input).unwrap();

        assert_eq!(sprints[0].id(), SprintId(1));
        assert_eq!(sprints[0].name.as_deref(), Some("S1"));
        assert_eq!(sprints[0].assignee_available("X"), Some(3.0));
        assert_eq!(sprints[1].id(), SprintId(2));
        assert_eq!(sprints[1].start_date(), NO_START);
        assert_eq!(sprints[1].total_capacity(), 15.5);

        let a = backlog.get("A").unwrap();
        assert_eq!(a.size(), 3.0);
        assert_eq!(a.priority(), 1.5);
        assert_eq!(a.start_date(), day(1, 2));
        assert_eq!(a.deadline(), day(2, 1));
        assert_eq!(a.assignee.as_deref(), Some("X"));
        assert_eq!(a.children().collect::<Vec<_>>(), vec!["B"]);
        assert_eq!(a.additional_fields.get("epic").map(String::as_str), Some("Auth"));
        assert_eq!(a.additional_fields.get("points").map(String::as_str), Some("8"));

        let b = backlog.get("B").unwrap();
        assert_eq!(b.size(), 1.0);
        assert_eq!(b.deadline(), NO_DEADLINE);
        assert!(b.additional_fields.is_empty());
    }

    #[test]
    fn test_deadline_alias() {
        let input = r#"{"stories": [{"id": "A", "deadline": "2024-03-01"}]}"#;
        let (backlog, _) = load_str(input).unwrap();
        assert_eq!(backlog.get("A").unwrap().deadline(), day(3, 1));
    }

    #[test]
    fn test_numeric_ids() {
        let input = r#"{"stories": [{"id": 7, "prerequisite_for": [8]}, {"id": 8}]}"#;
        let (backlog, _) = load_str(input).unwrap();
        assert!(backlog.get("7").is_some());
        assert_eq!(backlog.get("7").unwrap().children().collect::<Vec<_>>(), vec!["8"]);
    }

    #[test]
    fn test_negative_size_rejected() {
        let input = r#"{"stories": [{"id": "A", "size": -2}]}"#;
        assert!(matches!(
            load_str(input),
            Err(PlanError::InvalidSize { .. })
        ));
    }

    #[test]
    fn test_dangling_prerequisite_rejected() {
        let input = r#"{"stories": [{"id": "A", "prerequisite_for": ["Z"]}]}"#;
        assert!(matches!(
            load_str(input),
            Err(PlanError::UnknownStory { .. })
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(load_str("{not json"), Err(PlanError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = load_path("/nonexistent/u-sprint/input.json").unwrap_err();
        assert!(matches!(err, PlanError::Io(_)));
    }

    #[test]
    fn test_load_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.json");
        fs::write(&path, r#"{"sprints": [], "stories": [{"id": "A"}]}"#).unwrap();
        let (backlog, sprints) = load_path(&path).unwrap();
        assert_eq!(backlog.len(), 1);
        assert!(sprints.is_empty());
    }
}
