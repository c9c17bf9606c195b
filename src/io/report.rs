//! Human-readable schedule report.

use std::fmt::Write;

use crate::model::{Story, NO_DEADLINE, NO_START};
use crate::planner::Schedule;

const RULE: &str = "-------------";

fn story_line(story: &Story) -> String {
    let mut line = format!(
        "{} size={} priority={}",
        story.id,
        story.size(),
        story.priority()
    );
    if let Some(name) = &story.name {
        let _ = write!(line, " name={name:?}");
    }
    if let Some(assignee) = &story.assignee {
        let _ = write!(line, " assignee={assignee}");
    }
    if story.start_date() != NO_START {
        let _ = write!(line, " start={}", story.start_date());
    }
    if story.deadline() != NO_DEADLINE {
        let _ = write!(line, " deadline={}", story.deadline());
    }
    for (key, value) in &story.additional_fields {
        let _ = write!(line, " {key}={value}");
    }
    line
}

/// Renders the per-sprint report followed by the overflow list.
///
/// # Examples
///
/// ```
/// use u_sprint::model::{Backlog, Sprint, SprintId, Story};
/// use u_sprint::planner::plan;
/// use chrono::NaiveDate;
///
/// let end = NaiveDate::from_ymd_opt(2024, 1, 14).unwrap();
/// let sprints = vec![Sprint::ending(SprintId(1), end, 5.0).unwrap()];
/// let backlog = Backlog::new(vec![Story::new("A", 2.0).unwrap()]).unwrap();
///
/// let report = u_sprint::io::render_report(&plan(backlog, sprints).unwrap());
/// assert!(report.contains("Sprint 1:\tCapacity remaining: 3/5"));
/// assert!(report.contains("All stories were successfully slotted into sprints!"));
/// ```
pub fn render_report(schedule: &Schedule) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Sprints, after slotting in stories:");

    for sprint in schedule.sprints() {
        let _ = writeln!(out, "{RULE}");
        let title = match &sprint.name {
            Some(name) => format!("Sprint {} ({name})", sprint.id()),
            None => format!("Sprint {}", sprint.id()),
        };
        let _ = writeln!(
            out,
            "{title}:\tCapacity remaining: {}/{}\n",
            sprint.available_capacity(),
            sprint.total_capacity()
        );

        for story in sprint.stories().iter().filter_map(|id| schedule.story(id)) {
            let _ = writeln!(out, "{}", story_line(story));
        }
        let _ = writeln!(out);

        let mut workload = sprint.assignee_workload().peekable();
        if workload.peek().is_some() {
            let _ = writeln!(out, "\t{RULE}\n");
            let _ = writeln!(out, "\tAssignee Workload:");
            for (assignee, used, total) in workload {
                let _ = writeln!(out, "\t\t{assignee}:\t{used}/{total}");
            }
            let _ = writeln!(out);
        }

        let _ = writeln!(out, "{RULE}\n");
    }

    if schedule.is_complete() {
        let _ = writeln!(out, "All stories were successfully slotted into sprints!");
    } else {
        let _ = writeln!(
            out,
            "The following stories could not be slotted into any sprint:"
        );
        for story in schedule.overflow_stories() {
            let _ = writeln!(out, "{}", story_line(story));
        }
    }
    out
}
