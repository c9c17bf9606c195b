//! Property tests over randomly generated acyclic backlogs.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use proptest::sample::Index;
use u_sprint::model::{Backlog, Sprint, SprintId, SprintIdGenerator, Story};
use u_sprint::normalize::Normalizer;
use u_sprint::ordering::Orderer;
use u_sprint::planner::plan;

const ASSIGNEES: [&str; 3] = ["X", "Y", "Z"];

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

type StoryRow = (u8, i8, Option<u8>, Option<u8>, Vec<Index>, Option<usize>);

/// Stories whose children always have a larger index, so the graph is a DAG.
fn stories() -> impl Strategy<Value = Vec<Story>> {
    let row = (
        0u8..10,
        -5i8..5,
        prop::option::of(0u8..60),
        prop::option::of(0u8..120),
        prop::collection::vec(any::<Index>(), 0..3),
        prop::option::of(0usize..ASSIGNEES.len()),
    );
    prop::collection::vec(row, 1..25).prop_map(|rows: Vec<StoryRow>| {
        let n = rows.len();
        rows.into_iter()
            .enumerate()
            .map(|(i, (size, priority, start, span, kids, assignee))| {
                let mut story = Story::new(format!("s{i:02}"), f64::from(size))
                    .unwrap()
                    .with_priority(f64::from(priority));
                let start_offset = u64::from(start.unwrap_or(0));
                if start.is_some() {
                    story = story.with_start_date(base() + Days::new(start_offset));
                }
                if let Some(span) = span {
                    story = story.with_deadline(base() + Days::new(start_offset + u64::from(span)));
                }
                for kid in kids {
                    let j = kid.index(n);
                    if j > i {
                        story = story.with_child(format!("s{j:02}"));
                    }
                }
                if let Some(a) = assignee {
                    story = story.with_assignee(ASSIGNEES[a]);
                }
                story
            })
            .collect()
    })
}

/// Consecutive, non-overlapping two-week sprints.
fn sprints() -> impl Strategy<Value = Vec<Sprint>> {
    prop::collection::vec((0u8..20, prop::option::of(0u8..6)), 0..5).prop_map(|rows| {
        let mut ids = SprintIdGenerator::new();
        rows.into_iter()
            .enumerate()
            .map(|(n, (capacity, budget))| {
                let start = base() + Days::new(14 * n as u64);
                let sprint =
                    Sprint::new(ids.next_id(), start, start + Days::new(13), f64::from(capacity))
                        .unwrap();
                match budget {
                    Some(b) => sprint.with_assignee_capacity("X", f64::from(b)).unwrap(),
                    None => sprint,
                }
            })
            .collect()
    })
}

fn snapshot(backlog: &Backlog) -> Vec<(f64, NaiveDate)> {
    backlog.iter().map(|s| (s.priority(), s.deadline())).collect()
}

proptest! {
    #[test]
    fn normalization_is_idempotent(stories in stories()) {
        let mut backlog = Backlog::new(stories).unwrap();
        Normalizer::run(&mut backlog).unwrap();
        let once = snapshot(&backlog);
        Normalizer::run(&mut backlog).unwrap();
        prop_assert_eq!(once, snapshot(&backlog));
    }

    #[test]
    fn normalization_bounds_hold(stories in stories()) {
        let mut backlog = Backlog::new(stories).unwrap();
        Normalizer::run(&mut backlog).unwrap();

        for story in backlog.iter() {
            prop_assert!(story.is_normalized());
            for id in story.children() {
                let child = backlog.get(id).unwrap();
                let limit = child.deadline().pred_opt().unwrap_or(NaiveDate::MIN);
                prop_assert!(story.priority() >= child.priority());
                prop_assert!(story.deadline() <= limit);
            }
        }
    }

    #[test]
    fn ordering_is_lexicographic_and_stable(stories in stories()) {
        let backlog = Backlog::new(stories).unwrap();
        let order = Orderer::standard().order_backlog(&backlog);

        let mut sorted = order.clone();
        sorted.sort_unstable();
        prop_assert_eq!(sorted, (0..backlog.len()).collect::<Vec<_>>());

        let all = backlog.stories();
        for pair in order.windows(2) {
            let (a, b) = (&all[pair[0]], &all[pair[1]]);
            let key_a = (-a.priority(), a.deadline(), -a.size());
            let key_b = (-b.priority(), b.deadline(), -b.size());
            prop_assert!(key_a <= key_b);
            if key_a == key_b {
                prop_assert!(pair[0] < pair[1]);
            }
        }
    }

    #[test]
    fn capacity_is_conserved(stories in stories(), sprints in sprints()) {
        let schedule = plan(Backlog::new(stories).unwrap(), sprints).unwrap();

        for sprint in schedule.sprints() {
            let placed: f64 = sprint
                .stories()
                .iter()
                .map(|id| schedule.story(id).unwrap().size())
                .sum();
            prop_assert!((sprint.used_capacity() - placed).abs() < 1e-9);
            prop_assert!(sprint.available_capacity() >= 0.0);
            for (_, used, total) in sprint.assignee_workload() {
                prop_assert!(used <= total + 1e-9);
            }
        }
    }

    #[test]
    fn every_story_is_placed_or_overflows_once(stories in stories(), sprints in sprints()) {
        let n = stories.len();
        let schedule = plan(Backlog::new(stories).unwrap(), sprints).unwrap();

        let mut count: HashMap<&str, usize> = HashMap::new();
        for sprint in schedule.sprints() {
            for id in sprint.stories() {
                *count.entry(id.as_str()).or_default() += 1;
                prop_assert_eq!(schedule.story(id).unwrap().assigned_sprint(), Some(sprint.id()));
            }
        }
        for id in schedule.overflow() {
            *count.entry(id.as_str()).or_default() += 1;
            prop_assert!(schedule.story(id).unwrap().assigned_sprint().is_none());
        }
        prop_assert_eq!(count.len(), n);
        prop_assert!(count.values().all(|&c| c == 1));
    }

    #[test]
    fn children_never_precede_parents(stories in stories(), sprints in sprints()) {
        let schedule = plan(Backlog::new(stories).unwrap(), sprints).unwrap();
        let position: HashMap<SprintId, usize> = schedule
            .sprints()
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id(), i))
            .collect();

        for parent in schedule.backlog().iter() {
            for id in parent.children() {
                let child = schedule.story(id).unwrap();
                match (parent.assigned_sprint(), child.assigned_sprint()) {
                    (Some(p), Some(c)) => {
                        prop_assert!(position[&c] >= position[&p]);
                    }
                    (None, placed) => {
                        prop_assert!(placed.is_none());
                    }
                    (Some(_), None) => {}
                }
            }
        }
    }
}
