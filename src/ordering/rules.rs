//! Built-in story ordering rules.

use std::cmp::Ordering;

use super::types::OrderingRule;
use crate::model::Story;

/// Higher priority first.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityDesc;

impl OrderingRule<Story> for PriorityDesc {
    fn name(&self) -> &str {
        "PriorityDesc"
    }

    fn compare(&self, a: &Story, b: &Story) -> Ordering {
        b.priority()
            .partial_cmp(&a.priority())
            .unwrap_or(Ordering::Equal)
    }
}

/// Earlier deadline first (earliest due date).
#[derive(Debug, Clone, Copy, Default)]
pub struct DeadlineAsc;

impl OrderingRule<Story> for DeadlineAsc {
    fn name(&self) -> &str {
        "DeadlineAsc"
    }

    fn compare(&self, a: &Story, b: &Story) -> Ordering {
        a.deadline().cmp(&b.deadline())
    }
}

/// Larger size first.
#[derive(Debug, Clone, Copy, Default)]
pub struct SizeDesc;

impl OrderingRule<Story> for SizeDesc {
    fn name(&self) -> &str {
        "SizeDesc"
    }

    fn compare(&self, a: &Story, b: &Story) -> Ordering {
        b.size().partial_cmp(&a.size()).unwrap_or(Ordering::Equal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_priority_desc() {
        let hi = Story::new("hi", 1.0).unwrap().with_priority(3.0);
        let lo = Story::new("lo", 1.0).unwrap().with_priority(-3.0);
        assert_eq!(PriorityDesc.compare(&hi, &lo), Ordering::Less);
        assert_eq!(PriorityDesc.compare(&lo, &hi), Ordering::Greater);
    }

    #[test]
    fn test_deadline_asc() {
        let soon = Story::new("soon", 1.0)
            .unwrap()
            .with_deadline(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let open = Story::new("open", 1.0).unwrap();
        assert_eq!(DeadlineAsc.compare(&soon, &open), Ordering::Less);
    }

    #[test]
    fn test_size_desc() {
        let big = Story::new("big", 8.0).unwrap();
        let small = Story::new("small", 1.0).unwrap();
        assert_eq!(SizeDesc.compare(&big, &small), Ordering::Less);
        assert_eq!(SizeDesc.compare(&big, &big), Ordering::Equal);
    }
}
