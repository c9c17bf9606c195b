//! Rule composition engine.

use super::rules::{DeadlineAsc, PriorityDesc, SizeDesc};
use super::types::OrderingRule;
use crate::model::{Backlog, Story};

/// Engine composing ordering rules into one total order.
///
/// Rules are listed most significant first. Sorting runs one stable pass
/// per rule in *reverse* order, so later rules only decide between items
/// the earlier rules consider equal, and full ties keep input order.
///
/// # Examples
///
/// ```
/// use u_sprint::model::Story;
/// use u_sprint::ordering::Orderer;
///
/// let stories = vec![
///     Story::new("small", 1.0).unwrap(),
///     Story::new("urgent", 2.0).unwrap().with_priority(5.0),
///     Story::new("large", 8.0).unwrap(),
/// ];
///
/// let order = Orderer::standard().sort_indices(&stories);
/// assert_eq!(order, vec![1, 2, 0]);
/// ```
pub struct Orderer<T> {
    rules: Vec<Box<dyn OrderingRule<T>>>,
}

impl<T> Orderer<T> {
    /// Creates an engine with no rules (input order is kept).
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Appends a rule with lower significance than those already added.
    pub fn with_rule<R: OrderingRule<T> + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Returns the number of rules in this engine.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the names of all rules, most significant first.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Sorts items and returns indices into the original slice.
    pub fn sort_indices(&self, items: &[T]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..items.len()).collect();
        for rule in self.rules.iter().rev() {
            indices.sort_by(|&a, &b| rule.compare(&items[a], &items[b]));
        }
        indices
    }

    /// Sorts items and returns references in sorted order.
    pub fn sort<'a>(&self, items: &'a [T]) -> Vec<&'a T> {
        self.sort_indices(items)
            .into_iter()
            .map(|i| &items[i])
            .collect()
    }
}

impl Orderer<Story> {
    /// Priority descending, then deadline ascending, then size descending.
    pub fn standard() -> Self {
        Self::new()
            .with_rule(PriorityDesc)
            .with_rule(DeadlineAsc)
            .with_rule(SizeDesc)
    }

    /// Slotting sequence for a backlog, as indices in backlog order.
    pub fn order_backlog(&self, backlog: &Backlog) -> Vec<usize> {
        self.sort_indices(backlog.stories())
    }
}

impl<T> Default for Orderer<T> {
    fn default() -> Self {
        Self::new()
    }
}
