//! Core trait for ordering rules.

use std::cmp::Ordering;

/// A single sort key over items of type `T`.
///
/// `compare` returns [`Ordering::Less`] when `a` should come **before** `b`.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use u_sprint::ordering::OrderingRule;
///
/// struct Shortest;
///
/// impl OrderingRule<String> for Shortest {
///     fn name(&self) -> &str { "Shortest" }
///     fn compare(&self, a: &String, b: &String) -> Ordering {
///         a.len().cmp(&b.len())
///     }
/// }
/// ```
pub trait OrderingRule<T>: Send + Sync {
    /// Returns the name of this rule.
    fn name(&self) -> &str;

    /// Compares two items under this rule alone.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}
