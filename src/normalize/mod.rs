//! Dependency normalization.
//!
//! Tightens every story so that it is never less urgent than the stories
//! that depend on it:
//!
//! - `priority >= max(child.priority)`
//! - `deadline <= min(child.deadline) - 1 day`
//!
//! Children are normalized first (depth-first, post-order), so the bounds
//! hold transitively once the pass completes. Values are only ever raised
//! (priority) or lowered (deadline), never loosened.
//!
//! # Memoization
//!
//! Aggregates are cached per *exact* sorted child-id set. Two parents share
//! work only when their child sets are identical; a DAG in which every
//! parent has a distinct child set gets no reuse.

mod runner;

pub use runner::{NormalizeReport, Normalizer};
