//! Deterministic multi-key story ordering.
//!
//! Produces the greedy slotting sequence. The standard order is:
//!
//! 1. **Priority**, descending
//! 2. **Deadline**, ascending (ties on priority)
//! 3. **Size**, descending (ties on priority and deadline)
//!
//! Stories tied on every key keep their original relative order.
//!
//! # Design
//!
//! Each rule is applied as its own *stable* sorting pass, least significant
//! rule first. Composing stable passes in increasing significance yields the
//! lexicographic order with input-order tie-breaking. Reversing the pass
//! order changes the result.
//!
//! # References
//!
//! Knuth (1998), "The Art of Computer Programming, Vol. 3", §5.2
//! (radix-style sorting by successive stable passes)

mod engine;
pub mod rules;
mod types;

pub use engine::Orderer;
pub use types::OrderingRule;
