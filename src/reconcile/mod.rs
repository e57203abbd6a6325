//! Reconciliation pipeline.
//!
//! ```text
//! (old, new) -> classify -> Type/Text/Node  -> materialize + replace
//!                        -> Value           -> set live value
//!                        -> Attr            -> attribute delta + children
//!                        -> None            -> children
//! ```
//!
//! # Modules
//!
//! - `classify` - one verdict per same-position node pair
//! - `materialize` - build a fresh host subtree from a virtual node
//! - `patch` - positional walk driving the host mutations
//! - `summary` - per-pass mutation counters

mod classify;
mod materialize;
mod patch;
mod summary;

pub use classify::{Change, classify};
pub use materialize::create_element;
pub use patch::{Reconciler, update_element, update_element_at};
pub use summary::PatchSummary;
