//! Tola Reconcile - positional virtual-tree reconciliation.
//!
//! Describes a UI as a tree of [`VNode`]s and keeps a live host tree in sync
//! with successive renders. Children are matched by position only; the host
//! is reached exclusively through a [`HostDriver`].
//!
//! ```ignore
//! let mut host = MemoryHost::new();
//! let root = host.create_element("div")?;
//!
//! let first = h("p", [("class", "note")], ["draft"])?;
//! update_element(&mut host, &root, None, Some(&first))?;
//!
//! let second = h("p", [("class", "note")], ["final"])?;
//! let summary = update_element(&mut host, &root, Some(&first), Some(&second))?;
//! assert_eq!(summary.replaced, 1);
//! ```

pub mod logger;

pub mod config;
pub mod core;
pub mod error;
pub mod host;
pub mod reconcile;
mod utils;

pub use config::{ListenerPolicy, ReconcileConfig};
pub use crate::core::{Callback, Element, EventData, HostDriver, HostError, VNode, h};
pub use error::{Error, Result};
pub use reconcile::{
    Change, PatchSummary, Reconciler, classify, create_element, update_element, update_element_at,
};
