//! In-memory host tree.
//!
//! [`MemoryHost`] implements [`HostDriver`](crate::core::HostDriver) over a
//! node arena and records every mutation in a [`Mutation`] journal.

mod journal;
mod memory;

pub use journal::{Mutation, NodeId};
pub use memory::MemoryHost;
