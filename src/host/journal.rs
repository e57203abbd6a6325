//! Mutation journal of the in-memory host.
//!
//! Every driver call that changes host state is recorded in order, so tests
//! (and embedders replaying a pass elsewhere) can see exactly what a
//! reconciliation did.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Handle of a node in a [`MemoryHost`](super::MemoryHost).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One recorded host mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Mutation {
    CreateLeaf {
        node: NodeId,
        text: String,
    },
    CreateElement {
        node: NodeId,
        tag: String,
    },
    SetAttribute {
        node: NodeId,
        name: String,
        value: String,
    },
    RemoveAttribute {
        node: NodeId,
        name: String,
    },
    AddListener {
        node: NodeId,
        kind: String,
    },
    RemoveListener {
        node: NodeId,
        kind: String,
    },
    AppendChild {
        parent: NodeId,
        child: NodeId,
    },
    ReplaceChild {
        parent: NodeId,
        old: NodeId,
        new: NodeId,
    },
    RemoveChild {
        parent: NodeId,
        child: NodeId,
    },
    SetLiveValue {
        node: NodeId,
        value: String,
    },
}

impl Mutation {
    /// Whether this mutation changes tree shape (as opposed to node content).
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::AppendChild { .. } | Self::ReplaceChild { .. } | Self::RemoveChild { .. }
        )
    }

    /// Whether this mutation only creates a detached node.
    pub fn is_creation(&self) -> bool {
        matches!(self, Self::CreateLeaf { .. } | Self::CreateElement { .. })
    }
}
