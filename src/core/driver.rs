//! Host driver capability set.
//!
//! The reconciler never owns host nodes. It holds opaque [`HostDriver::Node`]
//! handles, borrows them for each call, and performs every mutation through
//! the driver. A browser binding, a terminal renderer or the in-memory
//! [`MemoryHost`](crate::host::MemoryHost) all plug in here.

use thiserror::Error;

use super::attr::Callback;

/// Failures reported by a host driver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("unknown host node `{0}`")]
    UnknownNode(String),

    #[error("tag `{0}` is not part of the host vocabulary")]
    InvalidTag(String),

    #[error("host node `{child}` is not a child of `{parent}`")]
    NotAChild { parent: String, child: String },

    #[error("host node `{0}` is not an element")]
    NotAnElement(String),

    #[error("host rejected the operation: {0}")]
    Rejected(String),
}

/// Primitive host-tree operations consumed by the reconciler.
pub trait HostDriver {
    /// Opaque handle to a live host node.
    type Node: Clone;

    /// Create a detached text node.
    fn create_leaf(&mut self, text: &str) -> Result<Self::Node, HostError>;

    /// Create a detached element of kind `tag`.
    fn create_element(&mut self, tag: &str) -> Result<Self::Node, HostError>;

    fn set_attribute(
        &mut self,
        node: &Self::Node,
        name: &str,
        value: &str,
    ) -> Result<(), HostError>;

    fn remove_attribute(&mut self, node: &Self::Node, name: &str) -> Result<(), HostError>;

    /// Subscribe `callback` to events of `kind` on `node`.
    fn add_event_listener(
        &mut self,
        node: &Self::Node,
        kind: &str,
        callback: &Callback,
    ) -> Result<(), HostError>;

    /// Drop a subscription made with [`add_event_listener`](Self::add_event_listener).
    ///
    /// Only called when listeners are rebound across renders.
    fn remove_event_listener(
        &mut self,
        node: &Self::Node,
        kind: &str,
        callback: &Callback,
    ) -> Result<(), HostError>;

    /// Append `child` as the last child of `parent`.
    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<(), HostError>;

    /// Put `new` where `old` is under `parent`; `old` becomes detached.
    fn replace_child(
        &mut self,
        parent: &Self::Node,
        old: &Self::Node,
        new: &Self::Node,
    ) -> Result<(), HostError>;

    fn remove_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<(), HostError>;

    /// Child of `parent` at `index`, if there is one.
    fn child_at(&self, parent: &Self::Node, index: usize) -> Option<Self::Node>;

    /// Write the live value of an input-like node without recreating it, so
    /// focus and caret position survive.
    fn set_live_value(&mut self, node: &Self::Node, value: &str) -> Result<(), HostError>;
}
