//! Change classification.
//!
//! Pure function over two virtual nodes at the same tree position. The
//! result is one discrete verdict, and the reconciler maps each verdict to
//! exactly one action.

use std::fmt;

use crate::core::VNode;

/// How two same-position virtual nodes differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Change {
    /// Different node kinds (leaf vs element, or text vs number)
    Type,
    /// Both leaves, different values
    Text,
    /// Both elements, different tags
    Node,
    /// Same tag, different `value` attribute - applied to the live value
    Value,
    /// Same tag and value, different attribute mapping
    Attr,
    /// Nothing to do at this node (children are still walked)
    None,
}

impl Change {
    /// Whether the host node at this position is rebuilt from scratch.
    #[inline]
    pub fn replaces(self) -> bool {
        matches!(self, Self::Type | Self::Text | Self::Node)
    }

    /// Whether the reconciler walks into children after handling this node.
    #[inline]
    pub fn descends(self) -> bool {
        matches!(self, Self::Attr | Self::None)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Text => "text",
            Self::Node => "node",
            Self::Value => "value",
            Self::Attr => "attr",
            Self::None => "none",
        }
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify a pair of nodes. First match wins:
///
/// 1. kind mismatch -> `Type`
/// 2. leaves with different values -> `Text`
/// 3. leaves with equal values -> `None`
/// 4. elements with different tags -> `Node`
/// 5. different `value` attribute -> `Value` (checked before the full mapping)
/// 6. different attribute mapping -> `Attr`
/// 7. otherwise -> `None`
pub fn classify(a: &VNode, b: &VNode) -> Change {
    match (a, b) {
        (VNode::Leaf(x), VNode::Leaf(y)) if !x.same_kind(y) => Change::Type,
        (VNode::Leaf(x), VNode::Leaf(y)) if x != y => Change::Text,
        (VNode::Leaf(_), VNode::Leaf(_)) => Change::None,
        (VNode::Element(x), VNode::Element(y)) => {
            if x.tag() != y.tag() {
                Change::Node
            } else if x.attrs().value() != y.attrs().value() {
                Change::Value
            } else if x.attrs() != y.attrs() {
                Change::Attr
            } else {
                Change::None
            }
        }
        (VNode::Leaf(_), VNode::Element(_)) | (VNode::Element(_), VNode::Leaf(_)) => Change::Type,
    }
}
