//! Virtual nodes and the construction helpers that build them.
//!
//! A virtual tree is immutable once built: [`Element`] exposes read-only
//! accessors and every render cycle builds a fresh tree.
//!
//! # Example
//!
//! ```ignore
//! let tree = Element::build("form")
//!     .attr("id", "login")
//!     .on("submit", |_: &EventData| {})
//!     .child(Element::build("input").attr("value", "").finish()?)
//!     .child("Sign in")
//!     .finish()?;
//! ```

use super::attr::{AttrValue, Attributes, Callback, EVENT_PREFIX, is_event_name};
use super::leaf::Leaf;
use crate::error::{Error, Result};

// ============================================================================
// VNode
// ============================================================================

/// A position in a virtual tree: a leaf value or an element.
#[derive(Debug, Clone, PartialEq)]
pub enum VNode {
    Leaf(Leaf),
    Element(Element),
}

impl VNode {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Leaf(Leaf::Text(text.into()))
    }

    pub fn number(n: impl Into<f64>) -> Self {
        Self::Leaf(Leaf::Number(n.into()))
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Element(_) => None,
        }
    }

    /// Children of an element; leaves have none.
    pub fn children(&self) -> &[VNode] {
        match self {
            Self::Element(element) => element.children(),
            Self::Leaf(_) => &[],
        }
    }

    /// Short description for log lines: `<tag>` or the leaf kind.
    pub fn describe(&self) -> String {
        match self {
            Self::Element(element) => format!("<{}>", element.tag()),
            Self::Leaf(leaf) => leaf.kind().to_string(),
        }
    }

    /// Number of nodes in this subtree, self included.
    pub fn size(&self) -> usize {
        1 + self.children().iter().map(VNode::size).sum::<usize>()
    }
}

impl From<Leaf> for VNode {
    fn from(leaf: Leaf) -> Self {
        Self::Leaf(leaf)
    }
}

impl From<Element> for VNode {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<&str> for VNode {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for VNode {
    fn from(text: String) -> Self {
        Self::text(text)
    }
}

impl From<i32> for VNode {
    fn from(n: i32) -> Self {
        Self::Leaf(Leaf::from(n))
    }
}

impl From<f64> for VNode {
    fn from(n: f64) -> Self {
        Self::Leaf(Leaf::from(n))
    }
}

// ============================================================================
// Element
// ============================================================================

/// Element node: tag, attribute mapping and ordered children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    attrs: Attributes,
    children: Vec<VNode>,
}

impl Element {
    /// Start building an element of the given tag.
    pub fn build(tag: impl Into<String>) -> ElementBuilder {
        ElementBuilder::new(tag)
    }

    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[inline]
    pub fn attrs(&self) -> &Attributes {
        &self.attrs
    }

    #[inline]
    pub fn children(&self) -> &[VNode] {
        &self.children
    }
}

/// Builder for [`Element`]. Attribute kinds are checked in [`finish`](Self::finish).
#[derive(Debug, Clone)]
pub struct ElementBuilder {
    tag: String,
    attrs: Vec<(String, AttrValue)>,
    children: Vec<VNode>,
}

impl ElementBuilder {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Literal attribute.
    pub fn attr(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, AttrValue::Text(value.into()))
    }

    /// Event handler for `kind`, stored under `on{kind}`.
    pub fn on(self, kind: &str, callback: impl Into<Callback>) -> Self {
        self.set(format!("on{kind}"), AttrValue::Handler(callback.into()))
    }

    /// Raw attribute entry; a later entry with the same name wins.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn child(mut self, child: impl Into<VNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<VNode>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Validate attribute kinds and produce the element.
    pub fn finish(self) -> Result<Element> {
        let mut attrs = Attributes::new();
        for (name, value) in self.attrs {
            check_attr(&self.tag, &name, &value)?;
            attrs.insert(name, value);
        }
        Ok(Element {
            tag: self.tag,
            attrs,
            children: self.children,
        })
    }
}

/// Reject values whose kind does not match the attribute name.
fn check_attr(tag: &str, name: &str, value: &AttrValue) -> Result<()> {
    if is_event_name(name) {
        if name.len() == EVENT_PREFIX.len() {
            return Err(Error::EmptyEventKind {
                tag: tag.to_string(),
            });
        }
        if !value.is_handler() {
            return Err(Error::ListenerNotCallback {
                tag: tag.to_string(),
                name: name.to_string(),
            });
        }
    } else if value.is_handler() {
        return Err(Error::CallbackOnLiteral {
            tag: tag.to_string(),
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Construction helper: tag, attribute mapping and children in one call.
///
/// ```ignore
/// let node = h("p", [("class", "lead")], ["hello"])?;
/// ```
pub fn h<A, K, V, C>(tag: &str, attrs: A, children: C) -> Result<VNode>
where
    A: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<AttrValue>,
    C: IntoIterator,
    C::Item: Into<VNode>,
{
    let builder = attrs
        .into_iter()
        .fold(ElementBuilder::new(tag), |builder, (name, value)| {
            builder.set(name, value)
        });
    builder.children(children).finish().map(VNode::Element)
}
