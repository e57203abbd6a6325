//! Arena-backed in-memory host tree.
//!
//! Behaves like a minimal document: elements carry literal attributes,
//! listeners and a live value; appending an attached node moves it; replaced
//! and removed nodes become detached but stay inspectable.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::Regex;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::core::{Callback, EventData, HostDriver, HostError};
use crate::debug;
use crate::utils::html::{escape, escape_attr, is_void_element};

use super::journal::{Mutation, NodeId};

/// Host element kinds: ASCII letter, then letters, digits or dashes.
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9-]*$").unwrap());

static NO_ATTRS: BTreeMap<String, String> = BTreeMap::new();

#[derive(Debug)]
struct Slot {
    parent: Option<NodeId>,
    content: Content,
}

#[derive(Debug)]
enum Content {
    Leaf(String),
    Element(ElementSlot),
}

#[derive(Debug, Default)]
struct ElementSlot {
    tag: String,
    attrs: BTreeMap<String, String>,
    listeners: FxHashMap<String, Vec<Callback>>,
    live_value: Option<String>,
    children: SmallVec<[NodeId; 4]>,
}

/// In-memory [`HostDriver`] with a mutation journal.
#[derive(Debug, Default)]
pub struct MemoryHost {
    slots: Vec<Slot>,
    journal: Vec<Mutation>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes ever created (detached ones included).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    // ------------------------------------------------------------------------
    // Journal
    // ------------------------------------------------------------------------

    pub fn journal(&self) -> &[Mutation] {
        &self.journal
    }

    pub fn take_journal(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.journal)
    }

    pub fn clear_journal(&mut self) {
        self.journal.clear();
    }

    /// Journal as a JSON array.
    pub fn journal_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.journal)
    }

    // ------------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------------

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|el| el.tag.as_str())
    }

    /// Text of a leaf node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.slots.get(id.index())?.content {
            Content::Leaf(text) => Some(text),
            Content::Element(_) => None,
        }
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attrs.get(name).map(String::as_str)
    }

    /// Literal attributes of an element, in name order.
    pub fn attributes(&self, id: NodeId) -> &BTreeMap<String, String> {
        self.element(id).map_or(&NO_ATTRS, |el| &el.attrs)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.element(id)
            .map(|el| el.children.as_slice())
            .unwrap_or_default()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slots.get(id.index())?.parent
    }

    pub fn live_value(&self, id: NodeId) -> Option<&str> {
        self.element(id)?.live_value.as_deref()
    }

    pub fn listener_count(&self, id: NodeId, kind: &str) -> usize {
        self.element(id)
            .and_then(|el| el.listeners.get(kind))
            .map_or(0, Vec::len)
    }

    /// Invoke every listener of `event.kind` on `id`; returns how many ran.
    ///
    /// When the event carries no value, the node's live value is passed along.
    pub fn dispatch(&self, id: NodeId, event: &EventData) -> usize {
        let Some(el) = self.element(id) else {
            return 0;
        };
        let Some(listeners) = el.listeners.get(&event.kind) else {
            return 0;
        };

        let data = match (&event.value, &el.live_value) {
            (None, Some(live)) => event.clone().with_value(live.clone()),
            _ => event.clone(),
        };
        for listener in listeners {
            listener.call(&data);
        }
        debug!("host"; "dispatched `{}` to {} ({} listeners)", event.kind, id, listeners.len());
        listeners.len()
    }

    /// Serialize the subtree under `id` as HTML.
    pub fn to_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_html(id, &mut out);
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        let Some(slot) = self.slots.get(id.index()) else {
            return;
        };
        match &slot.content {
            Content::Leaf(text) => out.push_str(&escape(text)),
            Content::Element(el) => {
                let _ = write!(out, "<{}", el.tag);
                for (name, value) in &el.attrs {
                    let _ = write!(out, " {}=\"{}\"", name, escape_attr(value));
                }
                out.push('>');
                if is_void_element(&el.tag) && el.children.is_empty() {
                    return;
                }
                for child in &el.children {
                    self.write_html(*child, out);
                }
                let _ = write!(out, "</{}>", el.tag);
            }
        }
    }

    // ------------------------------------------------------------------------
    // Internal
    // ------------------------------------------------------------------------

    fn element(&self, id: NodeId) -> Option<&ElementSlot> {
        match &self.slots.get(id.index())?.content {
            Content::Element(el) => Some(el),
            Content::Leaf(_) => None,
        }
    }

    fn slot_mut(&mut self, id: NodeId) -> Result<&mut Slot, HostError> {
        self.slots
            .get_mut(id.index())
            .ok_or_else(|| HostError::UnknownNode(id.to_string()))
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementSlot, HostError> {
        match &mut self.slot_mut(id)?.content {
            Content::Element(el) => Ok(el),
            Content::Leaf(_) => Err(HostError::NotAnElement(id.to_string())),
        }
    }

    fn push(&mut self, content: Content) -> Result<NodeId, HostError> {
        let index = u32::try_from(self.slots.len())
            .map_err(|_| HostError::Rejected("node arena is full".to_string()))?;
        self.slots.push(Slot {
            parent: None,
            content,
        });
        Ok(NodeId(index))
    }

    /// Position of `child` under `parent`.
    fn position(&self, parent: NodeId, child: NodeId) -> Result<usize, HostError> {
        let el = self
            .element(parent)
            .ok_or_else(|| HostError::NotAnElement(parent.to_string()))?;
        el.children
            .iter()
            .position(|c| *c == child)
            .ok_or_else(|| HostError::NotAChild {
                parent: parent.to_string(),
                child: child.to_string(),
            })
    }

    /// Unlink `id` from its current parent, if any.
    fn detach(&mut self, id: NodeId) -> Result<(), HostError> {
        let Some(parent) = self.slot_mut(id)?.parent.take() else {
            return Ok(());
        };
        let el = self.element_mut(parent)?;
        el.children.retain(|c| *c != id);
        Ok(())
    }

    /// Fail if `child` is `parent` or one of its ancestors.
    fn check_cycle(&self, parent: NodeId, child: NodeId) -> Result<(), HostError> {
        let mut cursor = Some(parent);
        while let Some(node) = cursor {
            if node == child {
                return Err(HostError::Rejected(format!(
                    "{child} cannot be inserted under its own descendant {parent}"
                )));
            }
            cursor = self.parent(node);
        }
        Ok(())
    }
}

impl HostDriver for MemoryHost {
    type Node = NodeId;

    fn create_leaf(&mut self, text: &str) -> Result<NodeId, HostError> {
        let node = self.push(Content::Leaf(text.to_string()))?;
        self.journal.push(Mutation::CreateLeaf {
            node,
            text: text.to_string(),
        });
        Ok(node)
    }

    fn create_element(&mut self, tag: &str) -> Result<NodeId, HostError> {
        if !TAG_RE.is_match(tag) {
            return Err(HostError::InvalidTag(tag.to_string()));
        }
        let node = self.push(Content::Element(ElementSlot {
            tag: tag.to_string(),
            ..Default::default()
        }))?;
        self.journal.push(Mutation::CreateElement {
            node,
            tag: tag.to_string(),
        });
        Ok(node)
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) -> Result<(), HostError> {
        self.element_mut(*node)?
            .attrs
            .insert(name.to_string(), value.to_string());
        self.journal.push(Mutation::SetAttribute {
            node: *node,
            name: name.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    fn remove_attribute(&mut self, node: &NodeId, name: &str) -> Result<(), HostError> {
        self.element_mut(*node)?.attrs.remove(name);
        self.journal.push(Mutation::RemoveAttribute {
            node: *node,
            name: name.to_string(),
        });
        Ok(())
    }

    fn add_event_listener(
        &mut self,
        node: &NodeId,
        kind: &str,
        callback: &Callback,
    ) -> Result<(), HostError> {
        self.element_mut(*node)?
            .listeners
            .entry(kind.to_string())
            .or_default()
            .push(callback.clone());
        self.journal.push(Mutation::AddListener {
            node: *node,
            kind: kind.to_string(),
        });
        Ok(())
    }

    fn remove_event_listener(
        &mut self,
        node: &NodeId,
        kind: &str,
        callback: &Callback,
    ) -> Result<(), HostError> {
        let el = self.element_mut(*node)?;
        if let Some(listeners) = el.listeners.get_mut(kind) {
            listeners.retain(|cb| !cb.ptr_eq(callback));
            if listeners.is_empty() {
                el.listeners.remove(kind);
            }
        }
        self.journal.push(Mutation::RemoveListener {
            node: *node,
            kind: kind.to_string(),
        });
        Ok(())
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<(), HostError> {
        self.element_mut(*parent)?;
        self.check_cycle(*parent, *child)?;
        self.detach(*child)?;
        self.element_mut(*parent)?.children.push(*child);
        self.slot_mut(*child)?.parent = Some(*parent);
        self.journal.push(Mutation::AppendChild {
            parent: *parent,
            child: *child,
        });
        Ok(())
    }

    fn replace_child(
        &mut self,
        parent: &NodeId,
        old: &NodeId,
        new: &NodeId,
    ) -> Result<(), HostError> {
        self.position(*parent, *old)?;
        if old == new {
            return Ok(());
        }
        self.check_cycle(*parent, *new)?;
        self.detach(*new)?;
        // Re-read: detaching `new` may have shifted `old` within the same parent.
        let at = self.position(*parent, *old)?;
        self.element_mut(*parent)?.children[at] = *new;
        self.slot_mut(*old)?.parent = None;
        self.slot_mut(*new)?.parent = Some(*parent);
        self.journal.push(Mutation::ReplaceChild {
            parent: *parent,
            old: *old,
            new: *new,
        });
        Ok(())
    }

    fn remove_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<(), HostError> {
        let at = self.position(*parent, *child)?;
        self.element_mut(*parent)?.children.remove(at);
        self.slot_mut(*child)?.parent = None;
        self.journal.push(Mutation::RemoveChild {
            parent: *parent,
            child: *child,
        });
        Ok(())
    }

    fn child_at(&self, parent: &NodeId, index: usize) -> Option<NodeId> {
        self.element(*parent)?.children.get(index).copied()
    }

    fn set_live_value(&mut self, node: &NodeId, value: &str) -> Result<(), HostError> {
        self.element_mut(*node)?.live_value = Some(value.to_string());
        self.journal.push(Mutation::SetLiveValue {
            node: *node,
            value: value.to_string(),
        });
        Ok(())
    }
}
