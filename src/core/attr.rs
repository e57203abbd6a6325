//! Element attributes and event handlers.
//!
//! Attribute names starting with [`EVENT_PREFIX`] are event attributes: the rest
//! of the name (lowercased) is the event kind and the value is a [`Callback`].
//! Every other name carries a literal string value.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Prefix marking an attribute name as an event subscription.
pub const EVENT_PREFIX: &str = "on";

/// Name of the attribute that mirrors a host node's live value.
pub const VALUE_ATTR: &str = "value";

/// Whether `name` is an event attribute name.
#[inline]
pub fn is_event_name(name: &str) -> bool {
    name.starts_with(EVENT_PREFIX)
}

/// Event kind subscribed by an event attribute (`onClick` -> `click`).
///
/// Returns `None` for literal attribute names.
pub fn event_kind(name: &str) -> Option<String> {
    name.strip_prefix(EVENT_PREFIX)
        .map(|kind| kind.to_ascii_lowercase())
}

// ============================================================================
// Callback
// ============================================================================

/// Payload handed to event callbacks by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventData {
    /// Event kind (`click`, `input`, ...)
    pub kind: String,
    /// Current live value of the target, when the host has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl EventData {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// Shared, cheaply clonable event handler.
#[derive(Clone)]
pub struct Callback(Arc<dyn Fn(&EventData) + Send + Sync>);

impl Callback {
    pub fn new(handler: impl Fn(&EventData) + Send + Sync + 'static) -> Self {
        Self(Arc::new(handler))
    }

    /// Invoke the handler.
    #[inline]
    pub fn call(&self, event: &EventData) {
        (self.0)(event)
    }

    /// Identity comparison: true only for clones of the same handler.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Arc::as_ptr(&self.0).cast::<()>())
    }
}

impl<F> From<F> for Callback
where
    F: Fn(&EventData) + Send + Sync + 'static,
{
    fn from(handler: F) -> Self {
        Self::new(handler)
    }
}

// ============================================================================
// AttrValue
// ============================================================================

/// Value stored under an attribute name.
#[derive(Debug, Clone)]
pub enum AttrValue {
    /// Literal value, applied with `set_attribute`
    Text(String),
    /// Event handler, registered with `add_event_listener`
    Handler(Callback),
}

impl AttrValue {
    /// Literal value, if this is not a handler.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Handler(_) => None,
        }
    }

    pub fn as_handler(&self) -> Option<&Callback> {
        match self {
            Self::Text(_) => None,
            Self::Handler(callback) => Some(callback),
        }
    }

    pub fn is_handler(&self) -> bool {
        matches!(self, Self::Handler(_))
    }
}

/// Structural equality.
///
/// Literals compare by content. Handlers compare by presence only: two
/// handler values are always equal, so a tree rebuilt with fresh closures is
/// structurally identical to the previous one. Use [`Callback::ptr_eq`] when
/// identity matters.
impl PartialEq for AttrValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Handler(_), Self::Handler(_)) => true,
            _ => false,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Callback> for AttrValue {
    fn from(callback: Callback) -> Self {
        Self::Handler(callback)
    }
}

// ============================================================================
// Attributes
// ============================================================================

/// Attribute mapping of one element.
///
/// Keys are unique and iterate in name order, so host mutations issued from a
/// mapping are deterministic. Equality is order-independent by construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    entries: BTreeMap<String, AttrValue>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert without kind validation. Callers go through the element
    /// builder, which checks names against values first.
    pub(crate) fn insert(&mut self, name: String, value: AttrValue) -> Option<AttrValue> {
        self.entries.insert(name, value)
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// The `value` entry, compared separately from the rest of the mapping.
    #[inline]
    pub fn value(&self) -> Option<&AttrValue> {
        self.get(VALUE_ATTR)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, AttrValue> {
        self.entries.iter()
    }

    /// Literal (non-event) attributes as `(name, value)`.
    pub fn literals(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter(|(name, _)| !is_event_name(name))
            .filter_map(|(name, value)| value.as_text().map(|text| (name.as_str(), text)))
    }

    /// Event attributes as `(attribute name, callback)`.
    pub fn events(&self) -> impl Iterator<Item = (&str, &Callback)> {
        self.entries
            .iter()
            .filter(|(name, _)| is_event_name(name))
            .filter_map(|(name, value)| value.as_handler().map(|cb| (name.as_str(), cb)))
    }

    /// Whether a literal attribute `name` exists.
    pub fn has_literal(&self, name: &str) -> bool {
        !is_event_name(name) && self.get(name).is_some_and(|v| !v.is_handler())
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = (&'a String, &'a AttrValue);
    type IntoIter = btree_map::Iter<'a, String, AttrValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
