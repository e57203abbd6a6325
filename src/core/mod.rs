//! Node model - virtual tree shapes and the host driver contract.

mod attr;
mod driver;
mod leaf;
mod node;

pub use attr::{
    AttrValue, Attributes, Callback, EVENT_PREFIX, EventData, VALUE_ATTR, event_kind,
    is_event_name,
};
pub use driver::{HostDriver, HostError};
pub use leaf::Leaf;
pub use node::{Element, ElementBuilder, VNode, h};
