//! Tree materialization.
//!
//! Builds a brand-new host subtree from a virtual node. Only freshly created
//! host nodes are touched, so this is safe to call for any tree at any time.

use crate::core::{HostDriver, VNode, event_kind};
use crate::error::Result;

use super::PatchSummary;

/// Materialize `node` into a new, detached host subtree and return its root.
pub fn create_element<D: HostDriver>(driver: &mut D, node: &VNode) -> Result<D::Node> {
    let mut summary = PatchSummary::default();
    materialize(driver, node, &mut summary)
}

/// Materialize and count every created node and applied attribute.
pub(crate) fn materialize<D: HostDriver>(
    driver: &mut D,
    node: &VNode,
    summary: &mut PatchSummary,
) -> Result<D::Node> {
    let element = match node {
        VNode::Leaf(leaf) => {
            summary.created += 1;
            return Ok(driver.create_leaf(&leaf.to_string())?);
        }
        VNode::Element(element) => element,
    };

    let host = driver.create_element(element.tag())?;
    summary.created += 1;

    for (name, value) in element.attrs() {
        match (event_kind(name), value.as_handler()) {
            (Some(kind), Some(callback)) => {
                driver.add_event_listener(&host, &kind, callback)?;
                summary.listeners_bound += 1;
            }
            (None, _) => {
                if let Some(text) = value.as_text() {
                    driver.set_attribute(&host, name, text)?;
                    summary.attrs_set += 1;
                }
            }
            // Event names holding literals are rejected when the element is built.
            (Some(_), None) => {}
        }
    }

    for child in element.children() {
        let child_host = materialize(driver, child, summary)?;
        driver.append_child(&host, &child_host)?;
    }

    Ok(host)
}
