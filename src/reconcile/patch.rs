//! Positional reconciliation.
//!
//! Walks an old and a new virtual tree in lock-step by child index and
//! patches the live host tree through the driver. There is no identity
//! matching across positions: swapping two distinct children rebuilds both.

use std::sync::Arc;

use crate::config::{ListenerPolicy, ReconcileConfig, cfg};
use crate::core::{AttrValue, Element, HostDriver, VNode, event_kind};
use crate::error::{Error, Result};
use crate::{debug, debug_do, log};

use super::classify::{Change, classify};
use super::materialize::materialize;
use super::summary::PatchSummary;

/// One reconciliation pass over a host tree.
///
/// Holds the exclusive driver borrow for the duration of the pass, so no
/// other writer can touch the host tree until [`finish`](Self::finish).
pub struct Reconciler<'d, D: HostDriver> {
    driver: &'d mut D,
    config: Arc<ReconcileConfig>,
    summary: PatchSummary,
    depth: usize,
}

impl<'d, D: HostDriver> Reconciler<'d, D> {
    /// Pass using the process-wide default config.
    pub fn new(driver: &'d mut D) -> Self {
        Self::with_config(driver, cfg())
    }

    pub fn with_config(driver: &'d mut D, config: impl Into<Arc<ReconcileConfig>>) -> Self {
        Self {
            driver,
            config: config.into(),
            summary: PatchSummary::default(),
            depth: 0,
        }
    }

    /// Materialize `node` as a new detached host subtree.
    pub fn create(&mut self, node: &VNode) -> Result<D::Node> {
        materialize(&mut *self.driver, node, &mut self.summary)
    }

    /// Reconcile the position `index` under `parent`.
    ///
    /// - `old` absent: append `new` as the last child of `parent`
    /// - `new` absent: remove the host child at `index`
    /// - both present: classify and patch, replace or recurse
    pub fn update(
        &mut self,
        parent: &D::Node,
        old: Option<&VNode>,
        new: Option<&VNode>,
        index: usize,
    ) -> Result<()> {
        if self.depth == 0 {
            debug_do! {
                let before = old.map_or(0, VNode::size);
                let after = new.map_or(0, VNode::size);
                debug!("patch"; "index {}: {} -> {} nodes", index, before, after);
            }
        }
        match (old, new) {
            (None, None) => Ok(()),
            (None, Some(new)) => {
                let child = materialize(&mut *self.driver, new, &mut self.summary)?;
                self.driver.append_child(parent, &child)?;
                self.summary.appended += 1;
                Ok(())
            }
            (Some(_), None) => {
                let Some(child) = self.host_child(parent, index)? else {
                    return Ok(());
                };
                self.driver.remove_child(parent, &child)?;
                self.summary.removed += 1;
                Ok(())
            }
            (Some(old), Some(new)) => self.patch(parent, old, new, index),
        }
    }

    /// Counters so far.
    pub fn summary(&self) -> &PatchSummary {
        &self.summary
    }

    /// End the pass and return what it did.
    pub fn finish(self) -> PatchSummary {
        if self.config.reconcile.verbose {
            log!("patch"; "{}", self.summary);
        } else {
            debug!("patch"; "{}", self.summary);
        }
        self.summary
    }

    fn patch(&mut self, parent: &D::Node, old: &VNode, new: &VNode, index: usize) -> Result<()> {
        let change = classify(old, new);

        if change.replaces() {
            let Some(current) = self.host_child(parent, index)? else {
                return Ok(());
            };
            let fresh = materialize(&mut *self.driver, new, &mut self.summary)?;
            self.driver.replace_child(parent, &current, &fresh)?;
            self.summary.replaced += 1;
            debug!("patch"; "index {}: {} -> {} ({})", index, old.describe(), new.describe(), change);
            return Ok(());
        }

        // Equal leaves: nothing below them.
        let (VNode::Element(old), VNode::Element(new)) = (old, new) else {
            return Ok(());
        };

        let rebind = self.config.reconcile.listeners == ListenerPolicy::Rebind;
        let idle = change == Change::None
            && !rebind
            && old.children().is_empty()
            && new.children().is_empty();
        if idle {
            return Ok(());
        }

        let Some(host) = self.host_child(parent, index)? else {
            return Ok(());
        };

        match change {
            Change::Value => return self.patch_value(&host, new),
            Change::Attr => self.patch_attrs(&host, old, new)?,
            _ => {}
        }
        if rebind {
            self.rebind_listeners(&host, old, new)?;
        }
        self.patch_children(&host, old.children(), new.children())
    }

    /// Write the new `value` to the live node; nothing else is touched.
    fn patch_value(&mut self, host: &D::Node, new: &Element) -> Result<()> {
        let value = new
            .attrs()
            .value()
            .and_then(AttrValue::as_text)
            .unwrap_or_default();
        self.driver.set_live_value(host, value)?;
        self.summary.values += 1;
        Ok(())
    }

    /// Drop every stale literal attribute, then apply all literals of `new`.
    /// Event attributes are left alone here.
    fn patch_attrs(&mut self, host: &D::Node, old: &Element, new: &Element) -> Result<()> {
        for (name, _) in old.attrs().literals() {
            if !new.attrs().has_literal(name) {
                self.driver.remove_attribute(host, name)?;
                self.summary.attrs_removed += 1;
            }
        }
        for (name, value) in new.attrs().literals() {
            self.driver.set_attribute(host, name, value)?;
            self.summary.attrs_set += 1;
        }
        Ok(())
    }

    /// Unbind handlers that are gone or replaced, bind new ones.
    fn rebind_listeners(&mut self, host: &D::Node, old: &Element, new: &Element) -> Result<()> {
        for (name, callback) in old.attrs().events() {
            let kept = new
                .attrs()
                .get(name)
                .and_then(AttrValue::as_handler)
                .is_some_and(|next| next.ptr_eq(callback));
            if let (false, Some(kind)) = (kept, event_kind(name)) {
                self.driver.remove_event_listener(host, &kind, callback)?;
                self.summary.listeners_unbound += 1;
            }
        }
        for (name, callback) in new.attrs().events() {
            let kept = old
                .attrs()
                .get(name)
                .and_then(AttrValue::as_handler)
                .is_some_and(|prev| prev.ptr_eq(callback));
            if let (false, Some(kind)) = (kept, event_kind(name)) {
                self.driver.add_event_listener(host, &kind, callback)?;
                self.summary.listeners_bound += 1;
            }
        }
        Ok(())
    }

    fn patch_children(&mut self, host: &D::Node, old: &[VNode], new: &[VNode]) -> Result<()> {
        let limit = self.config.reconcile.max_depth;
        if self.depth >= limit {
            return Err(Error::TooDeep { limit });
        }
        self.depth += 1;
        let result = self.walk_children(host, old, new);
        self.depth -= 1;
        result
    }

    fn walk_children(&mut self, host: &D::Node, old: &[VNode], new: &[VNode]) -> Result<()> {
        for (index, child) in new.iter().enumerate() {
            self.update(host, old.get(index), Some(child), index)?;
        }
        // Highest index first: removing from the back keeps lower indices valid.
        for index in (new.len()..old.len()).rev() {
            self.update(host, old.get(index), None, index)?;
        }
        Ok(())
    }

    fn host_child(&self, parent: &D::Node, index: usize) -> Result<Option<D::Node>> {
        match self.driver.child_at(parent, index) {
            Some(child) => Ok(Some(child)),
            None if self.config.reconcile.strict => Err(Error::MissingChild { index }),
            None => {
                debug!("patch"; "no host child at index {}, skipped", index);
                Ok(None)
            }
        }
    }
}

/// Reconcile the root position (index 0) under `parent`.
pub fn update_element<D: HostDriver>(
    driver: &mut D,
    parent: &D::Node,
    old: Option<&VNode>,
    new: Option<&VNode>,
) -> Result<PatchSummary> {
    update_element_at(driver, parent, old, new, 0)
}

/// Reconcile the position `index` under `parent` with the default config.
pub fn update_element_at<D: HostDriver>(
    driver: &mut D,
    parent: &D::Node,
    old: Option<&VNode>,
    new: Option<&VNode>,
    index: usize,
) -> Result<PatchSummary> {
    let mut reconciler = Reconciler::new(driver);
    reconciler.update(parent, old, new, index)?;
    Ok(reconciler.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Callback, Element, EventData, h};
    use crate::host::{MemoryHost, Mutation, NodeId};
    use std::sync::atomic::{AtomicUsize, Ordering};

    const NONE: [(&str, &str); 0] = [];

    fn el<const N: usize>(tag: &str, attrs: &[(&str, &str)], children: [VNode; N]) -> VNode {
        h(tag, attrs.iter().copied(), children).unwrap()
    }

    /// Mount `tree` under a fresh `div` root and clear the journal.
    fn mount(tree: &VNode) -> (MemoryHost, NodeId) {
        let mut host = MemoryHost::new();
        let root = host.create_element("div").unwrap();
        update_element(&mut host, &root, None, Some(tree)).unwrap();
        host.clear_journal();
        (host, root)
    }

    fn pass(host: &mut MemoryHost, root: NodeId, old: &VNode, new: &VNode) -> PatchSummary {
        Reconciler::with_config(host, ReconcileConfig::default())
            .update_and_finish(root, old, new)
    }

    impl<'d> Reconciler<'d, MemoryHost> {
        fn update_and_finish(mut self, root: NodeId, old: &VNode, new: &VNode) -> PatchSummary {
            self.update(&root, Some(old), Some(new), 0).unwrap();
            self.finish()
        }
    }

    #[test]
    fn test_initial_render_appends() {
        let tree = el("p", &[("id", "x")], ["hi".into()]);
        let mut host = MemoryHost::new();
        let root = host.create_element("div").unwrap();

        let summary = update_element(&mut host, &root, None, Some(&tree)).unwrap();

        assert_eq!(summary.appended, 1);
        assert_eq!(summary.created, 2);
        assert_eq!(host.to_html(root), r#"<div><p id="x">hi</p></div>"#);
    }

    #[test]
    fn test_identical_trees_issue_no_mutations() {
        let build = || {
            let button = Element::build("button")
                .attr("class", "primary")
                .on("click", |_: &EventData| {})
                .child("save")
                .finish()
                .unwrap();
            el("form", &[("id", "f")], [button.into(), el("input", &[("value", "a")], [])])
        };
        let (mut host, root) = mount(&build());

        let summary = pass(&mut host, root, &build(), &build());

        assert!(summary.is_empty(), "unexpected: {summary}");
        assert!(host.journal().is_empty());
    }

    #[test]
    fn test_leaf_to_element_replaces() {
        let old = VNode::text("hi");
        let new = el("span", &[], ["hi".into()]);
        let (mut host, root) = mount(&old);
        let before = host.children(root)[0];

        let summary = pass(&mut host, root, &old, &new);

        assert_eq!(summary.replaced, 1);
        let after = host.children(root)[0];
        assert_ne!(before, after);
        assert_eq!(host.parent(before), None);
        assert_eq!(host.to_html(root), "<div><span>hi</span></div>");
    }

    #[test]
    fn test_text_change_replaces_leaf() {
        let old = el("p", &[], ["a".into()]);
        let new = el("p", &[], ["b".into()]);
        let (mut host, root) = mount(&old);
        let p = host.children(root)[0];

        let summary = pass(&mut host, root, &old, &new);

        assert_eq!(summary.replaced, 1);
        assert_eq!(host.children(root)[0], p);
        assert_eq!(host.to_html(root), "<div><p>b</p></div>");
    }

    #[test]
    fn test_tag_change_replaces_subtree() {
        let old = el("div", &[("id", "a")], [el("b", &[], ["x".into()])]);
        let new = el("section", &[("id", "a")], [el("b", &[], ["x".into()])]);
        let (mut host, root) = mount(&old);

        let summary = pass(&mut host, root, &old, &new);

        assert_eq!(summary.replaced, 1);
        assert_eq!(
            host.to_html(root),
            r#"<div><section id="a"><b>x</b></section></div>"#
        );
    }

    #[test]
    fn test_value_change_keeps_host_node() {
        let old = el("input", &[("value", "a")], []);
        let new = el("input", &[("value", "b")], []);
        let (mut host, root) = mount(&old);
        let input = host.children(root)[0];

        let summary = pass(&mut host, root, &old, &new);

        assert_eq!(summary.values, 1);
        assert_eq!(summary.replaced, 0);
        assert_eq!(host.children(root)[0], input);
        assert_eq!(host.live_value(input), Some("b"));
        assert_eq!(
            host.journal(),
            &[Mutation::SetLiveValue {
                node: input,
                value: "b".to_string()
            }]
        );
    }

    #[test]
    fn test_value_removed_clears_live_value() {
        let old = el("input", &[("value", "a")], []);
        let new = el("input", &[], []);
        let (mut host, root) = mount(&old);
        let input = host.children(root)[0];

        pass(&mut host, root, &old, &new);

        assert_eq!(host.live_value(input), Some(""));
    }

    #[test]
    fn test_value_path_ignores_other_attributes() {
        let old = el("input", &[("value", "a"), ("class", "x")], []);
        let new = el("input", &[("value", "b"), ("class", "y")], []);
        let (mut host, root) = mount(&old);
        let input = host.children(root)[0];

        let summary = pass(&mut host, root, &old, &new);

        assert_eq!(summary.total(), 1);
        assert_eq!(host.attribute(input, "class"), Some("x"));
    }

    #[test]
    fn test_attribute_delta() {
        let old = el("div", &[("id", "x"), ("class", "y")], []);
        let new = el("div", &[("id", "x")], []);
        let (mut host, root) = mount(&old);
        let div = host.children(root)[0];

        let summary = pass(&mut host, root, &old, &new);

        assert_eq!(summary.replaced, 0);
        assert_eq!(summary.attrs_removed, 1);
        assert_eq!(host.attribute(div, "class"), None);
        assert_eq!(host.attribute(div, "id"), Some("x"));
        assert_eq!(host.children(root)[0], div);
    }

    #[test]
    fn test_attribute_delta_removes_every_stale_attribute() {
        let old = el("div", &[("a", "1"), ("b", "2"), ("c", "3"), ("keep", "k")], []);
        let new = el("div", &[("keep", "k"), ("d", "4")], []);
        let (mut host, root) = mount(&old);
        let div = host.children(root)[0];

        let summary = pass(&mut host, root, &old, &new);

        assert_eq!(summary.attrs_removed, 3);
        assert_eq!(summary.attrs_set, 2);
        let names: Vec<_> = host.attributes(div).keys().cloned().collect();
        assert_eq!(names, vec!["d".to_string(), "keep".to_string()]);
    }

    #[test]
    fn test_attr_change_still_walks_children() {
        let old = el("ul", &[("class", "a")], [el("li", &[], ["1".into()])]);
        let new = el("ul", &[("class", "b")], [el("li", &[], ["2".into()])]);
        let (mut host, root) = mount(&old);

        let summary = pass(&mut host, root, &old, &new);

        assert_eq!(summary.attrs_set, 1);
        assert_eq!(summary.replaced, 1);
        assert_eq!(host.to_html(root), r#"<div><ul class="b"><li>2</li></ul></div>"#);
    }

    #[test]
    fn test_append_at_tail() {
        let old = el("ul", &[], [el("li", &[], ["a".into()]), el("li", &[], ["b".into()])]);
        let new = el(
            "ul",
            &[],
            [
                el("li", &[], ["a".into()]),
                el("li", &[], ["b".into()]),
                el("li", &[], ["c".into()]),
            ],
        );
        let (mut host, root) = mount(&old);
        let ul = host.children(root)[0];
        let first_two = host.children(ul).to_vec();

        let summary = pass(&mut host, root, &old, &new);

        assert_eq!(summary.appended, 1);
        assert_eq!(summary.replaced, 0);
        assert_eq!(&host.children(ul)[..2], first_two.as_slice());
        assert_eq!(host.children(ul).len(), 3);
    }

    #[test]
    fn test_remove_at_tail() {
        let old = el("ol", &[], ["a".into(), "b".into(), "c".into()]);
        let new = el("ol", &[], ["a".into(), "b".into()]);
        let (mut host, root) = mount(&old);
        let ol = host.children(root)[0];
        let third = host.children(ol)[2];

        let summary = pass(&mut host, root, &old, &new);

        assert_eq!(summary.removed, 1);
        assert_eq!(summary.replaced, 0);
        assert_eq!(host.parent(third), None);
        assert_eq!(host.to_html(root), "<div><ol>ab</ol></div>");
    }

    #[test]
    fn test_remove_several_trailing_children() {
        let old = el("ol", &[], ["a".into(), "b".into(), "c".into(), "d".into()]);
        let new = el("ol", &[], ["a".into()]);
        let (mut host, root) = mount(&old);

        let summary = pass(&mut host, root, &old, &new);

        assert_eq!(summary.removed, 3);
        assert_eq!(host.to_html(root), "<div><ol>a</ol></div>");
    }

    #[test]
    fn test_swap_replaces_both_positions() {
        let a = el("b", &[], ["bold".into()]);
        let b = el("i", &[], ["italic".into()]);
        let old = el("p", &[], [a.clone(), b.clone()]);
        let new = el("p", &[], [b, a]);
        let (mut host, root) = mount(&old);

        let summary = pass(&mut host, root, &old, &new);

        assert_eq!(summary.replaced, 2);
        assert!(
            !host
                .journal()
                .iter()
                .any(|m| matches!(m, Mutation::RemoveChild { .. }))
        );
        assert_eq!(host.to_html(root), "<div><p><i>italic</i><b>bold</b></p></div>");
    }

    #[test]
    fn test_remove_root_position() {
        let tree = el("p", &[], []);
        let (mut host, root) = mount(&tree);

        let summary = update_element(&mut host, &root, Some(&tree), None).unwrap();

        assert_eq!(summary.removed, 1);
        assert!(host.children(root).is_empty());
    }

    #[test]
    fn test_update_at_index() {
        let mut host = MemoryHost::new();
        let root = host.create_element("div").unwrap();
        let first = VNode::text("first");
        let second = VNode::text("second");
        update_element_at(&mut host, &root, None, Some(&first), 0).unwrap();
        update_element_at(&mut host, &root, None, Some(&second), 1).unwrap();

        let changed = VNode::text("changed");
        update_element_at(&mut host, &root, Some(&second), Some(&changed), 1).unwrap();

        assert_eq!(host.to_html(root), "<div>firstchanged</div>");
    }

    #[test]
    fn test_missing_host_child_strict() {
        let mut host = MemoryHost::new();
        let root = host.create_element("div").unwrap();
        let old = VNode::text("a");
        let new = VNode::text("b");

        let err = Reconciler::with_config(&mut host, ReconcileConfig::default())
            .update(&root, Some(&old), Some(&new), 0)
            .unwrap_err();

        assert!(matches!(err, Error::MissingChild { index: 0 }));
    }

    #[test]
    fn test_missing_host_child_lenient() {
        let mut host = MemoryHost::new();
        let root = host.create_element("div").unwrap();
        let old = VNode::text("a");
        let new = VNode::text("b");

        let config = ReconcileConfig::default().with_strict(false);
        let mut reconciler = Reconciler::with_config(&mut host, config);
        reconciler.update(&root, Some(&old), Some(&new), 0).unwrap();
        reconciler.update(&root, Some(&old), None, 0).unwrap();

        assert!(reconciler.finish().is_empty());
    }

    #[test]
    fn test_equal_childless_elements_skip_host_lookup() {
        // Strict mode, but the host child is missing: nothing to patch, no error.
        let mut host = MemoryHost::new();
        let root = host.create_element("div").unwrap();
        let node = el("hr", &[("class", "sep")], []);

        let summary = update_element(&mut host, &root, Some(&node), Some(&node)).unwrap();

        assert!(summary.is_empty());
    }

    #[test]
    fn test_static_policy_keeps_first_handler() {
        let first_hits = std::sync::Arc::new(AtomicUsize::new(0));
        let second_hits = std::sync::Arc::new(AtomicUsize::new(0));
        let (c1, c2) = (first_hits.clone(), second_hits.clone());
        let old = VNode::from(
            Element::build("button")
                .on("click", move |_: &EventData| {
                    c1.fetch_add(1, Ordering::SeqCst);
                })
                .finish()
                .unwrap(),
        );
        let new = VNode::from(
            Element::build("button")
                .on("click", move |_: &EventData| {
                    c2.fetch_add(1, Ordering::SeqCst);
                })
                .finish()
                .unwrap(),
        );
        let (mut host, root) = mount(&old);
        let button = host.children(root)[0];

        let summary = pass(&mut host, root, &old, &new);
        host.dispatch(button, &EventData::new("click"));

        assert!(summary.is_empty());
        assert_eq!(first_hits.load(Ordering::SeqCst), 1);
        assert_eq!(second_hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_rebind_policy_swaps_changed_handler() {
        let first_hits = std::sync::Arc::new(AtomicUsize::new(0));
        let second_hits = std::sync::Arc::new(AtomicUsize::new(0));
        let (c1, c2) = (first_hits.clone(), second_hits.clone());
        let old = VNode::from(
            Element::build("button")
                .on("click", move |_: &EventData| {
                    c1.fetch_add(1, Ordering::SeqCst);
                })
                .finish()
                .unwrap(),
        );
        let new = VNode::from(
            Element::build("button")
                .on("click", move |_: &EventData| {
                    c2.fetch_add(1, Ordering::SeqCst);
                })
                .finish()
                .unwrap(),
        );
        let (mut host, root) = mount(&old);
        let button = host.children(root)[0];

        let config = ReconcileConfig::default().with_listeners(ListenerPolicy::Rebind);
        let mut reconciler = Reconciler::with_config(&mut host, config);
        reconciler.update(&root, Some(&old), Some(&new), 0).unwrap();
        let summary = reconciler.finish();
        host.dispatch(button, &EventData::new("click"));

        assert_eq!(summary.listeners_unbound, 1);
        assert_eq!(summary.listeners_bound, 1);
        assert_eq!(host.listener_count(button, "click"), 1);
        assert_eq!(first_hits.load(Ordering::SeqCst), 0);
        assert_eq!(second_hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_rebind_policy_keeps_shared_handler() {
        let shared = Callback::new(|_| {});
        let build = || {
            VNode::from(
                Element::build("a")
                    .on("click", shared.clone())
                    .attr("href", "#")
                    .finish()
                    .unwrap(),
            )
        };
        let (old, new) = (build(), build());
        let (mut host, root) = mount(&old);

        let config = ReconcileConfig::default().with_listeners(ListenerPolicy::Rebind);
        let mut reconciler = Reconciler::with_config(&mut host, config);
        reconciler.update(&root, Some(&old), Some(&new), 0).unwrap();

        assert!(reconciler.finish().is_empty());
    }

    #[test]
    fn test_nested_walk_patches_deep_leaf() {
        let old = el(
            "main",
            &[],
            [el("section", &[], [el("h1", &[], ["Title".into()]), el("p", &[], ["body".into()])])],
        );
        let new = el(
            "main",
            &[],
            [el("section", &[], [el("h1", &[], ["Title".into()]), el("p", &[], ["edited".into()])])],
        );
        let (mut host, root) = mount(&old);
        let section = host.children(host.children(root)[0])[0];

        let summary = pass(&mut host, root, &old, &new);

        assert_eq!(summary.replaced, 1);
        assert_eq!(host.children(host.children(root)[0])[0], section);
        assert_eq!(
            host.to_html(root),
            "<div><main><section><h1>Title</h1><p>edited</p></section></main></div>"
        );
    }

    #[test]
    fn test_root_replace_via_default_entry_point() {
        let old = el("p", &NONE, []);
        let new = VNode::number(7);
        let (mut host, root) = mount(&old);

        let summary = update_element(&mut host, &root, Some(&old), Some(&new)).unwrap();

        assert_eq!(summary.replaced, 1);
        assert_eq!(host.to_html(root), "<div>7</div>");
    }

    #[test]
    fn test_driver_failure_propagates() {
        let old = VNode::text("a");
        let new = el("bad tag", &[], []);
        let (mut host, root) = mount(&old);

        let err = update_element(&mut host, &root, Some(&old), Some(&new)).unwrap_err();

        assert!(matches!(err, Error::Host(_)));
    }

    #[test]
    fn test_static_policy_ignores_handler_changes_on_attr_path() {
        let old = el("button", &[("class", "a")], []);
        let new = VNode::from(
            Element::build("button")
                .attr("class", "b")
                .on("click", |_: &EventData| {})
                .finish()
                .unwrap(),
        );
        let (mut host, root) = mount(&old);
        let button = host.children(root)[0];

        let summary = pass(&mut host, root, &old, &new);

        assert_eq!(summary.attrs_set, 1);
        assert_eq!(summary.listeners_bound, 0);
        assert_eq!(host.listener_count(button, "click"), 0);
        assert_eq!(host.attribute(button, "class"), Some("b"));
        assert!(!host.journal().iter().any(|m| matches!(
            m,
            Mutation::AddListener { .. } | Mutation::RemoveListener { .. }
        )));

        // Dropping the handler again issues no unbind either.
        let back = el("button", &[("class", "c")], []);
        let summary = pass(&mut host, root, &new, &back);
        assert_eq!(summary.listeners_unbound, 0);
        assert_eq!(host.attribute(button, "class"), Some("c"));
    }

    #[test]
    fn test_static_policy_keeps_removed_handler_bound() {
        let old = VNode::from(
            Element::build("button")
                .attr("class", "a")
                .on("click", |_: &EventData| {})
                .finish()
                .unwrap(),
        );
        let new = el("button", &[("class", "b")], []);
        let (mut host, root) = mount(&old);
        let button = host.children(root)[0];

        pass(&mut host, root, &old, &new);

        assert_eq!(host.listener_count(button, "click"), 1);
        assert!(
            !host
                .journal()
                .iter()
                .any(|m| matches!(m, Mutation::RemoveListener { .. }))
        );
    }

    #[test]
    fn test_reconciler_create_counts_into_pass() {
        let mut host = MemoryHost::new();
        let root = host.create_element("div").unwrap();
        let tree = el("p", &[("id", "x")], ["hi".into()]);

        let mut reconciler = Reconciler::with_config(&mut host, ReconcileConfig::default());
        let node = reconciler.create(&tree).unwrap();
        reconciler.update(&root, None, Some(&VNode::text("tail")), 0).unwrap();
        let summary = reconciler.finish();

        assert_eq!(summary.created, 3);
        assert_eq!(summary.attrs_set, 1);
        assert_eq!(summary.appended, 1);
        assert_eq!(host.parent(node), None);
        assert_eq!(host.to_html(node), r#"<p id="x">hi</p>"#);
    }

    #[test]
    fn test_depth_limit() {
        let old = el("main", &[], [el("section", &[], [el("p", &[], ["a".into()])])]);
        let new = el("main", &[], [el("section", &[], [el("p", &[], ["b".into()])])]);
        let (mut host, root) = mount(&old);

        let mut shallow = ReconcileConfig::default();
        shallow.reconcile.max_depth = 2;
        let err = Reconciler::with_config(&mut host, shallow)
            .update(&root, Some(&old), Some(&new), 0)
            .unwrap_err();
        assert!(matches!(err, Error::TooDeep { limit: 2 }));
        assert!(host.journal().is_empty());

        let mut enough = ReconcileConfig::default();
        enough.reconcile.max_depth = 3;
        let mut reconciler = Reconciler::with_config(&mut host, enough);
        reconciler.update(&root, Some(&old), Some(&new), 0).unwrap();
        assert_eq!(reconciler.finish().replaced, 1);
        assert_eq!(
            host.to_html(root),
            "<div><main><section><p>b</p></section></main></div>"
        );
    }

    #[test]
    fn test_depth_resets_between_updates() {
        let old = el("ul", &[], [el("li", &[], ["a".into()])]);
        let new = el("ul", &[], [el("li", &[], ["b".into()])]);
        let (mut host, root) = mount(&old);

        let mut config = ReconcileConfig::default();
        config.reconcile.max_depth = 2;
        let mut reconciler = Reconciler::with_config(&mut host, config);
        reconciler.update(&root, Some(&old), Some(&new), 0).unwrap();
        reconciler.update(&root, Some(&new), Some(&old), 0).unwrap();

        assert_eq!(reconciler.finish().replaced, 2);
    }
}
