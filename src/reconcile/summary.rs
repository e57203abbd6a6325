//! Per-pass mutation counters.

use std::fmt;

use serde::Serialize;

/// Host mutations issued by one reconciliation pass (or one materialization).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PatchSummary {
    /// Host nodes created (every node of every materialized subtree)
    pub created: usize,
    /// Positions rebuilt wholesale
    pub replaced: usize,
    /// Subtrees appended past the end of a child list
    pub appended: usize,
    /// Trailing children removed
    pub removed: usize,
    /// Live-value writes
    pub values: usize,
    pub attrs_set: usize,
    pub attrs_removed: usize,
    pub listeners_bound: usize,
    pub listeners_unbound: usize,
}

impl PatchSummary {
    /// Total host mutations, node creation excluded.
    pub fn total(&self) -> usize {
        self.replaced
            + self.appended
            + self.removed
            + self.values
            + self.attrs_set
            + self.attrs_removed
            + self.listeners_bound
            + self.listeners_unbound
    }

    /// True when the pass touched nothing in the host tree.
    pub fn is_empty(&self) -> bool {
        self.total() == 0 && self.created == 0
    }

    pub fn merge(&mut self, other: &Self) {
        self.created += other.created;
        self.replaced += other.replaced;
        self.appended += other.appended;
        self.removed += other.removed;
        self.values += other.values;
        self.attrs_set += other.attrs_set;
        self.attrs_removed += other.attrs_removed;
        self.listeners_bound += other.listeners_bound;
        self.listeners_unbound += other.listeners_unbound;
    }

    fn parts(&self) -> [(usize, &'static str); 9] {
        [
            (self.replaced, "replaced"),
            (self.appended, "appended"),
            (self.removed, "removed"),
            (self.values, "value"),
            (self.attrs_set, "attr set"),
            (self.attrs_removed, "attr removed"),
            (self.listeners_bound, "bound"),
            (self.listeners_unbound, "unbound"),
            (self.created, "created"),
        ]
    }
}

/// `2 replaced, 1 appended` style summary, or `no changes`.
impl fmt::Display for PatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("no changes");
        }
        let parts: Vec<String> = self
            .parts()
            .iter()
            .filter(|(count, _)| *count > 0)
            .map(|(count, label)| format!("{count} {label}"))
            .collect();
        f.write_str(&parts.join(", "))
    }
}
