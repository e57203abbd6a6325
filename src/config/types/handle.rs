//! Process-wide default config.
//!
//! Uses `arc-swap` for lock-free reads and atomic replacement. The free
//! [`update_element`](crate::update_element) entry point reads it on every
//! pass; embedders that need per-call settings use
//! [`Reconciler::with_config`](crate::Reconciler::with_config) instead.

use crate::config::ReconcileConfig;
use crate::logger::set_verbose;
use arc_swap::ArcSwap;
use std::sync::{Arc, LazyLock};

/// Global config storage.
pub static CONFIG: LazyLock<ArcSwap<ReconcileConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(ReconcileConfig::default()));

#[inline]
pub fn cfg() -> Arc<ReconcileConfig> {
    CONFIG.load_full()
}

/// Install `config` as the process-wide default.
///
/// Also applies its `verbose` flag to the logger.
#[inline]
pub fn init_config(config: ReconcileConfig) -> Arc<ReconcileConfig> {
    set_verbose(config.reconcile.verbose);
    let arc = Arc::new(config);
    CONFIG.store(Arc::clone(&arc));
    arc
}
