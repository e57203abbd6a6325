//! Reconciler configuration.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError
//! │   └── handle     # Global config handle
//! └── mod.rs         # ReconcileConfig (this file)
//! ```
//!
//! # Example
//!
//! ```toml
//! [reconcile]
//! listeners = "static"   # "static" keeps first-bound handlers, "rebind" swaps changed ones
//! strict = true          # missing host child at an index is an error
//! max_depth = 512        # deepest nesting one pass walks
//! verbose = false        # log a patch summary for each pass
//! ```

pub mod types;

pub use types::{ConfigError, cfg, init_config};

use crate::log;
use serde::{Deserialize, Serialize};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReconcileConfig {
    /// Reconciliation settings
    #[serde(default)]
    pub reconcile: ReconcileSection,
}

const DEFAULT_MAX_DEPTH: usize = 512;

/// `[reconcile]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileSection {
    /// How event handlers are treated when an element is kept in place.
    pub listeners: ListenerPolicy,

    /// Treat a missing host child at a reconciled index as an error.
    /// - `true` (default): fail the pass with `Error::MissingChild`
    /// - `false`: skip the position
    ///
    /// Equal elements without children are never looked up on the host, so a
    /// missing child at such a position goes unreported even when strict.
    pub strict: bool,

    /// Deepest element nesting a single pass walks before failing with
    /// `Error::TooDeep`. Must be at least 1.
    pub max_depth: usize,

    /// Log a summary line for every pass.
    pub verbose: bool,
}

impl Default for ReconcileSection {
    fn default() -> Self {
        Self {
            listeners: ListenerPolicy::Static,
            strict: true,
            max_depth: DEFAULT_MAX_DEPTH,
            verbose: false,
        }
    }
}

/// Listener handling for elements that survive a pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListenerPolicy {
    /// Handlers are bound once at materialization and never revisited.
    /// A handler swapped in a later render keeps the old one registered.
    #[default]
    Static,
    /// Handlers are compared by identity on every pass; removed or changed
    /// handlers are unbound and new ones bound.
    Rebind,
}

impl ReconcileConfig {
    /// Parse configuration from a TOML string.
    ///
    /// Unknown keys are reported as a warning and otherwise ignored.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let (config, ignored) = Self::parse_with_ignored(content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored);
        }
        config.validate()?;
        Ok(config)
    }

    /// Reject values that parse but cannot drive a pass.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reconcile.max_depth == 0 {
            return Err(ConfigError::Validation(
                "`reconcile.max_depth` must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse TOML content, collecting any unknown fields.
    pub fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String]) {
        log!("warning"; "unknown config fields ignored: {}", fields.join(", "));
    }

    /// Config with a different listener policy.
    pub fn with_listeners(mut self, listeners: ListenerPolicy) -> Self {
        self.reconcile.listeners = listeners;
        self
    }

    /// Config with a different strictness.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.reconcile.strict = strict;
        self
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
pub fn test_parse_config(content: &str) -> ReconcileConfig {
    let (parsed, ignored) = ReconcileConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}
