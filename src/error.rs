//! Crate-level error type.

use thiserror::Error;

use crate::config::ConfigError;
use crate::core::HostError;

/// Errors raised while building or reconciling virtual trees.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Host(#[from] HostError),

    #[error("<{tag}> attribute `{name}` subscribes an event and needs a callback")]
    ListenerNotCallback { tag: String, name: String },

    #[error("<{tag}> attribute `{name}` is a literal attribute and cannot hold a callback")]
    CallbackOnLiteral { tag: String, name: String },

    #[error("<{tag}> has an event attribute without an event kind")]
    EmptyEventKind { tag: String },

    #[error("no host child at index {index}")]
    MissingChild { index: usize },

    #[error("tree nests deeper than the configured limit of {limit}")]
    TooDeep { limit: usize },

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
