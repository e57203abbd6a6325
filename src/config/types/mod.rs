//! Configuration utility types.
//!
//! | Module   | Purpose                                   |
//! |----------|-------------------------------------------|
//! | `error`  | Configuration error types                 |
//! | `handle` | Process-wide default config (lock-free)   |

mod error;
pub mod handle;

pub use error::ConfigError;
pub use handle::{cfg, init_config};
