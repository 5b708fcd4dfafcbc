//! System configuration
//!
//! Configuration is a small TOML file embedded in the firmware image.
//! [`parse_config`] reads it without allocation; anything it cannot make
//! sense of is an error, and the firmware falls back to the defaults.

mod parse;
mod types;

pub use parse::{parse_config, ConfigError};
pub use types::{AudioConfig, SystemConfig, TimingConfig, MAX_LABEL_LEN};
