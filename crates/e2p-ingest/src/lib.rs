pub mod config;
pub mod error;
pub mod source;

pub use config::{ConfigOverrides, load_config, resolve_config, validate_config};
pub use error::{ConfigError, LoadError};
pub use source::{BROWSER_USER_AGENT, InputSource, load_events, parse_events};
