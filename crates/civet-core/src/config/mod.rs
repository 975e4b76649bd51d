//! Run configuration
//!
//! A run starts from three layers of settings that are merged once into an
//! immutable [`Config`]:
//!
//! 1. **CLI** - arguments parsed by the binary
//! 2. **Config file** - a YAML file given as the positional input
//! 3. **Defaults** - [`builtin_defaults`]
//!
//! Each later resolution step (output directory, query, fields, ...) takes
//! the `Config` by value and returns an updated one.
//!
//! # Example
//!
//! ```ignore
//! use civet_core::config::{ConfigLayer, ConfigResolver};
//!
//! let cli = ConfigLayer::new().with("outdir", "/tmp/x");
//! let config = ConfigResolver::new(cli).load_file(path)?.resolve();
//! assert_eq!(config.get_str("outdir"), Some("/tmp/x"));
//! ```

mod layer;
mod resolver;
mod value;

pub use layer::{ConfigLayer, normalize_key};
pub use resolver::{ConfigResolver, builtin_defaults};
pub use value::{Config, ConfigValue, Source};
