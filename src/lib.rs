//! Loading and validation of the configuration record consumed by a CSS
//! utility-class generator: content-scan globs, theme extensions and plugin
//! references.

pub mod app;

pub use app::config::{ConfigProvider, DeclarationSource};
pub use app::error::ConfigError;
pub use app::models::{Configuration, PluginRef, Theme, ThemeValue};
pub use app::patterns::{validate, ContentSet};
