use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use toml::value::Datetime;

/// The resolved configuration record. Built once by `ConfigProvider::load` and
/// only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Configuration {
    content: Vec<String>,
    plugins: Vec<PluginRef>,
    theme: Theme,
}

impl Configuration {
    pub fn new(content: Vec<String>, theme: Theme, plugins: Vec<PluginRef>) -> Self {
        Self {
            content,
            plugins,
            theme,
        }
    }

    /// Glob patterns naming the files an external scanner should inspect.
    pub fn content(&self) -> &[String] {
        &self.content
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Plugin references in declaration order. Later entries win on conflicts.
    pub fn plugins(&self) -> &[PluginRef] {
        &self.plugins
    }
}

/// A node of the theme tree. `Datetime` sits before `Table` because TOML
/// hands datetimes over as a single-key table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Datetime(Datetime),
    Array(Vec<ThemeValue>),
    Table(BTreeMap<String, ThemeValue>),
}

impl ThemeValue {
    pub fn as_table(&self) -> Option<&BTreeMap<String, ThemeValue>> {
        match self {
            ThemeValue::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ThemeValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Theme categories mapped to their override values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Theme(BTreeMap<String, ThemeValue>);

impl Theme {
    pub fn new(categories: BTreeMap<String, ThemeValue>) -> Self {
        Self(categories)
    }

    pub fn get(&self, category: &str) -> Option<&ThemeValue> {
        self.0.get(category)
    }

    /// The `extend` table: values merged on top of the generator's defaults
    /// rather than replacing them.
    pub fn extend(&self) -> Option<&BTreeMap<String, ThemeValue>> {
        self.get("extend").and_then(ThemeValue::as_table)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &ThemeValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Opaque plugin identifier. Never loaded or interpreted here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginRef(String);

impl PluginRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PluginRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
