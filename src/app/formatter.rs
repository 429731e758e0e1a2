use crate::app::models::{Configuration, ThemeValue};
use anyhow::{Context, Result};
use std::path::PathBuf;

pub struct OutputGenerator;

impl OutputGenerator {
    /// Indented overview of a loaded configuration.
    pub fn generate_summary(config: &Configuration, origin: &str) -> String {
        let mut output = format!("Configuration loaded from {}\n", origin);

        output.push_str(&format!("content ({}):\n", config.content().len()));
        for pattern in config.content() {
            output.push_str(&format!("    {}\n", pattern));
        }

        output.push_str("theme:\n");
        if config.theme().is_empty() {
            output.push_str("    (empty)\n");
        }
        for (category, value) in config.theme().entries() {
            push_theme_node(&mut output, category, value, 1);
        }

        output.push_str(&format!("plugins ({}):\n", config.plugins().len()));
        for (position, plugin) in config.plugins().iter().enumerate() {
            output.push_str(&format!("    {}. {}\n", position + 1, plugin));
        }

        output.trim_end().to_string()
    }

    pub fn generate_toml(config: &Configuration) -> Result<String> {
        toml::to_string(config).context("Failed to serialize configuration")
    }

    pub fn generate_check_report(results: &[(PathBuf, bool)]) -> String {
        let mut output = String::new();

        for (path, matched) in results {
            let marker = if *matched { "scan" } else { "skip" };
            output.push_str(&format!("{}  {}\n", marker, path.display()));
        }

        output.trim_end().to_string()
    }
}

fn push_theme_node(output: &mut String, key: &str, value: &ThemeValue, depth: usize) {
    let indent = "    ".repeat(depth);

    match value {
        ThemeValue::Table(table) if !table.is_empty() => {
            output.push_str(&format!("{}{}:\n", indent, key));
            for (child_key, child) in table {
                push_theme_node(output, child_key, child, depth + 1);
            }
        }
        leaf => output.push_str(&format!("{}{} = {}\n", indent, key, render_leaf(leaf))),
    }
}

fn render_leaf(value: &ThemeValue) -> String {
    match value {
        ThemeValue::Boolean(b) => b.to_string(),
        ThemeValue::Integer(i) => i.to_string(),
        ThemeValue::Float(f) => f.to_string(),
        ThemeValue::Datetime(d) => d.to_string(),
        ThemeValue::String(s) => format!("{:?}", s),
        ThemeValue::Array(items) => {
            let parts: Vec<String> = items.iter().map(render_leaf).collect();
            format!("[{}]", parts.join(", "))
        }
        ThemeValue::Table(table) if table.is_empty() => "{}".to_string(),
        ThemeValue::Table(table) => {
            let parts: Vec<String> = table
                .iter()
                .map(|(k, v)| format!("{} = {}", k, render_leaf(v)))
                .collect();
            format!("{{ {} }}", parts.join(", "))
        }
    }
}
