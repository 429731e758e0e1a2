use crate::app::error::ConfigError;
use crate::app::models::{Configuration, PluginRef, Theme};
use crate::app::patterns;
use serde::Deserialize;
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the project directory and the user config directory.
pub const DECLARATION_FILE: &str = "tailwind.toml";

const APP_DIR: &str = "twconf";

/// Where the declaration text comes from.
#[derive(Debug, Clone)]
pub enum DeclarationSource {
    File(PathBuf),
    Inline { name: String, text: String },
}

impl DeclarationSource {
    pub fn inline(name: impl Into<String>, text: impl Into<String>) -> Self {
        DeclarationSource::Inline {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Human-readable origin used in diagnostics.
    pub fn name(&self) -> String {
        match self {
            DeclarationSource::File(path) => path.display().to_string(),
            DeclarationSource::Inline { name, .. } => name.clone(),
        }
    }

    fn read(&self) -> Result<Cow<'_, str>, ConfigError> {
        match self {
            DeclarationSource::File(path) => fs::read_to_string(path)
                .map(Cow::Owned)
                .map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                }),
            DeclarationSource::Inline { text, .. } => Ok(Cow::Borrowed(text.as_str())),
        }
    }
}

/// On-disk shape. Every key is optional; unknown keys are rejected so a typo
/// such as `contents` fails loudly instead of yielding an empty scan list.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct Declaration {
    #[serde(default)]
    content: Vec<String>,
    #[serde(default)]
    theme: Theme,
    #[serde(default)]
    plugins: Vec<PluginRef>,
}

impl From<Declaration> for Configuration {
    fn from(decl: Declaration) -> Self {
        Configuration::new(decl.content, decl.theme, decl.plugins)
    }
}

/// Produces `Configuration` values from a single declaration source.
#[derive(Debug, Clone)]
pub struct ConfigProvider {
    source: DeclarationSource,
}

impl ConfigProvider {
    pub fn new(source: DeclarationSource) -> Self {
        Self { source }
    }

    /// Resolves the declaration location: explicit path > project file >
    /// user config file > empty declaration.
    pub fn discover(explicit: Option<PathBuf>, project_dir: &Path) -> Self {
        Self::new(resolve_source(
            explicit,
            project_dir,
            user_declaration_path(),
        ))
    }

    pub fn source(&self) -> &DeclarationSource {
        &self.source
    }

    pub fn load(&self) -> Result<Configuration, ConfigError> {
        let text = self.source.read()?;
        let decl: Declaration =
            toml::from_str(&text).map_err(|e| ConfigError::MalformedConfig {
                origin: self.source.name(),
                reason: e.message().to_string(),
            })?;

        Ok(decl.into())
    }

    pub fn load_validated(&self) -> Result<Configuration, ConfigError> {
        patterns::validate(self.load()?)
    }
}

fn user_declaration_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(DECLARATION_FILE))
}

fn resolve_source(
    explicit: Option<PathBuf>,
    project_dir: &Path,
    user_path: Option<PathBuf>,
) -> DeclarationSource {
    if let Some(path) = explicit {
        return DeclarationSource::File(path);
    }

    let project_path = project_dir.join(DECLARATION_FILE);
    if project_path.is_file() {
        return DeclarationSource::File(project_path);
    }

    if let Some(path) = user_path.filter(|p| p.is_file()) {
        return DeclarationSource::File(path);
    }

    log::info!(
        "No {} found in {}; using defaults",
        DECLARATION_FILE,
        project_dir.display()
    );
    DeclarationSource::inline("<defaults>", "")
}
