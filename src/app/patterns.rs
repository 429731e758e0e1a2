use crate::app::error::ConfigError;
use crate::app::models::Configuration;
use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use pathdiff::diff_paths;
use std::path::{Component, Path, PathBuf};

/// Checks every content pattern and hands the configuration back untouched.
/// Syntax beyond the basic checks is whatever the glob engine accepts.
pub fn validate(config: Configuration) -> Result<Configuration, ConfigError> {
    if config.content().is_empty() {
        log::warn!("💡 Tip: No content patterns declared; nothing will be scanned.");
    }

    for (index, pattern) in config.content().iter().enumerate() {
        check_pattern(index, pattern)?;
    }

    Ok(config)
}

fn check_pattern(index: usize, pattern: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidPattern {
        index,
        pattern: pattern.to_string(),
        reason,
    };

    if pattern.is_empty() {
        return Err(invalid("pattern is empty".to_string()));
    }

    if let Some(c) = pattern.chars().find(|c| c.is_control()) {
        return Err(invalid(format!("contains control character {:?}", c)));
    }

    if normalize(pattern).is_empty() {
        return Err(invalid("pattern names no files".to_string()));
    }

    compile(pattern).map_err(|e| invalid(e.kind().to_string()))?;

    // The engine keeps spaces inside `{a, b}` as part of the alternative.
    if has_whitespace_in_alternation(pattern) {
        log::warn!(
            "Content pattern #{} {:?} has whitespace inside a {{...}} group; \
             it will only match names containing that whitespace",
            index,
            pattern
        );
    }

    Ok(())
}

/// Splits a leading `!` off an exclusion entry.
fn split_negation(pattern: &str) -> (bool, &str) {
    match pattern.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, pattern),
    }
}

/// Patterns are relative to the working directory, so a leading `./` is noise.
fn normalize(pattern: &str) -> &str {
    let mut pat = split_negation(pattern).1;
    while let Some(rest) = pat.strip_prefix("./") {
        pat = rest;
    }
    pat
}

fn compile(pattern: &str) -> Result<Glob, globset::Error> {
    GlobBuilder::new(normalize(pattern))
        .literal_separator(true)
        .build()
}

fn has_whitespace_in_alternation(pattern: &str) -> bool {
    let mut depth = 0usize;
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            c if depth > 0 && c.is_whitespace() => return true,
            _ => {}
        }
    }
    false
}

/// Compiled content patterns. Answers "is this path a scan target?" for a
/// caller that already holds the path; it never walks directories.
/// Entries starting with `!` exclude what the other entries include.
pub struct ContentSet {
    include_set: GlobSet,
    exclude_set: GlobSet,
}

impl ContentSet {
    pub fn new(config: &Configuration) -> Result<Self, ConfigError> {
        let mut include = GlobSetBuilder::new();
        let mut exclude = GlobSetBuilder::new();
        for (index, pattern) in config.content().iter().enumerate() {
            let glob = compile(pattern).map_err(|e| ConfigError::InvalidPattern {
                index,
                pattern: pattern.clone(),
                reason: e.kind().to_string(),
            })?;
            if split_negation(pattern).0 {
                exclude.add(glob);
            } else {
                include.add(glob);
            }
        }

        Ok(Self {
            include_set: build_set(include, config)?,
            exclude_set: build_set(exclude, config)?,
        })
    }

    /// Number of inclusion patterns.
    pub fn len(&self) -> usize {
        self.include_set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.include_set.is_empty()
    }

    /// `path` may be absolute or relative to `root`.
    pub fn matches(&self, root: &Path, path: &Path) -> bool {
        let relative = if path.is_absolute() {
            match diff_paths(path, root) {
                Some(rel) => rel,
                None => return false,
            }
        } else {
            path.to_path_buf()
        };

        let relative: PathBuf = relative
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect();

        self.include_set.is_match(&relative) && !self.exclude_set.is_match(&relative)
    }
}

fn build_set(builder: GlobSetBuilder, config: &Configuration) -> Result<GlobSet, ConfigError> {
    builder
        .build()
        .map_err(|e| set_error(config, e.glob(), e.kind().to_string()))
}

/// Attributes a set-level failure to the declared entry it came from, when
/// the engine names one.
fn set_error(config: &Configuration, glob: Option<&str>, reason: String) -> ConfigError {
    let position = glob.and_then(|glob| {
        config
            .content()
            .iter()
            .position(|pattern| normalize(pattern) == glob)
    });

    match position {
        Some(index) => ConfigError::InvalidPattern {
            index,
            pattern: config.content()[index].clone(),
            reason,
        },
        None => ConfigError::PatternSet { reason },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::Theme;

    fn config(content: &[&str]) -> Configuration {
        Configuration::new(
            content.iter().map(|s| s.to_string()).collect(),
            Theme::default(),
            Vec::new(),
        )
    }

    #[test]
    fn valid_patterns_pass_unchanged() {
        let cfg = config(&["./src/**/*.{html,ts,tsx}", "index.html"]);
        assert_eq!(validate(cfg.clone()).unwrap(), cfg);
    }

    #[test]
    fn empty_content_is_not_an_error() {
        assert!(validate(Configuration::default()).is_ok());
    }

    #[test]
    fn empty_pattern_is_rejected() {
        let err = validate(config(&["src/**", ""])).unwrap_err();
        match err {
            ConfigError::InvalidPattern { index, pattern, .. } => {
                assert_eq!(index, 1);
                assert_eq!(pattern, "");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn control_characters_are_rejected() {
        for bad in ["src/\0/*.rs", "src/**/*.rs\n", "a\tb"] {
            let err = validate(config(&[bad])).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidPattern { .. }),
                "{bad:?} accepted"
            );
        }
    }

    #[test]
    fn engine_grammar_errors_are_rejected() {
        let err = validate(config(&["src/**/*.{html,rs"])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { index: 0, .. }));
    }

    #[test]
    fn whitespace_in_alternation_is_only_a_warning() {
        assert!(validate(config(&["src/**/*.{html, rs}"])).is_ok());
    }

    #[test]
    fn detects_whitespace_in_alternation() {
        assert!(has_whitespace_in_alternation("*.{html, rs}"));
        assert!(!has_whitespace_in_alternation("my dir/*.{html,rs}"));
        assert!(!has_whitespace_in_alternation(r"\{ x\}/*.rs"));
    }

    #[test]
    fn normalize_strips_leading_dot_slash() {
        assert_eq!(normalize("././src/*.rs"), "src/*.rs");
        assert_eq!(normalize("../src/*.rs"), "../src/*.rs");
        assert_eq!(normalize("!./src/legacy/**"), "src/legacy/**");
    }

    #[test]
    fn content_set_matches_relative_and_absolute_paths() {
        let set = ContentSet::new(&config(&["./src/**/*.{html,rs}"])).unwrap();
        let root = Path::new("/project");

        assert_eq!(set.len(), 1);
        assert!(set.matches(root, Path::new("src/main.rs")));
        assert!(set.matches(root, Path::new("./src/app/view.html")));
        assert!(set.matches(root, Path::new("/project/src/lib.rs")));
        assert!(!set.matches(root, Path::new("src/style.css")));
        assert!(!set.matches(root, Path::new("/project/tests/cli.rs")));
    }

    #[test]
    fn single_star_does_not_cross_directories() {
        let set = ContentSet::new(&config(&["src/*.rs"])).unwrap();
        let root = Path::new("/project");
        assert!(set.matches(root, Path::new("src/main.rs")));
        assert!(!set.matches(root, Path::new("src/app/config.rs")));
    }

    #[test]
    fn negated_entries_exclude_matches() {
        let set = ContentSet::new(&config(&["./src/**/*.rs", "!./src/legacy/**"])).unwrap();
        let root = Path::new("/p");

        assert_eq!(set.len(), 1);
        assert!(set.matches(root, Path::new("src/main.rs")));
        assert!(!set.matches(root, Path::new("src/legacy/old.rs")));
        assert!(!set.matches(root, Path::new("/p/src/legacy/deep/old.rs")));
    }

    #[test]
    fn only_negated_entries_match_nothing() {
        let set = ContentSet::new(&config(&["!src/legacy/**"])).unwrap();
        assert!(set.is_empty());
        assert!(!set.matches(Path::new("/p"), Path::new("src/main.rs")));
    }

    #[test]
    fn bare_negation_is_rejected() {
        for bad in ["!", "!./"] {
            let err = validate(config(&["src/**", bad])).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidPattern { index: 1, .. }),
                "{bad:?} accepted"
            );
        }
    }

    #[test]
    fn negated_grammar_errors_are_rejected() {
        let err = validate(config(&["!src/**/*.{html"])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { index: 0, .. }));
    }

    #[test]
    fn set_error_points_at_offending_entry() {
        let cfg = config(&["index.html", "./src/**/*.rs", "!src/legacy/**"]);

        match set_error(&cfg, Some("src/**/*.rs"), "too big".to_string()) {
            ConfigError::InvalidPattern { index, pattern, .. } => {
                assert_eq!(index, 1);
                assert_eq!(pattern, "./src/**/*.rs");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(
            set_error(&cfg, Some("src/legacy/**"), "too big".to_string()),
            ConfigError::InvalidPattern { index: 2, .. }
        ));
    }

    #[test]
    fn set_error_without_known_entry_claims_no_index() {
        let cfg = config(&["index.html"]);
        let err = set_error(&cfg, None, "too big".to_string());
        assert!(matches!(err, ConfigError::PatternSet { .. }));
        assert_eq!(err.to_string(), "invalid content pattern set: too big");
    }

    #[test]
    fn empty_content_set_matches_nothing() {
        let set = ContentSet::new(&Configuration::default()).unwrap();
        assert!(set.is_empty());
        assert!(!set.matches(Path::new("/project"), Path::new("src/main.rs")));
    }
}
