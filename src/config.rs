use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub commit: CommitConfig,
    #[serde(default)]
    pub rules: RulesConfig,
}

/// Which files are scanned and which are exempt from which checks
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    /// Base names of policy documents allowed to quote forbidden phrases
    #[serde(default = "default_governance_files")]
    pub governance_files: Vec<String>,
    /// Directory names that exclude any path passing through them
    #[serde(default = "default_excluded_dirs")]
    pub excluded_dirs: Vec<String>,
    /// File extensions (without dot) that are scanned at all
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Extension of source files subject to the code checks
    #[serde(default = "default_source_extension")]
    pub source_extension: String,
    /// Base name suffixes marking test files
    #[serde(default = "default_test_suffixes")]
    pub test_suffixes: Vec<String>,
    /// Glob patterns for paths exempt from secret scanning
    #[serde(default = "default_secret_exempt")]
    pub secret_exempt: Vec<String>,
    /// Maximum characters of a source line echoed in a violation
    #[serde(default = "default_excerpt_len")]
    pub excerpt_len: usize,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct CommitConfig {
    #[serde(default = "default_commit_types")]
    pub types: Vec<String>,
    #[serde(default = "default_commit_scopes")]
    pub scopes: Vec<String>,
    #[serde(default = "default_max_subject_len")]
    pub max_subject_len: usize,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct RulesConfig {
    /// Additional case-insensitive regexes appended to the forbidden phrase table
    #[serde(default)]
    pub extra_forbidden_phrases: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            governance_files: default_governance_files(),
            excluded_dirs: default_excluded_dirs(),
            extensions: default_extensions(),
            source_extension: default_source_extension(),
            test_suffixes: default_test_suffixes(),
            secret_exempt: default_secret_exempt(),
            excerpt_len: default_excerpt_len(),
        }
    }
}

impl Default for CommitConfig {
    fn default() -> Self {
        Self {
            types: default_commit_types(),
            scopes: default_commit_scopes(),
            max_subject_len: default_max_subject_len(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_governance_files() -> Vec<String> {
    strings(&["CLAUDE.md", "Design-Doc.md", "SKILL.md", "remediation.md"])
}

fn default_excluded_dirs() -> Vec<String> {
    strings(&[
        ".mypy_cache",
        "__pycache__",
        ".git",
        "DerivedData",
        ".build",
        "xcuserdata",
        "node_modules",
    ])
}

fn default_extensions() -> Vec<String> {
    strings(&["swift", "md", "txt", "json", "yaml", "yml", "ahap"])
}

fn default_source_extension() -> String {
    "swift".to_string()
}

fn default_test_suffixes() -> Vec<String> {
    strings(&["Tests.swift", "TestCase.swift"])
}

fn default_secret_exempt() -> Vec<String> {
    strings(&["docs/**", ".claude/skills/**/references/**"])
}

fn default_excerpt_len() -> usize {
    60
}

fn default_commit_types() -> Vec<String> {
    strings(&["feat", "fix", "refactor", "test", "chore", "docs"])
}

fn default_commit_scopes() -> Vec<String> {
    strings(&[
        "coordinator",
        "audio",
        "haptics",
        "webhook",
        "ch1",
        "ch2",
        "ch3",
        "ch4",
        "ch5",
        "ch6",
        "assets",
        "tests",
    ])
}

fn default_max_subject_len() -> usize {
    72
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("parse config {}", path.display()))?;
        Ok(config)
    }

    /// Load the config file if it exists, otherwise fall back to the built-in policy
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            debug!("Loading config from {}", path.display());
            Self::load(path)
        } else {
            debug!("No config at {}, using built-in policy", path.display());
            Ok(Self::default())
        }
    }
}
