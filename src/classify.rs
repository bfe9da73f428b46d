use crate::config::ScanConfig;
use crate::rule::table::RuleCompileError;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::HashSet;
use std::path::{Component, Path};

const LINE_COMMENT: &str = "//";
const BLOCK_OPEN: &str = "#if DEBUG";
const BLOCK_CLOSE: &str = "#endif";

/// Path and line predicates deciding which checks apply where
#[derive(Debug, Clone)]
pub struct Classifier {
    governance_files: HashSet<String>,
    excluded_dirs: HashSet<String>,
    extensions: HashSet<String>,
    source_extension: String,
    test_suffixes: Vec<String>,
    secret_exempt: GlobSet,
}

impl Classifier {
    pub fn new(config: &ScanConfig) -> Result<Self, RuleCompileError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &config.secret_exempt {
            let glob = Glob::new(pattern).map_err(|e| RuleCompileError::InvalidGlob {
                glob: pattern.clone(),
                source: e,
            })?;
            builder.add(glob);
        }
        let secret_exempt = builder.build().map_err(|e| RuleCompileError::InvalidGlob {
            glob: config.secret_exempt.join(", "),
            source: e,
        })?;

        Ok(Self {
            governance_files: config.governance_files.iter().cloned().collect(),
            excluded_dirs: config.excluded_dirs.iter().cloned().collect(),
            extensions: config.extensions.iter().cloned().collect(),
            source_extension: config.source_extension.clone(),
            test_suffixes: config.test_suffixes.clone(),
            secret_exempt,
        })
    }

    /// Policy documents that quote forbidden phrases as rules
    pub fn is_governance_file(&self, path: &str) -> bool {
        base_name(path).is_some_and(|name| self.governance_files.contains(name))
    }

    pub fn is_scannable_extension(&self, path: &str) -> bool {
        extension(path).is_some_and(|ext| self.extensions.contains(ext))
    }

    /// Whether any path component is an excluded build or tooling directory
    pub fn is_excluded_path(&self, path: &str) -> bool {
        Path::new(path).components().any(|c| match c {
            Component::Normal(part) => part
                .to_str()
                .is_some_and(|part| self.excluded_dirs.contains(part)),
            _ => false,
        })
    }

    /// Extension check first, then exclusion
    pub fn is_scannable(&self, path: &str) -> bool {
        self.is_scannable_extension(path) && !self.is_excluded_path(path)
    }

    pub fn is_source_file(&self, path: &str) -> bool {
        extension(path) == Some(self.source_extension.as_str())
    }

    pub fn is_test_file(&self, path: &str) -> bool {
        base_name(path).is_some_and(|name| {
            self.test_suffixes
                .iter()
                .any(|suffix| name.ends_with(suffix.as_str()))
        })
    }

    pub fn is_secret_scan_exempt(&self, path: &str) -> bool {
        self.secret_exempt.is_match(normalize(path))
    }

    /// Directory pruning for the filesystem walk fallback
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.excluded_dirs.contains(name)
    }
}

/// Forward slashes, no leading `./`
pub fn normalize(path: &str) -> String {
    let path = path.replace('\\', "/");
    let mut rest = path.as_str();
    while let Some(stripped) = rest.strip_prefix("./") {
        rest = stripped;
    }
    rest.to_string()
}

fn base_name(path: &str) -> Option<&str> {
    Path::new(path).file_name().and_then(|n| n.to_str())
}

fn extension(path: &str) -> Option<&str> {
    Path::new(path).extension().and_then(|e| e.to_str())
}

/// Line or doc comment (`//`, `///`)
pub fn is_comment(line: &str) -> bool {
    line.trim().starts_with(LINE_COMMENT)
}

/// For each line, whether it sits inside an open `#if DEBUG` block.
///
/// Depth is evaluated over the lines preceding the target, so the opening
/// marker itself is outside and the closing marker is inside.
pub fn nested_block_flags(lines: &[&str]) -> Vec<bool> {
    let mut depth: usize = 0;
    lines
        .iter()
        .map(|line| {
            let inside = depth > 0;
            match line.trim() {
                BLOCK_OPEN => depth += 1,
                BLOCK_CLOSE => depth = depth.saturating_sub(1),
                _ => {}
            }
            inside
        })
        .collect()
}
