mod walk;

use crate::classify::Classifier;
use std::path::Path;
use std::process::Command;
use tracing::{debug, warn};

/// Where the candidate file list comes from
#[derive(Debug)]
pub enum FileSource {
    /// Files staged for commit
    Staged,
    /// Every tracked file, or a filesystem walk when git is unavailable
    All,
    /// A single explicit path
    File(String),
}

impl FileSource {
    /// Resolve the candidate paths, in the order the source lists them
    pub fn list(&self, classifier: &Classifier) -> Vec<String> {
        match self {
            Self::Staged => get_staged_files(),
            Self::All => get_tracked_files().unwrap_or_else(|| {
                warn!("git ls-files unavailable, walking the working directory");
                walk::collect_files(Path::new("."), classifier)
            }),
            Self::File(path) => vec![path.clone()],
        }
    }
}

pub fn get_staged_files() -> Vec<String> {
    git_lines(&["diff", "--cached", "--name-only", "--diff-filter=ACMR"]).unwrap_or_else(|| {
        warn!("git diff --cached failed, no staged files to audit");
        Vec::new()
    })
}

pub fn get_tracked_files() -> Option<Vec<String>> {
    git_lines(&["ls-files"])
}

/// Run git and return its non-empty output lines, or None if git is missing or fails
fn git_lines(args: &[&str]) -> Option<Vec<String>> {
    debug!("Running git {}", args.join(" "));
    let output = match Command::new("git").args(args).output() {
        Ok(output) => output,
        Err(e) => {
            debug!("Failed to execute git: {}", e);
            return None;
        }
    };
    if !output.status.success() {
        debug!("git exited with {}", output.status);
        return None;
    }

    Some(
        String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect(),
    )
}

/// Truncate to at most `max` characters, respecting char boundaries
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
