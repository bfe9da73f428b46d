pub mod banned_api;
pub mod commit;
pub mod debug_artifact;
pub mod force_unwrap;
pub mod protocol_zero;
pub mod secret;

use crate::classify::Classifier;
use crate::rule::RuleSet;
use crate::rule::table::Rule;
use crate::types::Violation;

/// One readable file, split into lines
pub struct SourceFile<'a> {
    pub path: &'a str,
    /// Split on `\n`; a trailing empty entry is kept
    pub lines: Vec<&'a str>,
}

impl<'a> SourceFile<'a> {
    pub fn new(path: &'a str, content: &'a str) -> Self {
        Self {
            path,
            lines: content.split('\n').collect(),
        }
    }

    /// Lines paired with their 1-indexed line numbers
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &'a str)> + '_ {
        self.lines.iter().enumerate().map(|(i, line)| (i + 1, *line))
    }
}

/// Everything a check consults besides the file itself
pub struct Context<'a> {
    pub rules: &'a RuleSet,
    pub classifier: &'a Classifier,
    /// Maximum characters of a source line echoed in a detail
    pub excerpt_len: usize,
}

/// A per-file check appending its findings to the shared accumulator
pub trait FileCheck {
    fn name(&self) -> &'static str;
    fn run(&self, ctx: &Context<'_>, file: &SourceFile<'_>, out: &mut Vec<Violation>);
}

/// Per-file checks in execution order
pub fn file_checks() -> [&'static dyn FileCheck; 5] {
    [
        &protocol_zero::ProtocolZero,
        &force_unwrap::ForceUnwrap,
        &debug_artifact::DebugArtifact,
        &banned_api::BannedApi,
        &secret::SecretLeakage,
    ]
}

fn rule_violation(rule: &Rule, path: &str, line: usize, detail: impl Into<String>) -> Violation {
    Violation::new(
        rule.check_id.clone(),
        rule.check_name.clone(),
        path,
        line,
        detail,
    )
}
