use super::{Context, FileCheck, SourceFile};
use crate::classify::is_comment;
use crate::rule::{FORCE_UNWRAP, FORCE_UNWRAP_ID, RuleSet};
use crate::types::Violation;

/// Characters that, before a `!`, make it a prefix operator rather than an unwrap
const NON_UNWRAP_PREFIXES: &[char] = &[' ', '\t', '(', '{', '[', ',', '=', ':'];

/// Force unwrap operators in source files
pub struct ForceUnwrap;

impl FileCheck for ForceUnwrap {
    fn name(&self) -> &'static str {
        "force_unwrap"
    }

    fn run(&self, ctx: &Context<'_>, file: &SourceFile<'_>, out: &mut Vec<Violation>) {
        if !ctx.classifier.is_source_file(file.path) {
            return;
        }
        for (line_num, line) in file.numbered() {
            if is_force_unwrap(ctx.rules, line) {
                out.push(Violation::new(
                    FORCE_UNWRAP_ID,
                    FORCE_UNWRAP,
                    file.path,
                    line_num,
                    "Force unwrap operator detected",
                ));
            }
        }
    }
}

/// Structural match first, then disambiguation on the first `!` of the line
fn is_force_unwrap(rules: &RuleSet, line: &str) -> bool {
    if is_comment(line) || rules.unwrap_false_positive.is_match(line) {
        return false;
    }
    if !rules.unwrap_candidate.is_match(line) {
        return false;
    }
    let Some(idx) = line.find('!') else {
        return false;
    };
    let Some(prev) = line[..idx].chars().next_back() else {
        return false;
    };
    if NON_UNWRAP_PREFIXES.contains(&prev) {
        return false;
    }
    !line[idx + 1..].starts_with('=')
}
