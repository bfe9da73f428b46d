use super::{Context, FileCheck, SourceFile, rule_violation};
use crate::classify::is_comment;
use crate::types::Violation;

/// Deprecated and banned framework APIs; every matching entry is reported
pub struct BannedApi;

impl FileCheck for BannedApi {
    fn name(&self) -> &'static str {
        "banned_api"
    }

    fn run(&self, ctx: &Context<'_>, file: &SourceFile<'_>, out: &mut Vec<Violation>) {
        if !ctx.classifier.is_source_file(file.path) {
            return;
        }
        for (line_num, line) in file.numbered() {
            if is_comment(line) {
                continue;
            }
            for rule in ctx.rules.banned_apis.matches(line) {
                out.push(rule_violation(rule, file.path, line_num, rule.message.clone()));
            }
        }
    }
}
