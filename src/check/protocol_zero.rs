use super::{Context, FileCheck, SourceFile, rule_violation};
use crate::types::Violation;

/// Forbidden attribution phrases, skipped for governance documents
pub struct ProtocolZero;

impl FileCheck for ProtocolZero {
    fn name(&self) -> &'static str {
        "protocol_zero"
    }

    fn run(&self, ctx: &Context<'_>, file: &SourceFile<'_>, out: &mut Vec<Violation>) {
        if ctx.classifier.is_governance_file(file.path) {
            return;
        }
        for (line_num, line) in file.numbered() {
            for rule in ctx.rules.forbidden_phrases.matches(line) {
                out.push(rule_violation(
                    rule,
                    file.path,
                    line_num,
                    format!("{}: {}", rule.message, rule.source),
                ));
            }
        }
    }
}
