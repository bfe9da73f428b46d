use super::{Context, FileCheck, SourceFile, rule_violation};
use crate::types::Violation;

/// Plaintext credentials, webhook URLs and encoded secrets
pub struct SecretLeakage;

impl FileCheck for SecretLeakage {
    fn name(&self) -> &'static str {
        "secret_leakage"
    }

    fn run(&self, ctx: &Context<'_>, file: &SourceFile<'_>, out: &mut Vec<Violation>) {
        if ctx.classifier.is_governance_file(file.path)
            || ctx.classifier.is_secret_scan_exempt(file.path)
        {
            return;
        }
        for (line_num, line) in file.numbered() {
            if ctx.rules.secret_false_positive.is_match(line) {
                continue;
            }
            for rule in ctx.rules.secrets.matches(line) {
                out.push(rule_violation(rule, file.path, line_num, rule.message.clone()));
            }
        }
    }
}
