use crate::rule::{COMMIT_MESSAGE, COMMIT_MESSAGE_ID, RuleSet};
use crate::types::{COMMIT_SENTINEL, Violation};

fn commit_violation(detail: impl Into<String>) -> Violation {
    Violation::new(COMMIT_MESSAGE_ID, COMMIT_MESSAGE, COMMIT_SENTINEL, 1, detail)
}

/// Validate a commit message against the Conventional Commits grammar.
///
/// A blank message yields a single violation. Otherwise the length, grammar,
/// trailing period and forbidden phrase checks all run on the first line and
/// may fire together.
pub fn check_commit_message(rules: &RuleSet, message: &str, out: &mut Vec<Violation>) {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        out.push(commit_violation("Empty commit message"));
        return;
    }

    // Split on LF only; a CR before it stays part of the subject.
    let first_line = trimmed.split('\n').next().unwrap_or_default();

    let len = first_line.chars().count();
    if len > rules.max_subject_len {
        out.push(commit_violation(format!(
            "First line exceeds {} characters ({} chars)",
            rules.max_subject_len, len
        )));
    }

    if !rules.commit_subject.is_match(first_line) {
        out.push(commit_violation(format!(
            "Does not match format: type(scope): description — got: {}",
            first_line
        )));
    }

    if first_line.ends_with('.') {
        out.push(commit_violation("Description must not end with a period"));
    }

    if let Some(rule) = rules.forbidden_phrases.first_match(first_line) {
        out.push(commit_violation(format!(
            "Contains forbidden attribution phrase: {}",
            rule.source
        )));
    }
}
