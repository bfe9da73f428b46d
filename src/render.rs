use crate::types::{AuditResult, Violation};
use anyhow::{Context, bail};
use tracing::info;

/// Violations grouped by `[check_id] check_name`, groups in first-appearance order
fn group_violations(violations: &[Violation]) -> Vec<(String, Vec<&Violation>)> {
    let mut groups: Vec<(String, Vec<&Violation>)> = Vec::new();
    for violation in violations {
        let key = format!("[{}] {}", violation.check_id, violation.check_name);
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(violation),
            None => groups.push((key, vec![violation])),
        }
    }
    groups
}

fn status(result: &AuditResult) -> &'static str {
    if result.passed() { "PASS" } else { "FAIL" }
}

/// Human-readable report printed to stdout
pub fn format_report(result: &AuditResult) -> String {
    let mut lines = vec![
        format!("PRE-COMMIT AUDIT: {}", status(result)),
        format!("  Scanned: {} files", result.files_scanned),
        format!("  Violations: {}", result.violations.len()),
    ];

    if !result.passed() {
        lines.push(String::new());
        for (key, members) in group_violations(&result.violations) {
            lines.push(format!("  {}", key));
            for v in members {
                lines.push(format!("    {}:{} — {}", v.file, v.line, v.detail));
            }
            lines.push(String::new());
        }
    }

    let commit_status = if result.passed() {
        "COMMIT ALLOWED"
    } else {
        "COMMIT BLOCKED"
    };
    lines.push(format!("  Status: {}", commit_status));
    lines.join("\n")
}

pub fn format_markdown(result: &AuditResult) -> String {
    let mut output = format!("# Pre-commit audit: {}\n\n", status(result));
    output.push_str(&format!(
        "Scanned **{}** file(s), **{}** violation(s)\n",
        result.files_scanned,
        result.violations.len()
    ));

    for (key, members) in group_violations(&result.violations) {
        output.push_str(&format!("\n## {}\n\n", key));
        for v in members {
            output.push_str(&format!("- `{}:{}`: {}\n", v.file, v.line, v.detail));
        }
    }
    output
}

pub fn format_json(result: &AuditResult) -> anyhow::Result<String> {
    let output = serde_json::json!({
        "passed": result.passed(),
        "files_scanned": result.files_scanned,
        "violations": result.violations,
    });
    serde_json::to_string_pretty(&output).context("render json")
}

/// Write the result to a `.md` or `.json` file
pub fn write_output(path: &str, result: &AuditResult) -> anyhow::Result<()> {
    let content = if path.ends_with(".json") {
        format_json(result)?
    } else if path.ends_with(".md") {
        format_markdown(result)
    } else {
        bail!("Output file must end with .md or .json: {}", path);
    };

    std::fs::write(path, content).with_context(|| format!("write output {}", path))?;
    info!("Results written to {}", path);
    Ok(())
}
