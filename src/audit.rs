use crate::check::commit::check_commit_message;
use crate::check::{Context, SourceFile, file_checks};
use crate::classify::Classifier;
use crate::config::Config;
use crate::rule::RuleSet;
use crate::rule::table::RuleCompileError;
use crate::types::{AuditResult, Violation};
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::{debug, info, trace};

/// Runs every check over a candidate file list and an optional commit message
pub struct Auditor {
    rules: RuleSet,
    classifier: Classifier,
    excerpt_len: usize,
}

impl Auditor {
    pub fn new(rules: RuleSet, classifier: Classifier, excerpt_len: usize) -> Self {
        Self {
            rules,
            classifier,
            excerpt_len,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, RuleCompileError> {
        Ok(Self::new(
            RuleSet::from_config(config)?,
            Classifier::new(&config.scan)?,
            config.scan.excerpt_len,
        ))
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Audit files in input order, then the commit message if one is given
    pub fn audit(&self, files: &[String], commit_message: Option<&str>) -> AuditResult {
        let mut result = AuditResult::default();

        let scannable: Vec<&String> = files
            .iter()
            .filter(|f| self.classifier.is_scannable(f))
            .collect();
        debug!(
            "{} of {} candidate files are scannable",
            scannable.len(),
            files.len()
        );

        for path in scannable {
            let Some(content) = read_text(path) else {
                continue;
            };
            result.files_scanned += 1;
            self.audit_content(path, &content, &mut result.violations);
        }

        if let Some(message) = commit_message {
            let before = result.violations.len();
            check_commit_message(&self.rules, message, &mut result.violations);
            debug!(
                "Commit message produced {} violations",
                result.violations.len() - before
            );
        }

        info!(
            "Audit complete: {} files scanned, {} violations",
            result.files_scanned,
            result.violations.len()
        );
        result
    }

    /// Run every per-file check over already-read content
    pub fn audit_content(&self, path: &str, content: &str, out: &mut Vec<Violation>) {
        let ctx = Context {
            rules: &self.rules,
            classifier: &self.classifier,
            excerpt_len: self.excerpt_len,
        };
        let normalized = normalize_line_endings(content);
        let file = SourceFile::new(path, &normalized);
        for check in file_checks() {
            let before = out.len();
            check.run(&ctx, &file, out);
            trace!(
                "{}: {} produced {} violations",
                path,
                check.name(),
                out.len() - before
            );
        }
    }
}

/// Read a regular file, replacing invalid UTF-8; None if it cannot be read
fn read_text(path: &str) -> Option<String> {
    if !Path::new(path).is_file() {
        debug!("Skipping {}: not a regular file", path);
        return None;
    }
    match fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            debug!("Skipping {}: {}", path, e);
            None
        }
    }
}

fn normalize_line_endings(content: &str) -> Cow<'_, str> {
    if content.contains('\r') {
        Cow::Owned(content.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::format_report;
    use std::path::PathBuf;

    fn auditor() -> Auditor {
        Auditor::from_config(&Config::default()).unwrap()
    }

    fn write(dir: &Path, rel: &str, content: &[u8]) -> String {
        let path: PathBuf = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_clean_file_passes() {
        let dir = tempfile::tempdir().unwrap();
        let file = write(dir.path(), "App/View.swift", b"let x = 1\n");
        let result = auditor().audit(&[file], None);
        assert!(result.passed());
        assert_eq!(result.files_scanned, 1);
    }

    #[test]
    fn test_missing_and_unscannable_not_counted() {
        let dir = tempfile::tempdir().unwrap();
        let swift = write(dir.path(), "App/View.swift", b"let x = y!\n");
        let python = write(dir.path(), "tools/run.py", b"print('generated by ai')\n");
        let missing = dir.path().join("App/Gone.swift").to_string_lossy().into_owned();
        let directory = dir.path().join("App.json");
        fs::create_dir_all(&directory).unwrap();
        let files = vec![
            missing,
            python,
            directory.to_string_lossy().into_owned(),
            swift,
        ];
        let result = auditor().audit(&files, None);
        assert_eq!(result.files_scanned, 1);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].check_id, "FU-001");
    }

    #[test]
    fn test_excluded_directory_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let file = write(dir.path(), "node_modules/x/readme.md", b"generated by AI\n");
        let result = auditor().audit(&[file], None);
        assert_eq!(result.files_scanned, 0);
        assert!(result.passed());
    }

    #[test]
    fn test_invalid_utf8_is_replaced_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let bad = write(dir.path(), "App/Bad.swift", b"let a = b!\n\xff\xfe\nprint(1)\n");
        let good = write(dir.path(), "App/Good.swift", b"DispatchQueue.main.async { }\n");
        let result = auditor().audit(&[bad.clone(), good.clone()], None);
        assert_eq!(result.files_scanned, 2);
        let found: Vec<(&str, &str, usize)> = result
            .violations
            .iter()
            .map(|v| (v.file.as_str(), v.check_id.as_str(), v.line))
            .collect();
        assert_eq!(
            found,
            vec![
                (bad.as_str(), "FU-001", 1),
                (bad.as_str(), "DA-001", 3),
                (good.as_str(), "DP-001", 1),
            ]
        );
    }

    #[test]
    fn test_check_order_within_file() {
        let mut out = Vec::new();
        let content = "print(x!)\nimport Combine\n// generated by AI\n";
        auditor().audit_content("App/View.swift", content, &mut out);
        let codes: Vec<(&str, usize)> = out.iter().map(|v| (v.check_id.as_str(), v.line)).collect();
        assert_eq!(
            codes,
            vec![("PZ-001", 3), ("FU-001", 1), ("DA-001", 1), ("CB-001", 2)]
        );
    }

    #[test]
    fn test_crlf_lines_normalized() {
        let mut out = Vec::new();
        auditor().audit_content("App/View.swift", "let a = 1\r\nlet b = c!\r\n", &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].line, 2);
    }

    #[test]
    fn test_commit_message_after_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = write(dir.path(), "App/View.swift", b"let x = y!\n");
        let result = auditor().audit(&[file], Some("fix(webhook): handle timeout."));
        assert_eq!(result.violations.len(), 2);
        assert_eq!(result.violations[0].check_id, "FU-001");
        assert_eq!(result.violations[1].check_id, "CC-001");
        assert_eq!(result.violations[1].file, "<commit>");
    }

    #[test]
    fn test_empty_commit_message_with_no_files() {
        let result = auditor().audit(&[], Some(""));
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.exit_code(), 1);
    }

    #[test]
    fn test_secret_exemption_by_docs_root() {
        let mut out = Vec::new();
        let line = r#"api_key = "AAAAAAAAAAAAAAAAAAAAAAAA""#;
        let auditor = auditor();
        auditor.audit_content("Config/keys.json", line, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].check_id, "SL-001");
        out.clear();
        auditor.audit_content("docs/keys.json", line, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_governance_file_never_pz_or_sl() {
        let mut out = Vec::new();
        let content = "generated by AI\napi_key = \"AAAAAAAAAAAAAAAAAAAAAAAA\"\n";
        auditor().audit_content("CLAUDE.md", content, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_deterministic_and_monotonic() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(dir.path(), "App/A.swift", b"let a = b!\nprint(a)\n");
        let b = write(dir.path(), "App/B.swift", b"DispatchQueue.main.sync {}\n");
        let auditor = auditor();

        let first = auditor.audit(&[a.clone()], Some("bad message"));
        let again = auditor.audit(&[a.clone()], Some("bad message"));
        assert_eq!(format_report(&first), format_report(&again));

        let more = auditor.audit(&[a, b], Some("bad message"));
        for v in &first.violations {
            assert!(more.violations.contains(v));
        }
        assert!(more.violations.len() > first.violations.len());
    }
}
