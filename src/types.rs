use serde::{Deserialize, Serialize};

/// File sentinel used for violations raised against the commit message
pub const COMMIT_SENTINEL: &str = "<commit>";

/// A single policy violation with file location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Short check code (e.g. "SL-001")
    pub check_id: String,
    /// Display name of the check
    pub check_name: String,
    /// File path, or `<commit>` for commit message checks
    pub file: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// Violation detail
    pub detail: String,
}

impl Violation {
    pub fn new(
        check_id: impl Into<String>,
        check_name: impl Into<String>,
        file: impl Into<String>,
        line: usize,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            check_id: check_id.into(),
            check_name: check_name.into(),
            file: file.into(),
            line,
            detail: detail.into(),
        }
    }
}

/// Aggregate result of one audit run
#[derive(Debug, Default, Clone, Serialize)]
pub struct AuditResult {
    /// Files that passed classification and were read
    pub files_scanned: usize,
    /// Violations in file order, then check order, then line order
    pub violations: Vec<Violation>,
}

impl AuditResult {
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    /// Process exit status derived from the result
    pub fn exit_code(&self) -> i32 {
        if self.passed() { 0 } else { 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result_passes() {
        let result = AuditResult::default();
        assert!(result.passed());
        assert_eq!(result.exit_code(), 0);
    }

    #[test]
    fn test_any_violation_fails() {
        let mut result = AuditResult::default();
        result
            .violations
            .push(Violation::new("CC-001", "Commit Message", COMMIT_SENTINEL, 1, "x"));
        assert!(!result.passed());
        assert_eq!(result.exit_code(), 1);
    }
}
