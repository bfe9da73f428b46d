pub mod table;

use crate::config::Config;
use regex::Regex;
use table::{MatchMode, RuleCompileError, RuleDef, RuleTable, compile_regex};
use tracing::debug;

pub const PROTOCOL_ZERO_ID: &str = "PZ-001";
pub const FORCE_UNWRAP_ID: &str = "FU-001";
pub const DEBUG_ARTIFACT_ID: &str = "DA-001";
pub const DEPRECATED_API_ID: &str = "DP-001";
pub const COMBINE_ID: &str = "CB-001";
pub const SECRET_LEAKAGE_ID: &str = "SL-001";
pub const COMMIT_MESSAGE_ID: &str = "CC-001";

pub const PROTOCOL_ZERO: &str = "Protocol Zero";
pub const FORCE_UNWRAP: &str = "Force Unwrap";
pub const DEBUG_ARTIFACT: &str = "Debug Artifact";
pub const DEPRECATED_API: &str = "Deprecated API";
pub const COMBINE: &str = "Combine Usage";
pub const SECRET_LEAKAGE: &str = "Secret Leakage";
pub const COMMIT_MESSAGE: &str = "Commit Message";

/// Attribution disclaimers and generation claims, matched case-insensitively
const FORBIDDEN_PHRASES: &[&str] = &[
    r"generated\s+by\s+ai",
    r"as\s+an\s+ai",
    r"i\s+have\s+updated",
    r"based\s+on\s+the\s+design\s+doc",
    r"llm[\s\-]optimized",
    r"claude[\s\-]generated",
    r"ai[\s\-]assisted",
    r"co-authored-by.*(?:ai|claude|gpt|copilot)",
    r"generated\s+with",
    r"ai[\s\-]generated",
    r"written\s+by\s+ai",
    r"produced\s+by\s+ai",
    r"created\s+by\s+ai",
];

const FORCE_UNWRAP_CANDIDATE: &str = r#"[\w\)>\]"]!"#;
const FORCE_UNWRAP_FALSE_POSITIVES: &str =
    r"!=|!==|#available|#unavailable|XCTUnwrap|@IBOutlet|///|//.*!";

const DEBUG_CALLS: &[&str] = &[
    r"\bprint\s*\(",
    r"\bdebugPrint\s*\(",
    r"\bNSLog\s*\(",
    r"\bdump\s*\(",
];

/// (pattern, check id, remediation)
const BANNED_APIS: &[(&str, &str, &str)] = &[
    (
        r"\bObservableObject\b",
        DEPRECATED_API_ID,
        "Use @Observable instead of ObservableObject",
    ),
    (
        r"@Published\b",
        DEPRECATED_API_ID,
        "Use @Observable instead of @Published",
    ),
    (
        r"@StateObject\b",
        DEPRECATED_API_ID,
        "Use @State with @Observable instead of @StateObject",
    ),
    (
        r"@EnvironmentObject\b",
        DEPRECATED_API_ID,
        "Use @Environment with @Observable instead",
    ),
    (r"\bimport\s+Combine\b", COMBINE_ID, "Combine framework prohibited"),
    (r"\bPassthroughSubject\b", COMBINE_ID, "Combine type prohibited"),
    (r"\bCurrentValueSubject\b", COMBINE_ID, "Combine type prohibited"),
    (r"\bAnyCancellable\b", COMBINE_ID, "Combine type prohibited"),
    (r"\.sink\s*\(", COMBINE_ID, "Combine operator prohibited"),
    (r"\.assign\s*\(\s*to:", COMBINE_ID, "Combine operator prohibited"),
    (
        r"\bDispatchQueue\b",
        DEPRECATED_API_ID,
        "Use async/await instead of GCD",
    ),
    (
        r"\bDispatchGroup\b",
        DEPRECATED_API_ID,
        "Use TaskGroup instead of DispatchGroup",
    ),
    (
        r"\bDispatchSemaphore\b",
        DEPRECATED_API_ID,
        "Use Swift concurrency instead",
    ),
    (
        r"\bperformSelector\b",
        DEPRECATED_API_ID,
        "Use Swift concurrency instead",
    ),
    (
        r"\bPreviewProvider\b",
        DEPRECATED_API_ID,
        "Use #Preview macro instead of PreviewProvider",
    ),
    (
        r"\bUIHostingController\b",
        DEPRECATED_API_ID,
        "UIHostingController requires explicit approval",
    ),
    (
        r"\bUIViewController\b",
        DEPRECATED_API_ID,
        "UIKit controllers prohibited — use SwiftUI",
    ),
    (
        r"\bPublishers\.\b",
        COMBINE_ID,
        "Combine Publishers namespace prohibited",
    ),
    (
        r"\bSubscribers\.\b",
        COMBINE_ID,
        "Combine Subscribers namespace prohibited",
    ),
    (r"\bAnyPublisher\b", COMBINE_ID, "Combine type prohibited"),
    (r"\bPublished\.Publisher\b", COMBINE_ID, "Combine type prohibited"),
    (r"\bCancellable\b", COMBINE_ID, "Combine protocol prohibited"),
    (r"\.receive\s*\(\s*on:", COMBINE_ID, "Combine operator prohibited"),
    (
        r"\.eraseToAnyPublisher\s*\(",
        COMBINE_ID,
        "Combine operator prohibited",
    ),
];

/// (pattern, remediation)
const SECRETS: &[(&str, &str)] = &[
    (
        r"(?i)https?://discord(?:app)?\.com/api/webhooks/",
        "Plaintext Discord webhook URL detected",
    ),
    (
        concat!(
            r"(?i)(?:api[_\-]?key|api[_\-]?secret|access[_\-]?token|auth[_\-]?token|",
            r#"bearer|secret[_\-]?key|private[_\-]?key)\s*[:=]\s*["'][A-Za-z0-9+/=_\-]{16,}["']"#
        ),
        "Potential secret or API key in plaintext",
    ),
    (
        r#"["'][A-Za-z0-9+/=]{40,}["']"#,
        "High-entropy string literal (potential encoded secret)",
    ),
];

const SECRET_FALSE_POSITIVES: &str =
    r"test_|mock_|fake_|example_|XOR|xor|\.xcassets|bundleIdentifier|UTType";

/// Compiled pattern tables shared by every check for one run
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub forbidden_phrases: RuleTable,
    pub unwrap_candidate: Regex,
    pub unwrap_false_positive: Regex,
    pub debug_calls: RuleTable,
    pub banned_apis: RuleTable,
    pub secrets: RuleTable,
    pub secret_false_positive: Regex,
    pub commit_subject: Regex,
    /// Character cap on the first line of a commit message
    pub max_subject_len: usize,
}

impl RuleSet {
    pub fn from_config(config: &Config) -> Result<Self, RuleCompileError> {
        let phrase_defs: Vec<RuleDef<'_>> = FORBIDDEN_PHRASES
            .iter()
            .copied()
            .chain(config.rules.extra_forbidden_phrases.iter().map(String::as_str))
            .map(|pattern| RuleDef {
                pattern,
                check_id: PROTOCOL_ZERO_ID,
                check_name: PROTOCOL_ZERO,
                message: "Forbidden phrase matched",
            })
            .collect();
        let forbidden_phrases =
            RuleTable::compile("forbidden_phrases", MatchMode::FirstMatch, true, &phrase_defs)?;

        let debug_defs: Vec<RuleDef<'_>> = DEBUG_CALLS
            .iter()
            .map(|&pattern| RuleDef {
                pattern,
                check_id: DEBUG_ARTIFACT_ID,
                check_name: DEBUG_ARTIFACT,
                message: "Debug statement detected",
            })
            .collect();
        let debug_calls =
            RuleTable::compile("debug_calls", MatchMode::FirstMatch, false, &debug_defs)?;

        let banned_defs: Vec<RuleDef<'_>> = BANNED_APIS
            .iter()
            .map(|&(pattern, check_id, message)| RuleDef {
                pattern,
                check_id,
                check_name: if check_id == COMBINE_ID {
                    COMBINE
                } else {
                    DEPRECATED_API
                },
                message,
            })
            .collect();
        let banned_apis =
            RuleTable::compile("banned_apis", MatchMode::EveryMatch, false, &banned_defs)?;

        let secret_defs: Vec<RuleDef<'_>> = SECRETS
            .iter()
            .map(|&(pattern, message)| RuleDef {
                pattern,
                check_id: SECRET_LEAKAGE_ID,
                check_name: SECRET_LEAKAGE,
                message,
            })
            .collect();
        let secrets = RuleTable::compile("secrets", MatchMode::FirstMatch, false, &secret_defs)?;

        let ruleset = Self {
            forbidden_phrases,
            unwrap_candidate: compile_regex("force_unwrap", FORCE_UNWRAP_CANDIDATE, false)?,
            unwrap_false_positive: compile_regex(
                "force_unwrap",
                FORCE_UNWRAP_FALSE_POSITIVES,
                false,
            )?,
            debug_calls,
            banned_apis,
            secrets,
            secret_false_positive: compile_regex("secrets", SECRET_FALSE_POSITIVES, false)?,
            commit_subject: compile_regex(
                "commit_subject",
                &commit_subject_pattern(&config.commit.types, &config.commit.scopes),
                false,
            )?,
            max_subject_len: config.commit.max_subject_len,
        };
        debug!(
            "Compiled rule set: {} phrases, {} debug calls, {} banned APIs, {} secret patterns",
            ruleset.forbidden_phrases.rules.len(),
            ruleset.debug_calls.rules.len(),
            ruleset.banned_apis.rules.len(),
            ruleset.secrets.rules.len()
        );
        Ok(ruleset)
    }
}

/// `type(scope): description` with closed type and scope sets
fn commit_subject_pattern(types: &[String], scopes: &[String]) -> String {
    let alternation = |items: &[String]| {
        items
            .iter()
            .map(|s| regex::escape(s))
            .collect::<Vec<_>>()
            .join("|")
    };
    format!(
        r"^(?:{})\((?:{})\): [a-z].*$",
        alternation(types),
        alternation(scopes)
    )
}
