use regex::{Regex, RegexBuilder};

#[derive(Debug, thiserror::Error)]
pub enum RuleCompileError {
    #[error("table '{table}' has invalid regex '{pattern}': {source}")]
    InvalidRegex {
        table: &'static str,
        pattern: String,
        source: regex::Error,
    },

    #[error("invalid glob '{glob}': {source}")]
    InvalidGlob {
        glob: String,
        source: globset::Error,
    },
}

/// How many entries of a table may fire on a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Stop testing the line at the first matching entry
    FirstMatch,
    /// Test every entry and record one violation per match
    EveryMatch,
}

/// A compiled pattern paired with the violation it produces
#[derive(Debug, Clone)]
pub struct Rule {
    /// Pattern text as written, echoed in some violation details
    pub source: String,
    pub regex: Regex,
    pub check_id: String,
    pub check_name: String,
    /// Violation detail, or its prefix when the check appends the match
    pub message: String,
}

/// Uncompiled rule definition
pub struct RuleDef<'a> {
    pub pattern: &'a str,
    pub check_id: &'a str,
    pub check_name: &'a str,
    pub message: &'a str,
}

#[derive(Debug, Clone)]
pub struct RuleTable {
    pub mode: MatchMode,
    pub rules: Vec<Rule>,
}

impl RuleTable {
    pub fn compile(
        table: &'static str,
        mode: MatchMode,
        case_insensitive: bool,
        defs: &[RuleDef<'_>],
    ) -> Result<Self, RuleCompileError> {
        let rules = defs
            .iter()
            .map(|def| {
                Ok(Rule {
                    source: def.pattern.to_string(),
                    regex: compile_regex(table, def.pattern, case_insensitive)?,
                    check_id: def.check_id.to_string(),
                    check_name: def.check_name.to_string(),
                    message: def.message.to_string(),
                })
            })
            .collect::<Result<Vec<_>, RuleCompileError>>()?;
        Ok(Self { mode, rules })
    }

    /// Rules matching the line, honoring the table's match mode
    pub fn matches<'a>(&'a self, line: &'a str) -> impl Iterator<Item = &'a Rule> + 'a {
        let limit = match self.mode {
            MatchMode::FirstMatch => 1,
            MatchMode::EveryMatch => usize::MAX,
        };
        self.rules
            .iter()
            .filter(move |rule| rule.regex.is_match(line))
            .take(limit)
    }

    pub fn first_match(&self, line: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.regex.is_match(line))
    }
}

pub fn compile_regex(
    table: &'static str,
    pattern: &str,
    case_insensitive: bool,
) -> Result<Regex, RuleCompileError> {
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|e| RuleCompileError::InvalidRegex {
            table,
            pattern: pattern.to_string(),
            source: e,
        })
}
