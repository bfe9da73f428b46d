use crate::util::FileSource;
use clap::{ArgGroup, Parser};

// Display order for log level option (placed at end of help text)
const LOG_LEVEL_DISPLAY_ORDER: usize = 100;

/// CLI arguments
#[derive(Parser, Debug)]
#[command(
    name = "commit-audit",
    version,
    about = "Pre-commit audit engine for repository governance enforcement",
    long_about = None
)]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["staged", "all", "file"])
))]
pub struct Cli {
    /// Audit staged files only (git diff --cached)
    #[arg(long)]
    pub staged: bool,

    /// Audit all tracked files in the repository
    #[arg(long)]
    pub all: bool,

    /// Audit a single file
    #[arg(long, value_name = "PATH")]
    pub file: Option<String>,

    /// Commit message to validate
    #[arg(long = "commit-msg", value_name = "TEXT")]
    pub commit_msg: Option<String>,

    /// Path to policy config file (used only if it exists)
    #[arg(long, default_value = "commit-audit.toml")]
    pub config: String,

    /// Also write results to a file (.md or .json)
    #[arg(long, value_name = "PATH", value_parser = parse_output_path)]
    pub output: Option<String>,

    /// Log level as a tracing EnvFilter directive (e.g. `info`, `commit_audit=debug`)
    /// [env: COMMIT_AUDIT_LOG=] [default: warn]
    #[arg(
        long,
        env = "COMMIT_AUDIT_LOG",
        default_value = "warn",
        hide_default_value = true,
        hide_env = true,
        display_order = LOG_LEVEL_DISPLAY_ORDER,
        verbatim_doc_comment
    )]
    pub log_level: String,
}

/// Reject output paths the renderer cannot write before any audit work runs
fn parse_output_path(s: &str) -> Result<String, String> {
    if s.ends_with(".md") || s.ends_with(".json") {
        Ok(s.to_string())
    } else {
        Err(format!("unsupported output extension for {s} (use .md or .json)"))
    }
}

impl Cli {
    pub fn source(&self) -> FileSource {
        if self.staged {
            FileSource::Staged
        } else if self.all {
            FileSource::All
        } else {
            FileSource::File(self.file.clone().unwrap_or_default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staged_mode() {
        let cli = Cli::try_parse_from(["commit-audit", "--staged"]).unwrap();
        assert!(matches!(cli.source(), FileSource::Staged));
        assert_eq!(cli.config, "commit-audit.toml");
        assert!(cli.commit_msg.is_none());
    }

    #[test]
    fn test_file_mode_with_commit_msg() {
        let cli = Cli::try_parse_from([
            "commit-audit",
            "--file",
            "App/View.swift",
            "--commit-msg",
            "fix(audio): mute",
        ])
        .unwrap();
        assert!(matches!(cli.source(), FileSource::File(ref p) if p == "App/View.swift"));
        assert_eq!(cli.commit_msg.as_deref(), Some("fix(audio): mute"));
    }

    #[test]
    fn test_mode_required() {
        assert!(Cli::try_parse_from(["commit-audit", "--commit-msg", "x"]).is_err());
    }

    #[test]
    fn test_modes_mutually_exclusive() {
        assert!(Cli::try_parse_from(["commit-audit", "--staged", "--all"]).is_err());
        assert!(Cli::try_parse_from(["commit-audit", "--all", "--file", "a.swift"]).is_err());
    }

    #[test]
    fn test_output_extension_validated() {
        let parse = |output: &str| {
            Cli::try_parse_from(["commit-audit", "--file", "a.swift", "--output", output])
        };
        assert!(parse("r.txt").is_err());
        assert!(parse("report").is_err());
        assert_eq!(parse("r.json").unwrap().output.as_deref(), Some("r.json"));
        assert_eq!(parse("out/r.md").unwrap().output.as_deref(), Some("out/r.md"));
    }

    #[test]
    fn test_command_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
