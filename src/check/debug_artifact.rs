use super::{Context, FileCheck, SourceFile, rule_violation};
use crate::classify::{is_comment, nested_block_flags};
use crate::types::Violation;
use crate::util::truncate_chars;

/// Diagnostic output outside `#if DEBUG` in non-test source files
pub struct DebugArtifact;

impl FileCheck for DebugArtifact {
    fn name(&self) -> &'static str {
        "debug_artifact"
    }

    fn run(&self, ctx: &Context<'_>, file: &SourceFile<'_>, out: &mut Vec<Violation>) {
        if !ctx.classifier.is_source_file(file.path) || ctx.classifier.is_test_file(file.path) {
            return;
        }
        let in_block = nested_block_flags(&file.lines);
        for ((line_num, line), inside) in file.numbered().zip(in_block) {
            if inside || is_comment(line) {
                continue;
            }
            for rule in ctx.rules.debug_calls.matches(line) {
                out.push(rule_violation(
                    rule,
                    file.path,
                    line_num,
                    format!(
                        "{}: {}",
                        rule.message,
                        truncate_chars(line.trim(), ctx.excerpt_len)
                    ),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::testing::Fixture;

    #[test]
    fn test_print_outside_debug_block() {
        let fx = Fixture::new();
        let out = fx.run(
            &DebugArtifact,
            "App/AudioManager.swift",
            "func play() {\n    print(\"playing\")\n}",
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].check_id, "DA-001");
        assert_eq!(out[0].check_name, "Debug Artifact");
        assert_eq!(out[0].line, 2);
        assert_eq!(out[0].detail, "Debug statement detected: print(\"playing\")");
    }

    #[test]
    fn test_debug_block_suppresses() {
        let fx = Fixture::new();
        let content = concat!(
            "#if DEBUG\nprint(\"a\")\n",
            "#if DEBUG\ndump(x)\n#endif\n",
            "NSLog(\"b\")\n#endif\n",
            "debugPrint(y)",
        );
        let out = fx.run(&DebugArtifact, "App/View.swift", content);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].line, 8);
    }

    #[test]
    fn test_detail_prefixed_with_rule_message() {
        let mut fx = Fixture::new();
        for rule in &mut fx.rules.debug_calls.rules {
            rule.message = "Diagnostics".to_string();
        }
        let out = fx.run(&DebugArtifact, "App/View.swift", "  dump(state)");
        assert_eq!(out[0].detail, "Diagnostics: dump(state)");
    }

    #[test]
    fn test_first_match_per_line() {
        let fx = Fixture::new();
        let out = fx.run(&DebugArtifact, "App/View.swift", "print(a); dump(b); NSLog(c)");
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_excerpt_truncated() {
        let fx = Fixture::new();
        let line = format!("    print(\"{}\")", "x".repeat(100));
        let out = fx.run(&DebugArtifact, "App/View.swift", &line);
        let excerpt = out[0]
            .detail
            .strip_prefix("Debug statement detected: ")
            .unwrap();
        assert_eq!(excerpt.chars().count(), 60);
        assert!(excerpt.starts_with("print(\"xxx"));
    }

    #[test]
    fn test_test_files_and_comments_exempt() {
        let fx = Fixture::new();
        assert!(fx.run(&DebugArtifact, "Tests/PlayerTests.swift", "print(1)").is_empty());
        assert!(fx.run(&DebugArtifact, "App/View.swift", "// print(1)").is_empty());
        assert!(fx.run(&DebugArtifact, "notes.md", "print(1)").is_empty());
    }

    #[test]
    fn test_word_boundary() {
        let fx = Fixture::new();
        assert!(fx.run(&DebugArtifact, "App/View.swift", "blueprint(1)").is_empty());
        assert_eq!(fx.run(&DebugArtifact, "App/View.swift", "x.print (1)").len(), 1);
    }
}
