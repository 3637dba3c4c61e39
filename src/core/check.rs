//! Pattern validation
//!
//! The compile-only drill: reports whether a pattern is valid, which engine
//! it needs and why, and for invalid patterns the error position plus a
//! suggested fix derived from the `regex-syntax` AST error.

use regex_syntax::ast;
use regex_syntax::ast::parse::Parser as AstParser;

use super::engine::{choose_engine, try_fancy, try_standard};
use crate::output::{CheckError, CheckReport};

/// Check whether a pattern compiles and which engine it needs
pub fn check_pattern(pattern: &str) -> CheckReport {
    // The AST parser gives the best positioned error messages
    let ast_result = AstParser::new().parse(pattern);
    let standard_result = try_standard(pattern);
    let fancy_result = try_fancy(pattern);

    match (&standard_result, &fancy_result) {
        (Ok(_), _) => CheckReport {
            pattern: pattern.to_string(),
            valid: true,
            engine_required: Some("regex".to_string()),
            reason: None,
            error: None,
            suggestion: None,
        },
        (Err(_), Ok(_)) => {
            let (_, needs) = choose_engine(pattern);
            CheckReport {
                pattern: pattern.to_string(),
                valid: true,
                engine_required: Some("fancy-regex".to_string()),
                reason: needs.reason(),
                error: None,
                suggestion: None,
            }
        }
        (Err(standard_err), Err(_)) => {
            let (error, suggestion) = if let Err(ast_err) = ast_result {
                classify_ast_error(&ast_err)
            } else {
                classify_compile_error(standard_err)
            };

            CheckReport {
                pattern: pattern.to_string(),
                valid: false,
                engine_required: None,
                reason: None,
                error: Some(error),
                suggestion,
            }
        }
    }
}

fn classify_ast_error(err: &ast::Error) -> (CheckError, Option<String>) {
    let kind = match err.kind() {
        ast::ErrorKind::GroupUnclosed => "unclosed_group",
        ast::ErrorKind::GroupUnopened => "unopened_group",
        ast::ErrorKind::EscapeUnexpectedEof => "incomplete_escape",
        ast::ErrorKind::ClassUnclosed => "unclosed_class",
        ast::ErrorKind::RepetitionMissing => "missing_repetition_target",
        ast::ErrorKind::RepetitionCountUnclosed => "unclosed_repetition",
        _ => "syntax_error",
    };

    let message = err.to_string();
    let suggestion = suggest_fix(kind, &message);

    (
        CheckError {
            kind: kind.to_string(),
            position: Some(err.span().start.offset),
            message,
        },
        suggestion,
    )
}

fn classify_compile_error(err: &regex::Error) -> (CheckError, Option<String>) {
    let message = err.to_string();

    let kind = if message.contains("unclosed") {
        "unclosed_group"
    } else if message.contains("quantifier") {
        "invalid_quantifier"
    } else if message.contains("invalid") {
        "invalid_syntax"
    } else {
        "syntax_error"
    };

    (
        CheckError {
            kind: kind.to_string(),
            position: None,
            message,
        },
        None,
    )
}

fn suggest_fix(kind: &str, message: &str) -> Option<String> {
    match kind {
        "unclosed_group" => Some("Add closing ')' to complete the group".to_string()),
        "unopened_group" => Some("Remove extra ')' or add opening '('".to_string()),
        "incomplete_escape" => {
            Some("Complete the escape sequence or escape the backslash with '\\\\'".to_string())
        }
        "unclosed_class" => Some("Add closing ']' to complete the character class".to_string()),
        "missing_repetition_target" => {
            Some("Add a character or group before the quantifier".to_string())
        }
        "unclosed_repetition" => Some("Add closing '}' to complete the repetition".to_string()),
        _ => {
            if message.contains("nothing to repeat") {
                Some("Add a character or group before the quantifier".to_string())
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_pattern_needs_standard_engine() {
        let report = check_pattern(r"aa[bc]*dd");
        assert!(report.valid);
        assert_eq!(report.engine_required.as_deref(), Some("regex"));
        assert!(report.error.is_none());
    }

    #[test]
    fn lookahead_needs_fancy_engine() {
        let report = check_pattern(r"foo(?=bar)");
        assert!(report.valid);
        assert_eq!(report.engine_required.as_deref(), Some("fancy-regex"));
        assert!(report.reason.unwrap().contains("lookahead"));
    }

    #[test]
    fn unclosed_group_is_invalid_with_suggestion() {
        let report = check_pattern(r"(\d+");
        assert!(!report.valid);
        let error = report.error.unwrap();
        assert_eq!(error.kind, "unclosed_group");
        assert!(report.suggestion.unwrap().contains(")"));
    }

    #[test]
    fn unclosed_class_is_invalid() {
        let report = check_pattern(r"[abc");
        assert!(!report.valid);
        assert_eq!(report.error.unwrap().kind, "unclosed_class");
    }
}
