//! Human-friendly text output formatting
//!
//! Used when --format text is specified.

use super::types::*;

/// Format a MatchReport as human-readable text
pub fn format_match_report(report: &MatchReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("Pattern: {}\n", report.pattern));
    output.push_str(&format!(
        "Engine:  {} ({})\n",
        report.engine,
        if report.engine == "regex" {
            "linear time"
        } else {
            "backtracking"
        }
    ));
    output.push_str(&format!("Mode:    {}\n", report.mode));
    output.push('\n');

    match &report.found {
        Some(found) => {
            output.push_str(&format!(
                "Match: \"{}\" [{}..{}]\n",
                found.text, found.start, found.end
            ));
            for g in &found.groups {
                let name_str = g
                    .name
                    .as_ref()
                    .map(|n| format!(" ({})", n))
                    .unwrap_or_default();
                output.push_str(&format!(
                    "  Group {}{}: \"{}\" [{}..{}]\n",
                    g.group, name_str, g.text, g.start, g.end
                ));
            }
        }
        None => {
            if report.mode == "match" {
                output.push_str("No match (pattern must match at the start of the input)\n");
            } else {
                output.push_str("No match found\n");
            }
        }
    }

    output
}

/// Format an ExtractReport as human-readable text
pub fn format_extract_report(report: &ExtractReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("Pattern: {}\n", report.pattern));
    output.push_str(&format!("Engine:  {}\n", report.engine));
    output.push('\n');

    if report.matched {
        for g in &report.groups {
            let name_str = g
                .name
                .as_ref()
                .map(|n| format!(" ({})", n))
                .unwrap_or_default();
            output.push_str(&format!(
                "Group {}{}: \"{}\" [{}..{}]\n",
                g.group, name_str, g.text, g.start, g.end
            ));
        }
        if let Some(ref expanded) = report.expanded {
            output.push('\n');
            output.push_str(&format!("Expanded: {}\n", expanded));
        }
        if let Some(ref spliced) = report.spliced {
            output.push('\n');
            output.push_str(&format!("Spliced: {}\n", spliced));
        }
    } else {
        output.push_str("No match found\n");
    }

    output
}

/// Format a SubReport as human-readable text
pub fn format_sub_report(report: &SubReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("Pattern:     {}\n", report.pattern));
    output.push_str(&format!("Replacement: {}\n", report.replacement));
    output.push('\n');
    output.push_str(&format!("Original: {}\n", report.original));
    output.push_str(&format!("Result:   {}\n", report.result));
    output.push('\n');
    output.push_str(&format!(
        "{} replacement{} made\n",
        report.replacements_made,
        if report.replacements_made == 1 {
            ""
        } else {
            "s"
        }
    ));

    output
}

/// Format a CheckReport as human-readable text
pub fn format_check_report(report: &CheckReport) -> String {
    let mut output = String::new();

    if report.valid {
        output.push_str("✓ Pattern is valid\n");

        if let Some(ref engine) = report.engine_required {
            output.push_str(&format!("\nEngine required: {}\n", engine));
        }
        if let Some(ref reason) = report.reason {
            output.push_str(&format!("Reason: {}\n", reason));
        }
    } else {
        output.push_str("✗ Pattern is invalid\n");

        if let Some(ref error) = report.error {
            output.push('\n');
            output.push_str(&format!("Error: {}\n", error.message));
            if let Some(pos) = error.position {
                output.push_str(&format!("Position: {}\n", pos));
            }
        }
        if let Some(ref suggestion) = report.suggestion {
            output.push_str(&format!("\nSuggestion: {}\n", suggestion));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_report_text_shows_span() {
        let report = MatchReport {
            pattern: "aa[0-9]*bb".to_string(),
            engine: "regex".to_string(),
            mode: "search".to_string(),
            input_length: 18,
            matched: true,
            found: Some(FoundMatch {
                text: "aa1234bb".to_string(),
                start: 4,
                end: 12,
                groups: vec![],
            }),
        };
        let text = format_match_report(&report);
        assert!(text.contains("Match: \"aa1234bb\" [4..12]"));
        assert!(text.contains("linear time"));
    }

    #[test]
    fn anchored_no_match_text_explains() {
        let report = MatchReport {
            pattern: "aa".to_string(),
            engine: "regex".to_string(),
            mode: "match".to_string(),
            input_length: 6,
            matched: false,
            found: None,
        };
        let text = format_match_report(&report);
        assert!(text.contains("start of the input"));
    }

    #[test]
    fn sub_report_text_pluralizes() {
        let report = SubReport {
            pattern: r"\d+".to_string(),
            engine: "regex".to_string(),
            replacement: "NUM".to_string(),
            original: "a1b2".to_string(),
            result: "aNUMbNUM".to_string(),
            replacements_made: 2,
        };
        let text = format_sub_report(&report);
        assert!(text.contains("2 replacements made"));
    }
}
