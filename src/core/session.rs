//! The drill loop
//!
//! Reads input lines until the sentinel (`q`) or EOF, applies one regex
//! operation per line with a pattern compiled once up front, and echoes a
//! transcript line per input line. Generic over reader and writer so drills
//! can be driven from tests with in-memory buffers.

use std::io::{self, BufRead, Write};

use super::engine::{CaptureSet, Pattern};
use super::extract::{expand_template, splice};
use super::substitute::Substitution;

/// Line that ends a drill
pub const SENTINEL: &str = "q";

/// Prompt written to stderr before each read when stdin is a terminal
pub const PROMPT: &str = "Enter a line (\"q\" to quit): ";

/// The operation a drill applies to each input line
pub enum DrillOp {
    /// Match at the start of the line
    MatchStart(Pattern),
    /// Search anywhere in the line
    Search(Pattern),
    /// Extract group values; optionally expand a template against them or
    /// splice replacement text into group spans
    Extract {
        pattern: Pattern,
        template: Option<String>,
        spans: bool,
        replace: Vec<(usize, String)>,
    },
    /// Replace every occurrence in the line
    Substitute(Substitution),
}

/// Counts reported at the end of a drill
#[derive(Debug, Default)]
pub struct DrillSummary {
    /// Lines processed (the sentinel is not counted)
    pub lines: usize,
    /// Lines where the operation matched at least once
    pub hits: usize,
}

/// Run a drill to completion.
///
/// Transcript lines go to `out`; the prompt goes to stderr and only when
/// `interactive` is set, so piped transcripts stay clean.
pub fn run<R: BufRead, W: Write>(
    op: &DrillOp,
    mut input: R,
    out: &mut W,
    interactive: bool,
) -> Result<DrillSummary, String> {
    let mut summary = DrillSummary::default();
    let mut raw = String::new();

    loop {
        if interactive {
            eprint!("{PROMPT}");
            let _ = io::stderr().flush();
        }

        raw.clear();
        let bytes_read = input
            .read_line(&mut raw)
            .map_err(|e| format!("Failed to read input: {}", e))?;
        if bytes_read == 0 {
            break; // EOF
        }

        let line = raw.trim_end_matches(['\n', '\r']);
        if line == SENTINEL {
            break;
        }

        summary.lines += 1;
        if apply_line(op, line, out)? {
            summary.hits += 1;
        }
    }

    Ok(summary)
}

/// Apply the operation to one line, echo the transcript, report whether it hit
fn apply_line<W: Write>(op: &DrillOp, line: &str, out: &mut W) -> Result<bool, String> {
    let hit = match op {
        DrillOp::MatchStart(pat) | DrillOp::Search(pat) => {
            let matched = pat.is_match(line).map_err(|e| e.to_string())?;
            if matched {
                echo(out, format_args!("matched: {}", line))?;
            } else {
                echo(out, format_args!("no match: {}", line))?;
            }
            matched
        }
        DrillOp::Extract {
            pattern,
            template,
            spans,
            replace,
        } => {
            let caps = pattern.captures(line).map_err(|e| e.to_string())?;
            match caps {
                Some(caps) => {
                    echo(
                        out,
                        format_args!("{}", extract_line(&caps, template.as_deref(), *spans)),
                    )?;
                    if !replace.is_empty() {
                        let newline = splice(&caps, replace, line)?;
                        echo(out, format_args!("newline: {}", newline))?;
                    }
                    true
                }
                None => {
                    echo(out, format_args!("no match"))?;
                    false
                }
            }
        }
        DrillOp::Substitute(sub) => {
            let (result, count) = sub.apply(line)?;
            echo(out, format_args!("result: {}", result))?;
            count > 0
        }
    };

    Ok(hit)
}

fn echo<W: Write>(out: &mut W, args: std::fmt::Arguments<'_>) -> Result<(), String> {
    writeln!(out, "{}", args).map_err(|e| format!("Failed to write output: {}", e))
}

/// Transcript line for an extract hit, tutorial style:
/// `value1: 12  value2: 345`, with start/end appended when spans are on.
fn extract_line(caps: &CaptureSet, template: Option<&str>, spans: bool) -> String {
    if let Some(template) = template {
        return expand_template(template, caps);
    }

    let mut parts: Vec<String> = Vec::new();
    for g in caps.iter_present() {
        if spans {
            parts.push(format!(
                "value{n}: {}  start{n}: {}  end{n}: {}",
                g.text,
                g.start,
                g.end,
                n = g.group
            ));
        } else {
            parts.push(format!("value{}: {}", g.group, g.text));
        }
    }

    if parts.is_empty() {
        // No capturing groups (or none participated): fall back to the whole match
        let whole = caps.whole();
        if spans {
            format!(
                "value: {}  start: {}  end: {}",
                whole.text, whole.start, whole.end
            )
        } else {
            format!("value: {}", whole.text)
        }
    } else {
        parts.join("  ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::substitute::{CaseTransform, Replacement};
    use std::io::Cursor;

    fn drill(op: &DrillOp, input: &str) -> (String, DrillSummary) {
        let mut out = Vec::new();
        let summary = run(op, Cursor::new(input), &mut out, false).unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn search_drill_echoes_matched_and_no_match() {
        let op = DrillOp::Search(Pattern::compile(r"aa[bc]*dd").unwrap());
        let (out, summary) = drill(&op, "xxaabccddyy\nnothing\nq\n");
        assert_eq!(out, "matched: xxaabccddyy\nno match: nothing\n");
        assert_eq!(summary.lines, 2);
        assert_eq!(summary.hits, 1);
    }

    #[test]
    fn sentinel_stops_before_later_lines() {
        let op = DrillOp::Search(Pattern::compile(r"\d").unwrap());
        let (out, summary) = drill(&op, "a1\nq\nb2\n");
        assert_eq!(out, "matched: a1\n");
        assert_eq!(summary.lines, 1);
    }

    #[test]
    fn eof_ends_drill_without_sentinel() {
        let op = DrillOp::Search(Pattern::compile(r"\d").unwrap());
        let (_, summary) = drill(&op, "a1\nb2");
        assert_eq!(summary.lines, 2);
        assert_eq!(summary.hits, 2);
    }

    #[test]
    fn match_drill_is_anchored() {
        let op = DrillOp::MatchStart(Pattern::anchored(r"aa[0-9]*bb").unwrap());
        let (out, _) = drill(&op, "aa1234bbccddee\nxxxxaa1234bbccddee\nq\n");
        assert_eq!(
            out,
            "matched: aa1234bbccddee\nno match: xxxxaa1234bbccddee\n"
        );
    }

    #[test]
    fn extract_drill_echoes_group_values() {
        let op = DrillOp::Extract {
            pattern: Pattern::compile(r"aa([0-9]*)bb([0-9]*)cc").unwrap(),
            template: None,
            spans: false,
            replace: Vec::new(),
        };
        let (out, _) = drill(&op, "zzaa12bb345cczz\nnope\nq\n");
        assert_eq!(out, "value1: 12  value2: 345\nno match\n");
    }

    #[test]
    fn extract_drill_with_spans() {
        let op = DrillOp::Extract {
            pattern: Pattern::compile(r"aa([0-9]*)bb").unwrap(),
            template: None,
            spans: true,
            replace: Vec::new(),
        };
        let (out, _) = drill(&op, "aa12bb\nq\n");
        assert_eq!(out, "value1: 12  start1: 2  end1: 4\n");
    }

    #[test]
    fn extract_drill_splices_group_replacements() {
        let op = DrillOp::Extract {
            pattern: Pattern::compile(r"aa([0-9]*)bb([0-9]*)cc").unwrap(),
            template: None,
            spans: true,
            replace: vec![(1, "XX".to_string()), (2, "YY".to_string())],
        };
        let (out, _) = drill(&op, "aa12bb345cc\nq\n");
        assert_eq!(
            out,
            "value1: 12  start1: 2  end1: 4  value2: 345  start2: 6  end2: 9\n\
             newline: aaXXbbYYcc\n"
        );
    }

    #[test]
    fn extract_drill_with_template() {
        let op = DrillOp::Extract {
            pattern: Pattern::compile(r"aa([0-9]*)bb([0-9]*)cc").unwrap(),
            template: Some("value1: $1 value2: $2".to_string()),
            spans: false,
            replace: Vec::new(),
        };
        let (out, _) = drill(&op, "aa1bb2cc\nq\n");
        assert_eq!(out, "value1: 1 value2: 2\n");
    }

    #[test]
    fn substitute_drill_echoes_result() {
        let op = DrillOp::Substitute(
            Substitution::new(r"[0-9]+", Replacement::Template("NUM".to_string())).unwrap(),
        );
        let (out, summary) = drill(&op, "a1b2\nplain\nq\n");
        assert_eq!(out, "result: aNUMbNUM\nresult: plain\n");
        assert_eq!(summary.hits, 1);
    }

    #[test]
    fn transform_drill_uppercases() {
        let op = DrillOp::Substitute(
            Substitution::new(r"[a-m]+", Replacement::Transform(CaseTransform::Upper)).unwrap(),
        );
        let (out, _) = drill(&op, "abcxyz\nq\n");
        assert_eq!(out, "result: ABCxyz\n");
    }
}
