//! Group extraction, template expansion, and span splicing
//!
//! Searches the input once, then reports every capture group individually
//! with its byte span. A template can be expanded against the captures with
//! `$N`, `${name}`, and `$$` references, or replacement text can be spliced
//! directly into group spans.

use super::engine::{CaptureSet, Pattern};
use crate::output::{ExtractReport, GroupValue};

/// Search and report each capture group's value and span.
///
/// A pattern with no capturing groups reports the whole match as group 0.
/// `replacements` splices literal text into the named groups' spans.
pub fn extract(
    pattern: &str,
    input: &str,
    template: Option<&str>,
    replacements: &[(usize, String)],
) -> Result<ExtractReport, String> {
    let pat = Pattern::compile(pattern).map_err(|e| e.to_string())?;
    let caps = pat.captures(input).map_err(|e| e.to_string())?;

    let (matched, groups, expanded, spliced) = match caps {
        Some(caps) => {
            let groups = if caps.group_count() == 0 {
                vec![caps.whole().clone()]
            } else {
                caps.iter_present().cloned().collect()
            };
            let expanded = template.map(|t| expand_template(t, &caps));
            let spliced = if replacements.is_empty() {
                None
            } else {
                Some(splice(&caps, replacements, input)?)
            };
            (true, groups, expanded, spliced)
        }
        None => (false, Vec::new(), None, None),
    };

    Ok(ExtractReport {
        pattern: pat.source().to_string(),
        engine: pat.engine().to_string(),
        input_length: input.len(),
        matched,
        groups,
        expanded,
        spliced,
    })
}

/// Build a new line by splicing replacement text into each group's span,
/// keeping the rest of the line: `line[..start1] + repl1 + line[end1..start2]
/// + repl2 + line[end2..]`. Group 0 splices over the whole match.
///
/// Groups the pattern defines but that did not participate are skipped; a
/// group number the pattern does not have is an error.
pub fn splice(
    caps: &CaptureSet,
    replacements: &[(usize, String)],
    line: &str,
) -> Result<String, String> {
    let mut pieces: Vec<(&GroupValue, &str)> = Vec::new();
    for (group, text) in replacements {
        if *group > caps.group_count() {
            return Err(format!("Pattern has no group {}", group));
        }
        if let Some(g) = caps.get(*group) {
            pieces.push((g, text.as_str()));
        }
    }
    pieces.sort_by_key(|(g, _)| g.start);

    let mut result = String::new();
    let mut pos = 0;
    for (g, text) in pieces {
        if g.start < pos {
            return Err(format!(
                "Group {} overlaps an earlier replacement",
                g.group
            ));
        }
        result.push_str(&line[pos..g.start]);
        result.push_str(text);
        pos = g.end;
    }
    result.push_str(&line[pos..]);
    Ok(result)
}

/// Expand `$N`, `${name}` (or `${N}`), and `$$` references in a template.
///
/// References to groups that did not participate expand to nothing, matching
/// the replacement semantics of the regex crate.
pub fn expand_template(template: &str, caps: &CaptureSet) -> String {
    let mut result = String::new();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        match chars.peek() {
            Some(&d) if d.is_ascii_digit() => {
                chars.next();
                let group = d.to_digit(10).unwrap_or(0) as usize;
                if let Some(g) = caps.get(group) {
                    result.push_str(&g.text);
                }
            }
            Some(&'{') => {
                chars.next();
                let mut name = String::new();
                while let Some(&c) = chars.peek() {
                    if c == '}' {
                        chars.next();
                        break;
                    }
                    name.push(c);
                    chars.next();
                }
                if let Ok(group) = name.parse::<usize>() {
                    if let Some(g) = caps.get(group) {
                        result.push_str(&g.text);
                    }
                } else if let Some(g) = caps.name(&name) {
                    result.push_str(&g.text);
                }
            }
            Some(&'$') => {
                chars.next();
                result.push('$');
            }
            _ => {
                result.push('$');
            }
        }
    }

    result
}
