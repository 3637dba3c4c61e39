//! Substitution: replace every occurrence of a pattern
//!
//! The replacement is either a template with `$N` / `${name}` references or a
//! computed case transform applied to each matched substring. The fancy-regex
//! path expands templates manually since that engine has no replacement API
//! with capture references.

use super::engine::{CaptureSet, CompiledRegex, Pattern, PatternError};
use super::extract::expand_template;
use crate::output::SubReport;

/// Case transform applied to each matched substring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseTransform {
    Upper,
    Lower,
}

impl CaseTransform {
    pub fn apply(&self, text: &str) -> String {
        match self {
            CaseTransform::Upper => text.to_uppercase(),
            CaseTransform::Lower => text.to_lowercase(),
        }
    }
}

/// How matched text gets replaced
pub enum Replacement {
    /// Template with `$N` / `${name}` / `$$` references
    Template(String),
    /// Replace each match with its case-folded text
    Transform(CaseTransform),
}

impl Replacement {
    /// Short form for reports
    pub fn describe(&self) -> String {
        match self {
            Replacement::Template(t) => t.clone(),
            Replacement::Transform(CaseTransform::Upper) => "upper(match)".to_string(),
            Replacement::Transform(CaseTransform::Lower) => "lower(match)".to_string(),
        }
    }
}

/// A pattern plus its replacement, compiled once and reused per line
pub struct Substitution {
    pattern: Pattern,
    replacement: Replacement,
}

#[allow(clippy::result_large_err)]
impl Substitution {
    pub fn new(pattern: &str, replacement: Replacement) -> Result<Self, PatternError> {
        Ok(Substitution {
            pattern: Pattern::compile(pattern)?,
            replacement,
        })
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn describe(&self) -> String {
        self.replacement.describe()
    }

    /// Replace every non-overlapping occurrence, returning the new text and
    /// the number of replacements made.
    pub fn apply(&self, input: &str) -> Result<(String, usize), String> {
        match self.pattern.as_compiled() {
            CompiledRegex::Standard(re) => match &self.replacement {
                // Expand through our own template language rather than the
                // regex crate's replacer, so both engines read $10 as group 1
                // followed by a literal 0
                Replacement::Template(template) => {
                    let mut count = 0;
                    let result = re
                        .replace_all(input, |caps: &regex::Captures| {
                            count += 1;
                            CaptureSet::from_standard(re, caps)
                                .map(|set| expand_template(template, &set))
                                .unwrap_or_default()
                        })
                        .into_owned();
                    Ok((result, count))
                }
                Replacement::Transform(transform) => {
                    let mut count = 0;
                    let result = re
                        .replace_all(input, |caps: &regex::Captures| {
                            count += 1;
                            transform.apply(&caps[0])
                        })
                        .into_owned();
                    Ok((result, count))
                }
            },
            CompiledRegex::Fancy(re) => self.apply_fancy(re, input),
        }
    }

    fn apply_fancy(&self, re: &fancy_regex::Regex, input: &str) -> Result<(String, usize), String> {
        let mut result = String::new();
        let mut last_end = 0;
        let mut count = 0;

        loop {
            match re.captures_from_pos(input, last_end) {
                Ok(Some(caps)) => {
                    let Some(whole) = caps.get(0) else { break };
                    result.push_str(&input[last_end..whole.start()]);

                    let piece = match &self.replacement {
                        Replacement::Template(template) => match CaptureSet::from_fancy(re, &caps)
                        {
                            Some(set) => expand_template(template, &set),
                            None => break,
                        },
                        Replacement::Transform(transform) => transform.apply(whole.as_str()),
                    };
                    result.push_str(&piece);

                    last_end = whole.end();
                    count += 1;

                    // Zero-width match: step over one char so the scan advances
                    if whole.start() == whole.end() {
                        match input[last_end..].chars().next() {
                            Some(c) => {
                                let step = c.len_utf8();
                                result.push_str(&input[last_end..last_end + step]);
                                last_end += step;
                            }
                            None => break,
                        }
                    }
                }
                Ok(None) => {
                    result.push_str(&input[last_end..]);
                    break;
                }
                Err(e) => return Err(e.to_string()),
            }
        }

        Ok((result, count))
    }
}

/// One-shot substitution over a whole input, producing a report
pub fn substitute_string(
    pattern: &str,
    replacement: Replacement,
    input: &str,
) -> Result<SubReport, String> {
    let sub = Substitution::new(pattern, replacement).map_err(|e| e.to_string())?;
    let (result, count) = sub.apply(input)?;

    Ok(SubReport {
        pattern: sub.pattern().source().to_string(),
        engine: sub.pattern().engine().to_string(),
        replacement: sub.describe(),
        original: input.to_string(),
        result,
        replacements_made: count,
    })
}
