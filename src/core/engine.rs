//! Pattern compilation and engine selection
//!
//! Drill patterns come from a Python-flavored tutorial, so lookarounds and
//! backreferences must work. Patterns the `regex` crate supports run on it
//! (linear time); everything else falls back to `fancy-regex`.

use std::sync::LazyLock;

use thiserror::Error;

use crate::output::GroupValue;

static BACKREFERENCE_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"\\[1-9]").expect("BUG: backreference detection pattern is invalid")
});

/// Which regex engine a pattern runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    /// Standard regex crate (linear time guaranteed)
    Standard,
    /// Fancy-regex (lookahead, lookbehind, backreferences)
    Fancy,
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineKind::Standard => write!(f, "regex"),
            EngineKind::Fancy => write!(f, "fancy-regex"),
        }
    }
}

/// Errors from compiling or running a pattern
#[allow(clippy::result_large_err)]
#[derive(Error, Debug)]
pub enum PatternError {
    #[error("Regex error: {0}")]
    Standard(#[from] regex::Error),

    #[error("Fancy-regex error: {0}")]
    Fancy(#[from] fancy_regex::Error),
}

/// Pattern constructs that only fancy-regex supports
#[derive(Debug, Default)]
pub struct FancyNeeds {
    pub lookahead: bool,
    pub lookbehind: bool,
    pub backreference: bool,
    pub atomic_group: bool,
}

impl FancyNeeds {
    pub fn any(&self) -> bool {
        self.lookahead || self.lookbehind || self.backreference || self.atomic_group
    }

    /// Describe why fancy-regex is needed
    pub fn reason(&self) -> Option<String> {
        let mut reasons = Vec::new();
        if self.lookahead {
            reasons.push("lookahead assertion");
        }
        if self.lookbehind {
            reasons.push("lookbehind assertion");
        }
        if self.backreference {
            reasons.push("backreference");
        }
        if self.atomic_group {
            reasons.push("atomic group");
        }

        if reasons.is_empty() {
            None
        } else {
            Some(format!("Pattern uses {}", reasons.join(", ")))
        }
    }
}

/// Scan a pattern for fancy-regex-only constructs.
///
/// `regex_syntax` cannot parse lookarounds, backreferences, or atomic groups,
/// so detection is plain string scanning.
pub fn fancy_needs(pattern: &str) -> FancyNeeds {
    let mut needs = FancyNeeds::default();

    if pattern.contains("(?=") || pattern.contains("(?!") {
        needs.lookahead = true;
    }
    if pattern.contains("(?<=") || pattern.contains("(?<!") {
        needs.lookbehind = true;
    }
    if pattern.contains("(?>") {
        needs.atomic_group = true;
    }
    if BACKREFERENCE_RE.is_match(pattern) {
        needs.backreference = true;
    }

    needs
}

/// Pick the engine a pattern should compile on
pub fn choose_engine(pattern: &str) -> (EngineKind, FancyNeeds) {
    let needs = fancy_needs(pattern);
    let engine = if needs.any() {
        EngineKind::Fancy
    } else {
        EngineKind::Standard
    };
    (engine, needs)
}

/// A compiled regex on either engine
pub enum CompiledRegex {
    Standard(regex::Regex),
    Fancy(fancy_regex::Regex),
}

/// One capture attempt: the whole match plus the numbered groups.
///
/// Group numbering is 1-based; group 0 (the whole match) is held separately.
/// Numbered slots are `None` for optional groups that did not participate.
pub struct CaptureSet {
    whole: GroupValue,
    groups: Vec<Option<GroupValue>>,
}

impl CaptureSet {
    pub(crate) fn from_standard(re: &regex::Regex, caps: &regex::Captures) -> Option<Self> {
        let m0 = caps.get(0)?;
        let whole = GroupValue {
            group: 0,
            name: None,
            text: m0.as_str().to_string(),
            start: m0.start(),
            end: m0.end(),
        };

        let mut groups = Vec::with_capacity(caps.len().saturating_sub(1));
        for i in 1..caps.len() {
            groups.push(caps.get(i).map(|m| GroupValue {
                group: i,
                name: re.capture_names().nth(i).flatten().map(|s| s.to_string()),
                text: m.as_str().to_string(),
                start: m.start(),
                end: m.end(),
            }));
        }

        Some(CaptureSet { whole, groups })
    }

    pub(crate) fn from_fancy(re: &fancy_regex::Regex, caps: &fancy_regex::Captures) -> Option<Self> {
        let m0 = caps.get(0)?;
        let whole = GroupValue {
            group: 0,
            name: None,
            text: m0.as_str().to_string(),
            start: m0.start(),
            end: m0.end(),
        };

        let mut groups = Vec::with_capacity(caps.len().saturating_sub(1));
        for i in 1..caps.len() {
            groups.push(caps.get(i).map(|m| GroupValue {
                group: i,
                name: re.capture_names().nth(i).flatten().map(|s| s.to_string()),
                text: m.as_str().to_string(),
                start: m.start(),
                end: m.end(),
            }));
        }

        Some(CaptureSet { whole, groups })
    }

    /// Group 0: the text matched by the entire pattern
    pub fn whole(&self) -> &GroupValue {
        &self.whole
    }

    /// Number of numbered groups in the pattern (participating or not)
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Look up a group by number; 0 is the whole match
    pub fn get(&self, index: usize) -> Option<&GroupValue> {
        if index == 0 {
            Some(&self.whole)
        } else {
            self.groups.get(index - 1)?.as_ref()
        }
    }

    /// Look up a named group
    pub fn name(&self, name: &str) -> Option<&GroupValue> {
        self.groups
            .iter()
            .flatten()
            .find(|g| g.name.as_deref() == Some(name))
    }

    /// Numbered groups that participated in the match, in order
    pub fn iter_present(&self) -> impl Iterator<Item = &GroupValue> {
        self.groups.iter().flatten()
    }
}

/// A pattern compiled once and reused across drill lines
pub struct Pattern {
    source: String,
    compiled: CompiledRegex,
    engine: EngineKind,
}

#[allow(clippy::result_large_err)]
impl Pattern {
    /// Compile with automatic engine selection, falling back to fancy-regex
    /// when the standard engine rejects the pattern.
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        let (engine, _needs) = choose_engine(pattern);

        let (compiled, engine) = match engine {
            EngineKind::Standard => match regex::Regex::new(pattern) {
                Ok(re) => (CompiledRegex::Standard(re), EngineKind::Standard),
                Err(_) => {
                    let re = fancy_regex::Regex::new(pattern)?;
                    (CompiledRegex::Fancy(re), EngineKind::Fancy)
                }
            },
            EngineKind::Fancy => {
                let re = fancy_regex::Regex::new(pattern)?;
                (CompiledRegex::Fancy(re), EngineKind::Fancy)
            }
        };

        Ok(Pattern {
            source: pattern.to_string(),
            compiled,
            engine,
        })
    }

    /// Compile for matching at the start of the input only.
    ///
    /// Wraps the pattern as `\A(?:…)` so both engines agree on anchoring and
    /// group numbering is untouched.
    pub fn anchored(pattern: &str) -> Result<Self, PatternError> {
        let wrapped = format!(r"\A(?:{pattern})");
        let mut compiled = Self::compile(&wrapped)?;
        compiled.source = pattern.to_string();
        Ok(compiled)
    }

    /// The pattern text as the user wrote it
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn engine(&self) -> EngineKind {
        self.engine
    }

    pub(crate) fn as_compiled(&self) -> &CompiledRegex {
        &self.compiled
    }

    /// Does the pattern match anywhere in the text?
    pub fn is_match(&self, text: &str) -> Result<bool, PatternError> {
        match &self.compiled {
            CompiledRegex::Standard(re) => Ok(re.is_match(text)),
            CompiledRegex::Fancy(re) => re.is_match(text).map_err(PatternError::from),
        }
    }

    /// First (leftmost) match with all capture groups, or `None`
    pub fn captures(&self, text: &str) -> Result<Option<CaptureSet>, PatternError> {
        match &self.compiled {
            CompiledRegex::Standard(re) => Ok(re
                .captures(text)
                .and_then(|caps| CaptureSet::from_standard(re, &caps))),
            CompiledRegex::Fancy(re) => Ok(re
                .captures(text)?
                .and_then(|caps| CaptureSet::from_fancy(re, &caps))),
        }
    }
}

/// Try to compile with the standard regex crate
pub fn try_standard(pattern: &str) -> Result<regex::Regex, regex::Error> {
    regex::Regex::new(pattern)
}

/// Try to compile with fancy-regex
#[allow(clippy::result_large_err)]
pub fn try_fancy(pattern: &str) -> Result<fancy_regex::Regex, fancy_regex::Error> {
    fancy_regex::Regex::new(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_pattern_uses_standard_engine() {
        let (engine, _) = choose_engine(r"aa[bc]*dd");
        assert_eq!(engine, EngineKind::Standard);
    }

    #[test]
    fn lookahead_uses_fancy() {
        let (engine, needs) = choose_engine(r"foo(?=bar)");
        assert_eq!(engine, EngineKind::Fancy);
        assert!(needs.lookahead);
    }

    #[test]
    fn lookbehind_uses_fancy() {
        let (engine, needs) = choose_engine(r"(?<=foo)bar");
        assert_eq!(engine, EngineKind::Fancy);
        assert!(needs.lookbehind);
    }

    #[test]
    fn backreference_uses_fancy() {
        let (engine, needs) = choose_engine(r"(\w+)\s+\1");
        assert_eq!(engine, EngineKind::Fancy);
        assert!(needs.backreference);
    }

    #[test]
    fn compile_reports_engine() {
        let pat = Pattern::compile(r"\d+").unwrap();
        assert_eq!(pat.engine(), EngineKind::Standard);
        assert!(pat.is_match("123").unwrap());

        let pat = Pattern::compile(r"foo(?=bar)").unwrap();
        assert_eq!(pat.engine(), EngineKind::Fancy);
        assert!(pat.is_match("foobar").unwrap());
        assert!(!pat.is_match("foobaz").unwrap());
    }

    #[test]
    fn anchored_requires_match_at_start() {
        let pat = Pattern::anchored(r"aa[0-9]*bb").unwrap();
        assert!(pat.is_match("aa1234bbccddee").unwrap());
        assert!(!pat.is_match("xxxxaa1234bbccddee").unwrap());
        assert_eq!(pat.source(), r"aa[0-9]*bb");
    }

    #[test]
    fn captures_numbered_and_named() {
        let pat = Pattern::compile(r"(?<area>\d{3})-(\d{4})").unwrap();
        let caps = pat.captures("call 555-1234 now").unwrap().unwrap();
        assert_eq!(caps.whole().text, "555-1234");
        assert_eq!(caps.group_count(), 2);
        assert_eq!(caps.get(1).unwrap().text, "555");
        assert_eq!(caps.get(2).unwrap().text, "1234");
        assert_eq!(caps.name("area").unwrap().text, "555");
    }

    #[test]
    fn non_participating_group_is_none() {
        let pat = Pattern::compile(r"(a)?b").unwrap();
        let caps = pat.captures("b").unwrap().unwrap();
        assert!(caps.get(1).is_none());
        assert_eq!(caps.iter_present().count(), 0);
    }
}
