//! Match and search operations
//!
//! `match` aligns the pattern against the start of the input; `search` finds
//! the first occurrence anywhere. Both report the matched text, its span, and
//! the capture groups.

use super::engine::Pattern;
use crate::output::{FoundMatch, MatchReport};

/// Attempt to match the pattern at the beginning of the input
pub fn match_at_start(pattern: &str, input: &str) -> Result<MatchReport, String> {
    let pat = Pattern::anchored(pattern).map_err(|e| e.to_string())?;
    build_report(&pat, input, "match")
}

/// Search for the first occurrence of the pattern anywhere in the input
pub fn search(pattern: &str, input: &str) -> Result<MatchReport, String> {
    let pat = Pattern::compile(pattern).map_err(|e| e.to_string())?;
    build_report(&pat, input, "search")
}

fn build_report(pat: &Pattern, input: &str, mode: &str) -> Result<MatchReport, String> {
    let caps = pat.captures(input).map_err(|e| e.to_string())?;

    Ok(MatchReport {
        pattern: pat.source().to_string(),
        engine: pat.engine().to_string(),
        mode: mode.to_string(),
        input_length: input.len(),
        matched: caps.is_some(),
        found: caps.map(|caps| FoundMatch {
            text: caps.whole().text.clone(),
            start: caps.whole().start,
            end: caps.whole().end,
            groups: caps.iter_present().cloned().collect(),
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_finds_pattern_mid_string() {
        let report = search(r"aa[0-9]*bb", "xxxxaa1234bbccddee").unwrap();
        assert!(report.matched);
        let found = report.found.unwrap();
        assert_eq!(found.text, "aa1234bb");
        assert_eq!(found.start, 4);
        assert_eq!(found.end, 12);
    }

    #[test]
    fn match_fails_unless_at_start() {
        let report = match_at_start(r"aa[0-9]*bb", "xxxxaa1234bbccddee").unwrap();
        assert!(!report.matched);
        assert!(report.found.is_none());
    }

    #[test]
    fn match_succeeds_at_start() {
        let report = match_at_start(r"aa[0-9]*bb", "aa1234bbccddee").unwrap();
        assert!(report.matched);
        let found = report.found.unwrap();
        assert_eq!(found.text, "aa1234bb");
        assert_eq!(found.start, 0);
    }

    #[test]
    fn report_includes_groups() {
        let report = search(r"aa([0-9]*)bb([0-9]*)cc", "zzaa12bb345cczz").unwrap();
        let found = report.found.unwrap();
        assert_eq!(found.groups.len(), 2);
        assert_eq!(found.groups[0].text, "12");
        assert_eq!(found.groups[1].text, "345");
    }

    #[test]
    fn fancy_pattern_searches() {
        let report = search(r"(\d+)(?=USD)", "price: 100USD").unwrap();
        assert!(report.matched);
        assert_eq!(report.engine, "fancy-regex");
        assert_eq!(report.found.unwrap().text, "100");
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        assert!(search(r"(\d+", "abc").is_err());
    }
}
