//! CLI interface using clap
//!
//! Defines the drill subcommands and their handlers. Every command with an
//! input argument also runs as an interactive drill: leave the input off and
//! lines are read from stdin until `q`.

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use crate::core::session::{self, DrillOp};
use crate::core::{CaseTransform, Pattern, Replacement, Substitution};
use crate::output::json::format_json;
use crate::output::text::{
    format_check_report, format_extract_report, format_match_report, format_sub_report,
};

#[derive(Parser)]
#[command(name = "redrill")]
#[command(author, version, about = "Regex practice CLI — match, search, extract, substitute.", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format for one-shot reports (drills always print transcripts)
    #[arg(long, short = 'f', global = true, default_value = "json")]
    pub format: OutputFormat,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON output (default)
    Json,
    /// Human-readable text
    Text,
}

/// Case transform for `sub --transform`
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum TransformArg {
    /// Upper-case each matched substring
    Upper,
    /// Lower-case each matched substring
    Lower,
}

impl From<TransformArg> for CaseTransform {
    fn from(arg: TransformArg) -> Self {
        match arg {
            TransformArg::Upper => CaseTransform::Upper,
            TransformArg::Lower => CaseTransform::Lower,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check that a pattern compiles and report the engine it needs
    Check {
        /// The regex pattern to check
        pattern: String,
    },

    /// Match a pattern at the beginning of the input
    Match {
        /// The regex pattern
        pattern: String,

        /// Input text (omit to drill over stdin lines until "q")
        input: Option<String>,

        /// File to match against
        #[arg(long, short = 'F')]
        file: Option<PathBuf>,
    },

    /// Search for a pattern anywhere in the input
    Search {
        /// The regex pattern
        pattern: String,

        /// Input text (omit to drill over stdin lines until "q")
        input: Option<String>,

        /// File to search
        #[arg(long, short = 'F')]
        file: Option<PathBuf>,
    },

    /// Extract capture group values and spans
    Extract {
        /// The regex pattern (parenthesize the parts to extract)
        pattern: String,

        /// Input text (omit to drill over stdin lines until "q")
        input: Option<String>,

        /// File to extract from
        #[arg(long, short = 'F')]
        file: Option<PathBuf>,

        /// Template expanded against the captures ($1, $2, ${name})
        #[arg(long, short = 't')]
        template: Option<String>,

        /// Include start/end positions in drill transcripts
        #[arg(long)]
        spans: bool,

        /// Splice literal text into a group's span (repeatable, e.g.
        /// --replace-group 1=XX --replace-group 2=YY; 0 is the whole match)
        #[arg(long = "replace-group", value_name = "N=TEXT")]
        replace_group: Vec<String>,
    },

    /// Replace every occurrence of a pattern
    Sub {
        /// The regex pattern
        pattern: String,

        /// Replacement template (supports $1, $2, ${name}, $$)
        #[arg(required_unless_present = "transform", conflicts_with = "transform")]
        replacement: Option<String>,

        /// Input text (omit to drill over stdin lines until "q";
        /// with --transform, input comes from stdin or --file)
        input: Option<String>,

        /// File to substitute in (read-only; result goes to stdout)
        #[arg(long, short = 'F')]
        file: Option<PathBuf>,

        /// Replace each match with its case-folded text instead of a template
        #[arg(long, value_enum)]
        transform: Option<TransformArg>,
    },
}

/// Parse CLI arguments
pub fn parse() -> Cli {
    Cli::parse()
}

/// Resolve one-shot input: `--file` wins, then the positional argument.
/// `None` means drill mode.
fn resolve_input(input: Option<&str>, file: Option<&PathBuf>) -> Result<Option<String>, String> {
    if let Some(path) = file {
        fs::read_to_string(path)
            .map(Some)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))
    } else {
        Ok(input.map(str::to_string))
    }
}

/// Parse repeated `N=TEXT` group replacement arguments
fn parse_group_replacements(args: &[String]) -> Result<Vec<(usize, String)>, String> {
    args.iter()
        .map(|arg| {
            let (group, text) = arg
                .split_once('=')
                .ok_or_else(|| format!("Expected N=TEXT, got '{}'", arg))?;
            let group = group
                .parse::<usize>()
                .map_err(|_| format!("Invalid group number in '{}'", arg))?;
            Ok((group, text.to_string()))
        })
        .collect()
}

/// Run a drill over stdin, streaming transcript lines to stdout
fn run_drill(op: DrillOp) -> Result<String, String> {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut out = io::stdout().lock();

    let summary = session::run(&op, stdin.lock(), &mut out, interactive)?;

    if interactive {
        // The final prompt has no trailing newline
        eprintln!();
    }
    eprintln!(
        "{} line{} read, {} with a hit",
        summary.lines,
        if summary.lines == 1 { "" } else { "s" },
        summary.hits
    );

    Ok(String::new())
}

/// Handle the check command
pub fn handle_check(pattern: &str, format: OutputFormat) -> Result<String, String> {
    let report = crate::core::check_pattern(pattern);

    match format {
        OutputFormat::Json => Ok(format_json(&report)),
        OutputFormat::Text => Ok(format_check_report(&report)),
    }
}

/// Handle the match command
pub fn handle_match(
    pattern: &str,
    input: Option<&str>,
    file: Option<&PathBuf>,
    format: OutputFormat,
) -> Result<String, String> {
    match resolve_input(input, file)? {
        Some(text) => {
            let report = crate::core::match_at_start(pattern, &text)?;
            match format {
                OutputFormat::Json => Ok(format_json(&report)),
                OutputFormat::Text => Ok(format_match_report(&report)),
            }
        }
        None => {
            let pat = Pattern::anchored(pattern).map_err(|e| e.to_string())?;
            run_drill(DrillOp::MatchStart(pat))
        }
    }
}

/// Handle the search command
pub fn handle_search(
    pattern: &str,
    input: Option<&str>,
    file: Option<&PathBuf>,
    format: OutputFormat,
) -> Result<String, String> {
    match resolve_input(input, file)? {
        Some(text) => {
            let report = crate::core::search(pattern, &text)?;
            match format {
                OutputFormat::Json => Ok(format_json(&report)),
                OutputFormat::Text => Ok(format_match_report(&report)),
            }
        }
        None => {
            let pat = Pattern::compile(pattern).map_err(|e| e.to_string())?;
            run_drill(DrillOp::Search(pat))
        }
    }
}

/// Handle the extract command
pub fn handle_extract(
    pattern: &str,
    input: Option<&str>,
    file: Option<&PathBuf>,
    template: Option<&str>,
    spans: bool,
    replace_group: &[String],
    format: OutputFormat,
) -> Result<String, String> {
    let replacements = parse_group_replacements(replace_group)?;

    match resolve_input(input, file)? {
        Some(text) => {
            let report = crate::core::extract::extract(pattern, &text, template, &replacements)?;
            match format {
                OutputFormat::Json => Ok(format_json(&report)),
                OutputFormat::Text => Ok(format_extract_report(&report)),
            }
        }
        None => {
            let pat = Pattern::compile(pattern).map_err(|e| e.to_string())?;
            run_drill(DrillOp::Extract {
                pattern: pat,
                template: template.map(str::to_string),
                spans,
                replace: replacements,
            })
        }
    }
}

/// Handle the sub command
pub fn handle_sub(
    pattern: &str,
    replacement: Option<&str>,
    input: Option<&str>,
    file: Option<&PathBuf>,
    transform: Option<TransformArg>,
    format: OutputFormat,
) -> Result<String, String> {
    let replacement = match (replacement, transform) {
        (None, Some(transform)) => Replacement::Transform(transform.into()),
        (Some(template), None) => Replacement::Template(template.to_string()),
        // clap enforces exactly one of the two
        _ => return Err("Provide a replacement template or --transform".to_string()),
    };

    match resolve_input(input, file)? {
        Some(text) => {
            let report = crate::core::substitute::substitute_string(pattern, replacement, &text)?;
            match format {
                OutputFormat::Json => Ok(format_json(&report)),
                OutputFormat::Text => Ok(format_sub_report(&report)),
            }
        }
        None => {
            let sub = Substitution::new(pattern, replacement).map_err(|e| e.to_string())?;
            run_drill(DrillOp::Substitute(sub))
        }
    }
}
