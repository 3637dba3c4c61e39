//! redrill - regex practice CLI
//!
//! One subcommand per drill: match at the start, search anywhere, extract
//! groups, substitute. Omit the input argument and any drill reads stdin
//! lines until `q`, echoing a transcript line per input line.

mod core;
mod output;

#[cfg(feature = "cli")]
mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    #[cfg(feature = "cli")]
    {
        use cli::{parse, Commands};

        let args = parse();

        let Some(command) = args.command else {
            eprintln!("redrill: regex practice CLI");
            eprintln!();
            eprintln!("Usage: redrill <COMMAND>");
            eprintln!();
            eprintln!("Commands:");
            eprintln!("  check    Check that a pattern compiles and report the engine it needs");
            eprintln!("  match    Match a pattern at the beginning of the input");
            eprintln!("  search   Search for a pattern anywhere in the input");
            eprintln!("  extract  Extract capture group values and spans");
            eprintln!("  sub      Replace every occurrence of a pattern");
            eprintln!();
            eprintln!("Omit the input argument to drill: lines are read from stdin until \"q\".");
            eprintln!();
            eprintln!("Options:");
            eprintln!("  -f, --format <FORMAT>  Output format [json|text] (default: json)");
            eprintln!("  -h, --help             Print help");
            eprintln!("  -V, --version          Print version");
            return ExitCode::SUCCESS;
        };

        let format = args.format;

        let result = match command {
            Commands::Check { pattern } => cli::handle_check(&pattern, format),

            Commands::Match {
                pattern,
                input,
                file,
            } => cli::handle_match(&pattern, input.as_deref(), file.as_ref(), format),

            Commands::Search {
                pattern,
                input,
                file,
            } => cli::handle_search(&pattern, input.as_deref(), file.as_ref(), format),

            Commands::Extract {
                pattern,
                input,
                file,
                template,
                spans,
                replace_group,
            } => cli::handle_extract(
                &pattern,
                input.as_deref(),
                file.as_ref(),
                template.as_deref(),
                spans,
                &replace_group,
                format,
            ),

            Commands::Sub {
                pattern,
                replacement,
                input,
                file,
                transform,
            } => cli::handle_sub(
                &pattern,
                replacement.as_deref(),
                input.as_deref(),
                file.as_ref(),
                transform,
                format,
            ),
        };

        match result {
            Ok(output) => {
                // Drills stream their transcript directly and return nothing
                if !output.is_empty() {
                    println!("{}", output);
                }
                ExitCode::SUCCESS
            }
            Err(e) => {
                let error = crate::output::ErrorResponse::new("COMMAND_ERROR", &e);
                let error_json = serde_json::to_string(&error)
                    .unwrap_or_else(|_| format!(r#"{{"error":true,"message":"{}"}}"#, e));
                eprintln!("{}", error_json);
                ExitCode::FAILURE
            }
        }
    }

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("CLI feature not enabled. Build with --features cli");
        ExitCode::FAILURE
    }
}
