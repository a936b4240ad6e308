//! Command-line interface for Ged.
//!
//! This module handles argument parsing and output payloads only.
//! NO resolution or loading is performed here.

use clap::Parser;
use serde::Serialize;
use serde_json::Value;

/// Ged: find every type-resolved use of a symbol, field or method.
#[derive(Parser, Debug)]
#[command(name = "ged")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Query: <pkg path>:<ident>[:<field>|:<method>()].
    ///
    /// Every segment is a regular expression matched against the whole name.
    #[arg(short, long, value_name = "PATTERN")]
    pub pattern: String,

    /// Modules to search: dump files, directories, or `dir/...` for a recursive search.
    #[arg(required = true, value_name = "MODULE")]
    pub modules: Vec<String>,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parse command-line arguments.
///
/// This function is the entry point for CLI argument parsing.
/// It returns the parsed Cli struct or exits on error.
pub fn parse_args() -> Cli {
    Cli::parse()
}

/// JSON success payload for CLI responses.
#[derive(Serialize)]
pub struct CliSuccessPayload {
    /// Status indicator ("ok").
    pub status: &'static str,
    /// Human-readable message.
    pub message: String,
    /// Optional structured data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl CliSuccessPayload {
    /// Construct a payload with structured data.
    pub fn with_data(message: String, data: Value) -> Self {
        Self {
            status: "ok",
            message,
            data: Some(data),
        }
    }

    /// Payload describing a finished search.
    pub fn from_matches(matches: &crate::report::Matches) -> Self {
        let message = format!(
            "{} match(es) at {} position(s)",
            matches.len(),
            matches.total_positions()
        );
        Self::with_data(
            message,
            serde_json::json!({ "matches": matches.to_entries() }),
        )
    }
}

/// JSON error payload for CLI responses.
#[derive(Serialize)]
pub struct CliErrorPayload {
    /// Status indicator ("error").
    pub status: &'static str,
    /// Structured error details.
    pub error: ErrorDetails,
}

/// Details for a CLI error payload.
#[derive(Serialize)]
pub struct ErrorDetails {
    /// Error kind identifier (InvalidPattern, Load, etc.).
    pub kind: &'static str,
    /// Human-readable message.
    pub message: String,
    /// Optional hint for remediation steps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl CliErrorPayload {
    /// Build payload from a GedError instance.
    pub fn from_error(error: &crate::GedError) -> Self {
        CliErrorPayload {
            status: "error",
            error: ErrorDetails {
                kind: error.kind(),
                message: error.to_string(),
                hint: error.hint().map(|h| h.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Match, Matches, Position};

    #[test]
    fn test_parses_pattern_and_modules() {
        let cli = Cli::try_parse_from(["ged", "-p", "uut/pkg1:T1", "a.json", "dir/..."]).unwrap();
        assert_eq!(cli.pattern, "uut/pkg1:T1");
        assert_eq!(cli.modules, vec!["a.json", "dir/..."]);
        assert!(!cli.json);
    }

    #[test]
    fn test_requires_modules_and_pattern() {
        assert!(Cli::try_parse_from(["ged", "-p", "uut/pkg1:T1"]).is_err());
        assert!(Cli::try_parse_from(["ged", "a.json"]).is_err());
    }

    #[test]
    fn test_success_payload_shape() {
        let mut matches = Matches::new();
        matches.add(
            Match::ident("uut/pkg1", "F1"),
            Position {
                file: "f.go".into(),
                line: 8,
                column: 7,
                offset: 70,
            },
        );
        let payload = serde_json::to_value(CliSuccessPayload::from_matches(&matches)).unwrap();
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["data"]["matches"][0]["ident"], "F1");
        assert_eq!(payload["data"]["matches"][0]["positions"][0]["line"], 8);
    }

    #[test]
    fn test_error_payload_carries_kind_and_hint() {
        let err = crate::GedError::invalid_pattern("", "no pattern specified");
        let payload = serde_json::to_value(CliErrorPayload::from_error(&err)).unwrap();
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error"]["kind"], "InvalidPattern");
        assert_eq!(payload["error"]["message"], "no pattern specified");
        assert!(payload["error"]["hint"].is_string());
    }
}
