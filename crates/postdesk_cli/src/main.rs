//! CLI entry point for postdesk core.
//!
//! # Responsibility
//! - Verify `postdesk_core` linkage (`ping`, `version`).
//! - Convert content files between the editor and storage shapes.
//!
//! Usage: `postdesk [ping|version|encode|decode|normalize] [FILE|-]`
//!
//! File logging starts when `POSTDESK_LOG_DIR` is set; `POSTDESK_LOG_LEVEL`
//! overrides the build default.

use postdesk_core::config::{ENV_LOG_DIR, ENV_LOG_LEVEL};
use postdesk_core::{decode, default_log_level, encode, init_logging, normalize_persisted};
use postdesk_core::{Delta, Document};
use std::io::Read;
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(message) = start_logging() {
        eprintln!("postdesk: {message}");
        return ExitCode::FAILURE;
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("postdesk: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<String, String> {
    let command = args.first().map(String::as_str).unwrap_or("ping");
    match command {
        "ping" => Ok(format!("postdesk_core ping={}", postdesk_core::ping())),
        "version" => Ok(format!(
            "postdesk_core version={}",
            postdesk_core::core_version()
        )),
        "encode" | "decode" | "normalize" => convert(command, &read_input(args.get(1))?),
        other => Err(format!(
            "unknown command `{other}`; expected ping|version|encode|decode|normalize"
        )),
    }
}

/// Runs one content conversion over JSON `input`.
fn convert(command: &str, input: &str) -> Result<String, String> {
    match command {
        "encode" => {
            let delta: Delta = parse_json(input)?;
            to_pretty_json(&encode(&delta))
        }
        "decode" => {
            let document: Document = parse_json(input)?;
            let delta = decode(&document).map_err(|err| err.to_string())?;
            to_pretty_json(&delta)
        }
        "normalize" => {
            let value: serde_json::Value = parse_json(input)?;
            let document = normalize_persisted(&value).map_err(|err| err.to_string())?;
            to_pretty_json(&document)
        }
        other => Err(format!("`{other}` is not a conversion")),
    }
}

fn start_logging() -> Result<(), String> {
    let Ok(log_dir) = std::env::var(ENV_LOG_DIR) else {
        return Ok(());
    };
    let level = std::env::var(ENV_LOG_LEVEL)
        .unwrap_or_else(|_| default_log_level().as_str().to_string());
    init_logging(&level, &log_dir).map_err(|err| err.to_string())
}

fn read_input(path: Option<&String>) -> Result<String, String> {
    match path.map(String::as_str) {
        None | Some("-") => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|err| format!("failed to read stdin: {err}"))?;
            Ok(buffer)
        }
        Some(path) => std::fs::read_to_string(path)
            .map_err(|err| format!("failed to read `{path}`: {err}")),
    }
}

fn parse_json<T: serde::de::DeserializeOwned>(input: &str) -> Result<T, String> {
    serde_json::from_str(input).map_err(|err| format!("invalid JSON input: {err}"))
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|err| format!("failed to render JSON: {err}"))
}
