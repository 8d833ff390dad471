mod cli;
mod hook;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;

use access_log::{AccessLog, DecisionLabel};
use path_policy::{load_policy, PolicyEngine, PolicySource};

use crate::cli::Cli;
use crate::hook::HookResponse;

/// Rule file looked up beside the executable when `--patterns` is absent.
const PATTERNS_FILE: &str = "restricted-patterns.json";

/// Access log written beside the executable when `--audit-log` is absent.
const ACCESS_LOG_FILE: &str = "access.log";

fn main() {
    let cli = Cli::parse();

    // Diagnostics go to stderr; stdout carries exactly one response
    // envelope.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let base = install_dir();
    let patterns_path = cli.patterns.unwrap_or_else(|| base.join(PATTERNS_FILE));
    let audit_path = cli.audit_log.unwrap_or_else(|| base.join(ACCESS_LOG_FILE));
    let audit = AccessLog::new(audit_path);

    let engine = prepare_engine(&patterns_path, &audit);

    let response = match run(&engine, &audit) {
        Ok(response) => response,
        Err(err) => {
            let reason = format!("Validation error: {err:#}");
            let _ = audit.record_without_path(DecisionLabel::Error, &reason);
            HookResponse::deny(reason)
        }
    };

    // The decision travels in the envelope; the exit status stays 0.
    println!("{}", encode_response(&response));
}

/// Read the whole request from stdin and decide it.
fn run(engine: &PolicyEngine, audit: &AccessLog) -> Result<HookResponse> {
    let mut raw = String::new();
    std::io::stdin()
        .read_to_string(&mut raw)
        .context("failed to read request from stdin")?;
    Ok(hook::handle(&raw, engine, audit))
}

/// Load the policy and build the engine.
///
/// A missing rule file silently selects the built-in defaults. An
/// unusable rule file leaves every list empty and records one ERROR
/// audit line naming the failure.
fn prepare_engine(patterns_path: &Path, audit: &AccessLog) -> PolicyEngine {
    let loaded = load_policy(patterns_path);
    if let PolicySource::EmptyFallback(ref error) = loaded.source {
        warn!(
            path = %patterns_path.display(),
            %error,
            "policy file unusable; every rule list is empty"
        );
        let _ = audit.record_without_path(
            DecisionLabel::Error,
            &format!("Failed to load patterns: {error}"),
        );
    }
    PolicyEngine::new(loaded.policy)
}

/// The directory holding the executable; the rule file and the access log
/// live beside it, independent of the working directory. Falls back to
/// the working directory when the executable path cannot be determined.
fn install_dir() -> PathBuf {
    match std::env::current_exe() {
        Ok(exe) => match exe.parent() {
            Some(dir) => dir.to_path_buf(),
            None => PathBuf::from("."),
        },
        Err(e) => {
            warn!(
                error = %e,
                "could not locate the executable; resolving files in the working directory"
            );
            PathBuf::from(".")
        }
    }
}

/// Serialize the response, with a literal fallback so stdout always
/// carries a valid envelope.
fn encode_response(response: &HookResponse) -> String {
    serde_json::to_string(response).unwrap_or_else(|_| {
        r#"{"decision":"deny","reason":"failed to encode response"}"#.to_string()
    })
}
