//! Info command: decode a replay file and show its score.

use std::path::Path;

use anyhow::{Context, Result};
use osr_core::export::format_score_console;
use osr_core::{DecodeIssue, Score, ScoreDecoder};
use serde::Serialize;

use super::ruleset_name;

#[derive(Serialize)]
struct InfoOutput<'a> {
    ruleset: &'a str,
    score: &'a Score,
    issues: &'a [DecodeIssue],
}

pub fn run(decoder: &ScoreDecoder, file: &Path, json: bool) -> Result<()> {
    let decoded = decoder
        .decode_file(file)
        .with_context(|| format!("Failed to decode {}", file.display()))?;
    let ruleset = ruleset_name(decoded.score.ruleset_id);

    if json {
        let output = InfoOutput {
            ruleset,
            score: &decoded.score,
            issues: &decoded.issues,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let issues: Vec<String> = decoded.issues.iter().map(ToString::to_string).collect();
        println!("{}", format_score_console(&decoded.score, ruleset, &issues));
    }

    Ok(())
}
