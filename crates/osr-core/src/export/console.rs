//! Console output formatting with colored display.

use std::fmt::Write as _;

use owo_colors::OwoColorize;

use crate::ruleset::HitResult;
use crate::score::{Score, ScoreRank};

use super::format_mods;

/// Format a score for console display with colored output.
///
/// Returns a multi-line string with a boxed format. `issues` are listed
/// below the summary.
pub fn format_score_console(score: &Score, ruleset_name: &str, issues: &[String]) -> String {
    let mut output = String::new();

    let mods = format_mods(&score.mods);
    let title_content = format!(
        "  {} [{}] {}",
        score.username.bold(),
        ruleset_name,
        if mods.is_empty() { "NM".to_string() } else { mods.clone() }
    );

    // Approximate width; ANSI codes do not count
    let content_width = score.username.len() + ruleset_name.len() + mods.len().max(2) + 6;
    let border: String = "━".repeat(content_width.max(50));
    let border_dim = border.dimmed();

    let version_kind = if score.is_legacy() { "legacy" } else { "lazer" };
    let rank_str = score
        .rank
        .as_ref()
        .map_or_else(|| "-".dimmed().to_string(), format_colored_rank);
    let combo_str = if score.is_perfect() && score.max_combo > 0 {
        format!("{}x", score.max_combo).cyan().to_string()
    } else {
        format!("{}x / {}x", score.max_combo, score.max_achievable_combo())
    };

    let _ = writeln!(output, "{}", border_dim);
    let _ = writeln!(output, "{}", title_content);
    let _ = writeln!(output, "{}", border_dim);
    let _ = writeln!(output, "  VERSION: {} ({})", score.format_version, version_kind);
    let _ = writeln!(output, "  DATE   : {}", score.date.to_rfc3339());
    let _ = writeln!(output, "  SCORE  : {} {}", score.total_score, rank_str);
    if let Some(legacy) = score.legacy_total_score {
        let _ = writeln!(output, "  LEGACY : {}", legacy);
    }
    let _ = writeln!(output, "  COMBO  : {}", combo_str);
    let _ = writeln!(output, "  JUDGE  : {}", format_statistics(score));
    match &score.replay {
        Some(replay) => {
            let _ = writeln!(
                output,
                "  FRAMES : {} ({:.1}s)",
                replay.len(),
                replay.duration() / 1000.0
            );
        }
        None => {
            let _ = writeln!(output, "  FRAMES : -");
        }
    }
    for issue in issues {
        let _ = writeln!(output, "  {} {}", "WARN".yellow(), issue);
    }
    let _ = write!(output, "{}", border_dim);

    output
}

fn format_statistics(score: &Score) -> String {
    let parts: Vec<String> = score
        .statistics
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(result, count)| format!("{} {}", format_colored_result(result, *count), result))
        .collect();

    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join(" / ")
    }
}

/// Format a judgement count with the color of its judgement.
fn format_colored_result(result: &HitResult, count: u32) -> String {
    match result {
        HitResult::Perfect | HitResult::Great => count.cyan().to_string(),
        HitResult::Good | HitResult::Ok => count.truecolor(255, 200, 0).to_string(),
        HitResult::Meh => count.truecolor(255, 165, 0).to_string(),
        HitResult::Miss | HitResult::LargeTickMiss | HitResult::SmallTickMiss => {
            count.truecolor(200, 50, 30).to_string()
        }
        _ => count.to_string(),
    }
}

/// Format rank with color.
fn format_colored_rank(rank: &ScoreRank) -> String {
    let name = rank.short_name();
    match rank {
        ScoreRank::F => name.truecolor(200, 50, 30).to_string(),
        ScoreRank::D => name.truecolor(230, 120, 0).to_string(),
        ScoreRank::C => name.purple().to_string(),
        ScoreRank::B => name.blue().to_string(),
        ScoreRank::A => name.green().to_string(),
        ScoreRank::S | ScoreRank::X => name.truecolor(255, 200, 0).bold().to_string(),
        // silver
        ScoreRank::Sh | ScoreRank::Xh => name.truecolor(192, 192, 192).bold().to_string(),
    }
}

/// Simple score summary for logging.
pub fn format_score_summary(score: &Score) -> String {
    format!(
        "{} {} {} ({}x) {}",
        score.username,
        score.total_score,
        score.rank.map_or("-", |r| r.short_name()),
        score.max_combo,
        format_mods(&score.mods)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use crate::ruleset::Mod;

    fn sample_score() -> Score {
        let mut score = Score::new(0);
        score.username = "player".to_string();
        score.total_score = 987_654;
        score.max_combo = 12;
        score.rank = Some(ScoreRank::Sh);
        score.mods = vec![Mod::new("HD"), Mod::new("DT")];
        score.statistics = BTreeMap::from([(HitResult::Great, 10), (HitResult::Miss, 1)]);
        score.maximum_statistics = BTreeMap::from([(HitResult::Great, 11)]);
        score
    }

    #[test]
    fn test_format_score_summary() {
        let summary = format_score_summary(&sample_score());

        assert!(summary.contains("player"));
        assert!(summary.contains("987654"));
        assert!(summary.contains("SH"));
        assert!(summary.contains("HD,DT"));
    }

    #[test]
    fn test_format_score_console() {
        let output = format_score_console(&sample_score(), "osu", &["replay dropped".to_string()]);

        assert!(output.contains("osu"));
        assert!(output.contains("12x / 11x"));
        assert!(output.contains("replay dropped"));
        assert!(output.contains("FRAMES : -"));
    }
}
