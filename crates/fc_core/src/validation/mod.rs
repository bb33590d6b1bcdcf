//! Post-match statistical plausibility scoring.
//!
//! Stateless and independent of the physics: the validator only reads the
//! final box score, the input-stream metadata, and optional prior-match
//! history for the player under review. Four check families contribute
//! findings; the report scores them and exposes the suspicion gate that
//! downstream payout/review consumers key on.

mod anomaly;
mod comparison;
mod consistency;
mod reasonableness;
pub mod report;

use serde::{Deserialize, Serialize};

use crate::engine::state::PlayerId;
use crate::replay::types::MatchResult;

pub use report::{CheckSummary, Issue, ReportBuilder, Severity, ValidationResult};

/// One prior match for the subject player, most recent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalMatch {
    pub goals: u32,
    pub assists: u32,
    pub won: bool,
}

/// Validate one finalized match for one player.
///
/// `history` may be empty (the anomaly and comparison families then skip
/// themselves); when present it must be ordered most recent first.
pub fn validate_match(
    result: &MatchResult,
    subject: PlayerId,
    history: &[HistoricalMatch],
) -> ValidationResult {
    let mut report = ReportBuilder::new();
    let mut checks = CheckSummary::default();

    let before = report.finding_count();
    reasonableness::check(result, &mut report);
    checks.reasonableness = report.finding_count() == before;

    let before = report.finding_count();
    consistency::check(result, subject, &mut report);
    checks.consistency = report.finding_count() == before;

    let before = report.finding_count();
    anomaly::check(result, subject, history, &mut report);
    checks.anomaly = report.finding_count() == before;

    let before = report.finding_count();
    comparison::check(result, history, &mut report);
    checks.comparison = report.finding_count() == before;

    let result = report.build(checks);
    if result.is_suspicious() {
        log::warn!(
            "match flagged for player {subject}: score {} with {} issues",
            result.score,
            result.issues.len()
        );
    }
    result
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    use chrono::DateTime;

    use crate::replay::types::{MatchResult, PlayerMatchStats, Score, TeamSide};

    /// Build a minimal MatchResult for validator tests.
    /// Stats tuples are (player, is_home, goals, assists).
    pub(crate) fn result_with_stats(
        duration_minutes: u32,
        home: u32,
        away: u32,
        stats: &[(u32, bool, u32, u32)],
    ) -> MatchResult {
        MatchResult {
            match_id: "m-test".into(),
            seed: 7,
            engine_version: "0.1.0".into(),
            score: Score { home, away },
            duration_minutes,
            player_stats: stats
                .iter()
                .map(|&(player, is_home, goals, assists)| PlayerMatchStats {
                    player,
                    team: if is_home { TeamSide::Home } else { TeamSide::Away },
                    goals,
                    assists,
                })
                .collect(),
            home_inputs: Vec::new(),
            away_inputs: Vec::new(),
            played_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            result_hash: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_fixtures::result_with_stats;
    use super::*;

    #[test]
    fn test_clean_match_scores_100() {
        let result = result_with_stats(90, 2, 1, &[(1, true, 1, 1), (2, false, 1, 0)]);
        let report = validate_match(&result, 1, &[]);
        assert_eq!(report.score, 100);
        assert!(report.is_valid());
        assert!(!report.is_suspicious());
        assert!(report.checks.reasonableness && report.checks.consistency);
    }

    #[test]
    fn test_impossible_contribution_invalidates() {
        let result = result_with_stats(90, 2, 1, &[(1, true, 3, 0)]);
        let report = validate_match(&result, 1, &[]);
        assert!(!report.is_valid());
        assert!(report.is_suspicious());
        assert!(!report.checks.reasonableness);
    }

    #[test]
    fn test_score_always_in_range() {
        // Pile up findings: impossible stats, absurd duration, goal flood.
        let result = result_with_stats(10, 40, 0, &[(1, true, 41, 20), (2, true, 39, 18)]);
        let report = validate_match(&result, 1, &[]);
        assert!(report.score <= 100);
        // u8 already floors at 0; the clamp is what keeps it there.
        assert_eq!(report.score, 0);
    }
}
