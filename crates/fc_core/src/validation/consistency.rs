//! Internal consistency checks: do the pieces of the box score agree?

use crate::replay::types::{MatchResult, TeamSide};

use super::report::{ReportBuilder, Severity};

const MAX_GOALS_PER_MINUTE: f64 = 0.5;
const CONTRIBUTION_SHARE_LIMIT: f64 = 0.9;
const COMFORTABLE_WIN_MARGIN: u32 = 2;

pub(crate) fn check(result: &MatchResult, subject: u32, report: &mut ReportBuilder) {
    if result.duration_minutes > 0 {
        for (side, label) in [(TeamSide::Home, "home"), (TeamSide::Away, "away")] {
            let rate = f64::from(result.score.for_side(side)) / f64::from(result.duration_minutes);
            if rate > MAX_GOALS_PER_MINUTE {
                report.issue(
                    "goal_rate",
                    Severity::High,
                    format!("{label} team scored at {rate:.2} goals/minute"),
                    Some(MAX_GOALS_PER_MINUTE),
                    Some(rate),
                );
            }
        }
    }

    for stats in &result.player_stats {
        let team_score = result.score.for_side(stats.team);
        if team_score > 0 {
            let share = f64::from(stats.goals) / f64::from(team_score);
            if share > CONTRIBUTION_SHARE_LIMIT {
                report.issue(
                    "lopsided_contribution",
                    Severity::Medium,
                    format!(
                        "player {} scored {:.0}% of their team's goals",
                        stats.player,
                        share * 100.0
                    ),
                    Some(CONTRIBUTION_SHARE_LIMIT),
                    Some(share),
                );
            }
        }
    }

    // Zero contribution from the subject player in a comfortable win.
    if let Some(stats) = result.stats_for(subject) {
        let (own, other) = match stats.team {
            TeamSide::Home => (result.score.home, result.score.away),
            TeamSide::Away => (result.score.away, result.score.home),
        };
        if own > other + COMFORTABLE_WIN_MARGIN && stats.goals == 0 && stats.assists == 0 {
            report.issue(
                "no_contribution_in_rout",
                Severity::Low,
                format!(
                    "player {} contributed nothing to a {own}-{other} win",
                    stats.player
                ),
                None,
                None,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::test_fixtures::result_with_stats;

    #[test]
    fn test_goal_rate_flagged() {
        // 46 goals in 90 minutes > 0.5/min.
        let result = result_with_stats(90, 46, 0, &[]);
        let mut report = ReportBuilder::new();
        check(&result, 1, &mut report);
        let built = report.build(Default::default());
        assert!(built.issues.iter().any(|i| i.code == "goal_rate" && i.severity == Severity::High));
    }

    #[test]
    fn test_lopsided_contribution() {
        let result = result_with_stats(90, 3, 1, &[(1, true, 3, 0)]);
        let mut report = ReportBuilder::new();
        check(&result, 1, &mut report);
        let built = report.build(Default::default());
        assert!(built.issues.iter().any(|i| i.code == "lopsided_contribution"));
    }

    #[test]
    fn test_no_contribution_in_rout() {
        let result = result_with_stats(90, 4, 1, &[(1, true, 0, 0), (2, true, 4, 0)]);
        let mut report = ReportBuilder::new();
        check(&result, 1, &mut report);
        let built = report.build(Default::default());
        assert!(built
            .issues
            .iter()
            .any(|i| i.code == "no_contribution_in_rout" && i.severity == Severity::Low));
    }

    #[test]
    fn test_narrow_win_without_contribution_passes() {
        let result = result_with_stats(90, 2, 1, &[(1, true, 0, 0), (2, true, 2, 0)]);
        let mut report = ReportBuilder::new();
        check(&result, 1, &mut report);
        let findings: Vec<_> = report.build(Default::default()).issues;
        assert!(!findings.iter().any(|i| i.code == "no_contribution_in_rout"));
    }
}
