//! Reasonableness checks: is the box score possible for a football match?

use crate::replay::types::MatchResult;

use super::report::{ReportBuilder, Severity};

const MIN_DURATION_MIN: u32 = 45;
const MAX_DURATION_MIN: u32 = 120;
/// Roughly three goals per 45-minute half is already an outlier.
const GOALS_PER_HALF: f64 = 3.0;
const MAX_ASSISTS: u32 = 10;
const EXTREME_ASSISTS: u32 = 15;
const ASSISTS_WITHOUT_GOALS: u32 = 5;

pub(crate) fn check(result: &MatchResult, report: &mut ReportBuilder) {
    if result.duration_minutes < MIN_DURATION_MIN || result.duration_minutes > MAX_DURATION_MIN {
        report.issue(
            "unreasonable_duration",
            Severity::Medium,
            format!(
                "match duration {} min outside [{MIN_DURATION_MIN}, {MAX_DURATION_MIN}]",
                result.duration_minutes
            ),
            Some(f64::from(MAX_DURATION_MIN)),
            Some(f64::from(result.duration_minutes)),
        );
    }

    let goal_ceiling = f64::from(result.duration_minutes) / 45.0 * GOALS_PER_HALF;
    let total_goals = f64::from(result.score.total());
    if total_goals > goal_ceiling {
        report.issue(
            "excessive_goals",
            Severity::High,
            format!("{total_goals} total goals exceeds ceiling {goal_ceiling:.1}"),
            Some(goal_ceiling),
            Some(total_goals),
        );
    }

    for stats in &result.player_stats {
        let team_score = result.score.for_side(stats.team);
        if stats.goals > team_score {
            // Structurally impossible: a player cannot outscore their team.
            report.issue(
                "impossible_contribution",
                Severity::Critical,
                format!(
                    "player {} scored {} but their team only has {team_score}",
                    stats.player, stats.goals
                ),
                Some(f64::from(team_score)),
                Some(f64::from(stats.goals)),
            );
        }
        if stats.assists > MAX_ASSISTS {
            let severity =
                if stats.assists > EXTREME_ASSISTS { Severity::High } else { Severity::Medium };
            report.issue(
                "excessive_assists",
                severity,
                format!("player {} recorded {} assists", stats.player, stats.assists),
                Some(f64::from(MAX_ASSISTS)),
                Some(f64::from(stats.assists)),
            );
        }
        if stats.goals == 0 && stats.assists > ASSISTS_WITHOUT_GOALS {
            // Implausible but not impossible: warning, not issue.
            report.warning(
                "assists_without_goals",
                Severity::Medium,
                format!(
                    "player {} has {} assists and no goals",
                    stats.player, stats.assists
                ),
                Some(f64::from(ASSISTS_WITHOUT_GOALS)),
                Some(f64::from(stats.assists)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::test_fixtures::result_with_stats;

    #[test]
    fn test_more_goals_than_team_is_critical() {
        // duration 90, home 2 - 1 away, home player with 3 goals.
        let result = result_with_stats(90, 2, 1, &[(1, true, 3, 0)]);
        let mut report = ReportBuilder::new();
        check(&result, &mut report);
        let built = report.build(Default::default());
        assert!(built
            .issues
            .iter()
            .any(|i| i.code == "impossible_contribution" && i.severity == Severity::Critical));
        assert!(!built.is_valid());
    }

    #[test]
    fn test_clean_scoreline_passes() {
        let result = result_with_stats(90, 2, 1, &[(1, true, 2, 1), (2, false, 1, 0)]);
        let mut report = ReportBuilder::new();
        check(&result, &mut report);
        assert_eq!(report.finding_count(), 0);
    }

    #[test]
    fn test_short_match_and_goal_flood() {
        let result = result_with_stats(30, 8, 0, &[(1, true, 4, 0)]);
        let mut report = ReportBuilder::new();
        check(&result, &mut report);
        let built = report.build(Default::default());
        assert!(built.issues.iter().any(|i| i.code == "unreasonable_duration"));
        assert!(built.issues.iter().any(|i| i.code == "excessive_goals"));
    }

    #[test]
    fn test_assist_tiers() {
        let result = result_with_stats(90, 12, 0, &[(1, true, 1, 12), (2, true, 1, 16)]);
        let mut report = ReportBuilder::new();
        check(&result, &mut report);
        let built = report.build(Default::default());
        let severities: Vec<_> = built
            .issues
            .iter()
            .filter(|i| i.code == "excessive_assists")
            .map(|i| i.severity)
            .collect();
        assert_eq!(severities, vec![Severity::Medium, Severity::High]);
    }

    #[test]
    fn test_assists_without_goals_is_warning() {
        let result = result_with_stats(90, 6, 0, &[(1, true, 0, 6)]);
        let mut report = ReportBuilder::new();
        check(&result, &mut report);
        let built = report.build(Default::default());
        assert!(built.warnings.iter().any(|w| w.code == "assists_without_goals"));
        assert!(built.is_valid());
    }
}
