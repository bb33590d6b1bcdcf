//! Statistical anomaly detection against the player's own history.

use crate::replay::types::MatchResult;

use super::report::{ReportBuilder, Severity};
use super::HistoricalMatch;

/// Matches of history considered for the baseline.
const BASELINE_WINDOW: usize = 10;
const Z_MEDIUM: f64 = 3.0;
const Z_HIGH: f64 = 4.0;

pub(crate) fn check(
    result: &MatchResult,
    subject: u32,
    history: &[HistoricalMatch],
    report: &mut ReportBuilder,
) {
    if history.is_empty() {
        return;
    }
    let Some(stats) = result.stats_for(subject) else {
        return;
    };

    let window = &history[..history.len().min(BASELINE_WINDOW)];
    score_z(report, "goals_anomaly", f64::from(stats.goals), window.iter().map(|h| f64::from(h.goals)));
    score_z(
        report,
        "assists_anomaly",
        f64::from(stats.assists),
        window.iter().map(|h| f64::from(h.assists)),
    );
}

fn score_z(
    report: &mut ReportBuilder,
    code: &str,
    actual: f64,
    baseline: impl Iterator<Item = f64>,
) {
    let values: Vec<f64> = baseline.collect();
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();
    if std_dev < 1e-9 {
        // Constant history: z undefined, leave spikes to the comparison check.
        return;
    }
    let z = (actual - mean) / std_dev;
    if z.abs() > Z_HIGH {
        report.issue(
            code,
            Severity::High,
            format!("value {actual} is {z:.1} standard deviations from the trailing mean"),
            Some(Z_HIGH),
            Some(z.abs()),
        );
    } else if z.abs() > Z_MEDIUM {
        report.issue(
            code,
            Severity::Medium,
            format!("value {actual} is {z:.1} standard deviations from the trailing mean"),
            Some(Z_MEDIUM),
            Some(z.abs()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::test_fixtures::result_with_stats;

    fn history(goals: &[u32]) -> Vec<HistoricalMatch> {
        goals
            .iter()
            .map(|&g| HistoricalMatch { goals: g, assists: 0, won: false })
            .collect()
    }

    #[test]
    fn test_goal_spike_flagged() {
        // Baseline mean 0.5, std 0.5; 6 goals is z = 11.
        let result = result_with_stats(90, 6, 0, &[(1, true, 6, 0)]);
        let mut report = ReportBuilder::new();
        check(&result, 1, &history(&[0, 1, 0, 1, 0, 1, 0, 1]), &mut report);
        let built = report.build(Default::default());
        assert!(built
            .issues
            .iter()
            .any(|i| i.code == "goals_anomaly" && i.severity == Severity::High));
    }

    #[test]
    fn test_z_exactly_three_not_flagged() {
        // Baseline [0,2,...]: mean 1, std 1. Four goals is z = 3.0, and the
        // threshold is strict.
        let result = result_with_stats(90, 4, 0, &[(1, true, 4, 0)]);
        let mut report = ReportBuilder::new();
        check(&result, 1, &history(&[0, 2, 0, 2, 0, 2, 0, 2]), &mut report);
        assert!(report.build(Default::default()).issues.is_empty());
    }

    #[test]
    fn test_typical_match_passes() {
        let result = result_with_stats(90, 1, 0, &[(1, true, 1, 0)]);
        let mut report = ReportBuilder::new();
        check(&result, 1, &history(&[0, 1, 2, 1, 0, 1]), &mut report);
        assert_eq!(report.finding_count(), 0);
    }

    #[test]
    fn test_no_history_no_findings() {
        let result = result_with_stats(90, 9, 0, &[(1, true, 9, 0)]);
        let mut report = ReportBuilder::new();
        check(&result, 1, &[], &mut report);
        assert_eq!(report.finding_count(), 0);
    }
}
