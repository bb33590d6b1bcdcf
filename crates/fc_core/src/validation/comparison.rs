//! Recent-form comparison: the last five matches against the five before.
//!
//! Only meaningful with at least ten prior matches; shorter histories are
//! covered by the anomaly check.

use crate::replay::types::MatchResult;

use super::report::{ReportBuilder, Severity};
use super::HistoricalMatch;

const REQUIRED_HISTORY: usize = 10;
const SPAN: usize = 5;
const GOAL_DELTA_LIMIT: f64 = 3.0;
const STREAK_WINS: usize = 4;
const EARLIER_WINS_LIMIT: usize = 2;

pub(crate) fn check(
    _result: &MatchResult,
    history: &[HistoricalMatch],
    report: &mut ReportBuilder,
) {
    if history.len() < REQUIRED_HISTORY {
        return;
    }
    // History is most-recent-first.
    let recent = &history[..SPAN];
    let earlier = &history[SPAN..REQUIRED_HISTORY];

    let avg = |span: &[HistoricalMatch]| {
        span.iter().map(|h| f64::from(h.goals)).sum::<f64>() / span.len() as f64
    };
    let delta = avg(recent) - avg(earlier);
    if delta > GOAL_DELTA_LIMIT {
        report.issue(
            "sudden_form_spike",
            Severity::Medium,
            format!("average goals jumped by {delta:.1} across the last five matches"),
            Some(GOAL_DELTA_LIMIT),
            Some(delta),
        );
    }

    let wins = |span: &[HistoricalMatch]| span.iter().filter(|h| h.won).count();
    let recent_wins = wins(recent);
    let earlier_wins = wins(earlier);
    if recent_wins >= STREAK_WINS && earlier_wins <= EARLIER_WINS_LIMIT {
        report.issue(
            "sudden_win_streak",
            Severity::Low,
            format!("{recent_wins} wins in the last five after {earlier_wins} in the five before"),
            Some(STREAK_WINS as f64),
            Some(recent_wins as f64),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::test_fixtures::result_with_stats;

    fn entry(goals: u32, won: bool) -> HistoricalMatch {
        HistoricalMatch { goals, assists: 0, won }
    }

    #[test]
    fn test_form_spike_flagged() {
        let mut history = vec![entry(4, true); 5];
        history.extend(vec![entry(0, false); 5]);
        let result = result_with_stats(90, 1, 0, &[(1, true, 1, 0)]);
        let mut report = ReportBuilder::new();
        check(&result, &history, &mut report);
        let built = report.build(Default::default());
        assert!(built.issues.iter().any(|i| i.code == "sudden_form_spike"));
        assert!(built.issues.iter().any(|i| i.code == "sudden_win_streak"));
    }

    #[test]
    fn test_consistent_form_passes() {
        let history = vec![entry(1, true); 10];
        let result = result_with_stats(90, 1, 0, &[(1, true, 1, 0)]);
        let mut report = ReportBuilder::new();
        check(&result, &history, &mut report);
        assert_eq!(report.finding_count(), 0);
    }

    #[test]
    fn test_short_history_skipped() {
        let history = vec![entry(5, true); 9];
        let result = result_with_stats(90, 1, 0, &[(1, true, 1, 0)]);
        let mut report = ReportBuilder::new();
        check(&result, &history, &mut report);
        assert_eq!(report.finding_count(), 0);
    }
}
