//! Validation report types and scoring.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// Score deduction when attached to an issue.
    fn issue_deduction(self) -> u32 {
        match self {
            Severity::Critical => 25,
            Severity::High => 15,
            Severity::Medium => 8,
            Severity::Low => 3,
        }
    }

    /// Score deduction when attached to a warning. Warnings are never
    /// critical; a critical finding is always an issue.
    fn warning_deduction(self) -> u32 {
        match self {
            Severity::Critical | Severity::High => 5,
            Severity::Medium => 3,
            Severity::Low => 1,
        }
    }
}

/// One finding from a validation check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Stable machine-readable code, e.g. `impossible_contribution`.
    pub code: String,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<f64>,
}

/// Which check families came back clean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CheckSummary {
    pub reasonableness: bool,
    pub consistency: bool,
    pub anomaly: bool,
    pub comparison: bool,
}

/// Scored validation outcome. Produced fresh per call, never mutated after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// 0-100, clamped.
    pub score: u8,
    pub issues: Vec<Issue>,
    pub warnings: Vec<Issue>,
    pub checks: CheckSummary,
}

impl ValidationResult {
    /// A result with a structurally impossible finding is invalid outright.
    pub fn is_valid(&self) -> bool {
        !self.issues.iter().any(|i| i.severity == Severity::Critical)
    }

    /// Suspicion gate for downstream payout/review consumers.
    pub fn is_suspicious(&self) -> bool {
        let highs = self.issues.iter().filter(|i| i.severity == Severity::High).count();
        self.score < 70 || !self.is_valid() || highs > 1
    }
}

/// Accumulates findings from the check families, then scores them.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    issues: Vec<Issue>,
    warnings: Vec<Issue>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(
        &mut self,
        code: &str,
        severity: Severity,
        message: impl Into<String>,
        threshold: Option<f64>,
        actual: Option<f64>,
    ) {
        self.issues.push(Issue {
            code: code.to_string(),
            severity,
            message: message.into(),
            threshold,
            actual,
        });
    }

    pub fn warning(
        &mut self,
        code: &str,
        severity: Severity,
        message: impl Into<String>,
        threshold: Option<f64>,
        actual: Option<f64>,
    ) {
        debug_assert!(severity != Severity::Critical, "warnings are never critical");
        self.warnings.push(Issue {
            code: code.to_string(),
            severity,
            message: message.into(),
            threshold,
            actual,
        });
    }

    /// Number of findings recorded so far (used for per-family clean flags).
    pub fn finding_count(&self) -> usize {
        self.issues.len() + self.warnings.len()
    }

    pub fn build(self, checks: CheckSummary) -> ValidationResult {
        let mut score: i64 = 100;
        for issue in &self.issues {
            score -= i64::from(issue.severity.issue_deduction());
        }
        for warning in &self.warnings {
            score -= i64::from(warning.severity.warning_deduction());
        }
        ValidationResult {
            score: score.clamp(0, 100) as u8,
            issues: self.issues,
            warnings: self.warnings,
            checks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_deductions_and_floor() {
        let mut builder = ReportBuilder::new();
        builder.issue("a", Severity::Critical, "x", None, None); // -25
        builder.issue("b", Severity::High, "x", None, None); // -15
        builder.warning("c", Severity::Low, "x", None, None); // -1
        let result = builder.build(CheckSummary::default());
        assert_eq!(result.score, 59);
        assert!(!result.is_valid());
        assert!(result.is_suspicious());

        let mut builder = ReportBuilder::new();
        for i in 0..10 {
            builder.issue(&format!("i{i}"), Severity::Critical, "x", None, None);
        }
        assert_eq!(builder.build(CheckSummary::default()).score, 0);
    }

    #[test]
    fn test_two_high_issues_suspicious_even_with_ok_score() {
        let mut builder = ReportBuilder::new();
        builder.issue("a", Severity::High, "x", None, None);
        builder.issue("b", Severity::High, "x", None, None);
        let result = builder.build(CheckSummary::default());
        assert_eq!(result.score, 70);
        assert!(result.is_valid());
        assert!(result.is_suspicious());
    }

    #[test]
    fn test_clean_report() {
        let result = ReportBuilder::new().build(CheckSummary {
            reasonableness: true,
            consistency: true,
            anomaly: true,
            comparison: true,
        });
        assert_eq!(result.score, 100);
        assert!(result.is_valid());
        assert!(!result.is_suspicious());
    }
}
