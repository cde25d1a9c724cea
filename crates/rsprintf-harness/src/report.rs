//! Human-readable and machine-readable verification reports.

use serde::Serialize;

use crate::runner::VerificationSummary;

/// Report document for one verification run against a fixture set.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    pub title: String,
    /// Fixture family the verified set belongs to.
    pub family: String,
    /// Oracle that recorded the expectations.
    pub oracle: String,
    pub timestamp: String,
    pub summary: VerificationSummary,
}

impl VerificationReport {
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        use std::fmt::Write as _;

        writeln!(out, "# {}", self.title).ok();
        writeln!(out).ok();
        writeln!(out, "- Family: `{}`", self.family).ok();
        writeln!(out, "- Oracle: `{}`", self.oracle).ok();
        writeln!(out, "- Timestamp: {}", self.timestamp).ok();
        writeln!(out).ok();
        writeln!(out, "## Summary").ok();
        writeln!(out).ok();
        writeln!(out, "| Total | Passed | Failed |").ok();
        writeln!(out, "|------:|-------:|-------:|").ok();
        writeln!(
            out,
            "| {} | {} | {} |",
            self.summary.total, self.summary.passed, self.summary.failed
        )
        .ok();
        writeln!(out).ok();

        if self.summary.all_passed() {
            writeln!(out, "All cases passed.").ok();
            return out;
        }

        writeln!(out, "## Failures").ok();
        for failure in self.summary.failures() {
            writeln!(out).ok();
            writeln!(out, "### `{}`", failure.case_id).ok();
            writeln!(out).ok();
            writeln!(out, "- Template: `{}`", escape_backticks(&failure.template)).ok();
            writeln!(
                out,
                "- Logical length: expected {}, got {}",
                failure.expected_len, failure.actual_len
            )
            .ok();
            if let Some(diff) = &failure.diff {
                writeln!(out).ok();
                writeln!(out, "```text").ok();
                writeln!(out, "{diff}").ok();
                writeln!(out, "```").ok();
            }
        }
        out
    }

    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

fn escape_backticks(text: &str) -> String {
    text.replace('`', "\\`").replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{ArgSpec, FixtureCase, FixtureSet};
    use crate::runner::Verifier;

    fn report_for(cases: Vec<FixtureCase>) -> VerificationReport {
        let set = FixtureSet::new("format/test", "engine", "t", cases).expect("set builds");
        let summary = VerificationSummary::from_outcomes(Verifier::new("report").run(&set));
        VerificationReport {
            title: "rsprintf Verification Report".into(),
            family: set.family.clone(),
            oracle: set.oracle.clone(),
            timestamp: "2026-08-23T00:00:00Z".into(),
            summary,
        }
    }

    fn case(id: &str, expected: &str, expected_len: usize) -> FixtureCase {
        FixtureCase {
            id: id.into(),
            template: "%d\n".into(),
            args: vec![ArgSpec::Int(7)],
            capacity: 32,
            expected: expected.into(),
            expected_len,
            expected_slots: vec![],
        }
    }

    #[test]
    fn clean_run_renders_all_passed() {
        let report = report_for(vec![case("seven", "7\n", 2)]);
        let md = report.to_markdown();
        assert!(md.contains("# rsprintf Verification Report"));
        assert!(md.contains("| 1 | 1 | 0 |"));
        assert!(md.contains("All cases passed."));
        assert!(!md.contains("## Failures"));
    }

    #[test]
    fn failing_run_renders_failure_section_with_diff() {
        let report = report_for(vec![case("seven", "8\n", 2)]);
        let md = report.to_markdown();
        assert!(md.contains("| 1 | 0 | 1 |"));
        assert!(md.contains("## Failures"));
        assert!(md.contains("### `seven`"));
        assert!(md.contains("```text"));
        assert!(md.contains("first divergence"));
    }

    #[test]
    fn json_round_trips_summary_counts() {
        let report = report_for(vec![case("seven", "7\n", 2)]);
        let json = report.to_json();
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["summary"]["total"], 1);
        assert_eq!(value["summary"]["passed"], 1);
        assert_eq!(value["oracle"], "engine");
    }
}
