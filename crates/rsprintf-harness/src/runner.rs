//! Fixture verification engine.
//!
//! Replays every case of a [`FixtureSet`] through the formatter and
//! compares all three observable outputs against the recording: the
//! destination content, the logical (untruncated) length, and the final
//! count-slot values. A case passes only when all three agree.

use std::time::Instant;

use serde::Serialize;

use crate::diff;
use crate::fixtures::{render_case, FixtureCase, FixtureSet};

/// Replays fixture cases and collects per-case outcomes.
pub struct Verifier {
    /// Name of the verification campaign.
    pub campaign: String,
}

/// Outcome of replaying one fixture case.
#[derive(Debug, Clone, Serialize)]
pub struct CaseOutcome {
    pub case_id: String,
    pub template: String,
    pub passed: bool,
    pub expected: String,
    pub actual: String,
    pub expected_len: usize,
    pub actual_len: usize,
    /// Divergence rendering, or secondary notes when the content matched
    /// but length/slots did not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
    #[serde(skip)]
    pub latency_ns: u64,
}

impl Verifier {
    #[must_use]
    pub fn new(campaign: impl Into<String>) -> Self {
        Self { campaign: campaign.into() }
    }

    /// Replay all cases in a set and return outcomes in fixture order.
    pub fn run(&self, fixture_set: &FixtureSet) -> Vec<CaseOutcome> {
        fixture_set.cases.iter().map(run_case).collect()
    }
}

fn run_case(case: &FixtureCase) -> CaseOutcome {
    let started = Instant::now();
    let rendered = render_case(case.template.as_bytes(), &case.args, case.capacity);
    let latency_ns = started.elapsed().as_nanos() as u64;

    let actual = String::from_utf8_lossy(&rendered.content).into_owned();
    let content_ok = actual == case.expected;
    let length_ok = rendered.logical == case.expected_len;
    let slots_ok = rendered.slots == case.expected_slots;

    let mut notes = Vec::new();
    if !length_ok {
        notes.push(format!(
            "logical length mismatch: expected {}, got {}",
            case.expected_len, rendered.logical
        ));
    }
    if !slots_ok {
        notes.push(format!(
            "count slots mismatch: expected {:?}, got {:?}",
            case.expected_slots, rendered.slots
        ));
    }

    let diff_out = if !content_ok {
        Some(diff::render_diff(&case.expected, &actual))
    } else if notes.is_empty() {
        None
    } else {
        Some(notes.join("\n"))
    };

    CaseOutcome {
        case_id: case.id.clone(),
        template: case.template.clone(),
        passed: content_ok && length_ok && slots_ok,
        expected: case.expected.clone(),
        actual,
        expected_len: case.expected_len,
        actual_len: rendered.logical,
        diff: diff_out,
        latency_ns,
    }
}

/// Aggregate view over a verification run.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub outcomes: Vec<CaseOutcome>,
}

impl VerificationSummary {
    #[must_use]
    pub fn from_outcomes(outcomes: Vec<CaseOutcome>) -> Self {
        let total = outcomes.len();
        let passed = outcomes.iter().filter(|o| o.passed).count();
        Self { total, passed, failed: total - passed, outcomes }
    }

    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &CaseOutcome> {
        self.outcomes.iter().filter(|o| !o.passed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{ArgSpec, FixtureCase, FixtureSet};

    fn set_of(cases: Vec<FixtureCase>) -> FixtureSet {
        FixtureSet::new("format/test", "engine", "2026-08-23T00:00:00Z", cases)
            .expect("fixture set builds")
    }

    fn case(
        id: &str,
        template: &str,
        args: Vec<ArgSpec>,
        capacity: usize,
        expected: &str,
        expected_len: usize,
        expected_slots: Vec<usize>,
    ) -> FixtureCase {
        FixtureCase {
            id: id.into(),
            template: template.into(),
            args,
            capacity,
            expected: expected.into(),
            expected_len,
            expected_slots,
        }
    }

    #[test]
    fn verifier_passes_faithful_fixture() {
        let set = set_of(vec![case(
            "int",
            "value=%d",
            vec![ArgSpec::Int(42)],
            32,
            "value=42",
            8,
            vec![],
        )]);
        let outcomes = Verifier::new("smoke").run(&set);
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].passed);
        assert!(outcomes[0].diff.is_none());
    }

    #[test]
    fn verifier_flags_content_divergence_with_diff() {
        let set = set_of(vec![case(
            "wrong",
            "value=%d",
            vec![ArgSpec::Int(42)],
            32,
            "value=43",
            8,
            vec![],
        )]);
        let outcomes = Verifier::new("smoke").run(&set);
        assert!(!outcomes[0].passed);
        let diff = outcomes[0].diff.as_deref().expect("diff present");
        assert!(diff.contains("expected"));
        assert!(diff.contains("actual"));
    }

    #[test]
    fn verifier_flags_length_divergence_even_when_content_matches() {
        // A capacity-2 destination holds one byte of "42"; the logical
        // length stays 2. A recording claiming logical 1 must fail.
        let set = set_of(vec![case(
            "short",
            "%d",
            vec![ArgSpec::Int(42)],
            2,
            "4",
            1,
            vec![],
        )]);
        let outcomes = Verifier::new("smoke").run(&set);
        assert!(!outcomes[0].passed);
        assert_eq!(outcomes[0].actual, "4");
        assert_eq!(outcomes[0].actual_len, 2);
        let diff = outcomes[0].diff.as_deref().expect("note present");
        assert!(diff.contains("logical length mismatch"));
    }

    #[test]
    fn verifier_checks_count_slot_values() {
        let good = set_of(vec![case(
            "count",
            "abc%n",
            vec![ArgSpec::CountSlot],
            16,
            "abc",
            3,
            vec![3],
        )]);
        assert!(Verifier::new("smoke").run(&good)[0].passed);

        let tampered = set_of(vec![case(
            "count",
            "abc%n",
            vec![ArgSpec::CountSlot],
            16,
            "abc",
            3,
            vec![4],
        )]);
        let outcomes = Verifier::new("smoke").run(&tampered);
        assert!(!outcomes[0].passed);
        let diff = outcomes[0].diff.as_deref().expect("note present");
        assert!(diff.contains("count slots mismatch"));
    }

    #[test]
    fn summary_counts_and_failure_iteration() {
        let set = set_of(vec![
            case("ok", "%d", vec![ArgSpec::Int(1)], 16, "1", 1, vec![]),
            case("bad", "%d", vec![ArgSpec::Int(2)], 16, "3", 1, vec![]),
        ]);
        let summary = VerificationSummary::from_outcomes(Verifier::new("smoke").run(&set));
        assert_eq!(summary.total, 2);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert!(!summary.all_passed());
        let failed: Vec<&str> = summary.failures().map(|o| o.case_id.as_str()).collect();
        assert_eq!(failed, vec!["bad"]);
    }
}
