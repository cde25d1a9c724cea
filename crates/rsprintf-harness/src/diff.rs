//! Divergence rendering for verification failures and oracle comparison.

use serde::Serialize;

use crate::fixtures::FixtureSet;

/// Render an expected-vs-actual pair with a marker under the first
/// diverging byte. Control bytes are escaped so terminal output stays
/// one line per side.
pub fn render_diff(expected: &str, actual: &str) -> String {
    use std::fmt::Write as _;

    let col = first_divergence(expected.as_bytes(), actual.as_bytes());
    let marker_at = escape(&actual.as_bytes()[..col.min(actual.len())]).len();

    let mut out = String::new();
    writeln!(out, "expected: `{}`", escape(expected.as_bytes())).ok();
    writeln!(out, "  actual: `{}`", escape(actual.as_bytes())).ok();
    write!(out, "           {}^ first divergence at byte {col}", " ".repeat(marker_at)).ok();
    out
}

/// Byte offset where two renderings first differ. When one is a prefix
/// of the other, the offset is the shorter length.
fn first_divergence(expected: &[u8], actual: &[u8]) -> usize {
    expected
        .iter()
        .zip(actual.iter())
        .position(|(e, a)| e != a)
        .unwrap_or_else(|| expected.len().min(actual.len()))
}

fn escape(text: &[u8]) -> String {
    let mut out = String::with_capacity(text.len());
    for &byte in text {
        match byte {
            b'\n' => out.push_str("\\n"),
            b'\t' => out.push_str("\\t"),
            b'\\' => out.push_str("\\\\"),
            0x20..=0x7e => out.push(byte as char),
            other => out.push_str(&format!("\\x{other:02x}")),
        }
    }
    out
}

/// One case-level difference between two captured fixture sets.
#[derive(Debug, Clone, Serialize)]
pub struct SetDivergence {
    pub case_id: String,
    pub detail: String,
}

/// Compare two fixture sets case-by-case, pairing on case id.
///
/// Intended for engine-vs-host capture review: the result lists cases
/// with differing recordings plus cases present on only one side, in
/// left-set order with right-only cases appended.
pub fn diff_sets(left: &FixtureSet, right: &FixtureSet) -> Vec<SetDivergence> {
    let mut divergences = Vec::new();

    for left_case in &left.cases {
        let Some(right_case) = right.cases.iter().find(|c| c.id == left_case.id) else {
            divergences.push(SetDivergence {
                case_id: left_case.id.clone(),
                detail: format!("only captured by `{}`", left.oracle),
            });
            continue;
        };
        let mut parts = Vec::new();
        if left_case.expected != right_case.expected {
            parts.push(render_diff(&left_case.expected, &right_case.expected));
        }
        if left_case.expected_len != right_case.expected_len {
            parts.push(format!(
                "logical length: {} vs {}",
                left_case.expected_len, right_case.expected_len
            ));
        }
        if left_case.expected_slots != right_case.expected_slots {
            parts.push(format!(
                "count slots: {:?} vs {:?}",
                left_case.expected_slots, right_case.expected_slots
            ));
        }
        if !parts.is_empty() {
            divergences.push(SetDivergence { case_id: left_case.id.clone(), detail: parts.join("\n") });
        }
    }

    for right_case in &right.cases {
        if !left.cases.iter().any(|c| c.id == right_case.id) {
            divergences.push(SetDivergence {
                case_id: right_case.id.clone(),
                detail: format!("only captured by `{}`", right.oracle),
            });
        }
    }

    divergences
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{ArgSpec, FixtureCase, FixtureSet};

    fn case(id: &str, expected: &str, expected_len: usize) -> FixtureCase {
        FixtureCase {
            id: id.into(),
            template: "%d".into(),
            args: vec![ArgSpec::Int(1)],
            capacity: 32,
            expected: expected.into(),
            expected_len,
            expected_slots: vec![],
        }
    }

    fn set(oracle: &str, cases: Vec<FixtureCase>) -> FixtureSet {
        FixtureSet::new("format/test", oracle, "t", cases).expect("set builds")
    }

    #[test]
    fn render_diff_marks_first_divergence() {
        let diff = render_diff("value=42", "value=43");
        assert!(diff.contains("expected: `value=42`"));
        assert!(diff.contains("  actual: `value=43`"));
        assert!(diff.contains("first divergence at byte 7"));
    }

    #[test]
    fn render_diff_escapes_control_bytes() {
        let diff = render_diff("a\nb", "a\tb");
        assert!(diff.contains("`a\\nb`"));
        assert!(diff.contains("`a\\tb`"));
        assert!(diff.contains("at byte 1"));
    }

    #[test]
    fn render_diff_prefix_divergence_points_past_shorter_side() {
        let diff = render_diff("abc", "abcdef");
        assert!(diff.contains("at byte 3"));
    }

    #[test]
    fn diff_sets_empty_for_identical_sets() {
        let left = set("engine", vec![case("a", "1", 1), case("b", "2", 1)]);
        let right = set("host", vec![case("a", "1", 1), case("b", "2", 1)]);
        assert!(diff_sets(&left, &right).is_empty());
    }

    #[test]
    fn diff_sets_reports_content_and_membership() {
        let left = set(
            "engine",
            vec![case("same", "1", 1), case("differs", "0x", 2), case("engine-only", "x", 1)],
        );
        let right = set(
            "host",
            vec![case("same", "1", 1), case("differs", "(nil)", 5), case("host-only", "y", 1)],
        );

        let divergences = diff_sets(&left, &right);
        let ids: Vec<&str> = divergences.iter().map(|d| d.case_id.as_str()).collect();
        assert_eq!(ids, vec!["differs", "engine-only", "host-only"]);

        let differs = &divergences[0];
        assert!(differs.detail.contains("`0x`"));
        assert!(differs.detail.contains("`(nil)`"));
        assert!(differs.detail.contains("logical length: 2 vs 5"));
        assert!(divergences[1].detail.contains("only captured by `engine`"));
        assert!(divergences[2].detail.contains("only captured by `host`"));
    }
}
