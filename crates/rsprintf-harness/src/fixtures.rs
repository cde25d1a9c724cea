//! Fixture models: serializable formatting cases and their captured
//! expectations.
//!
//! A fixture set records, for one oracle, what a deck of formatting
//! cases rendered: the content that landed in the destination, the
//! logical length the call reported, and any count-directive slot
//! values. Sets carry a SHA-256 checksum over their cases so a fixture
//! file edited by hand (or corrupted in transit) is rejected instead of
//! silently verified against.

use std::cell::Cell;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::Digest;

use rsprintf_core::{snprintf, FormatArg};

use crate::error::HarnessError;

/// Schema tag written into every fixture set this harness produces.
pub const FIXTURE_SCHEMA_VERSION: &str = "v1";

/// One serializable argument for a fixture case.
///
/// Floats are carried as strings (`"3.14159"`, `"nan"`, `"-inf"`) so
/// non-finite values survive the JSON round trip; they are parsed back
/// with `str::parse::<f64>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ArgSpec {
    Int(i64),
    Uint(u64),
    Float(String),
    Str(String),
    Char(u8),
    Pointer(u64),
    /// A count-directive (`%n`) destination; the observed value lands in
    /// [`RenderedCase::slots`].
    CountSlot,
}

impl ArgSpec {
    /// Shorthand for building a float argument from a value.
    pub fn float(value: f64) -> Self {
        ArgSpec::Float(format!("{value}"))
    }
}

fn default_capacity() -> usize {
    crate::capture::DEFAULT_CAPACITY
}

/// A single fixture case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case identifier, unique within a set.
    pub id: String,
    /// Template handed to the engine.
    pub template: String,
    /// Arguments, in consumption order.
    pub args: Vec<ArgSpec>,
    /// Destination capacity the case formats into.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Content bytes the oracle left in the destination.
    pub expected: String,
    /// Logical (untruncated) length the oracle reported.
    pub expected_len: usize,
    /// Values observed in count-directive slots, in argument order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expected_slots: Vec<usize>,
}

/// A captured collection of fixture cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    /// Deck family name.
    pub family: String,
    /// Oracle that produced the expectations (`engine` or `host`).
    pub oracle: String,
    /// UTC timestamp of capture.
    pub captured_at: String,
    /// SHA-256 (lowercase hex) over the JSON serialization of `cases`.
    pub checksum: String,
    /// Individual cases.
    pub cases: Vec<FixtureCase>,
}

impl FixtureSet {
    /// Assemble a set, computing the case checksum.
    pub fn new(
        family: impl Into<String>,
        oracle: impl Into<String>,
        captured_at: impl Into<String>,
        cases: Vec<FixtureCase>,
    ) -> Result<Self, HarnessError> {
        let checksum = case_checksum(&cases)?;
        Ok(Self {
            version: FIXTURE_SCHEMA_VERSION.to_string(),
            family: family.into(),
            oracle: oracle.into(),
            captured_at: captured_at.into(),
            checksum,
            cases,
        })
    }

    /// Parse a set from JSON and validate schema version and checksum.
    pub fn from_json(json: &str) -> Result<Self, HarnessError> {
        let set: Self = serde_json::from_str(json)?;
        if set.version != FIXTURE_SCHEMA_VERSION {
            return Err(HarnessError::UnsupportedSchema {
                found: set.version,
                supported: FIXTURE_SCHEMA_VERSION.to_string(),
            });
        }
        let computed = case_checksum(&set.cases)?;
        if computed != set.checksum {
            return Err(HarnessError::ChecksumMismatch {
                recorded: set.checksum,
                computed,
            });
        }
        Ok(set)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, HarnessError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate a set from a file.
    pub fn from_file(path: &Path) -> Result<Self, HarnessError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Write the set as pretty JSON, with a trailing newline.
    pub fn write_file(&self, path: &Path) -> Result<(), HarnessError> {
        let mut json = self.to_json()?;
        json.push('\n');
        std::fs::write(path, json)?;
        Ok(())
    }
}

fn case_checksum(cases: &[FixtureCase]) -> Result<String, HarnessError> {
    let canonical = serde_json::to_string(cases)?;
    Ok(hex_lower(&sha2::Sha256::digest(canonical.as_bytes())))
}

fn hex_lower(bytes: &[u8]) -> String {
    use std::fmt::Write;
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        write!(&mut out, "{b:02x}").expect("writing to String should not fail");
    }
    out
}

/// What one engine rendering of a case observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCase {
    /// Bytes that landed in the destination, terminator excluded.
    pub content: Vec<u8>,
    /// Logical length the call returned.
    pub logical: usize,
    /// Final count-slot values, in argument order.
    pub slots: Vec<usize>,
}

/// Run one case through the engine.
pub fn render_case(template: &[u8], args: &[ArgSpec], capacity: usize) -> RenderedCase {
    let slot_cells: Vec<Cell<usize>> = args
        .iter()
        .filter(|a| matches!(a, ArgSpec::CountSlot))
        .map(|_| Cell::new(0))
        .collect();

    let mut next_slot = 0;
    let format_args: Vec<FormatArg<'_>> = args
        .iter()
        .map(|arg| match arg {
            ArgSpec::Int(v) => FormatArg::Int(*v),
            ArgSpec::Uint(v) => FormatArg::Uint(*v),
            ArgSpec::Float(text) => FormatArg::Float(text.parse().unwrap_or(0.0)),
            ArgSpec::Str(s) => FormatArg::Str(s.as_bytes()),
            ArgSpec::Char(c) => FormatArg::Char(*c),
            ArgSpec::Pointer(p) => FormatArg::Pointer(*p as usize),
            ArgSpec::CountSlot => {
                let cell = &slot_cells[next_slot];
                next_slot += 1;
                FormatArg::OutSlot(cell)
            }
        })
        .collect();

    let mut dest = vec![0u8; capacity];
    let logical = snprintf(&mut dest, template, &format_args);
    let content_len = if capacity <= 1 { 0 } else { logical.min(capacity - 1) };
    RenderedCase {
        content: dest[..content_len].to_vec(),
        logical,
        slots: slot_cells.iter().map(Cell::get).collect(),
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
