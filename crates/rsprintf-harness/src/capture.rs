//! Built-in case deck and fixture capture.
//!
//! The deck is the classic demonstration sequence plus the contract
//! edge cases, expressed as serializable fixture inputs. Capture renders
//! every deck case through an oracle and records what it observed:
//!
//! - the `engine` oracle is this workspace's own formatter, pinning its
//!   behavior (including its deliberate divergences from C libraries);
//! - the `host` oracle is the C library `snprintf` of the machine the
//!   capture runs on, for side-by-side divergence review via `diff`.
//!
//! The host bridge refuses any case whose template/argument pairing is
//! not clean under [`rsprintf_core::check_template`]: degraded renders
//! are an engine feature, not something to feed a variadic C call.

use std::str::FromStr;
use std::time::Instant;

use crate::error::HarnessError;
use crate::fixtures::{render_case, ArgSpec, FixtureCase, FixtureSet, RenderedCase};
use crate::structured_log::{LogEmitter, LogEntry, LogLevel, Outcome, StreamKind};

/// Deck family name recorded in captured fixture sets.
pub const DECK_FAMILY: &str = "format/builtin-deck";

/// Destination capacity used by deck cases that are not about truncation.
pub const DEFAULT_CAPACITY: usize = 256;

/// Which renderer produces fixture expectations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Oracle {
    Engine,
    Host,
}

impl Oracle {
    pub fn name(self) -> &'static str {
        match self {
            Oracle::Engine => "engine",
            Oracle::Host => "host",
        }
    }
}

impl FromStr for Oracle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "engine" => Ok(Oracle::Engine),
            "host" => Ok(Oracle::Host),
            other => Err(format!("unknown oracle `{other}` (expected `engine` or `host`)")),
        }
    }
}

/// One deck entry: the inputs of a fixture case, before any oracle has
/// rendered an expectation for it.
#[derive(Debug, Clone)]
pub struct DeckCase {
    pub id: String,
    pub template: String,
    pub args: Vec<ArgSpec>,
    pub capacity: usize,
}

impl DeckCase {
    fn new(id: &str, template: &str, args: Vec<ArgSpec>) -> Self {
        Self {
            id: id.into(),
            template: template.into(),
            args,
            capacity: DEFAULT_CAPACITY,
        }
    }

    fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

/// Reuse a previously captured set as a deck, discarding its recorded
/// expectations. Lets one oracle re-render the exact inputs of another.
pub fn deck_from_fixture(set: &FixtureSet) -> Vec<DeckCase> {
    set.cases
        .iter()
        .map(|case| DeckCase {
            id: case.id.clone(),
            template: case.template.clone(),
            args: case.args.clone(),
            capacity: case.capacity,
        })
        .collect()
}

/// The full built-in deck, in rendering order.
pub fn builtin_deck() -> Vec<DeckCase> {
    use ArgSpec::{Char, CountSlot, Int, Pointer, Str, Uint};
    let f = ArgSpec::float;

    vec![
        DeckCase::new("int-basic", "Integer: %d\n", vec![Int(42)]),
        DeckCase::new("int-negative", "Negative Integer: %d\n", vec![Int(-42)]),
        DeckCase::new("unsigned", "Unsigned: %u\n", vec![Uint(3_000_000_000)]),
        DeckCase::new("hex-lower", "Hex lower: %x\n", vec![Uint(255)]),
        DeckCase::new("hex-upper", "Hex upper: %X\n", vec![Uint(255)]),
        DeckCase::new("octal", "Octal: %o\n", vec![Uint(255)]),
        DeckCase::new("char-basic", "Char: %c\n", vec![Char(b'A')]),
        DeckCase::new("string-basic", "String: %s\n", vec![Str("Hello, World!".into())]),
        DeckCase::new("string-absent", "Null string: %s\n", vec![]),
        DeckCase::new("float-default", "Float default: %f\n", vec![f(3.14159)]),
        DeckCase::new("float-precision", "Float with precision: %.2f\n", vec![f(3.14159)]),
        DeckCase::new("sci-lower", "Scientific notation: %e\n", vec![f(3.14159)]),
        DeckCase::new("sci-upper", "Scientific notation upper: %E\n", vec![f(3.14159)]),
        DeckCase::new("auto-format", "Auto format: %g\n", vec![f(3.14159)]),
        DeckCase::new("auto-large", "Auto format large: %g\n", vec![f(3_141_590_000.0)]),
        DeckCase::new("auto-small", "Auto format small: %.2g\n", vec![f(0.000123)]),
        DeckCase::new("hexfloat-lower", "Hex float lower: %a\n", vec![f(3.14159)]),
        DeckCase::new("hexfloat-upper", "Hex float upper: %A\n", vec![f(3.14159)]),
        DeckCase::new("inf", "Infinity: %f\n", vec![f(f64::INFINITY)]),
        DeckCase::new("neg-inf", "Negative Infinity: %f\n", vec![f(f64::NEG_INFINITY)]),
        DeckCase::new("nan", "NaN: %f\n", vec![f(f64::NAN)]),
        DeckCase::new("inf-sci", "Infinity (scientific): %e\n", vec![f(f64::INFINITY)]),
        DeckCase::new("nan-hex", "NaN (hex): %a\n", vec![f(f64::NAN)]),
        DeckCase::new("width-pad", "Width padded int: %5d\n", vec![Int(42)]),
        DeckCase::new("left-justify", "Left justified: %-5d!\n", vec![Int(42)]),
        DeckCase::new("zero-pad", "Zero padded: %05d\n", vec![Int(42)]),
        DeckCase::new("plus-sign", "Plus sign: %+d\n", vec![Int(42)]),
        DeckCase::new("space-sign", "Space sign: % d\n", vec![Int(42)]),
        DeckCase::new("hash-hex", "Hex with # flag: %#x\n", vec![Uint(255)]),
        DeckCase::new("hash-octal", "Octal with # flag: %#o\n", vec![Uint(255)]),
        DeckCase::new("hash-float", "Float with # flag: %#f\n", vec![f(1.0)]),
        DeckCase::new("hash-sci", "Scientific with # flag: %#e\n", vec![f(1.0)]),
        DeckCase::new("precision-int", "Precision int: %.5d\n", vec![Int(42)]),
        DeckCase::new("precision-zero-zero", "Zero with precision 0: %.0d\n", vec![Int(0)]),
        DeckCase::new("width-and-precision", "Width and precision: %8.5d\n", vec![Int(42)]),
        DeckCase::new("percent-escape", "Percent sign: %%\n", vec![]),
        DeckCase::new("pointer", "Pointer: %p\n", vec![Pointer(0x1234_5678)]),
        DeckCase::new("long", "Long: %ld\n", vec![Int(2_147_483_648)]),
        DeckCase::new("long-long", "Long long: %lld\n", vec![Int(9_223_372_036_854_775_807)]),
        DeckCase::new("short", "Short: %hd\n", vec![Int(32767)]),
        DeckCase::new(
            "count-directive",
            "Characters so far: %n%d\n",
            vec![CountSlot, Int(0)],
        ),
        DeckCase::new(
            "truncated-into-ten",
            "This is a long string that will be truncated",
            vec![],
        )
        .with_capacity(10),
        DeckCase::new("negative-star-width", "Negative width: %*d\n", vec![Int(-5), Int(42)]),
        DeckCase::new("negative-precision", "Negative precision: %.5f\n", vec![f(3.14159)]),
        DeckCase::new("large-int-narrowed", "Large integer: %d\n", vec![Int(i64::MAX)]),
        DeckCase::new("large-float", "Large float: %f\n", vec![f(1e308)]),
        DeckCase::new(
            "star-width-and-precision",
            "Asterisk width/precision: %*.*lld\n",
            vec![Int(10), Int(5), Int(123)],
        ),
        DeckCase::new("size-t", "Size_t: %zu\n", vec![Uint(4_294_967_295)]),
        DeckCase::new("pointer-null", "Null pointer: %p\n", vec![Pointer(0)]),
        DeckCase::new("empty-string", "Empty string: %s\n", vec![Str(String::new())]),
        DeckCase::new("string-precision", "Truncated string: %.3s\n", vec![Str("abcdef".into())]),
        DeckCase::new("extreme-width", "Extreme width: %100d\n", vec![Int(42)]),
        DeckCase::new("combined-flags", "Combined flags: %+0#10.5x\n", vec![Uint(255)]),
        // Contract edges beyond the demonstration sequence.
        DeckCase::new("fraction-only", "%f", vec![f(0.5)]),
        DeckCase::new("sci-zero", "%e", vec![f(0.0)]),
        DeckCase::new("hexfloat-zero", "%a", vec![f(0.0)]),
        DeckCase::new("unknown-letter", "%q", vec![]),
        DeckCase::new("incomplete-directive", "tail%", vec![]),
        DeckCase::new("char-width", "[%5c]", vec![Char(b'Z')]),
        DeckCase::new("string-width", "[%10s]", vec![Str("hi".into())]),
        DeckCase::new("star-precision-float", "%.*f", vec![Int(2), f(3.14159)]),
    ]
}

/// Result of capturing the deck through one oracle.
#[derive(Debug)]
pub struct CaptureOutcome {
    pub set: FixtureSet,
    /// Deck case ids the oracle could not render (host bridge refusals).
    pub skipped: Vec<String>,
}

/// Render the built-in deck through `oracle` and assemble a fixture set.
pub fn capture_deck(
    oracle: Oracle,
    captured_at: &str,
    emitter: Option<&mut LogEmitter>,
) -> Result<CaptureOutcome, HarnessError> {
    capture_cases(oracle, captured_at, DECK_FAMILY, builtin_deck(), emitter)
}

/// Render an arbitrary deck through `oracle` and assemble a fixture set.
pub fn capture_cases(
    oracle: Oracle,
    captured_at: &str,
    family: &str,
    deck: Vec<DeckCase>,
    mut emitter: Option<&mut LogEmitter>,
) -> Result<CaptureOutcome, HarnessError> {
    let mut cases = Vec::new();
    let mut skipped = Vec::new();

    for deck_case in deck {
        let started = Instant::now();
        let rendered = match oracle {
            Oracle::Engine => Some(render_case(
                deck_case.template.as_bytes(),
                &deck_case.args,
                deck_case.capacity,
            )),
            Oracle::Host => host::render(&deck_case.template, &deck_case.args, deck_case.capacity),
        };
        let latency_ns = started.elapsed().as_nanos() as u64;

        match rendered {
            Some(RenderedCase { content, logical, slots }) => {
                if let Some(em) = emitter.as_deref_mut() {
                    em.emit(
                        LogEntry::new("", LogLevel::Info, "case_captured")
                            .with_stream(StreamKind::Capture)
                            .with_oracle(oracle.name())
                            .with_case(&deck_case.id, &deck_case.template)
                            .with_outcome(Outcome::Pass)
                            .with_latency_ns(latency_ns),
                    )?;
                }
                cases.push(FixtureCase {
                    id: deck_case.id,
                    template: deck_case.template,
                    args: deck_case.args,
                    capacity: deck_case.capacity,
                    expected: String::from_utf8_lossy(&content).into_owned(),
                    expected_len: logical,
                    expected_slots: slots,
                });
            }
            None => {
                if let Some(em) = emitter.as_deref_mut() {
                    em.emit(
                        LogEntry::new("", LogLevel::Warn, "case_skipped_by_host_bridge")
                            .with_stream(StreamKind::Capture)
                            .with_oracle(oracle.name())
                            .with_case(&deck_case.id, &deck_case.template)
                            .with_outcome(Outcome::Skip),
                    )?;
                }
                skipped.push(deck_case.id);
            }
        }
    }

    let set = FixtureSet::new(family, oracle.name(), captured_at, cases)?;
    Ok(CaptureOutcome { set, skipped })
}

// ---------------------------------------------------------------------------
// Host oracle bridge
// ---------------------------------------------------------------------------

#[allow(unsafe_code)]
mod host {
    use std::ffi::CString;

    use libc::{c_char, c_double, c_int, c_longlong, c_void, size_t};

    use rsprintf_core::{check_template, FormatArg};

    use crate::fixtures::{ArgSpec, RenderedCase};

    /// One value in the shape the variadic C call needs.
    enum HostArg {
        Int(c_longlong),
        Float(c_double),
        Text(CString),
        Ptr(usize),
    }

    fn lower(arg: &ArgSpec) -> Option<HostArg> {
        match arg {
            ArgSpec::Int(v) => Some(HostArg::Int(*v)),
            ArgSpec::Uint(v) => Some(HostArg::Int(*v as i64)),
            ArgSpec::Char(c) => Some(HostArg::Int(i64::from(*c))),
            ArgSpec::Float(text) => Some(HostArg::Float(text.parse().unwrap_or(0.0))),
            ArgSpec::Str(s) => CString::new(s.as_bytes()).ok().map(HostArg::Text),
            ArgSpec::Pointer(p) => Some(HostArg::Ptr(*p as usize)),
            ArgSpec::CountSlot => None,
        }
    }

    /// Render one case through the host C library's `snprintf`.
    ///
    /// Returns `None` when the bridge cannot represent the case: a
    /// template/argument pairing that is not clean (missing or
    /// mismatched arguments, count slots, incomplete directives), more
    /// than three arguments, or a template with interior NUL.
    pub fn render(template: &str, args: &[ArgSpec], capacity: usize) -> Option<RenderedCase> {
        if !is_clean(template, args) {
            return None;
        }
        let fmt = CString::new(template).ok()?;
        let lowered: Vec<HostArg> = args.iter().map(lower).collect::<Option<Vec<_>>>()?;

        let mut buf = vec![0u8; capacity.max(1)];
        let out = buf.as_mut_ptr().cast::<c_char>();
        let cap = capacity as size_t;

        let written = match lowered.as_slice() {
            [] => call0(out, cap, &fmt),
            [a] => call1(out, cap, &fmt, a),
            [a, b] => call2(out, cap, &fmt, a, b),
            [a, b, c] => call3(out, cap, &fmt, a, b, c),
            _ => return None,
        }?;

        if written < 0 {
            return None;
        }
        let logical = written as usize;
        let kept = if capacity == 0 { 0 } else { logical.min(capacity - 1) };
        buf.truncate(kept);
        Some(RenderedCase { content: buf, logical, slots: Vec::new() })
    }

    /// A case is host-safe only when the engine's own checker finds no
    /// issue: every directive has an argument of the right kind, no
    /// count slots, no incomplete directives.
    fn is_clean(template: &str, args: &[ArgSpec]) -> bool {
        let format_args: Option<Vec<FormatArg<'_>>> = args
            .iter()
            .map(|arg| match arg {
                ArgSpec::Int(v) => Some(FormatArg::Int(*v)),
                ArgSpec::Uint(v) => Some(FormatArg::Uint(*v)),
                ArgSpec::Float(text) => Some(FormatArg::Float(text.parse().unwrap_or(0.0))),
                ArgSpec::Str(s) => Some(FormatArg::Str(s.as_bytes())),
                ArgSpec::Char(c) => Some(FormatArg::Char(*c)),
                ArgSpec::Pointer(p) => Some(FormatArg::Pointer(*p as usize)),
                // Count slots never cross the bridge.
                ArgSpec::CountSlot => None,
            })
            .collect();
        match format_args {
            Some(fa) => check_template(template.as_bytes(), &fa).is_empty(),
            None => false,
        }
    }

    // Each call* helper is one fixed-arity variadic call. SAFETY for all
    // of them: `is_clean` guarantees the template's conversions match the
    // lowered argument kinds positionally, `out` points at a buffer of at
    // least `cap` bytes that outlives the call, and `fmt`/`Text` CStrings
    // are NUL-terminated and alive across the call.

    fn call0(out: *mut c_char, cap: size_t, fmt: &CString) -> Option<c_int> {
        let written = unsafe { libc::snprintf(out, cap, fmt.as_ptr()) };
        Some(written)
    }

    fn call1(out: *mut c_char, cap: size_t, fmt: &CString, a: &HostArg) -> Option<c_int> {
        let f = fmt.as_ptr();
        let written = unsafe {
            match a {
                HostArg::Int(v) => libc::snprintf(out, cap, f, *v),
                HostArg::Float(v) => libc::snprintf(out, cap, f, *v),
                HostArg::Text(s) => libc::snprintf(out, cap, f, s.as_ptr()),
                HostArg::Ptr(p) => libc::snprintf(out, cap, f, *p as *const c_void),
            }
        };
        Some(written)
    }

    fn call2(
        out: *mut c_char,
        cap: size_t,
        fmt: &CString,
        a: &HostArg,
        b: &HostArg,
    ) -> Option<c_int> {
        let f = fmt.as_ptr();
        let written = unsafe {
            match (a, b) {
                (HostArg::Int(x), HostArg::Int(y)) => libc::snprintf(out, cap, f, *x, *y),
                (HostArg::Int(x), HostArg::Float(y)) => libc::snprintf(out, cap, f, *x, *y),
                (HostArg::Float(x), HostArg::Float(y)) => libc::snprintf(out, cap, f, *x, *y),
                (HostArg::Float(x), HostArg::Int(y)) => libc::snprintf(out, cap, f, *x, *y),
                (HostArg::Text(x), HostArg::Int(y)) => libc::snprintf(out, cap, f, x.as_ptr(), *y),
                (HostArg::Int(x), HostArg::Text(y)) => libc::snprintf(out, cap, f, *x, y.as_ptr()),
                (HostArg::Text(x), HostArg::Text(y)) => {
                    libc::snprintf(out, cap, f, x.as_ptr(), y.as_ptr())
                }
                _ => return None,
            }
        };
        Some(written)
    }

    fn call3(
        out: *mut c_char,
        cap: size_t,
        fmt: &CString,
        a: &HostArg,
        b: &HostArg,
        c: &HostArg,
    ) -> Option<c_int> {
        let f = fmt.as_ptr();
        let written = unsafe {
            match (a, b, c) {
                (HostArg::Int(x), HostArg::Int(y), HostArg::Int(z)) => {
                    libc::snprintf(out, cap, f, *x, *y, *z)
                }
                (HostArg::Int(x), HostArg::Int(y), HostArg::Float(z)) => {
                    libc::snprintf(out, cap, f, *x, *y, *z)
                }
                _ => return None,
            }
        };
        Some(written)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn deck_ids_are_unique() {
        let deck = builtin_deck();
        let ids: HashSet<&str> = deck.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), deck.len());
    }

    #[test]
    fn recapturing_a_fixture_deck_reproduces_the_set() {
        let first = capture_deck(Oracle::Engine, "t", None).expect("capture");
        let deck = deck_from_fixture(&first.set);
        let second = capture_cases(Oracle::Engine, "t", &first.set.family, deck, None)
            .expect("recapture");
        assert_eq!(first.set.checksum, second.set.checksum);
    }

    #[test]
    fn engine_capture_renders_every_case() {
        let outcome = capture_deck(Oracle::Engine, "2026-08-23T00:00:00Z", None).expect("capture");
        assert!(outcome.skipped.is_empty());
        assert_eq!(outcome.set.cases.len(), builtin_deck().len());
        assert_eq!(outcome.set.oracle, "engine");
        assert_eq!(outcome.set.family, DECK_FAMILY);
    }

    #[test]
    fn engine_capture_is_deterministic() {
        let first = capture_deck(Oracle::Engine, "t", None).expect("capture");
        let second = capture_deck(Oracle::Engine, "t", None).expect("capture");
        assert_eq!(first.set.checksum, second.set.checksum);
    }

    #[test]
    fn engine_capture_pins_known_expectations() {
        let outcome = capture_deck(Oracle::Engine, "t", None).expect("capture");
        let by_id = |id: &str| {
            outcome
                .set
                .cases
                .iter()
                .find(|c| c.id == id)
                .unwrap_or_else(|| panic!("deck case {id} missing"))
        };

        assert_eq!(by_id("int-basic").expected, "Integer: 42\n");
        assert_eq!(by_id("fraction-only").expected, ".500000");
        assert_eq!(by_id("sci-zero").expected, "0e+00");
        assert_eq!(by_id("hexfloat-zero").expected, "0x0.0p+0");
        assert_eq!(by_id("string-absent").expected, "Null string: (null)\n");
        assert_eq!(by_id("large-int-narrowed").expected, "Large integer: -1\n");
        assert_eq!(by_id("combined-flags").expected, "Combined flags: 0000x000ff\n");

        let truncated = by_id("truncated-into-ten");
        assert_eq!(truncated.expected, "This is a");
        assert_eq!(truncated.expected_len, 44);

        let count = by_id("count-directive");
        assert_eq!(count.expected_slots, vec![19]);
    }

    #[test]
    fn host_capture_skips_unclean_cases() {
        let outcome = capture_deck(Oracle::Host, "t", None).expect("capture");
        // The degraded-render cases never cross the bridge.
        assert!(outcome.skipped.iter().any(|id| id == "count-directive"));
        assert!(outcome.skipped.iter().any(|id| id == "string-absent"));
        assert!(outcome.skipped.iter().any(|id| id == "incomplete-directive"));
        assert_eq!(outcome.set.oracle, "host");
    }

    #[test]
    fn host_renders_stable_basics() {
        let outcome = capture_deck(Oracle::Host, "t", None).expect("capture");
        let basic = outcome
            .set
            .cases
            .iter()
            .find(|c| c.id == "int-basic")
            .expect("host renders int-basic");
        assert_eq!(basic.expected, "Integer: 42\n");
        assert_eq!(basic.expected_len, 12);
    }
}
