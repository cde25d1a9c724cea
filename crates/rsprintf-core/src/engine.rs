//! Template-driven formatting driver.
//!
//! [`snprintf`] walks the template byte by byte: literal bytes copy
//! straight through, and each `%` directive is parsed, resolved against
//! the argument list, rendered, and field-padded. All output goes through
//! the bounded sink, so the return value is always the length the result
//! would have had with unlimited room, regardless of the destination
//! capacity.
//!
//! Reference: ISO C11 7.21.6.5, POSIX.1-2024 snprintf.
//!
//! Invariants:
//! - Arguments are consumed strictly left to right: one slot per `*`,
//!   then one per value-bearing conversion, even when the slot's kind
//!   does not match.
//! - A directive never fails the call. Mismatched or missing arguments
//!   render a neutral fallback; unknown conversion letters echo as a
//!   two-byte literal; a template that ends mid-directive emits the
//!   partial directive text as-is.
//! - Field padding applies to every directive, including `%%`, `%n`, and
//!   unknown-letter passthrough.

use crate::args::{ArgCursor, FormatArg};
use crate::convert;
use crate::parse::parse_spec;
use crate::scratch::Scratch;
use crate::sink::BoundedSink;
use crate::spec::{FormatSpec, Precision, Width};

/// Format `template` with `args` into `dest`, always leaving `dest`
/// NUL-terminated when it has any capacity at all, and return the
/// logical (untruncated) length of the formatted result.
///
/// A zero-capacity destination is left untouched and the call returns 0.
/// A one-byte destination receives only the terminator.
pub fn snprintf(dest: &mut [u8], template: &[u8], args: &[FormatArg<'_>]) -> usize {
    if dest.is_empty() {
        return 0;
    }
    if dest.len() == 1 {
        dest[0] = 0;
        return 0;
    }

    let mut sink = BoundedSink::new(dest);
    let mut cursor = ArgCursor::new(args);
    let mut pos = 0;
    while pos < template.len() {
        let byte = template[pos];
        if byte != b'%' {
            sink.push(byte);
            pos += 1;
            continue;
        }
        match parse_spec(&template[pos..]) {
            Some((spec, consumed)) => {
                pos += consumed;
                render_directive(&spec, &mut cursor, &mut sink);
            }
            None => {
                // Template ends inside a directive: the tail renders
                // literally.
                sink.extend_from_slice(&template[pos..]);
                break;
            }
        }
    }
    sink.finish()
}

fn render_directive(spec: &FormatSpec, cursor: &mut ArgCursor<'_>, sink: &mut BoundedSink<'_>) {
    // Width and precision each consume one argument when given as `*`,
    // in that order, before the conversion's own argument.
    let mut left_justify = spec.flags.left_justify;
    let width = match spec.width {
        Width::None => 0,
        Width::Fixed(w) => w,
        Width::FromArg => {
            let raw = cursor.take_signed();
            if raw < 0 {
                left_justify = true;
            }
            raw.unsigned_abs() as usize
        }
    };
    let precision = match spec.precision {
        Precision::None => None,
        Precision::Fixed(p) => Some(p),
        Precision::FromArg => {
            let raw = cursor.take_signed();
            if raw < 0 { None } else { Some(raw as usize) }
        }
    };

    let zero_pad = spec.flags.zero_pad && !left_justify;
    let pad_byte = if zero_pad && spec.conversion != b's' && spec.conversion != b'c' {
        b'0'
    } else {
        b' '
    };

    // `s` streams straight from the argument and `n` has no content;
    // everything else renders into the scratch buffer first.
    match spec.conversion {
        b's' => {
            let text = cursor.take_str().unwrap_or(b"(null)");
            let len = match precision {
                Some(p) if p < text.len() => p,
                _ => text.len(),
            };
            emit_padded(sink, &text[..len], width, left_justify, pad_byte);
            return;
        }
        b'n' => {
            if let Some(slot) = cursor.take_out_slot() {
                slot.set(sink.logical_len());
            }
            emit_padded(sink, &[], width, left_justify, pad_byte);
            return;
        }
        _ => {}
    }

    let mut content = Scratch::new();
    match spec.conversion {
        b'd' | b'i' => {
            let value = spec.length.narrow_signed(cursor.take_signed());
            let negative = value < 0;
            if !negative {
                if spec.flags.force_sign {
                    content.push(b'+');
                } else if spec.flags.space_sign {
                    content.push(b' ');
                }
            }
            convert::integer(
                &mut content,
                value.unsigned_abs(),
                10,
                false,
                negative,
                min_digits(precision),
            );
        }
        b'u' | b'o' | b'x' | b'X' => {
            let value = spec.length.narrow_unsigned(cursor.take_unsigned());
            let base = match spec.conversion {
                b'o' => 8,
                b'u' => 10,
                _ => 16,
            };
            if spec.flags.alt_form && value != 0 {
                match spec.conversion {
                    b'o' => content.push(b'0'),
                    b'x' => content.extend_from_slice(b"0x"),
                    b'X' => content.extend_from_slice(b"0X"),
                    _ => {}
                }
            }
            convert::integer(
                &mut content,
                value,
                base,
                spec.uppercase(),
                false,
                min_digits(precision),
            );
        }
        b'c' => {
            // A missing or mismatched argument renders zero-width; a NUL
            // character is real one-byte content.
            if let Some(ch) = cursor.take_char() {
                content.push(ch);
            }
        }
        b'p' => convert::pointer(&mut content, cursor.take_pointer()),
        b'f' | b'F' => convert::fixed_point(
            &mut content,
            cursor.take_float(),
            precision,
            spec.flags,
            spec.uppercase(),
        ),
        b'e' | b'E' => convert::scientific(
            &mut content,
            cursor.take_float(),
            precision,
            spec.flags,
            spec.uppercase(),
        ),
        b'g' | b'G' => convert::shortest(
            &mut content,
            cursor.take_float(),
            precision,
            spec.flags,
            spec.uppercase(),
        ),
        b'a' | b'A' => convert::hex_float(
            &mut content,
            cursor.take_float(),
            precision,
            spec.flags,
            spec.uppercase(),
        ),
        b'%' => content.push(b'%'),
        other => {
            // Unknown conversion letter: echo the directive as a literal
            // and consume no argument.
            content.push(b'%');
            content.push(other);
        }
    }
    emit_padded(sink, content.as_slice(), width, left_justify, pad_byte);
}

/// Minimum digit count for integer conversions: unspecified precision
/// means at least one digit, explicit precision is taken as given
/// (including 0, which renders the value 0 as nothing).
fn min_digits(precision: Option<usize>) -> usize {
    precision.map_or(1, |p| p)
}

fn emit_padded(
    sink: &mut BoundedSink<'_>,
    content: &[u8],
    width: usize,
    left_justify: bool,
    pad_byte: u8,
) {
    let pad = width.saturating_sub(content.len());
    if left_justify {
        sink.extend_from_slice(content);
        sink.pad(b' ', pad);
    } else {
        sink.pad(pad_byte, pad);
        sink.extend_from_slice(content);
    }
}

// ----------------------------------------------------------------------------
// Template diagnostics
// ----------------------------------------------------------------------------

/// One problem found by [`check_template`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateIssue {
    /// A directive (or its `*` width/precision) reached past the end of
    /// the argument list.
    MissingArgument {
        /// Byte offset of the directive's `%` in the template.
        offset: usize,
        conversion: u8,
        expected: &'static str,
    },
    /// The argument a directive would consume cannot drive it; rendering
    /// falls back to a neutral value.
    ArgumentMismatch {
        offset: usize,
        conversion: u8,
        expected: &'static str,
        found: &'static str,
    },
    /// Arguments past the last one any directive consumes.
    UnusedArguments {
        /// Index of the first argument nothing consumes.
        first_unused: usize,
    },
    /// The template ends inside a directive; the tail renders literally.
    IncompleteDirective { offset: usize },
}

impl std::fmt::Display for TemplateIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateIssue::MissingArgument { offset, conversion, expected } => write!(
                f,
                "offset {offset}: %{} expects a {expected} argument but none remains",
                char::from(*conversion)
            ),
            TemplateIssue::ArgumentMismatch { offset, conversion, expected, found } => write!(
                f,
                "offset {offset}: %{} expects {expected} but the argument is {found}",
                char::from(*conversion)
            ),
            TemplateIssue::UnusedArguments { first_unused } => {
                write!(f, "argument {first_unused} and everything after it is never consumed")
            }
            TemplateIssue::IncompleteDirective { offset } => {
                write!(f, "offset {offset}: template ends inside a directive; tail renders literally")
            }
        }
    }
}

/// Dry-run `template` against `args` without rendering anything and
/// report every place the formatting call would fall back to a neutral
/// value. An empty result means the call is clean.
///
/// Argument accounting mirrors [`snprintf`] exactly: one slot per `*`,
/// one per value-bearing conversion, strictly left to right.
pub fn check_template(template: &[u8], args: &[FormatArg<'_>]) -> Vec<TemplateIssue> {
    let mut issues = Vec::new();
    let mut next_arg = 0usize;
    let mut pos = 0usize;
    while pos < template.len() {
        if template[pos] != b'%' {
            pos += 1;
            continue;
        }
        let Some((spec, consumed)) = parse_spec(&template[pos..]) else {
            issues.push(TemplateIssue::IncompleteDirective { offset: pos });
            break;
        };
        let offset = pos;
        pos += consumed;

        if spec.width == Width::FromArg {
            expect_arg(&mut issues, args, &mut next_arg, offset, spec.conversion, "an integer (for `*`)", accepts_integer);
        }
        if spec.precision == Precision::FromArg {
            expect_arg(&mut issues, args, &mut next_arg, offset, spec.conversion, "an integer (for `.*`)", accepts_integer);
        }
        match spec.conversion {
            b'd' | b'i' | b'u' | b'o' | b'x' | b'X' => {
                expect_arg(&mut issues, args, &mut next_arg, offset, spec.conversion, "an integer", accepts_integer);
            }
            b'f' | b'F' | b'e' | b'E' | b'g' | b'G' | b'a' | b'A' => {
                expect_arg(&mut issues, args, &mut next_arg, offset, spec.conversion, "a float", accepts_float);
            }
            b'c' => {
                expect_arg(&mut issues, args, &mut next_arg, offset, spec.conversion, "a char", accepts_char);
            }
            b's' => {
                expect_arg(&mut issues, args, &mut next_arg, offset, spec.conversion, "a str", accepts_str);
            }
            b'p' => {
                expect_arg(&mut issues, args, &mut next_arg, offset, spec.conversion, "a pointer", accepts_integer);
            }
            b'n' => {
                expect_arg(&mut issues, args, &mut next_arg, offset, spec.conversion, "an out-slot", accepts_out_slot);
            }
            // `%%` and unknown letters consume nothing.
            _ => {}
        }
    }
    if next_arg < args.len() {
        issues.push(TemplateIssue::UnusedArguments { first_unused: next_arg });
    }
    issues
}

fn expect_arg(
    issues: &mut Vec<TemplateIssue>,
    args: &[FormatArg<'_>],
    next_arg: &mut usize,
    offset: usize,
    conversion: u8,
    expected: &'static str,
    accepts: fn(&FormatArg<'_>) -> bool,
) {
    match args.get(*next_arg) {
        None => issues.push(TemplateIssue::MissingArgument { offset, conversion, expected }),
        Some(arg) => {
            if !accepts(arg) {
                issues.push(TemplateIssue::ArgumentMismatch {
                    offset,
                    conversion,
                    expected,
                    found: arg.kind_name(),
                });
            }
            *next_arg += 1;
        }
    }
}

// The accepts_* predicates mirror the ArgCursor coercions: what a take_*
// call would resolve without falling back is what checking accepts.

fn accepts_integer(arg: &FormatArg<'_>) -> bool {
    matches!(
        arg,
        FormatArg::Int(_) | FormatArg::Uint(_) | FormatArg::Char(_) | FormatArg::Pointer(_)
    )
}

fn accepts_float(arg: &FormatArg<'_>) -> bool {
    matches!(arg, FormatArg::Float(_))
}

fn accepts_char(arg: &FormatArg<'_>) -> bool {
    matches!(arg, FormatArg::Char(_) | FormatArg::Int(_) | FormatArg::Uint(_))
}

fn accepts_str(arg: &FormatArg<'_>) -> bool {
    matches!(arg, FormatArg::Str(_))
}

fn accepts_out_slot(arg: &FormatArg<'_>) -> bool {
    matches!(arg, FormatArg::OutSlot(_))
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
