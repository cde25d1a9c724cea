//! Directive parser for the format template.
//!
//! Consumes one `%`-introduced conversion specification at a time:
//! flags in any order, then width, then precision, then a length
//! modifier, then exactly one conversion byte.
//!
//! Parsing never rejects a conversion letter: any final byte is
//! accepted and carried in the parsed [`FormatSpec`], so the driver can
//! echo unknown directives literally. The only failure mode is a
//! template that ends before the conversion byte.

use crate::spec::{FormatFlags, FormatSpec, LengthMod, Precision, Width};

/// Parse a conversion specification starting at `fmt[0]` (which must be
/// `%`). Returns the parsed spec and the number of bytes consumed,
/// including the `%` and the conversion byte, or `None` if the template
/// ends mid-specification.
pub fn parse_spec(fmt: &[u8]) -> Option<(FormatSpec, usize)> {
    if fmt.first() != Some(&b'%') {
        return None;
    }
    let mut pos = 1;

    // Flags, any order. Later flags can override earlier ones: `-`
    // suppresses `0`, and `+` suppresses the space flag.
    let mut flags = FormatFlags::default();
    while pos < fmt.len() {
        match fmt[pos] {
            b'-' => {
                flags.left_justify = true;
                flags.zero_pad = false;
            }
            b'+' => {
                flags.force_sign = true;
                flags.space_sign = false;
            }
            b' ' => {
                if !flags.force_sign {
                    flags.space_sign = true;
                }
            }
            b'0' => {
                if !flags.left_justify {
                    flags.zero_pad = true;
                }
            }
            b'#' => flags.alt_form = true,
            _ => break,
        }
        pos += 1;
    }

    // Width: literal digits or `*`.
    let width = if pos < fmt.len() && fmt[pos] == b'*' {
        pos += 1;
        Width::FromArg
    } else if pos < fmt.len() && fmt[pos].is_ascii_digit() {
        Width::Fixed(parse_decimal(fmt, &mut pos))
    } else {
        Width::None
    };

    // Precision: `.` then digits or `*`. A bare `.` means precision 0.
    let precision = if pos < fmt.len() && fmt[pos] == b'.' {
        pos += 1;
        if pos < fmt.len() && fmt[pos] == b'*' {
            pos += 1;
            Precision::FromArg
        } else {
            Precision::Fixed(parse_decimal(fmt, &mut pos))
        }
    } else {
        Precision::None
    };

    // Length modifier.
    let length = if pos < fmt.len() {
        match fmt[pos] {
            b'h' => {
                pos += 1;
                if fmt.get(pos) == Some(&b'h') {
                    pos += 1;
                    LengthMod::Hh
                } else {
                    LengthMod::H
                }
            }
            b'l' => {
                pos += 1;
                if fmt.get(pos) == Some(&b'l') {
                    pos += 1;
                    LengthMod::Ll
                } else {
                    LengthMod::L
                }
            }
            b'j' => {
                pos += 1;
                LengthMod::J
            }
            b'z' => {
                pos += 1;
                LengthMod::Z
            }
            b't' => {
                pos += 1;
                LengthMod::T
            }
            b'L' => {
                pos += 1;
                LengthMod::BigL
            }
            _ => LengthMod::None,
        }
    } else {
        LengthMod::None
    };

    // Conversion byte. Every byte is accepted; unknown letters become a
    // literal passthrough in the driver.
    if pos >= fmt.len() {
        return None;
    }
    let conversion = fmt[pos];
    pos += 1;

    Some((
        FormatSpec {
            flags,
            width,
            precision,
            length,
            conversion,
        },
        pos,
    ))
}

/// Parse a run of ASCII digits at `fmt[*pos]`, advancing the cursor.
/// Saturates instead of overflowing on absurd digit runs.
fn parse_decimal(fmt: &[u8], pos: &mut usize) -> usize {
    let mut value = 0usize;
    while *pos < fmt.len() && fmt[*pos].is_ascii_digit() {
        value = value
            .saturating_mul(10)
            .saturating_add((fmt[*pos] - b'0') as usize);
        *pos += 1;
    }
    value
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
