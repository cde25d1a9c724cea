//! Numeric and pointer conversion renderers.
//!
//! Self-contained digit generation for the integer, fixed-point,
//! scientific, shortest-form, and hex-float conversions, plus pointer
//! rendering. No tables beyond the two digit alphabets; no allocation.
//!
//! Reference: ISO C11 7.21.6.1 conversion semantics, POSIX.1-2024
//! fprintf specification.
//!
//! Rounding here is the scale-round-unscale method: multiply by
//! base^precision, round to nearest (half away from zero), divide back,
//! then extract digits by repeated multiply-and-truncate. This matches
//! the engine this crate mirrors and is deliberately approximate: it
//! accumulates floating-point error for large magnitudes and precisions
//! and is not a correctly-rounded decimal conversion. Out-of-range
//! float-to-integer casts saturate (Rust semantics) instead of being
//! undefined.

use crate::scratch::Scratch;
use crate::spec::FormatFlags;

/// Upper bound applied to any resolved precision or minimum-digit count.
/// Keeps the worst-case rendered content of a single conversion well
/// inside [`crate::scratch::SCRATCH_CAPACITY`].
pub const MAX_PRECISION: usize = 1024;

const DIGITS_LOWER: &[u8; 16] = b"0123456789abcdef";
const DIGITS_UPPER: &[u8; 16] = b"0123456789ABCDEF";

fn digit_table(uppercase: bool) -> &'static [u8; 16] {
    if uppercase { DIGITS_UPPER } else { DIGITS_LOWER }
}

/// Render an unsigned magnitude in `base`, least-significant digit
/// first, then reverse in place so the most significant digit leads.
///
/// `min_digits` pads with leading zeros; a zero value with
/// `min_digits == 0` renders nothing at all (precision 0 applied to the
/// value 0). The sign is appended after the zero padding, before the
/// reversal, so it ends up in front of every digit.
pub fn integer(
    out: &mut Scratch,
    value: u64,
    base: u64,
    uppercase: bool,
    negative: bool,
    min_digits: usize,
) {
    let digits = digit_table(uppercase);
    let min_digits = min_digits.min(MAX_PRECISION);
    let start = out.len();

    if value == 0 && min_digits == 0 {
        return;
    }

    let mut v = value;
    while v > 0 {
        out.push(digits[(v % base) as usize]);
        v /= base;
    }
    while out.len() - start < min_digits {
        out.push(b'0');
    }
    if negative {
        out.push(b'-');
    }
    out.reverse_from(start);
}

/// Render `nan`/`inf` tokens for non-finite values. Returns `true` when
/// the value was special and has been fully rendered. NaN never carries
/// a sign; infinity keeps its own sign and ignores the flag set.
fn special_value(out: &mut Scratch, value: f64, uppercase: bool) -> bool {
    if value.is_nan() {
        out.extend_from_slice(if uppercase { b"NAN" } else { b"nan" });
        return true;
    }
    if value.is_infinite() {
        let token: &[u8] = match (value < 0.0, uppercase) {
            (true, true) => b"-INF",
            (true, false) => b"-inf",
            (false, true) => b"INF",
            (false, false) => b"inf",
        };
        out.extend_from_slice(token);
        return true;
    }
    false
}

/// Emit exactly one of `-`, `+`, or space ahead of a finite value's
/// digits, and hand back the magnitude. The sign outranks both flags.
fn emit_sign(out: &mut Scratch, value: f64, flags: FormatFlags) -> f64 {
    if value < 0.0 {
        out.push(b'-');
        -value
    } else {
        if flags.force_sign {
            out.push(b'+');
        } else if flags.space_sign {
            out.push(b' ');
        }
        value
    }
}

/// Extract the next fraction digit after a multiply-by-`base` step.
/// Truncates toward zero; saturated garbage from overflowed rounding
/// clamps to the top digit instead of leaving the digit range.
fn fraction_digit(scaled: f64, top: u32) -> u8 {
    (scaled as u32).min(top) as u8
}

/// Fixed-point rendering (`f`/`F`).
///
/// Default precision 6. The integer part goes through [`integer`] with
/// minimum-digit count 0, so magnitudes below 1 render with no integer
/// digits (`.500000`). The decimal point appears when precision > 0 or
/// the alt flag is set.
pub fn fixed_point(
    out: &mut Scratch,
    value: f64,
    precision: Option<usize>,
    flags: FormatFlags,
    uppercase: bool,
) {
    if special_value(out, value, uppercase) {
        return;
    }
    let magnitude = emit_sign(out, value, flags);
    let precision = precision.unwrap_or(6).min(MAX_PRECISION);

    let scale = 10f64.powi(precision as i32);
    let rounded = (magnitude * scale).round() / scale;
    let integer_part = rounded as u64;
    let mut fraction = rounded - integer_part as f64;

    integer(out, integer_part, 10, false, false, 0);

    if precision > 0 || flags.alt_form {
        out.push(b'.');
        for _ in 0..precision {
            fraction *= 10.0;
            let digit = fraction_digit(fraction, 9);
            out.push(b'0' + digit);
            fraction -= f64::from(digit);
        }
    }
}

/// Scientific rendering (`e`/`E`).
///
/// Zero is a dedicated case: fraction zeros appear only for an explicit
/// precision > 0 (or the alt flag), and the exponent is the literal
/// `+00`. Non-zero magnitudes normalize into [1,10) by repeated
/// division/multiplication before the precision default applies. The
/// exponent always carries a sign and at least two digits.
pub fn scientific(
    out: &mut Scratch,
    value: f64,
    precision: Option<usize>,
    flags: FormatFlags,
    uppercase: bool,
) {
    if special_value(out, value, uppercase) {
        return;
    }
    let magnitude = emit_sign(out, value, flags);
    let marker = if uppercase { b'E' } else { b'e' };

    if magnitude == 0.0 {
        out.push(b'0');
        let zeros = match precision {
            Some(p) => p.min(MAX_PRECISION),
            None => 0,
        };
        if zeros > 0 || flags.alt_form {
            out.push(b'.');
            for _ in 0..zeros {
                out.push(b'0');
            }
        }
        out.push(marker);
        out.extend_from_slice(b"+00");
        return;
    }

    let mut mantissa = magnitude;
    let mut exponent: i32 = 0;
    while mantissa >= 10.0 {
        mantissa /= 10.0;
        exponent += 1;
    }
    while mantissa < 1.0 {
        mantissa *= 10.0;
        exponent -= 1;
    }

    let precision = precision.unwrap_or(6).min(MAX_PRECISION);
    let scale = 10f64.powi(precision as i32);
    let rounded = (mantissa * scale).round() / scale;
    let integer_part = rounded as u64;
    let mut fraction = rounded - integer_part as f64;

    // A rounding carry can push the mantissa to 10; the lead byte is
    // emitted as-is without renormalizing, as the original engine did.
    out.push(b'0' + integer_part.min(10) as u8);

    if precision > 0 || flags.alt_form {
        out.push(b'.');
        for _ in 0..precision {
            fraction *= 10.0;
            let digit = fraction_digit(fraction, 9);
            out.push(b'0' + digit);
            fraction -= f64::from(digit);
        }
    }

    out.push(marker);
    out.push(if exponent >= 0 { b'+' } else { b'-' });
    integer(out, u64::from(exponent.unsigned_abs()), 10, false, false, 2);
}

/// Hex-float rendering (`a`/`A`).
///
/// Zero is the literal `0x0.0p+0`. Non-zero magnitudes normalize into
/// [1,2) tracking a base-2 exponent; the leading mantissa digit is the
/// fixed `1`, fraction digits come from base-16 multiply-and-truncate,
/// and the exponent carries a sign and at least one decimal digit.
pub fn hex_float(
    out: &mut Scratch,
    value: f64,
    precision: Option<usize>,
    flags: FormatFlags,
    uppercase: bool,
) {
    if special_value(out, value, uppercase) {
        return;
    }
    if value == 0.0 {
        out.extend_from_slice(if uppercase { b"0X0.0P+0" } else { b"0x0.0p+0" });
        return;
    }
    let magnitude = emit_sign(out, value, flags);
    let digits = digit_table(uppercase);

    let mut mantissa = magnitude;
    let mut exponent: i32 = 0;
    while mantissa >= 2.0 {
        mantissa /= 2.0;
        exponent += 1;
    }
    while mantissa < 1.0 {
        mantissa *= 2.0;
        exponent -= 1;
    }

    let precision = precision.unwrap_or(6).min(MAX_PRECISION);
    let scale = 16f64.powi(precision as i32);
    let rounded = (mantissa * scale).round() / scale;
    let integer_part = rounded as u64;
    let mut fraction = rounded - integer_part as f64;

    out.extend_from_slice(if uppercase { b"0X1" } else { b"0x1" });

    if precision > 0 || flags.alt_form {
        out.push(b'.');
        for _ in 0..precision {
            fraction *= 16.0;
            let digit = fraction_digit(fraction, 15);
            out.push(digits[digit as usize]);
            fraction -= f64::from(digit);
        }
    }

    out.push(if uppercase { b'P' } else { b'p' });
    out.push(if exponent >= 0 { b'+' } else { b'-' });
    integer(out, u64::from(exponent.unsigned_abs()), 10, false, false, 1);
}

/// Shortest rendering (`g`/`G`): render both fixed-point and scientific
/// candidates at `precision - 1` significant digits (default 6,
/// explicit 0 treated as 1), strip trailing fraction zeros from each
/// unless the alt flag retains them, and keep whichever string is
/// shorter. Equal lengths resolve to the scientific form.
pub fn shortest(
    out: &mut Scratch,
    value: f64,
    precision: Option<usize>,
    flags: FormatFlags,
    uppercase: bool,
) {
    let precision = match precision {
        None => 6,
        Some(0) => 1,
        Some(p) => p.min(MAX_PRECISION),
    };
    let significant = precision - 1;

    let mut sci = Scratch::new();
    let mut fixed = Scratch::new();
    scientific(&mut sci, value, Some(significant), flags, uppercase);
    fixed_point(&mut fixed, value, Some(significant), flags, uppercase);

    if !flags.alt_form {
        strip_fraction_zeros(&mut sci);
        strip_fraction_zeros(&mut fixed);
    }

    if sci.len() <= fixed.len() {
        out.extend_from_slice(sci.as_slice());
    } else {
        out.extend_from_slice(fixed.as_slice());
    }
}

/// Drop trailing zeros (and a then-bare decimal point) from the
/// fraction part of a rendered candidate. For scientific candidates the
/// strip stops at the exponent marker, leaving the exponent intact.
fn strip_fraction_zeros(buf: &mut Scratch) {
    let (keep, end) = {
        let bytes = buf.as_slice();
        if !bytes.contains(&b'.') {
            return;
        }
        let end = bytes
            .iter()
            .position(|&b| b == b'e' || b == b'E')
            .unwrap_or(bytes.len());
        let mut keep = end;
        while keep > 0 && bytes[keep - 1] == b'0' {
            keep -= 1;
        }
        if keep > 0 && bytes[keep - 1] == b'.' {
            keep -= 1;
        }
        (keep, end)
    };
    if keep < end {
        buf.remove_range(keep, end);
    }
}

/// Pointer rendering (`p`): `0x` plus the address in lowercase hex.
/// A null pointer renders as the bare prefix.
pub fn pointer(out: &mut Scratch, address: u64) {
    out.extend_from_slice(b"0x");
    integer(out, address, 16, false, false, 0);
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
