//! The classic demonstration sequence, replayed through the engine.
//!
//! Prints one line per formatting feature to stdout, in the same order
//! the harness deck captures them. Useful for eyeballing behavior and
//! for piping next to a C program printing the equivalent lines.

use std::cell::Cell;
use std::io;

use rsprintf_core::{printf, snprintf, FormatArg};

/// Run the full demonstration. Output goes to stdout line by line.
pub fn run() -> io::Result<()> {
    use FormatArg::{Char, Float, Int, Pointer, Str, Uint};

    printf(b"Integer: %d\n", &[Int(42)])?;
    printf(b"Negative Integer: %d\n", &[Int(-42)])?;
    printf(b"Unsigned: %u\n", &[Uint(3_000_000_000)])?;
    printf(b"Hex lower: %x\n", &[Uint(255)])?;
    printf(b"Hex upper: %X\n", &[Uint(255)])?;
    printf(b"Octal: %o\n", &[Uint(255)])?;
    printf(b"Char: %c\n", &[Char(b'A')])?;
    printf(b"String: %s\n", &[Str(b"Hello, World!")])?;
    printf(b"Null string: %s\n", &[])?;
    printf(b"Float default: %f\n", &[Float(3.14159)])?;
    printf(b"Float with precision: %.2f\n", &[Float(3.14159)])?;
    printf(b"Scientific notation: %e\n", &[Float(3.14159)])?;
    printf(b"Scientific notation upper: %E\n", &[Float(3.14159)])?;
    printf(b"Auto format: %g\n", &[Float(3.14159)])?;
    printf(b"Auto format large: %g\n", &[Float(3_141_590_000.0)])?;
    printf(b"Auto format small: %.2g\n", &[Float(0.000123)])?;
    printf(b"Hex float lower: %a\n", &[Float(3.14159)])?;
    printf(b"Hex float upper: %A\n", &[Float(3.14159)])?;
    printf(b"Infinity: %f\n", &[Float(f64::INFINITY)])?;
    printf(b"Negative Infinity: %f\n", &[Float(f64::NEG_INFINITY)])?;
    printf(b"NaN: %f\n", &[Float(f64::NAN)])?;
    printf(b"Infinity (scientific): %e\n", &[Float(f64::INFINITY)])?;
    printf(b"NaN (hex): %a\n", &[Float(f64::NAN)])?;
    printf(b"Width padded int: %5d\n", &[Int(42)])?;
    printf(b"Left justified: %-5d!\n", &[Int(42)])?;
    printf(b"Zero padded: %05d\n", &[Int(42)])?;
    printf(b"Plus sign: %+d\n", &[Int(42)])?;
    printf(b"Space sign: % d\n", &[Int(42)])?;
    printf(b"Hex with # flag: %#x\n", &[Uint(255)])?;
    printf(b"Octal with # flag: %#o\n", &[Uint(255)])?;
    printf(b"Float with # flag: %#f\n", &[Float(1.0)])?;
    printf(b"Scientific with # flag: %#e\n", &[Float(1.0)])?;
    printf(b"Precision int: %.5d\n", &[Int(42)])?;
    printf(b"Zero with precision 0: %.0d\n", &[Int(0)])?;
    printf(b"Width and precision: %8.5d\n", &[Int(42)])?;
    printf(b"Percent sign: %%\n", &[])?;
    printf(b"Pointer: %p\n", &[Pointer(0x1234_5678)])?;
    printf(b"Long: %ld\n", &[Int(2_147_483_648)])?;
    printf(b"Long long: %lld\n", &[Int(9_223_372_036_854_775_807)])?;
    printf(b"Short: %hd\n", &[Int(32767)])?;

    let count = Cell::new(0usize);
    printf(b"Characters so far: %n%d\n", &[FormatArg::OutSlot(&count), Int(0)])?;

    let mut small = [0u8; 10];
    let logical = snprintf(&mut small, b"This is a long string that will be truncated", &[]);
    let kept = small.iter().position(|&b| b == 0).unwrap_or(0);
    printf(
        b"Truncated string: '%s', would have written %d chars\n",
        &[Str(&small[..kept]), Int(logical as i64)],
    )?;

    printf(b"Negative width: %*d\n", &[Int(-5), Int(42)])?;
    printf(b"Negative precision: %.5f\n", &[Float(3.14159)])?;
    printf(b"Large integer: %d\n", &[Int(i64::MAX)])?;
    printf(b"Large float: %f\n", &[Float(1e308)])?;
    printf(b"Asterisk width/precision: %*.*lld\n", &[Int(10), Int(5), Int(123)])?;
    printf(b"Size_t: %zu\n", &[Uint(4_294_967_295)])?;
    printf(b"Null pointer: %p\n", &[Pointer(0)])?;
    printf(b"Empty string: %s\n", &[Str(b"")])?;
    printf(b"Truncated string: %.3s\n", &[Str(b"abcdef")])?;
    printf(b"Extreme width: %100d\n", &[Int(42)])?;
    printf(b"Combined flags: %+0#10.5x\n", &[Uint(255)])?;

    Ok(())
}
