use std::cell::Cell;

use rsprintf_core::FormatArg::{self, Char, Float, Int, Pointer, Str, Uint};
use rsprintf_core::snprintf;

struct Case {
    name: &'static str,
    template: &'static [u8],
    args: Vec<FormatArg<'static>>,
    expected: &'static str,
}

fn matrix_cases() -> Vec<Case> {
    vec![
        Case { name: "literal", template: b"hello world", args: vec![], expected: "hello world" },
        Case { name: "decimal", template: b"%d", args: vec![Int(42)], expected: "42" },
        Case { name: "decimal-negative", template: b"%d", args: vec![Int(-42)], expected: "-42" },
        Case { name: "decimal-zero-pad", template: b"%05d", args: vec![Int(42)], expected: "00042" },
        Case { name: "decimal-width", template: b"%8d", args: vec![Int(-1234)], expected: "   -1234" },
        Case { name: "decimal-left", template: b"%-8d|", args: vec![Int(42)], expected: "42      |" },
        Case { name: "decimal-plus", template: b"%+d", args: vec![Int(42)], expected: "+42" },
        Case { name: "decimal-space", template: b"% d", args: vec![Int(42)], expected: " 42" },
        Case { name: "decimal-precision", template: b"%8.5d", args: vec![Int(42)], expected: "   00042" },
        Case { name: "precision-zero-of-zero", template: b"%.0d", args: vec![Int(0)], expected: "" },
        Case { name: "int-min", template: b"%lld", args: vec![Int(i64::MIN)], expected: "-9223372036854775808" },
        Case { name: "narrow-hh", template: b"%hhd", args: vec![Int(300)], expected: "44" },
        Case { name: "narrow-default-int", template: b"%d", args: vec![Int(5_000_000_000)], expected: "705032704" },
        Case { name: "long-keeps-64", template: b"%ld", args: vec![Int(5_000_000_000)], expected: "5000000000" },
        Case { name: "unsigned", template: b"%u", args: vec![Uint(4294967295)], expected: "4294967295" },
        Case { name: "hex-lower", template: b"%x", args: vec![Uint(255)], expected: "ff" },
        Case { name: "hex-upper", template: b"%X", args: vec![Uint(255)], expected: "FF" },
        Case { name: "hex-alt", template: b"%#x", args: vec![Uint(255)], expected: "0xff" },
        Case { name: "hex-alt-upper", template: b"%#X", args: vec![Uint(255)], expected: "0XFF" },
        Case { name: "hex-alt-zero", template: b"%#x", args: vec![Uint(0)], expected: "0" },
        Case { name: "octal", template: b"%o", args: vec![Uint(255)], expected: "377" },
        Case { name: "octal-alt", template: b"%#o", args: vec![Uint(255)], expected: "0377" },
        Case { name: "char", template: b"[%c]", args: vec![Char(b'A')], expected: "[A]" },
        Case { name: "char-width", template: b"[%5c]", args: vec![Char(b'Z')], expected: "[    Z]" },
        Case { name: "string", template: b"%s!", args: vec![Str(b"hello")], expected: "hello!" },
        Case { name: "string-width", template: b"[%10s]", args: vec![Str(b"hi")], expected: "[        hi]" },
        Case { name: "string-left", template: b"[%-10s]", args: vec![Str(b"hi")], expected: "[hi        ]" },
        Case { name: "string-precision", template: b"%.3s", args: vec![Str(b"abcdef")], expected: "abc" },
        Case { name: "string-missing", template: b"%s", args: vec![], expected: "(null)" },
        Case { name: "pointer", template: b"%p", args: vec![Pointer(0x7fff1234)], expected: "0x7fff1234" },
        Case { name: "pointer-null", template: b"[%p]", args: vec![Pointer(0)], expected: "[0x]" },
        Case { name: "percent-escape", template: b"100%% done", args: vec![], expected: "100% done" },
        Case { name: "unknown-letter", template: b"%q", args: vec![], expected: "%q" },
        Case { name: "incomplete-tail", template: b"abc%-5", args: vec![], expected: "abc%-5" },
        Case { name: "star-width", template: b"%*d", args: vec![Int(10), Int(123)], expected: "       123" },
        Case { name: "star-width-negative", template: b"[%*d]", args: vec![Int(-5), Int(42)], expected: "[42   ]" },
        Case { name: "star-precision", template: b"%.*f", args: vec![Int(2), Float(3.14159)], expected: "3.14" },
        Case { name: "star-precision-negative", template: b"%.*f", args: vec![Int(-1), Float(0.5)], expected: ".500000" },
        Case { name: "float-fixed", template: b"%.2f", args: vec![Float(3.14159)], expected: "3.14" },
        Case { name: "float-no-integer-digit", template: b"%f", args: vec![Float(0.5)], expected: ".500000" },
        Case { name: "float-zero-pad", template: b"[%010.2f]", args: vec![Float(3.14159)], expected: "[0000003.14]" },
        Case { name: "float-nan", template: b"%f", args: vec![Float(f64::NAN)], expected: "nan" },
        Case { name: "float-inf-upper", template: b"%F", args: vec![Float(f64::NEG_INFINITY)], expected: "-INF" },
        Case { name: "scientific-zero", template: b"%e", args: vec![Float(0.0)], expected: "0e+00" },
        Case { name: "scientific", template: b"%.2e", args: vec![Float(250.0)], expected: "2.50e+02" },
        Case { name: "shortest-scientific-wins", template: b"%g", args: vec![Float(100000.0)], expected: "1e+05" },
        Case { name: "shortest-fixed-wins", template: b"%g", args: vec![Float(0.5)], expected: ".5" },
        Case { name: "hex-float", template: b"%a", args: vec![Float(1.5)], expected: "0x1.800000p+0" },
        Case { name: "hex-float-zero", template: b"%A", args: vec![Float(0.0)], expected: "0X0.0P+0" },
        Case { name: "mixed", template: b"%d:%s:%x", args: vec![Int(7), Str(b"ab"), Uint(31)], expected: "7:ab:1f" },
        Case {
            name: "missing-args-degrade",
            template: b"%d %s %c.",
            args: vec![],
            expected: "0 (null) .",
        },
    ]
}

#[test]
fn contract_matrix_matches_expected() {
    let mut mismatches = Vec::new();
    for case in matrix_cases() {
        let mut buf = [0u8; 256];
        let len = snprintf(&mut buf, case.template, &case.args);
        let got = String::from_utf8_lossy(&buf[..len.min(255)]).into_owned();
        if got != case.expected || len != case.expected.len() {
            mismatches.push(format!(
                "{}: expected {:?} (len {}) got {:?} (len {})",
                case.name,
                case.expected,
                case.expected.len(),
                got,
                len
            ));
        }
    }
    assert!(mismatches.is_empty(), "contract matrix mismatch(es): {mismatches:#?}");
}

#[test]
fn truncation_sweep_preserves_prefix_terminator_and_logical_length() {
    // For every capacity from 0 to past the full length: the return
    // value never changes, the written content is a prefix of the full
    // rendering, the terminator lands at min(logical, cap - 1), and
    // bytes past the terminator are untouched.
    let probes: Vec<(&[u8], Vec<FormatArg<'_>>)> = vec![
        (b"The quick brown fox jumps over the lazy dog..", vec![]),
        (b"%08d |%10s| %.3f", vec![Int(-1234), Str(b"xyz"), Float(2.5)]),
        (b"%5.0d[%#o]%-6cend", vec![Int(0), Uint(64), Char(b'q')]),
    ];
    for (template, args) in probes {
        let mut reference = [0u8; 256];
        let logical = snprintf(&mut reference, template, &args);
        assert!(logical + 2 < reference.len());

        for cap in 0..=logical + 2 {
            let mut buf = [0xAAu8; 300];
            let len = snprintf(&mut buf[..cap], template, &args);
            if cap == 0 {
                assert_eq!(len, 0);
                assert!(buf.iter().all(|&b| b == 0xAA), "zero capacity must not write");
                continue;
            }
            if cap == 1 {
                assert_eq!(len, 0);
                assert_eq!(buf[0], 0);
                assert_eq!(buf[1], 0xAA);
                continue;
            }
            assert_eq!(len, logical, "cap {cap}: logical length drifted");
            let content = logical.min(cap - 1);
            assert_eq!(
                &buf[..content],
                &reference[..content],
                "cap {cap}: content is not a prefix of the full rendering"
            );
            assert_eq!(buf[content], 0, "cap {cap}: missing terminator");
            assert!(
                buf[cap..].iter().all(|&b| b == 0xAA),
                "cap {cap}: wrote past the destination"
            );
        }
    }
}

#[test]
fn count_directive_sees_logical_length_not_written_length() {
    let cell = Cell::new(usize::MAX);
    let args = [Str(b"abcdefghij"), FormatArg::OutSlot(&cell)];
    let mut buf = [0u8; 5];
    let len = snprintf(&mut buf, b"%s%n!", &args);
    assert_eq!(len, 11);
    assert_eq!(cell.get(), 10);
    assert_eq!(&buf[..4], b"abcd");
    assert_eq!(buf[4], 0);
}
