#![no_main]

use std::cell::Cell;

use libfuzzer_sys::fuzz_target;
use rsprintf_core::{snprintf, FormatArg};

// Feeds arbitrary templates through the renderer and checks the calling
// contract: no panic, terminator at min(logical, cap - 1), and a logical
// length that agrees across destination capacities of at least two
// (capacities 0 and 1 report 0 without formatting).
fuzz_target!(|data: &[u8]| {
    let Some((head, template)) = data.split_first_chunk::<2>() else {
        return;
    };
    if template.len() > 64 {
        return;
    }
    // Runs of five or more digits buy nothing but padding time.
    if template.windows(5).any(|w| w.iter().all(u8::is_ascii_digit)) {
        return;
    }

    let cap = usize::from(head[0]) % 200;
    let counter = Cell::new(0usize);
    let args: Vec<FormatArg<'_>> = match head[1] % 4 {
        0 => vec![],
        1 => vec![
            FormatArg::Int(-7),
            FormatArg::Uint(u64::MAX),
            FormatArg::Float(6.25e-2),
        ],
        2 => vec![
            FormatArg::Str(b"fuzz"),
            FormatArg::Char(b'q'),
            FormatArg::Pointer(0x1000),
        ],
        _ => vec![
            FormatArg::OutSlot(&counter),
            FormatArg::Float(f64::NAN),
            FormatArg::Int(i64::MIN),
        ],
    };

    let mut dest = vec![0u8; cap];
    let logical = snprintf(&mut dest, template, &args);

    if cap <= 1 {
        assert_eq!(logical, 0, "degenerate capacity must report 0");
        if cap == 1 {
            assert_eq!(dest[0], 0, "capacity 1 must hold only the terminator");
        }
        return;
    }

    let terminator = logical.min(cap - 1);
    assert_eq!(dest[terminator], 0, "terminator missing at {terminator}");

    let mut smaller = vec![0u8; (cap / 2).max(2)];
    let second = snprintf(&mut smaller, template, &args);
    assert_eq!(logical, second, "logical length depends on capacity");
});
