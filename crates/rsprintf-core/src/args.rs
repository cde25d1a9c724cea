//! Typed argument values and the left-to-right consumption cursor.
//!
//! The C engine pulled values out of a variadic list with no type
//! information; here every argument is a tagged [`FormatArg`] and the
//! driver consumes them strictly in order through an [`ArgCursor`].
//!
//! Coercion policy: the integer-class variants (`Int`, `Uint`, `Char`,
//! `Pointer`) interconvert by narrowing/reinterpretation, the analogue of
//! reading a different integer type out of a C variadic list. `Float`
//! never converts to the integer class or back. A missing or
//! unconvertible argument degrades per directive (zero for numbers,
//! `(null)` for strings, zero-width content for characters); the cursor
//! still consumes one slot so later directives stay aligned.

use std::cell::Cell;

/// One tagged argument value for a formatting call.
#[derive(Debug, Clone, Copy)]
pub enum FormatArg<'a> {
    /// Signed integer (`d`, `i`; also star width/precision).
    Int(i64),
    /// Unsigned integer (`u`, `x`, `X`, `o`).
    Uint(u64),
    /// Floating value (`f`, `e`, `g`, `a` families).
    Float(f64),
    /// Text for `s`. Byte-oriented; truncation by precision is by bytes.
    Str(&'a [u8]),
    /// Single character for `c`.
    Char(u8),
    /// Address for `p`.
    Pointer(usize),
    /// Destination slot for `n`: receives the logical length accumulated
    /// before the directive.
    OutSlot(&'a Cell<usize>),
}

impl FormatArg<'_> {
    /// Short name of the variant, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            FormatArg::Int(_) => "int",
            FormatArg::Uint(_) => "uint",
            FormatArg::Float(_) => "float",
            FormatArg::Str(_) => "str",
            FormatArg::Char(_) => "char",
            FormatArg::Pointer(_) => "pointer",
            FormatArg::OutSlot(_) => "out-slot",
        }
    }
}

/// Strict left-to-right cursor over a formatting call's arguments.
///
/// Every `take_*` call consumes exactly one slot whether or not the value
/// matched, so a mismatched argument cannot shift later directives.
#[derive(Debug)]
pub struct ArgCursor<'a> {
    args: &'a [FormatArg<'a>],
    pos: usize,
}

impl<'a> ArgCursor<'a> {
    pub fn new(args: &'a [FormatArg<'a>]) -> Self {
        ArgCursor { args, pos: 0 }
    }

    /// Number of arguments consumed so far.
    pub fn consumed(&self) -> usize {
        self.pos
    }

    fn next(&mut self) -> Option<FormatArg<'a>> {
        let arg = self.args.get(self.pos).copied();
        if arg.is_some() {
            self.pos += 1;
        }
        arg
    }

    /// Take a signed integer. Integer-class values reinterpret; anything
    /// else (or exhaustion) yields 0.
    pub fn take_signed(&mut self) -> i64 {
        match self.next() {
            Some(FormatArg::Int(v)) => v,
            Some(FormatArg::Uint(v)) => v as i64,
            Some(FormatArg::Char(c)) => i64::from(c),
            Some(FormatArg::Pointer(p)) => p as i64,
            _ => 0,
        }
    }

    /// Take an unsigned integer. Integer-class values reinterpret;
    /// anything else yields 0.
    pub fn take_unsigned(&mut self) -> u64 {
        match self.next() {
            Some(FormatArg::Int(v)) => v as u64,
            Some(FormatArg::Uint(v)) => v,
            Some(FormatArg::Char(c)) => u64::from(c),
            Some(FormatArg::Pointer(p)) => p as u64,
            _ => 0,
        }
    }

    /// Take a floating value. Only `Float` matches; anything else yields
    /// 0.0 (an integer slot is not a bit-pattern for a float here).
    pub fn take_float(&mut self) -> f64 {
        match self.next() {
            Some(FormatArg::Float(v)) => v,
            _ => 0.0,
        }
    }

    /// Take one character. Integer-class values narrow to a byte, the
    /// analogue of `%c` reading a char promoted through int. `None`
    /// means the directive renders zero-width content.
    pub fn take_char(&mut self) -> Option<u8> {
        match self.next() {
            Some(FormatArg::Char(c)) => Some(c),
            Some(FormatArg::Int(v)) => Some(v as u8),
            Some(FormatArg::Uint(v)) => Some(v as u8),
            _ => None,
        }
    }

    /// Take a string. `None` (absent or mismatched) renders as the
    /// literal `(null)`.
    pub fn take_str(&mut self) -> Option<&'a [u8]> {
        match self.next() {
            Some(FormatArg::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// Take an address for `p`. Integer-class values reinterpret.
    pub fn take_pointer(&mut self) -> u64 {
        match self.next() {
            Some(FormatArg::Pointer(p)) => p as u64,
            Some(FormatArg::Uint(v)) => v,
            Some(FormatArg::Int(v)) => v as u64,
            Some(FormatArg::Char(c)) => u64::from(c),
            _ => 0,
        }
    }

    /// Take the output slot for `n`. `None` means the store is skipped.
    pub fn take_out_slot(&mut self) -> Option<&'a Cell<usize>> {
        match self.next() {
            Some(FormatArg::OutSlot(slot)) => Some(slot),
            _ => None,
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
