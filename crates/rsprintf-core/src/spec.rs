//! Parsed form of one conversion directive.
//!
//! Grammar covered: `%[flags][width][.precision][length]conversion` with
//! flags `+ space - 0 #`, width/precision as literal digits or `*`, and
//! length modifiers `hh h l ll j z t L`.
//!
//! Reference: POSIX.1-2024 fprintf specification, ISO C11 7.21.6.1.
//!
//! A [`FormatSpec`] is built fresh for each directive, is immutable once
//! parsed, and is discarded after the directive renders. The conversion is
//! carried as the raw byte so that unrecognized letters can be echoed back
//! into the output instead of failing the call.

/// Flags parsed from a conversion specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormatFlags {
    /// `-` flag: left-justify within field width.
    pub left_justify: bool,
    /// `+` flag: always print a sign for signed conversions.
    pub force_sign: bool,
    /// ` ` flag: print a space before non-negative signed values.
    pub space_sign: bool,
    /// `#` flag: alternate form (`0x` prefix, forced decimal point).
    pub alt_form: bool,
    /// `0` flag: pad with zeros instead of spaces.
    pub zero_pad: bool,
}

/// Field width specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Width {
    /// No width specified.
    #[default]
    None,
    /// Fixed width from digits in the format string.
    Fixed(usize),
    /// Width from the next argument (`*`). A negative value means
    /// left-justify with the absolute value as the width.
    FromArg,
}

/// Precision specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precision {
    /// No precision specified.
    #[default]
    None,
    /// Fixed precision from digits in the format string. A bare `.`
    /// parses as `Fixed(0)`.
    Fixed(usize),
    /// Precision from the next argument (`.*`). A negative value means
    /// unspecified.
    FromArg,
}

/// Length modifier for integer conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthMod {
    /// No length modifier: `int`-sized.
    #[default]
    None,
    /// `hh`: char-sized.
    Hh,
    /// `h`: short-sized.
    H,
    /// `l`: long-sized.
    L,
    /// `ll`: long-long-sized.
    Ll,
    /// `z`: size_t-sized.
    Z,
    /// `t`: ptrdiff_t-sized.
    T,
    /// `j`: intmax_t-sized.
    J,
    /// `L`: long double (float conversions only; accepted, no effect).
    BigL,
}

impl LengthMod {
    /// Narrow a signed value to the width this modifier selects, then
    /// sign-extend back. Mirrors the truncation the C engine gets from
    /// reading a narrower type out of the variadic list.
    pub fn narrow_signed(self, value: i64) -> i64 {
        match self {
            LengthMod::Hh => value as i8 as i64,
            LengthMod::H => value as i16 as i64,
            LengthMod::None => value as i32 as i64,
            _ => value,
        }
    }

    /// Narrow an unsigned value to the width this modifier selects.
    pub fn narrow_unsigned(self, value: u64) -> u64 {
        match self {
            LengthMod::Hh => value as u8 as u64,
            LengthMod::H => value as u16 as u64,
            LengthMod::None => value as u32 as u64,
            _ => value,
        }
    }
}

/// A fully parsed conversion specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSpec {
    pub flags: FormatFlags,
    pub width: Width,
    pub precision: Precision,
    pub length: LengthMod,
    /// Conversion byte: `d`, `i`, `u`, `x`, `X`, `o`, `c`, `s`, `p`, `n`,
    /// `f`, `F`, `e`, `E`, `g`, `G`, `a`, `A`, `%`, or any other byte
    /// (rendered as a literal `%<byte>` passthrough).
    pub conversion: u8,
}

impl FormatSpec {
    /// Whether the conversion letter selects the uppercase rendering
    /// variant (`X`, `F`, `E`, `G`, `A`).
    pub fn uppercase(&self) -> bool {
        self.conversion.is_ascii_uppercase()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_flags_all_clear() {
        let flags = FormatFlags::default();
        assert!(!flags.left_justify);
        assert!(!flags.force_sign);
        assert!(!flags.space_sign);
        assert!(!flags.alt_form);
        assert!(!flags.zero_pad);
    }

    #[test]
    fn test_narrow_signed_hh_wraps_like_char() {
        assert_eq!(LengthMod::Hh.narrow_signed(300), 44);
        assert_eq!(LengthMod::Hh.narrow_signed(-1), -1);
        assert_eq!(LengthMod::Hh.narrow_signed(128), -128);
    }

    #[test]
    fn test_narrow_signed_h_wraps_like_short() {
        assert_eq!(LengthMod::H.narrow_signed(32767), 32767);
        assert_eq!(LengthMod::H.narrow_signed(32768), -32768);
    }

    #[test]
    fn test_narrow_signed_default_is_int_sized() {
        assert_eq!(LengthMod::None.narrow_signed(1 << 40), 0);
        assert_eq!(LengthMod::None.narrow_signed(-5), -5);
    }

    #[test]
    fn test_narrow_signed_wide_mods_pass_through() {
        for m in [LengthMod::L, LengthMod::Ll, LengthMod::J, LengthMod::Z, LengthMod::T] {
            assert_eq!(m.narrow_signed(i64::MIN), i64::MIN);
            assert_eq!(m.narrow_signed(i64::MAX), i64::MAX);
        }
    }

    #[test]
    fn test_narrow_unsigned_masks_low_bits() {
        assert_eq!(LengthMod::Hh.narrow_unsigned(0x1FF), 0xFF);
        assert_eq!(LengthMod::H.narrow_unsigned(0x1_FFFF), 0xFFFF);
        assert_eq!(LengthMod::None.narrow_unsigned(0x1_0000_0001), 1);
        assert_eq!(LengthMod::Ll.narrow_unsigned(u64::MAX), u64::MAX);
    }

    #[test]
    fn test_uppercase_from_conversion_byte() {
        let mut spec = FormatSpec {
            flags: FormatFlags::default(),
            width: Width::None,
            precision: Precision::None,
            length: LengthMod::None,
            conversion: b'x',
        };
        assert!(!spec.uppercase());
        spec.conversion = b'X';
        assert!(spec.uppercase());
    }
}
