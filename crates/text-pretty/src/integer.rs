//! Integer rendering in the class's preferred display base.

use std::fmt::Write as _;

use trace_ir::{DisplayBase, IntegerClass};

use crate::{Error, Result};

/// Raw integer value of either signedness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntValue {
    /// Unsigned value.
    Unsigned(u64),
    /// Signed value.
    Signed(i64),
}

impl IntValue {
    /// Two's complement bit pattern of the value.
    pub const fn bits(self) -> u64 {
        match self {
            Self::Unsigned(v) => v,
            Self::Signed(v) => v as u64,
        }
    }

    /// Whether the value comes from a signed class.
    pub const fn is_signed(self) -> bool {
        matches!(self, Self::Signed(_))
    }
}

impl From<u64> for IntValue {
    fn from(v: u64) -> Self {
        Self::Unsigned(v)
    }
}

impl From<i64> for IntValue {
    fn from(v: i64) -> Self {
        Self::Signed(v)
    }
}

/// Mask keeping the low `bits` bits; 64 or more keeps everything.
const fn low_mask(bits: u32) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Append `value` rendered in `class`'s preferred base.
///
/// - binary: `0b` and exactly `width` digits, most significant first
/// - octal: leading `0`; signed values are first masked to `width` rounded up
///   to a multiple of 3
/// - decimal: plain, signed when the class is signed
/// - hexadecimal: `0x` and uppercase digits, masked to `width` rounded up to
///   a multiple of 4
pub fn push_integer(buf: &mut String, class: IntegerClass, value: IntValue) -> Result<()> {
    let width = class.width.min(64);
    match class.base {
        DisplayBase::Binary => {
            buf.push_str("0b");
            let mut v = value.bits().checked_shl(64 - width).unwrap_or(0);
            for _ in 0..width {
                buf.push(if v & (1 << 63) != 0 { '1' } else { '0' });
                v <<= 1;
            }
        }
        DisplayBase::Octal => {
            let mut v = value.bits();
            if value.is_signed() && width < 64 {
                let rounded = width.div_ceil(3) * 3;
                v &= low_mask(rounded);
            }
            let _ignored = write!(buf, "0{v:o}");
        }
        DisplayBase::Decimal => {
            let _ignored = match value {
                IntValue::Unsigned(v) => write!(buf, "{v}"),
                IntValue::Signed(v) => write!(buf, "{v}"),
            };
        }
        DisplayBase::Hexadecimal => {
            let mut v = value.bits();
            if width < 64 {
                v &= low_mask((width + 3) & !3);
            }
            let _ignored = write!(buf, "0x{v:X}");
        }
        DisplayBase::Other(radix) => return Err(Error::UnsupportedDisplayBase(radix)),
    }
    Ok(())
}
