//! General-format rendering of real numbers (C's `%g`).

use std::fmt::Write as _;

/// Significant digits of the general format.
const PRECISION: i32 = 6;

/// Append `v` the way C's `%g` renders it.
///
/// Six significant digits, trailing zeros dropped; exponent form when the
/// decimal exponent is below -4 or at least the precision.
pub fn push_general(buf: &mut String, v: f64) {
    if v.is_nan() {
        buf.push_str(if v.is_sign_negative() { "-nan" } else { "nan" });
        return;
    }
    if v.is_infinite() {
        buf.push_str(if v.is_sign_negative() { "-inf" } else { "inf" });
        return;
    }

    // Round to the target precision first; the exponent of the rounded value
    // decides the notation.
    let sci = format!("{:.*e}", (PRECISION - 1) as usize, v);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or_default();

    if exp < -4 || exp >= PRECISION {
        buf.push_str(trim_fraction(mantissa));
        let sign = if exp < 0 { '-' } else { '+' };
        let _ignored = write!(buf, "e{sign}{:02}", exp.unsigned_abs());
    } else {
        let decimals = (PRECISION - 1 - exp) as usize;
        let fixed = format!("{v:.decimals$}");
        buf.push_str(trim_fraction(&fixed));
    }
}

/// Drop trailing zeros of a fractional part, and the point if nothing is left.
fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
