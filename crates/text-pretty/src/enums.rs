//! Enumeration label resolution, including bit-flag inference.
//!
//! A value first resolves against every mapping whose ranges contain it. When
//! nothing matches, the value is tried as a set of flags: each set bit must
//! equal the single value of at least one mapping. A single unexplained bit
//! makes the whole value unknown; there are no partial flag renderings.

use trace_ir::{EnumerationClass, Mapping};

use crate::{ColorTheme, escape::push_escaped};

/// Integer types usable as enumeration values.
pub trait EnumValue: Copy + PartialOrd {
    /// Whether the value may be read as a non-empty set of flags.
    ///
    /// Zero never is (a label for it would have matched directly), and
    /// neither is a negative signed value.
    fn is_flag_candidate(self) -> bool;

    /// Whether bit `bit` is set.
    fn bit_is_set(self, bit: u32) -> bool;

    /// The value with only bit `bit` set.
    fn from_bit(bit: u32) -> Self;
}

impl EnumValue for u64 {
    fn is_flag_candidate(self) -> bool {
        self != 0
    }

    fn bit_is_set(self, bit: u32) -> bool {
        (self >> bit) & 1 == 1
    }

    fn from_bit(bit: u32) -> Self {
        1 << bit
    }
}

impl EnumValue for i64 {
    fn is_flag_candidate(self) -> bool {
        self > 0
    }

    fn bit_is_set(self, bit: u32) -> bool {
        (self as u64 >> bit) & 1 == 1
    }

    fn from_bit(bit: u32) -> Self {
        (1u64 << bit) as Self
    }
}

/// Outcome of resolving an enumeration value to labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Labels<'a> {
    /// Labels of every mapping containing the value, in declaration order.
    Direct(Vec<&'a str>),
    /// Labels per set bit, in ascending bit order; every entry is non-empty.
    Flags(Vec<Vec<&'a str>>),
    /// Neither a direct match nor a complete flag decomposition.
    Unknown,
}

/// Resolve `value` against the mappings of `class`.
pub fn labels_for<T: EnumValue>(class: &EnumerationClass<T>, value: T) -> Labels<'_> {
    let direct: Vec<&str> = class
        .mappings
        .iter()
        .filter(|m| m.covers(value))
        .map(|m| m.label.as_str())
        .collect();
    if !direct.is_empty() {
        return Labels::Direct(direct);
    }
    bit_flags(&class.mappings, class.integer.width, value)
}

/// Try to explain every set bit of `value` with single-value mappings.
fn bit_flags<T: EnumValue>(mappings: &[Mapping<T>], width: u32, value: T) -> Labels<'_> {
    if !value.is_flag_candidate() {
        return Labels::Unknown;
    }
    let mut flags = Vec::new();
    for bit in 0..width.min(64) {
        if !value.bit_is_set(bit) {
            continue;
        }
        let flag = T::from_bit(bit);
        let labels: Vec<&str> = mappings
            .iter()
            .filter(|m| m.has_single_value(flag))
            .map(|m| m.label.as_str())
            .collect();
        if labels.is_empty() {
            return Labels::Unknown;
        }
        flags.push(labels);
    }
    if flags.is_empty() {
        // Only bits beyond the class width were set.
        return Labels::Unknown;
    }
    Labels::Flags(flags)
}

/// Append the rendering of resolved labels.
///
/// One label renders as `"label"`, several as `{ "a", "b" }`, flag sets join
/// their per-bit renderings with ` | `, and unknown values render
/// `<unknown>`.
pub fn push_labels(buf: &mut String, theme: &ColorTheme, labels: &Labels<'_>) {
    match labels {
        Labels::Direct(set) => push_label_set(buf, theme, set),
        Labels::Flags(bits) => {
            for (i, set) in bits.iter().filter(|s| !s.is_empty()).enumerate() {
                if i != 0 {
                    buf.push_str(" | ");
                }
                push_label_set(buf, theme, set);
            }
        }
        Labels::Unknown => {
            buf.push_str(&theme.unknown);
            buf.push_str("<unknown>");
            buf.push_str(&theme.reset);
        }
    }
}

/// Append one label, or several wrapped in braces.
fn push_label_set(buf: &mut String, theme: &ColorTheme, set: &[&str]) {
    let braces = set.len() > 1;
    if braces {
        buf.push_str("{ ");
    }
    for (i, label) in set.iter().enumerate() {
        if i != 0 {
            buf.push_str(", ");
        }
        buf.push_str(&theme.enum_label);
        push_escaped(buf, label);
        buf.push_str(&theme.reset);
    }
    if braces {
        buf.push_str(" }");
    }
}
