//! Field values and the classes that describe them.
//!
//! A [`Field`] is a closed sum over every value shape a decoder can produce.
//! Leaf values that need schema information to be rendered (integers,
//! enumerations) carry their class inline, so a value and its class can never
//! disagree about the value's kind.

use serde::{Deserialize, Serialize};

/// Preferred base for displaying an integer value.
///
/// Serialized as the radix itself (`2`, `8`, `10`, `16`). Radices other than
/// these are preserved as [`DisplayBase::Other`] so that consumers can report
/// them instead of silently picking a base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum DisplayBase {
    /// Base 2.
    Binary,
    /// Base 8.
    Octal,
    /// Base 10.
    #[default]
    Decimal,
    /// Base 16.
    Hexadecimal,
    /// A radix the decoder reported but which has no display convention.
    Other(u32),
}

impl DisplayBase {
    /// The radix this base stands for.
    pub const fn radix(self) -> u32 {
        match self {
            Self::Binary => 2,
            Self::Octal => 8,
            Self::Decimal => 10,
            Self::Hexadecimal => 16,
            Self::Other(r) => r,
        }
    }
}

impl From<u32> for DisplayBase {
    fn from(radix: u32) -> Self {
        match radix {
            2 => Self::Binary,
            8 => Self::Octal,
            10 => Self::Decimal,
            16 => Self::Hexadecimal,
            other => Self::Other(other),
        }
    }
}

impl From<DisplayBase> for u32 {
    fn from(base: DisplayBase) -> Self {
        base.radix()
    }
}

/// Class of an integer field: its significant width and preferred base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntegerClass {
    /// Number of significant bits of the value (1 to 64).
    pub width: u32,
    /// Preferred display base.
    #[serde(default)]
    pub base: DisplayBase,
}

impl IntegerClass {
    /// Construct an integer class.
    pub const fn new(width: u32, base: DisplayBase) -> Self {
        Self { width, base }
    }
}

/// An integer value together with its class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Integer<T> {
    /// Class describing width and display base.
    pub class: IntegerClass,
    /// Raw value.
    pub value: T,
}

/// A closed integer range `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntegerRange<T> {
    /// Inclusive lower bound.
    pub lower: T,
    /// Inclusive upper bound.
    pub upper: T,
}

impl<T: Copy + PartialOrd> IntegerRange<T> {
    /// Construct a range; bounds are inclusive.
    pub const fn new(lower: T, upper: T) -> Self {
        Self { lower, upper }
    }

    /// Construct a range holding exactly `value`.
    pub const fn single(value: T) -> Self {
        Self {
            lower: value,
            upper: value,
        }
    }

    /// Whether `value` lies within the range.
    pub fn contains(&self, value: T) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// Whether the range holds exactly one value.
    pub fn is_single_value(&self) -> bool {
        self.lower == self.upper
    }
}

/// A labelled set of integer ranges within an enumeration class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Mapping<T> {
    /// Label shown for values covered by `ranges`.
    pub label: String,
    /// Ranges mapped to `label`.
    pub ranges: Vec<IntegerRange<T>>,
}

impl<T: Copy + PartialOrd> Mapping<T> {
    /// Construct a mapping from a label and its ranges.
    pub fn new(label: impl Into<String>, ranges: Vec<IntegerRange<T>>) -> Self {
        Self {
            label: label.into(),
            ranges,
        }
    }

    /// Whether any range of this mapping covers `value`.
    pub fn covers(&self, value: T) -> bool {
        self.ranges.iter().any(|r| r.contains(value))
    }

    /// Whether some single-value range of this mapping equals `value` exactly.
    pub fn has_single_value(&self, value: T) -> bool {
        self.ranges
            .iter()
            .any(|r| r.is_single_value() && r.lower == value)
    }
}

/// Class of an enumeration field: an integer class plus its mappings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumerationClass<T> {
    /// Underlying integer class (width and display base of the container).
    pub integer: IntegerClass,
    /// Mappings in declaration order.
    #[serde(default = "Vec::new")]
    pub mappings: Vec<Mapping<T>>,
}

/// An enumeration value together with its class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Enumeration<T> {
    /// Enumeration class, including the mappings.
    pub class: EnumerationClass<T>,
    /// Raw container value.
    pub value: T,
}

/// A fixed-width bit array, displayed as a plain hexadecimal integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BitArray {
    /// Raw bits.
    pub value: u64,
    /// Number of bits in the array.
    pub width: u32,
}

/// A named member of a structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Member {
    /// Member name from the structure class.
    pub name: String,
    /// Member value.
    pub field: Field,
}

impl Member {
    /// Construct a structure member.
    pub fn new(name: impl Into<String>, field: Field) -> Self {
        Self {
            name: name.into(),
            field,
        }
    }
}

/// A decoded field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Boolean.
    Bool(bool),
    /// Fixed-width bit array.
    BitArray(BitArray),
    /// Unsigned integer.
    UnsignedInteger(Integer<u64>),
    /// Signed integer.
    SignedInteger(Integer<i64>),
    /// Unsigned enumeration.
    UnsignedEnumeration(Enumeration<u64>),
    /// Signed enumeration.
    SignedEnumeration(Enumeration<i64>),
    /// Single-precision real.
    Real32(f32),
    /// Double-precision real.
    Real64(f64),
    /// String; `None` when the decoder could not produce the payload.
    String(Option<String>),
    /// Structure with ordered, named members.
    Structure(Vec<Member>),
    /// Array whose length is fixed by its class.
    StaticArray(Vec<Field>),
    /// Array whose length was read from the trace.
    DynamicArray(Vec<Field>),
    /// Optional value; `None` when the option is disabled.
    Option(Option<Box<Field>>),
    /// Variant, holding its selected option.
    Variant(Box<Field>),
    /// A field whose class type has no rendering; carries the raw type tag.
    Opaque {
        /// Raw class type tag reported by the decoder.
        class_type: u64,
    },
}

impl Field {
    /// Convenience constructor for an unsigned integer.
    pub const fn unsigned(value: u64, width: u32, base: DisplayBase) -> Self {
        Self::UnsignedInteger(Integer {
            class: IntegerClass::new(width, base),
            value,
        })
    }

    /// Convenience constructor for a signed integer.
    pub const fn signed(value: i64, width: u32, base: DisplayBase) -> Self {
        Self::SignedInteger(Integer {
            class: IntegerClass::new(width, base),
            value,
        })
    }

    /// Convenience constructor for a string.
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(Some(value.into()))
    }

    /// Convenience constructor for a structure from `(name, field)` pairs.
    pub fn structure<N: Into<String>>(members: impl IntoIterator<Item = (N, Self)>) -> Self {
        Self::Structure(
            members
                .into_iter()
                .map(|(name, field)| Member::new(name, field))
                .collect(),
        )
    }

    /// Short name of the value's kind, for diagnostics.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::BitArray(_) => "bit-array",
            Self::UnsignedInteger(_) => "unsigned-integer",
            Self::SignedInteger(_) => "signed-integer",
            Self::UnsignedEnumeration(_) => "unsigned-enumeration",
            Self::SignedEnumeration(_) => "signed-enumeration",
            Self::Real32(_) => "single-precision-real",
            Self::Real64(_) => "double-precision-real",
            Self::String(_) => "string",
            Self::Structure(_) => "structure",
            Self::StaticArray(_) => "static-array",
            Self::DynamicArray(_) => "dynamic-array",
            Self::Option(_) => "option",
            Self::Variant(_) => "variant",
            Self::Opaque { .. } => "opaque",
        }
    }
}
