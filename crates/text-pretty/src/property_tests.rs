//! Property tests over integer, escape, enumeration and timestamp rendering.

use proptest::prelude::*;
use trace_ir::{
    ClockClass, DisplayBase, Enumeration, EnumerationClass, Field, IntegerClass, IntegerRange,
    Mapping,
};

use crate::{
    ClockFormat, ColorTheme, FieldPrinter, IntValue, Labels, TimestampRenderer,
    WALL_DELTA_PLACEHOLDER, escape, labels_for, push_integer,
};

fn width_strategy() -> impl Strategy<Value = u32> {
    prop_oneof![Just(8u32), Just(16), Just(32), Just(64)]
}

fn base_strategy() -> impl Strategy<Value = DisplayBase> {
    prop_oneof![
        Just(DisplayBase::Binary),
        Just(DisplayBase::Octal),
        Just(DisplayBase::Decimal),
        Just(DisplayBase::Hexadecimal),
    ]
}

/// Parse an unsigned integer rendering back to its value.
fn parse_back(text: &str, base: DisplayBase) -> Option<u64> {
    let (digits, radix) = match base {
        DisplayBase::Binary => (text.strip_prefix("0b")?, 2),
        DisplayBase::Octal => (text.strip_prefix('0')?, 8),
        DisplayBase::Decimal => (text, 10),
        DisplayBase::Hexadecimal => (text.strip_prefix("0x")?, 16),
        DisplayBase::Other(_) => return None,
    };
    if digits.is_empty() {
        return Some(0);
    }
    u64::from_str_radix(digits, radix).ok()
}

fn ascii_string() -> impl Strategy<Value = String> {
    prop::collection::vec(0u8..0x80, 0..24)
        .prop_map(|bytes| bytes.into_iter().map(char::from).collect())
}

fn leaf_strategy() -> impl Strategy<Value = Field> {
    prop_oneof![
        any::<bool>().prop_map(Field::Bool),
        (any::<u64>(), width_strategy(), base_strategy())
            .prop_map(|(v, w, b)| Field::unsigned(v, w, b)),
        (any::<i64>(), base_strategy()).prop_map(|(v, b)| Field::signed(v, 64, b)),
        any::<f64>().prop_map(Field::Real64),
        ascii_string().prop_map(|s| Field::String(Some(s))),
    ]
}

fn field_strategy() -> impl Strategy<Value = Field> {
    leaf_strategy().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(("[a-z]{1,6}", inner.clone()), 0..4)
                .prop_map(|members| Field::structure(members)),
            prop::collection::vec(inner.clone(), 0..4).prop_map(Field::DynamicArray),
            prop::option::of(inner.clone()).prop_map(|f| Field::Option(f.map(Box::new))),
            inner.prop_map(|f| Field::Variant(Box::new(f))),
        ]
    })
}

proptest! {
    #[test]
    fn unsigned_integers_parse_back(
        raw in any::<u64>(),
        width in width_strategy(),
        base in base_strategy(),
    ) {
        let value = if width == 64 { raw } else { raw & ((1u64 << width) - 1) };
        let mut buf = String::new();
        push_integer(&mut buf, IntegerClass::new(width, base), IntValue::Unsigned(value)).unwrap();
        prop_assert_eq!(parse_back(&buf, base), Some(value), "{}", buf);
        if base == DisplayBase::Binary {
            prop_assert_eq!(buf.len() - 2, width as usize);
        }
    }

    #[test]
    fn escaped_ascii_is_printable(s in ascii_string()) {
        let out = escape(&s);
        prop_assert!(out.bytes().all(|b| (0x20..0x7f).contains(&b)), "{:?}", out);
        prop_assert!(out.starts_with('"') && out.ends_with('"'));
    }

    #[test]
    fn escaping_is_injective(a in ascii_string(), b in ascii_string()) {
        prop_assume!(a != b);
        prop_assert_ne!(escape(&a), escape(&b));
    }

    #[test]
    fn zero_and_negative_values_never_become_flags(
        labels in prop::collection::vec(0u32..8, 1..6),
        negative in i64::MIN..0,
    ) {
        let unsigned = EnumerationClass {
            integer: IntegerClass::new(8, DisplayBase::Decimal),
            mappings: labels
                .iter()
                .map(|bit| Mapping::new(format!("B{bit}"), vec![IntegerRange::single(1u64 << bit)]))
                .collect(),
        };
        prop_assert_eq!(labels_for(&unsigned, 0), Labels::Unknown);

        let signed = EnumerationClass {
            integer: IntegerClass::new(64, DisplayBase::Decimal),
            mappings: labels
                .iter()
                .map(|bit| Mapping::new(format!("B{bit}"), vec![IntegerRange::single(1i64 << bit)]))
                .collect(),
        };
        prop_assert_eq!(labels_for(&signed, -1), Labels::Unknown);
        prop_assert_eq!(labels_for(&signed, negative), Labels::Unknown);
    }

    #[test]
    fn first_delta_is_a_placeholder_and_second_is_exact(
        first in 0u64..(1 << 60),
        second in 0u64..(1 << 60),
    ) {
        let clock = ClockClass::default();
        let mut r = TimestampRenderer::new(ClockFormat { seconds: true, ..ClockFormat::default() });
        let mut buf = String::new();
        r.push_wall(&mut buf, Some(&clock.snapshot(first)), true);
        buf.clear();
        r.push_wall_delta(&mut buf);
        prop_assert_eq!(buf.as_str(), WALL_DELTA_PLACEHOLDER);

        r.push_wall(&mut buf, Some(&clock.snapshot(second)), true);
        prop_assert_eq!(r.wall_delta(), Some(second.wrapping_sub(first)));
    }

    #[test]
    fn rendering_is_repeatable(field in field_strategy(), names in any::<bool>()) {
        let theme = ColorTheme::plain();
        let mut first = String::new();
        let mut second = String::new();
        FieldPrinter::new(&mut first, &theme).render(&field, names).unwrap();
        FieldPrinter::new(&mut second, &theme).render(&field, names).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn enumeration_always_shows_the_container(value in any::<u64>()) {
        let field = Field::UnsignedEnumeration(Enumeration {
            class: EnumerationClass {
                integer: IntegerClass::new(64, DisplayBase::Decimal),
                mappings: vec![Mapping::new("ONE", vec![IntegerRange::single(1u64)])],
            },
            value,
        });
        let theme = ColorTheme::plain();
        let mut buf = String::new();
        FieldPrinter::new(&mut buf, &theme).render(&field, false).unwrap();
        let expected_tail = format!(" : container = {value} )");
        prop_assert!(buf.ends_with(&expected_tail), "{}", buf);
    }
}
