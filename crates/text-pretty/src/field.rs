//! Recursive rendering of field trees.

use std::fmt::Write as _;

use trace_ir::{Enumeration, Field, IntegerClass, Member};
use tracing::error;

use crate::{
    ColorTheme, Error, Result,
    color::push_styled,
    enums::{EnumValue, labels_for, push_labels},
    escape::push_escaped,
    integer::{IntValue, push_integer},
    real::push_general,
};

/// Renders one field tree into a shared buffer.
///
/// The printer only appends; on error the buffer holds a partial rendering
/// that the caller must discard.
#[derive(Debug)]
pub struct FieldPrinter<'a> {
    /// Destination buffer.
    buf: &'a mut String,
    /// Styles applied to values and names.
    theme: &'a ColorTheme,
    /// Current nesting depth inside compound fields.
    depth: usize,
}

impl<'a> FieldPrinter<'a> {
    /// A printer appending to `buf` with `theme`.
    pub const fn new(buf: &'a mut String, theme: &'a ColorTheme) -> Self {
        Self {
            buf,
            theme,
            depth: 0,
        }
    }

    /// Nesting depth; zero between top-level renders.
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Append `field`; with `print_names`, structure members and array
    /// elements are prefixed with their name or index.
    pub fn render(&mut self, field: &Field, print_names: bool) -> Result<()> {
        match field {
            Field::Bool(v) => {
                let text = if *v { "true" } else { "false" };
                push_styled(self.buf, self.theme, &self.theme.number, text);
            }
            Field::BitArray(bits) => {
                self.buf.push_str(&self.theme.number);
                let _ignored = write!(self.buf, "0x{:X}", bits.value);
                self.buf.push_str(&self.theme.reset);
            }
            Field::UnsignedInteger(int) => self.integer(int.class, int.value.into())?,
            Field::SignedInteger(int) => self.integer(int.class, int.value.into())?,
            Field::UnsignedEnumeration(e) => self.enumeration(e)?,
            Field::SignedEnumeration(e) => self.enumeration(e)?,
            Field::Real32(v) => self.real(f64::from(*v)),
            Field::Real64(v) => self.real(*v),
            Field::String(s) => {
                let s = s.as_deref().ok_or(Error::MissingValue(field.kind_name()))?;
                self.buf.push_str(&self.theme.string);
                push_escaped(self.buf, s);
                self.buf.push_str(&self.theme.reset);
            }
            Field::Structure(members) => self.nested(|p| p.structure(members, print_names))?,
            Field::StaticArray(items) | Field::DynamicArray(items) => {
                self.nested(|p| p.array(items, print_names))?;
            }
            Field::Option(Some(inner)) | Field::Variant(inner) => {
                self.buf.push_str("{ ");
                self.nested(|p| p.render(inner, print_names))?;
                self.buf.push_str(" }");
            }
            Field::Option(None) => self.buf.push_str("<none>"),
            Field::Opaque { class_type } => {
                error!(class_type, "unknown field class type");
                return Err(Error::UnsupportedFieldClass(*class_type));
            }
        }
        Ok(())
    }

    /// Run `f` one level deeper.
    fn nested(&mut self, f: impl FnOnce(&mut Self) -> Result<()>) -> Result<()> {
        self.depth += 1;
        let res = f(self);
        self.depth -= 1;
        res
    }

    /// Append an integer in its class's base, in the number color.
    fn integer(&mut self, class: IntegerClass, value: IntValue) -> Result<()> {
        self.buf.push_str(&self.theme.number);
        let res = push_integer(self.buf, class, value);
        self.buf.push_str(&self.theme.reset);
        res
    }

    /// Append `( <labels> : container = <value> )`.
    fn enumeration<T>(&mut self, e: &Enumeration<T>) -> Result<()>
    where
        T: EnumValue + Into<IntValue>,
    {
        self.buf.push_str("( ");
        push_labels(self.buf, self.theme, &labels_for(&e.class, e.value));
        self.buf.push_str(" : container = ");
        self.integer(e.class.integer, e.value.into())?;
        self.buf.push_str(" )");
        Ok(())
    }

    /// Append a real in general format.
    fn real(&mut self, v: f64) {
        self.buf.push_str(&self.theme.number);
        push_general(self.buf, v);
        self.buf.push_str(&self.theme.reset);
    }

    /// Append `{ a = 1, b = 2 }`.
    fn structure(&mut self, members: &[Member], print_names: bool) -> Result<()> {
        self.buf.push('{');
        for (i, member) in members.iter().enumerate() {
            self.buf.push_str(if i == 0 { " " } else { ", " });
            if print_names {
                push_styled(self.buf, self.theme, &self.theme.field_name, &member.name);
                self.buf.push_str(" = ");
            }
            self.render(&member.field, print_names)?;
        }
        self.buf.push_str(" }");
        Ok(())
    }

    /// Append `[ a, b ]`, or `[ [0] = a, [1] = b ]` with names.
    fn array(&mut self, items: &[Field], print_names: bool) -> Result<()> {
        self.buf.push('[');
        for (i, item) in items.iter().enumerate() {
            self.buf.push_str(if i == 0 { " " } else { ", " });
            if print_names {
                let _ignored = write!(self.buf, "[{i}] = ");
            }
            self.render(item, print_names)?;
        }
        self.buf.push_str(" ]");
        Ok(())
    }
}
