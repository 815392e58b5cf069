//! Formatting of atom values

use std::fmt::Display;

use crate::error::{Error, Result};

/// A value that can follow the name in a `(name value…)` line
pub trait WriteValue {
    /// Append the textual form of this value to `out`. Fails for values
    /// the lexer could not read back.
    fn write_value(&self, out: &mut String) -> Result<()>;
}

/// Quotes any `Display` value as a string
#[derive(Debug, Clone, Copy)]
pub struct AsString<T>(pub T);

impl<T: Display> WriteValue for AsString<T> {
    fn write_value(&self, out: &mut String) -> Result<()> {
        quote_into(&self.0.to_string(), out);
        Ok(())
    }
}

impl WriteValue for str {
    fn write_value(&self, out: &mut String) -> Result<()> {
        quote_into(self, out);
        Ok(())
    }
}

impl WriteValue for String {
    fn write_value(&self, out: &mut String) -> Result<()> {
        quote_into(self, out);
        Ok(())
    }
}

impl WriteValue for bool {
    fn write_value(&self, out: &mut String) -> Result<()> {
        out.push_str(if *self { "#t" } else { "#f" });
        Ok(())
    }
}

macro_rules! integer_value {
    ($($ty:ty),*) => {
        $(
            impl WriteValue for $ty {
                fn write_value(&self, out: &mut String) -> Result<()> {
                    out.push_str(&self.to_string());
                    Ok(())
                }
            }
        )*
    };
}

integer_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl WriteValue for f32 {
    fn write_value(&self, out: &mut String) -> Result<()> {
        push_real(f64::from(*self), self.to_string(), out)
    }
}

impl WriteValue for f64 {
    fn write_value(&self, out: &mut String) -> Result<()> {
        push_real(*self, self.to_string(), out)
    }
}

impl<T: WriteValue> WriteValue for [T] {
    fn write_value(&self, out: &mut String) -> Result<()> {
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            value.write_value(out)?;
        }
        Ok(())
    }
}

impl<T: WriteValue> WriteValue for Vec<T> {
    fn write_value(&self, out: &mut String) -> Result<()> {
        self.as_slice().write_value(out)
    }
}

impl<T: WriteValue + ?Sized> WriteValue for &T {
    fn write_value(&self, out: &mut String) -> Result<()> {
        (**self).write_value(out)
    }
}

/// Reals keep a decimal point so they lex back as reals. Infinities and
/// NaN have no such form.
fn push_real(value: f64, mut text: String, out: &mut String) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::NonFiniteReal(value));
    }
    if !text.contains('.') {
        text.push_str(".0");
    }
    out.push_str(&text);
    Ok(())
}

/// Quote and escape a string so the lexer reads it back unchanged
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    quote_into(text, &mut out);
    out
}

fn quote_into(text: &str, out: &mut String) {
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
}
