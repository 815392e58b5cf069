//! Indenting writer for the tile definition format
//!
//! Emits one `(name value…)` line per field and tracks a stack of open list
//! names so that every `end_list` must name the innermost open list. Output
//! is laid out for reading back with [`crate::parser::Parser`], not for
//! byte-matching hand-written files.

mod options;
mod value;


use std::io::Write;

use crate::error::{Result, StructuralError};
pub use options::WriterOptions;
pub use value::{AsString, WriteValue, quote};

/// Writer over one output stream
#[derive(Debug)]
pub struct Writer<W: Write> {
    out: W,
    lists: Vec<String>,
    options: WriterOptions,
}

impl<W: Write> Writer<W> {
    pub fn new(out: W) -> Self {
        Self::with_options(out, WriterOptions::default())
    }

    pub fn with_options(out: W, options: WriterOptions) -> Self {
        Self {
            out,
            lists: Vec::new(),
            options,
        }
    }

    /// Number of lists currently open
    pub fn depth(&self) -> usize {
        self.lists.len()
    }

    /// Open a named list: `(name`
    pub fn start_list(&mut self, name: &str) -> Result<()> {
        self.line(&format!("({name}"))?;
        self.lists.push(name.to_owned());
        Ok(())
    }

    /// Close the innermost list, which must be called `name`
    pub fn end_list(&mut self, name: &str) -> Result<()> {
        match self.lists.last() {
            None => Err(StructuralError::NothingOpen {
                name: name.to_owned(),
            }
            .into()),
            Some(open) if open != name => Err(StructuralError::ListMismatch {
                expected: open.clone(),
                found: name.to_owned(),
            }
            .into()),
            Some(_) => {
                self.lists.pop();
                self.line(")")
            }
        }
    }

    /// Write `(name value)` on one line
    pub fn write<V: WriteValue + ?Sized>(&mut self, name: &str, value: &V) -> Result<()> {
        let mut text = String::new();
        value.write_value(&mut text)?;
        if text.is_empty() {
            self.line(&format!("({name})"))
        } else {
            self.line(&format!("({name} {text})"))
        }
    }

    /// Write pre-formatted text at the current indentation
    pub fn write_verbatim_line(&mut self, text: &str) -> Result<()> {
        self.line(text)
    }

    /// Write `text` as `;` comment lines
    pub fn write_comment(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return self.line(";");
        }
        for line in text.lines() {
            self.line(&format!("; {line}"))?;
        }
        Ok(())
    }

    /// End the write session and hand back the stream
    pub fn finish(mut self) -> Result<W> {
        if !self.lists.is_empty() {
            return Err(StructuralError::Unclosed { open: self.lists }.into());
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn line(&mut self, text: &str) -> Result<()> {
        let indent = self.options.indent(self.depth());
        writeln!(self.out, "{indent}{text}")?;
        Ok(())
    }
}
