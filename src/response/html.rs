//! A tiny incremental HTML writer.
//!
//! Text is always escaped; tag names are written as given and must come
//! from trusted code. Nothing checks that tags are balanced.

use std::io::{self, Write};

pub struct HtmlWriter<W: Write> {
    out: W,
}

impl<W: Write> HtmlWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn start_tag(&mut self, name: &str) -> io::Result<&mut Self> {
        write!(self.out, "<{name}>")?;
        Ok(self)
    }

    pub fn end_tag(&mut self, name: &str) -> io::Result<&mut Self> {
        write!(self.out, "</{name}>")?;
        Ok(self)
    }

    /// Writes `text` with HTML metacharacters escaped.
    pub fn text(&mut self, text: &str) -> io::Result<&mut Self> {
        self.out.write_all(escape(text).as_bytes())?;
        Ok(self)
    }

    pub fn nl(&mut self) -> io::Result<&mut Self> {
        self.out.write_all(b"\n")?;
        Ok(self)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// HTML-escape a string for use as element text or an attribute value.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
