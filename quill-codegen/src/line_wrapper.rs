//! Column-aware sink that decides lazily how soft breaks render.

use std::fmt;

/// How a pending soft break is finally written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flush {
    /// A newline followed by the break's indentation.
    Wrap,
    /// A single space.
    Space,
    /// Nothing at all.
    Empty,
}

/// Buffers text after a soft break until it knows whether the break fits.
///
/// Text appended after a [`wrapping_space`](Self::wrapping_space) or
/// [`zero_width_space`](Self::zero_width_space) is held back while the line
/// still fits in `column_limit`. Once it would overflow, or a newline
/// arrives past the limit, the break becomes a newline plus indentation.
///
/// ```
/// use quill_codegen::LineWrapper;
///
/// let mut out = String::new();
/// let mut wrapper = LineWrapper::new(&mut out, "  ", "\n", 10);
/// wrapper.append("call(").unwrap();
/// wrapper.wrapping_space(2).unwrap();
/// wrapper.append("argument)").unwrap();
/// wrapper.close().unwrap();
/// assert_eq!(out, "call(\n    argument)");
/// ```
#[derive(Debug)]
pub struct LineWrapper<W: fmt::Write> {
    out: W,
    indent: String,
    newline: String,
    column_limit: usize,
    /// Characters since the last newline, buffered text included.
    column: usize,
    buffer: String,
    next_flush: Option<Flush>,
    indent_level: usize,
}

impl<W: fmt::Write> LineWrapper<W> {
    pub fn new(out: W, indent: &str, newline: &str, column_limit: usize) -> Self {
        Self {
            out,
            indent: indent.to_string(),
            newline: newline.to_string(),
            column_limit,
            column: 0,
            buffer: String::new(),
            next_flush: None,
            indent_level: 0,
        }
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Emit `text`, which may contain newlines.
    pub fn append(&mut self, text: &str) -> fmt::Result {
        if let Some(pending) = self.next_flush {
            let next_newline = text.find('\n').map(|index| char_len(&text[..index]));
            let length = char_len(text);
            match next_newline {
                None if self.column.saturating_add(length) <= self.column_limit => {
                    self.buffer.push_str(text);
                    self.column += length;
                    return Ok(());
                }
                None => self.flush(Flush::Wrap)?,
                Some(newline) if self.column.saturating_add(newline) > self.column_limit => {
                    self.flush(Flush::Wrap)?
                }
                Some(_) => self.flush(pending)?,
            }
        }

        self.write_out(text)?;
        self.column = match text.rfind('\n') {
            Some(index) => char_len(&text[index + 1..]),
            None => self.column + char_len(text),
        };
        Ok(())
    }

    /// A break that renders as a space, or a newline when the line is full.
    pub fn wrapping_space(&mut self, indent_level: usize) -> fmt::Result {
        if let Some(pending) = self.next_flush {
            self.flush(pending)?;
        }
        self.column += 1;
        self.next_flush = Some(Flush::Space);
        self.indent_level = indent_level;
        Ok(())
    }

    /// A break that renders as nothing, or a newline when the line is full.
    pub fn zero_width_space(&mut self, indent_level: usize) -> fmt::Result {
        if self.column == 0 {
            return Ok(());
        }
        if let Some(pending) = self.next_flush {
            self.flush(pending)?;
        }
        self.next_flush = Some(Flush::Empty);
        self.indent_level = indent_level;
        Ok(())
    }

    /// Resolve any pending break and hand back the sink.
    pub fn close(mut self) -> Result<W, fmt::Error> {
        if let Some(pending) = self.next_flush {
            self.flush(pending)?;
        }
        Ok(self.out)
    }

    fn flush(&mut self, flush: Flush) -> fmt::Result {
        match flush {
            Flush::Wrap => {
                self.out.write_str(&self.newline)?;
                for _ in 0..self.indent_level {
                    self.out.write_str(&self.indent)?;
                }
                self.column = self.indent_level * char_len(&self.indent) + char_len(&self.buffer);
                tracing::trace!(column = self.column, "wrapped line");
            }
            Flush::Space => self.out.write_char(' ')?,
            Flush::Empty => {}
        }
        let buffer = std::mem::take(&mut self.buffer);
        self.write_out(&buffer)?;
        self.next_flush = None;
        Ok(())
    }

    fn write_out(&mut self, text: &str) -> fmt::Result {
        if self.newline == "\n" {
            return self.out.write_str(text);
        }
        for (index, line) in text.split('\n').enumerate() {
            if index > 0 {
                self.out.write_str(&self.newline)?;
            }
            self.out.write_str(line)?;
        }
        Ok(())
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrapper(out: &mut String, limit: usize) -> LineWrapper<&mut String> {
        LineWrapper::new(out, "  ", "\n", limit)
    }

    #[test]
    fn test_space_when_text_fits() {
        let mut out = String::new();
        let mut w = wrapper(&mut out, 20);
        w.append("a,").unwrap();
        w.wrapping_space(2).unwrap();
        w.append("b").unwrap();
        assert_eq!(w.column(), 4);
        w.close().unwrap();
        assert_eq!(out, "a, b");
    }

    #[test]
    fn test_wrap_when_text_overflows() {
        let mut out = String::new();
        let mut w = wrapper(&mut out, 10);
        w.append("0123456789").unwrap();
        w.wrapping_space(3).unwrap();
        w.append("abc").unwrap();
        assert_eq!(w.column(), 3 * 2 + 3);
        w.close().unwrap();
        assert_eq!(out, "0123456789\n      abc");
    }

    #[test]
    fn test_zero_width_space() {
        let mut out = String::new();
        let mut w = wrapper(&mut out, 6);
        w.append("a.").unwrap();
        w.zero_width_space(1).unwrap();
        w.append("b").unwrap();
        w.zero_width_space(1).unwrap();
        w.append("cdefgh").unwrap();
        w.close().unwrap();
        assert_eq!(out, "a.b\n  cdefgh");
    }

    #[test]
    fn test_zero_width_space_ignored_at_line_start() {
        let mut out = String::new();
        let mut w = wrapper(&mut out, 1);
        w.zero_width_space(4).unwrap();
        w.append("long text").unwrap();
        w.close().unwrap();
        assert_eq!(out, "long text");
    }

    #[test]
    fn test_newline_within_limit_keeps_break() {
        let mut out = String::new();
        let mut w = wrapper(&mut out, 10);
        w.append("a").unwrap();
        w.wrapping_space(1).unwrap();
        w.append("b\nlonger than the limit").unwrap();
        w.close().unwrap();
        assert_eq!(out, "a b\nlonger than the limit");
    }

    #[test]
    fn test_newline_past_limit_wraps() {
        let mut out = String::new();
        let mut w = wrapper(&mut out, 5);
        w.append("abcd").unwrap();
        w.wrapping_space(1).unwrap();
        w.append("efgh\n").unwrap();
        assert_eq!(w.column(), 0);
        w.close().unwrap();
        assert_eq!(out, "abcd\n  efgh\n");
    }

    #[test]
    fn test_buffered_text_is_flushed_on_close() {
        let mut out = String::new();
        let mut w = wrapper(&mut out, 100);
        w.append("x").unwrap();
        w.wrapping_space(1).unwrap();
        w.append("y").unwrap();
        w.wrapping_space(1).unwrap();
        w.append("z").unwrap();
        w.close().unwrap();
        assert_eq!(out, "x y z");
    }

    #[test]
    fn test_unbounded_limit_never_wraps() {
        let mut out = String::new();
        let mut w = wrapper(&mut out, usize::MAX);
        for _ in 0..50 {
            w.append("segment").unwrap();
            w.wrapping_space(1).unwrap();
        }
        w.append("end").unwrap();
        w.close().unwrap();
        assert!(!out.contains('\n'));
    }

    #[test]
    fn test_custom_newline() {
        let mut out = String::new();
        let mut w = LineWrapper::new(&mut out, "  ", "\r\n", 3);
        w.append("a\nb").unwrap();
        w.wrapping_space(1).unwrap();
        w.append("cde").unwrap();
        w.close().unwrap();
        assert_eq!(out, "a\r\nb\r\n  cde");
    }
}
