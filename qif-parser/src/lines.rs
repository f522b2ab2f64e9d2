use std::io::{self, BufRead};

/// A line source with room for one line to be put back.
///
/// Lines come back without their `\n` / `\r\n` ending. Bytes that aren't
/// valid UTF-8 are replaced rather than failing the read, since QIF files
/// exported by older tools are often Latin-1.
///
/// Once the input is exhausted (or a read fails) the underlying stream is
/// dropped and every further read returns `None`.
#[derive(Debug)]
pub struct LineReader<R> {
    inner: Option<R>,
    pushed_back: Option<String>,
    lines_read: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        LineReader {
            inner: Some(inner),
            pushed_back: None,
            lines_read: 0,
            buf: Vec::new(),
        }
    }

    /// Next line, the pushed back one first.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        if let Some(line) = self.pushed_back.take() {
            return Ok(Some(line));
        }
        let inner = match self.inner.as_mut() {
            Some(inner) => inner,
            None => return Ok(None),
        };

        self.buf.clear();
        if inner.read_until(b'\n', &mut self.buf)? == 0 {
            self.close();
            return Ok(None);
        }
        self.lines_read += 1;

        let line = String::from_utf8_lossy(&self.buf);
        Ok(Some(line.trim_end_matches(&['\n', '\r'][..]).to_string()))
    }

    /// Offer `line` again to the next `read_line` call.
    ///
    /// Only one line can be held; pushing twice keeps the latest.
    pub fn push_back(&mut self, line: String) {
        self.pushed_back = Some(line);
    }

    /// Drop the underlying stream. A pushed back line is dropped too.
    pub fn close(&mut self) {
        self.inner = None;
        self.pushed_back = None;
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_none()
    }

    /// Lines taken from the underlying stream. Re-reading a pushed back line doesn't count.
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    pub fn get_ref(&self) -> Option<&R> {
        self.inner.as_ref()
    }
}
