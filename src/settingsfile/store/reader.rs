use crate::model::LineRead;
use std::io::{self, BufRead, BufReader, Read};

/// Byte and line assembly over a medium reader.
pub struct SettingsReader<R: Read> {
    inner: BufReader<R>,
}

impl<R: Read> SettingsReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            inner: BufReader::new(reader),
        }
    }

    /// Next byte, or `None` once the content is exhausted. Never consumes
    /// past the end.
    pub fn read_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            let byte = match self.inner.fill_buf() {
                Ok([]) => return Ok(None),
                Ok(buf) => buf[0],
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            self.inner.consume(1);
            return Ok(Some(byte));
        }
    }

    /// Clears `buffer`, then fills it up to and including the next `'\n'`.
    pub fn read_line(&mut self, buffer: &mut Vec<u8>) -> io::Result<LineRead> {
        buffer.clear();
        self.inner.read_until(b'\n', buffer)?;
        if buffer.last() == Some(&b'\n') {
            Ok(LineRead::Complete)
        } else {
            Ok(LineRead::EndOfFile)
        }
    }
}
