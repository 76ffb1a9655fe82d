use std::io::{self, BufRead, BufReader, Read};

use crate::{
    constants::{BOM, LF},
    errors::ReadError,
    event::Event,
    frame_reader::FrameAccumulator,
    parser::{parse_line, trim_eol},
};

/// Reads [`Event`]s line by line out of a [`BufRead`], blocking on the reader.
///
/// Nothing past the line that completes an event is consumed, so after [`FrameReader::next_event`] returns the rest
/// of the input is still in the reader.
#[derive(Debug)]
pub struct FrameReader<R> {
    reader: R,
    line: Vec<u8>,
    accumulator: FrameAccumulator,
    at_start: bool,
}

impl<R: Read> FrameReader<BufReader<R>> {
    /// Wraps an unbuffered reader, e.g. a blocking HTTP response body
    pub fn from_read(reader: R) -> Self {
        Self::new(BufReader::new(reader))
    }
}

impl<R: BufRead> FrameReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
            accumulator: FrameAccumulator::new(),
            at_start: true,
        }
    }

    /// Reads until the next complete event. `Ok(None)` means the input ended first; any partial frame is dropped.
    pub fn next_event(&mut self) -> Result<Option<Event>, ReadError<io::Error>> {
        loop {
            self.line.clear();
            let read = self
                .reader
                .read_until(LF, &mut self.line)
                .map_err(ReadError::Transport)?;

            if read == 0 {
                if !self.accumulator.is_empty() {
                    tracing::trace!("stream ended inside a frame, discarding it");
                }
                self.accumulator = FrameAccumulator::new();
                return Ok(None);
            }

            let mut bytes = trim_eol(&self.line);
            if self.at_start {
                self.at_start = false;
                bytes = bytes.strip_prefix(BOM.as_slice()).unwrap_or(bytes);
            }

            let line = core::str::from_utf8(bytes)?;
            if let Some(event) = self.accumulator.step(parse_line(line)) {
                tracing::debug!(id = %event.id, "received event");
                return Ok(Some(event));
            }
        }
    }

    /// Reads the first complete event and releases the reader, whatever the outcome.
    pub fn first_event(mut self) -> Result<Event, ReadError<io::Error>> {
        self.next_event()?.ok_or(ReadError::StreamClosed)
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Gives back the reader, positioned right after the last line that was read
    pub fn into_inner(self) -> R {
        self.reader
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn first(input: &'static [u8]) -> Result<Event, ReadError<io::Error>> {
        FrameReader::new(Cursor::new(input)).first_event()
    }

    #[test]
    fn single_frame() {
        assert_eq!(first(b"id: X\ndata: Y\n\n").unwrap(), Event::new("X", "Y"));
    }

    #[test]
    fn multi_line_data() {
        assert_eq!(
            first(b"id: X\ndata: A\ndata: B\n\n").unwrap(),
            Event::new("X", "A\nB")
        );
    }

    #[test]
    fn last_id_wins() {
        assert_eq!(
            first(b"id: X1\nid: X2\ndata: Y\n\n").unwrap(),
            Event::new("X2", "Y")
        );
    }

    #[test]
    fn partial_frame_then_reset() {
        assert!(first(b"id: X\n\ndata: Y\n\n").unwrap_err().is_stream_closed());
        assert_eq!(
            first(b"id: X\n\ndata: Y\n\nid: Z\ndata: W\n\n").unwrap(),
            Event::new("Z", "W")
        );
    }

    #[test]
    fn ignored_fields() {
        assert_eq!(
            first(b"event: ping\nid: X\ndata: Y\n\n").unwrap(),
            Event::new("X", "Y")
        );
        assert_eq!(
            first(b": connected sub-1\n\nretry: 1000\nid:nospace\nid: X\ndata:nospace\ndata: Y\n\n")
                .unwrap(),
            Event::new("X", "Y")
        );
    }

    #[test]
    fn empty_stream() {
        assert!(matches!(first(b""), Err(ReadError::StreamClosed)));
    }

    #[test]
    fn stream_ending_mid_frame() {
        assert!(first(b"id: X\ndata: Y\n").unwrap_err().is_stream_closed());
        assert!(first(b"id: X\ndata: Y").unwrap_err().is_stream_closed());
    }

    #[test]
    fn crlf_line_endings() {
        assert_eq!(
            first(b"id: X\r\ndata: A\r\ndata: B\r\n\r\n").unwrap(),
            Event::new("X", "A\nB")
        );
    }

    #[test]
    fn leading_bom_is_skipped() {
        assert_eq!(
            first(b"\xEF\xBB\xBFid: X\ndata: Y\n\n").unwrap(),
            Event::new("X", "Y")
        );
    }

    #[test]
    fn bom_only_skipped_at_start() {
        let err = first(b"id: X\n\xEF\xBB\xBFdata: Y\n\n").unwrap_err();
        assert!(err.is_stream_closed());
    }

    #[test]
    fn stops_after_first_event() {
        let input: &[u8] = b"id: 1\ndata: one\n\nid: 2\ndata: two\n\n";
        let mut reader = FrameReader::new(Cursor::new(input));
        assert_eq!(reader.next_event().unwrap(), Some(Event::new("1", "one")));

        let cursor = reader.into_inner();
        assert_eq!(cursor.position(), 17);
        assert_eq!(&cursor.get_ref()[17..], b"id: 2\ndata: two\n\n");
    }

    #[test]
    fn next_event_keeps_reading() {
        let mut reader = FrameReader::new(Cursor::new(
            b"id: 1\ndata: one\n\n: keepalive\n\nid: 2\ndata: two\n\n".as_slice(),
        ));
        assert_eq!(reader.next_event().unwrap(), Some(Event::new("1", "one")));
        assert_eq!(reader.next_event().unwrap(), Some(Event::new("2", "two")));
        assert_eq!(reader.next_event().unwrap(), None);
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        assert!(matches!(
            first(b"id: X\ndata: \xFF\xFE\n\n"),
            Err(ReadError::Utf8Error(_))
        ));
    }

    #[test]
    fn multibyte_data() {
        assert_eq!(
            first("id: \u{1F431}\ndata: caf\u{e9}\n\n".as_bytes()).unwrap(),
            Event::new("\u{1F431}", "caf\u{e9}")
        );
    }

    struct FailAfter {
        data: Cursor<&'static [u8]>,
    }

    impl Read for FailAfter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.data.read(buf)? {
                0 => Err(io::Error::new(
                    io::ErrorKind::ConnectionReset,
                    "connection reset",
                )),
                n => Ok(n),
            }
        }
    }

    #[test]
    fn io_errors_propagate() {
        let reader = FrameReader::from_read(FailAfter {
            data: Cursor::new(&b"id: X\ndata: Y\n"[..]),
        });
        match reader.first_event() {
            Err(ReadError::Transport(e)) => assert_eq!(e.kind(), io::ErrorKind::ConnectionReset),
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[test]
    fn io_error_after_event_is_never_seen() {
        let reader = FrameReader::from_read(FailAfter {
            data: Cursor::new(&b"id: X\ndata: Y\n\n"[..]),
        });
        assert_eq!(reader.first_event().unwrap(), Event::new("X", "Y"));
    }
}
