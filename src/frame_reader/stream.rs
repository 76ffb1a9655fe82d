use core::{
    future::Future,
    pin::Pin,
    task::{Context, Poll, ready},
};

use bytes::{Buf, BytesMut};
use futures_core::Stream;

use crate::{
    constants::BOM,
    errors::ReadError,
    event::Event,
    frame_reader::{FrameAccumulator, starts_with_bom},
    parser::{find_eol, parse_line, trim_eol},
};

#[derive(Debug, Clone, Copy)]
enum FrameStreamState {
    NotStarted,
    Started,
    Terminated,
}

impl FrameStreamState {
    fn is_terminated(&self) -> bool {
        matches!(self, Self::Terminated)
    }

    fn is_not_started(&self) -> bool {
        matches!(self, Self::NotStarted)
    }
}

pin_project_lite::pin_project! {
    /// [`Stream`] that turns a stream of byte chunks into [`Event`]s.
    ///
    /// Chunks don't need to line up with lines, partial lines are buffered until their LF arrives.
    #[project = FrameStreamProjection]
    #[derive(Debug)]
    pub struct FrameStream<S> {
        #[pin]
        stream: S,
        buffer: BytesMut,
        accumulator: FrameAccumulator,
        state: FrameStreamState,
    }
}

impl<S> FrameStream<S> {
    /// Create a new [`FrameStream`] from a stream of [`AsRef<[u8]>`][AsRef]
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            buffer: BytesMut::new(),
            accumulator: FrameAccumulator::new(),
            state: FrameStreamState::NotStarted,
        }
    }

    /// Future resolving to the first event, or [`ReadError::StreamClosed`] if the stream ends without one.
    /// The inner stream is dropped along with the future.
    pub fn first_event(self) -> FirstEvent<S> {
        FirstEvent { stream: self }
    }

    /// Take the current buffer, useful if you want to check for leftovers
    pub fn take_buffer(self) -> BytesMut {
        self.buffer
    }
}

/// Pulls complete lines out of `buffer` until one of them finishes an event
fn parse_buffer<E>(
    buffer: &mut BytesMut,
    accumulator: &mut FrameAccumulator,
) -> Result<Option<Event>, ReadError<E>> {
    while let Some((line_end, rem_start)) = find_eol(buffer) {
        let line = buffer.split_to(line_end);
        buffer.advance(rem_start - line_end);

        if let Some(event) = accumulator.step(parse_line(core::str::from_utf8(&line)?)) {
            return Ok(Some(event));
        }
    }
    Ok(None)
}

macro_rules! try_parse_buffer {
    ($this:ident) => {
        match parse_buffer($this.buffer, $this.accumulator) {
            Ok(Some(event)) => {
                tracing::debug!(id = %event.id, "received event");
                return Poll::Ready(Some(Ok(event)));
            }
            Err(e) => return Poll::Ready(Some(Err(e))),
            Ok(None) => {}
        }
    };
}

impl<S, E, B> Stream for FrameStream<S>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
{
    type Item = Result<Event, ReadError<E>>;

    fn poll_next(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<<Self as Stream>::Item>> {
        let mut this = self.project();

        if this.state.is_terminated() {
            return Poll::Ready(None);
        }

        // a previous poll may have stopped at an event with more lines already buffered
        try_parse_buffer!(this);

        loop {
            let new_bytes = match ready!(this.stream.as_mut().poll_next(cx)) {
                Some(Ok(o)) => o,
                Some(Err(e)) => return Poll::Ready(Some(Err(ReadError::Transport(e)))),
                None => {
                    *this.state = FrameStreamState::Terminated;
                    // the last line may be missing its LF
                    if !this.buffer.is_empty() {
                        let rest = this.buffer.split();
                        let line = match core::str::from_utf8(trim_eol(&rest)) {
                            Ok(line) => line,
                            Err(e) => return Poll::Ready(Some(Err(ReadError::Utf8Error(e)))),
                        };
                        if let Some(event) = this.accumulator.step(parse_line(line)) {
                            return Poll::Ready(Some(Ok(event)));
                        }
                    }
                    if !this.accumulator.is_empty() {
                        tracing::trace!("stream ended inside a frame, discarding it");
                    }
                    return Poll::Ready(None);
                }
            };

            let new_bytes = new_bytes.as_ref();

            if new_bytes.is_empty() {
                continue;
            }

            this.buffer.extend_from_slice(new_bytes);

            if this.state.is_not_started() {
                match starts_with_bom(this.buffer) {
                    Some(true) => {
                        *this.state = FrameStreamState::Started;
                        this.buffer.advance(BOM.len());
                    }
                    Some(false) => *this.state = FrameStreamState::Started,
                    None => continue,
                }
            }

            try_parse_buffer!(this);
        }
    }
}

pin_project_lite::pin_project! {
    /// Future returned by [`FrameStream::first_event`]
    #[derive(Debug)]
    #[must_use = "futures do nothing unless you `.await` or poll them"]
    pub struct FirstEvent<S> {
        #[pin]
        stream: FrameStream<S>,
    }
}

impl<S, E, B> Future for FirstEvent<S>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
{
    type Output = Result<Event, ReadError<E>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        match ready!(this.stream.poll_next(cx)) {
            Some(result) => Poll::Ready(result),
            None => Poll::Ready(Err(ReadError::StreamClosed)),
        }
    }
}
