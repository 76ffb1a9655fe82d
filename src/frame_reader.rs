//! First-event frame reading.
//!
//! [`FrameAccumulator`] is the whole state machine: feed it one [`FrameLine`] at a time and it hands back an
//! [`Event`] once a blank line closes a frame that has both an id and at least one data fragment. A blank line that
//! closes anything less resets the accumulator instead.
//!
//! [`blocking::FrameReader`] drives it over a [`BufRead`][std::io::BufRead], [`stream::FrameStream`] over an async
//! stream of byte chunks.

use bytes_utils::{Str, StrMut};

use crate::{
    constants::{BOM, DATA_SEPARATOR, EMPTY_STR},
    event::Event,
    parser::FrameLine,
};

pub mod blocking;
pub mod stream;

pub use blocking::FrameReader;
pub use stream::{FirstEvent, FrameStream};

/// Pending `id` and `data` of the frame currently being read
#[derive(Debug, Clone)]
pub struct FrameAccumulator {
    id: Str,
    data: StrMut,
    fragments: usize,
}

impl Default for FrameAccumulator {
    fn default() -> Self {
        Self {
            id: EMPTY_STR,
            data: StrMut::new(),
            fragments: 0,
        }
    }
}

impl FrameAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one line. Returns the finished event when `line` completes a frame.
    pub fn step(&mut self, line: FrameLine<'_>) -> Option<Event> {
        match line {
            FrameLine::Blank => {
                let Self {
                    id,
                    data,
                    fragments,
                } = core::mem::take(self);

                if id.is_empty() || fragments == 0 {
                    tracing::trace!(
                        has_id = !id.is_empty(),
                        fragments,
                        "incomplete frame, resetting"
                    );
                    return None;
                }

                Some(Event {
                    id,
                    data: data.freeze(),
                })
            }
            FrameLine::Id(id) => {
                let mut owned = StrMut::new();
                owned.push_str(id);
                self.id = owned.freeze();
                None
            }
            FrameLine::Data(fragment) => {
                if self.fragments > 0 {
                    self.data.push(DATA_SEPARATOR);
                }
                self.data.push_str(fragment);
                self.fragments += 1;
                None
            }
            FrameLine::Comment(comment) => {
                tracing::trace!(comment, "ignoring comment line");
                None
            }
            FrameLine::Other(line) => {
                tracing::trace!(line, "ignoring unrecognised line");
                None
            }
        }
    }

    /// The id seen so far in the current frame, empty if none
    pub fn pending_id(&self) -> &str {
        &self.id
    }

    /// Number of `data: ` lines seen so far in the current frame
    pub fn pending_fragments(&self) -> usize {
        self.fragments
    }

    /// True if nothing has been accumulated since the last emission or reset
    pub fn is_empty(&self) -> bool {
        self.id.is_empty() && self.fragments == 0
    }
}

/// Whether the stream had a byte order mark in front of it. [None] while there aren't enough bytes to tell.
fn starts_with_bom(buf: &[u8]) -> Option<bool> {
    if buf.len() >= BOM.len() {
        Some(buf.starts_with(BOM))
    } else if BOM.starts_with(buf) {
        None
    } else {
        Some(false)
    }
}
