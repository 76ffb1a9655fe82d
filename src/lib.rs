//! Publish to and subscribe from an SSE gateway, reading the first event a subscription receives.
//!
//! The gateway speaks a small subset of
//! [Server-Sent Events](https://html.spec.whatwg.org/multipage/server-sent-events.html): every frame carries an
//! `id: ` line and one or more `data: ` lines, terminated by a blank line. `ssegate` provides:
//!
//! - [`FrameAccumulator`][frame_reader::FrameAccumulator] - the frame state machine, one line in, maybe an
//!   [`Event`] out.
//! - [`FrameReader`] - a blocking reader over any [`BufRead`][std::io::BufRead] that stops as soon as the first
//!   complete event has been read.
//! - [`FrameStream`] - the same over a [`Stream`][futures_core::Stream] of byte chunks, plus
//!   [`FrameStream::first_event`].
//! - [`GatewayClient`][client::GatewayClient] and [`AsyncGatewayClient`][client::AsyncGatewayClient] (requires
//!   `reqwest` feature) - publish, subscribe and health check over HTTP.
//! - [`config`] - environment configuration used by the `publisher` and `subscriber` binaries.
//!
//! # Reading the first event
//!
//! ```rust
//! use std::io::Cursor;
//! use ssegate::FrameReader;
//!
//! let body = Cursor::new(": connected sub-1\n\nid: evt-1\ndata: hello\ndata: world\n\n");
//! let event = FrameReader::new(body).first_event().unwrap();
//!
//! assert_eq!(&*event.id, "evt-1");
//! assert_eq!(&*event.data, "hello\nworld");
//! ```
//!
//! A blank line that closes a frame without both an id and data resets the reader rather than producing an event,
//! and lines it doesn't recognise (`event:`, `retry:`, comments) are skipped. If the stream ends before any complete
//! frame, [`first_event`][FrameReader::first_event] fails with [`ReadError::StreamClosed`][errors::ReadError].
//!
//! # Against a gateway
//!
//! ```ignore
//! use ssegate::{client::GatewayClient, gateway::Subscription, topic::TopicList};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GatewayClient::new("http://127.0.0.1:8787");
//! let subscription = Subscription::new(TopicList::parse("alerts")?).with_subscriber_id("sub-1");
//! let event = client.subscribe_first(&subscription)?;
//! println!("{}: {}", event.id, event.data);
//! # Ok(())
//! # }
//! ```
//!
//! # Feature flags
//!
//! | Feature | Default | Description |
//! | --- | --- | --- |
//! | `serde` | off | Derives [`Serialize`][::serde::Serialize] and [`Deserialize`][::serde::Deserialize] on [`Event`] and enables `serde` support in [`bytes-utils`][bytes_utils]. |
//! | `json` | off | [`Event::to_json`] and the gateway's JSON responses, parsed with [`serde_json`] and [`serde_path_to_error`]. |
//! | `reqwest` | off | The HTTP clients in [`client`]. Turns on `json`. |
//! | `cli` | off | Everything the `publisher` and `subscriber` binaries need. |

pub(crate) mod constants;
pub mod config;
pub mod errors;
pub mod event;
pub mod frame_reader;
pub mod gateway;
pub mod parser;
pub mod topic;

#[cfg(feature = "reqwest")]
pub mod client;

pub use event::Event;
pub use frame_reader::{FrameReader, FrameStream};

#[cfg(feature = "reqwest")]
pub use client::response_to_stream;
