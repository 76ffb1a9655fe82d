pub const DATA_LINE: &[u8] = b"data: Hello, world!\n";
pub const COMMENT_LINE: &[u8] = b": connected sub-1\n";
pub const EVENT_LINE: &[u8] = b"event: update\n";
pub const ID_LINE: &[u8] = b"id: evt-42\n";
pub const EMPTY_LINE: &[u8] = b"\n";
pub const NO_SPACE_LINE: &[u8] = b"data:value\n";

/// `n` frames of keep-alive noise that never complete, followed by one real event
pub fn generate_noise_then_event(n: usize) -> Vec<u8> {
    let mut buf = Vec::<u8>::with_capacity(
        (COMMENT_LINE.len() + EVENT_LINE.len() + DATA_LINE.len() + EMPTY_LINE.len()) * n + 64,
    );

    for _ in 0..n {
        buf.extend_from_slice(COMMENT_LINE);
        buf.extend_from_slice(EVENT_LINE);
        buf.extend_from_slice(DATA_LINE);
        buf.extend_from_slice(EMPTY_LINE);
    }
    buf.extend_from_slice(ID_LINE);
    buf.extend_from_slice(DATA_LINE);
    buf.extend_from_slice(DATA_LINE);
    buf.extend_from_slice(EMPTY_LINE);
    buf
}
