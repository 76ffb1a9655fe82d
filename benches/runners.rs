use std::hint::black_box;

use bytes::Bytes;
use futures::stream;

const CHUNK_SIZE: usize = 128;

/// Chop slice into [CHUNK_SIZE]-byte `Bytes` chunks, ignoring line boundaries
pub fn load_chunks(bytes: &[u8]) -> Vec<Bytes> {
    bytes
        .chunks(CHUNK_SIZE)
        .map(Bytes::copy_from_slice)
        .collect()
}

pub fn run_frame_stream(chunks: &[Bytes]) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    rt.block_on(async {
        let s = stream::iter(chunks.iter().cloned().map(Ok::<_, ()>));
        let _ = black_box(ssegate::FrameStream::new(s).first_event().await);
    });
}

pub fn run_frame_reader(bytes: &[u8]) {
    let _ = black_box(ssegate::FrameReader::new(std::io::Cursor::new(bytes)).first_event());
}
