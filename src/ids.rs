pub type ChunkID = [u8; 4];

pub const RIFF: &ChunkID = b"RIFF";
pub const LIST: &ChunkID = b"LIST";

// common RIFF form types and chunks
pub const WAVE: &ChunkID = b"WAVE";
pub const FORMAT: &ChunkID = b"fmt ";
pub const DATA: &ChunkID = b"data";
pub const INFO: &ChunkID = b"INFO";
pub const SAMPLER: &ChunkID = b"smpl";
pub const CUE: &ChunkID = b"cue ";

/// Renders a tag for display, replacing anything non-printable.
pub fn display(id: &ChunkID) -> String {
    id.iter()
        .map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '.'
            }
        })
        .collect()
}
