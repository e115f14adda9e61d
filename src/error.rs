use super::ids::{display, ChunkID};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected end of stream at {offset}: needed {needed} byte(s), {remaining} left")]
    UnexpectedEnd {
        needed: u64,
        remaining: u64,
        offset: u64,
    },

    #[error("invalid magic at {offset}: expected {:?}, found {:?}", display(.expected), display(.found))]
    InvalidMagic {
        expected: ChunkID,
        found: ChunkID,
        offset: u64,
    },

    #[error("chunk {:?} at {offset} with size {size} runs past its bound {bound}", display(.tag))]
    ChunkOverrun {
        tag: ChunkID,
        offset: u64,
        size: u64,
        bound: u64,
    },

    #[error("chunk {:?} at {offset} is too small ({size} byte(s))", display(.tag))]
    ChunkTooSmall { tag: ChunkID, offset: u64, size: u32 },

    #[error("chunk {:?} at {offset} is too large for a 32-bit size ({size} byte(s))", display(.tag))]
    ChunkTooLarge { tag: ChunkID, offset: u64, size: u64 },

    #[error("no chunk tagged {:?}", display(.0))]
    ChunkNotFound(ChunkID),

    #[error("no open chunk to end")]
    NoOpenChunk,

    #[error("invalid byte order mark {mark:#06x} at {offset}")]
    InvalidByteOrderMark { mark: u16, offset: u64 },

    #[error("invalid UTF-8 in string: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("invalid UTF-8 character at {offset}")]
    InvalidChar { offset: u64 },

    #[error("string length prefix at {offset} overflows 32 bits")]
    StringLengthOverflow { offset: u64 },

    #[error("length {len} does not fit in a 32-bit length field")]
    LengthOverflow { len: u64 },

    #[error("block of {size} byte(s) at {offset} is not a multiple of {width}")]
    UnalignedBlock { size: u64, width: u64, offset: u64 },

    #[error("flag slot {bit} out of range")]
    InvalidSlot { bit: usize },

    #[error("value {value} out of range for a 24-bit unsigned integer")]
    OutOfRange { value: i64 },
}

pub type Result<T> = std::result::Result<T, Error>;
