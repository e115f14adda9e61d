//! Binary I/O and RIFF container parsing for audio file formats.
//!
//! Everything reads through a [`BinaryReader`] and writes through a
//! [`BinaryWriter`], both of which carry the stream's [`ByteOrder`]. The
//! building blocks here ([`Table`], [`FlagParameters`], [`UInt24`], the
//! [`AudioEncoding`] codecs) implement [`Readable`] and [`Writable`] so
//! concrete formats can compose them.

extern crate bytes;
extern crate log;
extern crate seek_bufread;
extern crate thiserror;

mod byte_order;
mod chunks;
mod error;
mod file;
mod flags;
pub mod encoding;
pub mod ids;
mod reader;
pub mod riff;
mod table;
mod uint24;
mod writer;

pub use self::byte_order::{ByteOrder, Version};
pub use self::chunks::{Chunk, ChunkNode, ListChunk};
pub use self::encoding::{AudioEncoding, BlockSize, LoopPoints};
pub use self::error::{Error, Result};
pub use self::file::IoFile;
pub use self::flags::FlagParameters;
pub use self::ids::ChunkID;
pub use self::reader::{BinaryReader, Readable};
pub use self::riff::{RiffOptions, RiffReader, RiffWriter, Validation};
pub use self::table::{Element, ElementKind, Table};
pub use self::uint24::UInt24;
pub use self::writer::{BinaryWriter, Writable};
