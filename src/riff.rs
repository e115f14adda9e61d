use super::{
    byte_order::ByteOrder,
    chunks::{self, Chunk, ChunkNode, ListChunk},
    error::{Error, Result},
    ids::{self, ChunkID},
    reader::BinaryReader,
    writer::BinaryWriter,
};
use log::{debug, trace, warn};
use std::convert::TryFrom;
use std::io::{Read, Seek, Write};

const HEADER_SIZE: u64 = 8;

/// What to do when a stream does not start with `RIFF`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    /// Fail with [`Error::InvalidMagic`].
    Strict,
    /// Log a warning and parse the chunks anyway.
    Lenient,
}

impl Default for Validation {
    fn default() -> Self {
        Validation::Strict
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RiffOptions {
    pub validation: Validation,
    pub byte_order: ByteOrder,
}

/// A parsed RIFF container.
///
/// The whole chunk tree is read up front. Chunk payloads are skipped; reopen a
/// chunk with [`RiffReader::open_chunk`] to decode it.
pub struct RiffReader<S> {
    reader: BinaryReader<S>,
    magic: ChunkID,
    chunks: Vec<ChunkNode>,
}

impl<S: Read + Seek> RiffReader<S> {
    pub fn new(source: S) -> Result<Self> {
        RiffReader::with_options(source, RiffOptions::default())
    }

    pub fn with_options(source: S, options: RiffOptions) -> Result<Self> {
        let reader = BinaryReader::with_byte_order(source, options.byte_order);
        RiffReader::from_reader(reader, options.validation)
    }

    pub fn from_reader(mut reader: BinaryReader<S>, validation: Validation) -> Result<Self> {
        let offset = reader.position()?;
        let container = reader.read_tag()?;
        if &container != ids::RIFF {
            match validation {
                Validation::Strict => {
                    return Err(Error::InvalidMagic {
                        expected: *ids::RIFF,
                        found: container,
                        offset,
                    })
                }
                Validation::Lenient => warn!(
                    "expected RIFF container at {}, found '{}'; reading anyway",
                    offset,
                    ids::display(&container)
                ),
            }
        }

        // the declared total size is not trusted, the stream length bounds the read
        let _total_size = reader.read_u32()?;
        let magic = reader.read_tag()?;
        let end = reader.length()?;
        debug!("RIFF '{}' container, {} byte(s)", ids::display(&magic), end);

        let mut chunks = vec![];
        while reader.position()? < end {
            chunks.push(read_chunk(&mut reader, end)?);
        }

        Ok(RiffReader {
            reader,
            magic,
            chunks,
        })
    }

    /// The form type following the container header, e.g. `WAVE`.
    pub fn magic(&self) -> &ChunkID {
        &self.magic
    }

    pub fn chunks(&self) -> &[ChunkNode] {
        &self.chunks
    }

    /// First top-level chunk tagged `tag`.
    pub fn chunk(&self, tag: &ChunkID) -> Option<&ChunkNode> {
        chunks::find(&self.chunks, tag)
    }

    /// Moves the cursor to the start of `chunk`'s payload.
    ///
    /// Reading past `chunk.size` bytes from here is the caller's problem.
    pub fn open_chunk(&mut self, chunk: &Chunk) -> Result<&mut BinaryReader<S>> {
        trace!("opening {}", chunk);
        self.reader.set_position(chunk.offset)?;
        Ok(&mut self.reader)
    }

    /// Looks up the first top-level chunk tagged `tag` and opens it.
    pub fn open(&mut self, tag: &ChunkID) -> Result<Chunk> {
        let chunk = self
            .chunk(tag)
            .map(ChunkNode::header)
            .ok_or(Error::ChunkNotFound(*tag))?;
        self.open_chunk(&chunk)?;
        Ok(chunk)
    }

    /// The payload bytes of `chunk`.
    pub fn chunk_data(&mut self, chunk: &Chunk) -> Result<Vec<u8>> {
        self.open_chunk(chunk)?.read_bytes(chunk.size as usize)
    }

    pub fn reader_mut(&mut self) -> &mut BinaryReader<S> {
        &mut self.reader
    }

    pub fn into_inner(self) -> BinaryReader<S> {
        self.reader
    }
}

// Reads one chunk, recursing into LIST chunks. `bound` is the end of the
// enclosing chunk (or of the stream at top level).
fn read_chunk<S: Read + Seek>(r: &mut BinaryReader<S>, bound: u64) -> Result<ChunkNode> {
    let header_offset = r.position()?;
    if bound - header_offset < HEADER_SIZE {
        return Err(Error::UnexpectedEnd {
            needed: HEADER_SIZE,
            remaining: bound - header_offset,
            offset: header_offset,
        });
    }

    let tag = r.read_tag()?;
    let mut size = r.read_u32()?;
    let start = r.position()?;
    if size == 0 {
        // unknown size, the chunk runs to the end of the stream
        let rest = r.length()?.saturating_sub(start);
        size = u32::try_from(rest).map_err(|_| Error::ChunkTooLarge {
            tag,
            offset: header_offset,
            size: rest,
        })?;
    }

    let end = start + u64::from(size);
    if end > bound {
        return Err(Error::ChunkOverrun {
            tag,
            offset: header_offset,
            size: u64::from(size),
            bound,
        });
    }

    if &tag == ids::LIST {
        if size < 4 {
            return Err(Error::ChunkTooSmall {
                tag,
                offset: header_offset,
                size,
            });
        }
        let list_type = r.read_tag()?;
        let offset = r.position()?;
        debug!(
            "LIST '{}' at {} ({} bytes)",
            ids::display(&list_type),
            offset,
            size - 4
        );

        let mut children = vec![];
        while r.position()? < end {
            children.push(read_chunk(r, end)?);
        }
        return Ok(ChunkNode::List(ListChunk {
            tag: list_type,
            offset,
            size: size - 4,
            chunks: children,
        }));
    }

    let chunk = Chunk {
        tag,
        offset: start,
        size,
    };
    debug!("chunk {}", chunk);
    r.set_position(end)?;
    Ok(ChunkNode::Chunk(chunk))
}

/// Writes a RIFF container, back-patching chunk sizes as chunks are closed.
pub struct RiffWriter<W: Write + Seek> {
    writer: BinaryWriter<W>,
    // tag and size field position of the RIFF header and every open chunk
    open: Vec<(ChunkID, u64)>,
}

impl<W: Write + Seek> RiffWriter<W> {
    pub fn new(sink: W, magic: &ChunkID) -> Result<Self> {
        RiffWriter::from_writer(BinaryWriter::new(sink), magic)
    }

    pub fn from_writer(mut writer: BinaryWriter<W>, magic: &ChunkID) -> Result<Self> {
        writer.write_tag(ids::RIFF)?;
        let size_pos = writer.position()?;
        writer.write_u32(0)?;
        writer.write_tag(magic)?;
        Ok(RiffWriter {
            writer,
            open: vec![(*ids::RIFF, size_pos)],
        })
    }

    /// Number of chunks currently open, not counting the container itself.
    pub fn depth(&self) -> usize {
        self.open.len() - 1
    }

    pub fn start_chunk(&mut self, tag: &ChunkID) -> Result<()> {
        self.writer.write_tag(tag)?;
        self.open.push((*tag, self.writer.position()?));
        self.writer.write_u32(0)
    }

    pub fn start_list(&mut self, list_type: &ChunkID) -> Result<()> {
        self.start_chunk(ids::LIST)?;
        self.writer.write_tag(list_type)
    }

    pub fn end_chunk(&mut self) -> Result<()> {
        if self.depth() == 0 {
            return Err(Error::NoOpenChunk);
        }
        self.close()
    }

    /// A complete chunk with the given payload.
    ///
    /// The payload must not be empty: a zero size field means "runs to the end
    /// of the stream" to a reader.
    pub fn write_chunk(&mut self, tag: &ChunkID, payload: &[u8]) -> Result<()> {
        self.start_chunk(tag)?;
        self.writer.write_bytes(payload)?;
        self.end_chunk()
    }

    /// The writer positioned inside the innermost open chunk.
    pub fn writer_mut(&mut self) -> &mut BinaryWriter<W> {
        &mut self.writer
    }

    /// Closes every open chunk and the container, returning the sink.
    pub fn finish(mut self) -> Result<W> {
        while !self.open.is_empty() {
            self.close()?;
        }
        self.writer.into_inner()
    }

    fn close(&mut self) -> Result<()> {
        let (tag, size_pos) = self.open.pop().ok_or(Error::NoOpenChunk)?;
        let end = self.writer.position()?;
        let size = end - size_pos - 4;
        let offset = size_pos - 4;
        if size == 0 {
            return Err(Error::ChunkTooSmall { tag, offset, size: 0 });
        }
        let size =
            u32::try_from(size).map_err(|_| Error::ChunkTooLarge { tag, offset, size })?;
        trace!("patching size {} at {}", size, size_pos);
        self.writer.set_position(size_pos)?;
        self.writer.write_u32(size)?;
        self.writer.set_position(end)
    }
}
