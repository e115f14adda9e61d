use super::{
    byte_order::{ByteOrder, Version},
    error::{Error, Result},
    ids::ChunkID,
};
use bytes::Buf;
use seek_bufread::BufReader;
use std::io::{Read, Seek, SeekFrom};

/// Something that can populate itself from a [`BinaryReader`].
///
/// Implementations consume exactly the bytes their encoding occupies and
/// honor the reader's byte order for multi-byte values.
pub trait Readable {
    fn read<S: Read + Seek>(&mut self, r: &mut BinaryReader<S>) -> Result<()>;
}

macro_rules! read_scalar {
    ($one:ident, $many:ident, $ty:ty, $width:expr, $get_be:ident, $get_le:ident) => {
        pub fn $one(&mut self) -> Result<$ty> {
            let mut b = [0; $width];
            self.fill(&mut b)?;
            Ok(if self.byte_order.is_big() {
                <$ty>::from_be_bytes(b)
            } else {
                <$ty>::from_le_bytes(b)
            })
        }

        pub fn $many(&mut self, count: usize) -> Result<Vec<$ty>> {
            let raw = self.read_block(count, $width)?;
            let big = self.byte_order.is_big();
            let mut buf = &raw[..];
            Ok((0..count)
                .map(|_| if big { buf.$get_be() } else { buf.$get_le() })
                .collect())
        }
    };
}

/// Byte order aware reader over a seekable source.
pub struct BinaryReader<S> {
    source: S,
    byte_order: ByteOrder,
    version: Version,
    len: Option<u64>,
}

impl<S: Read + Seek> BinaryReader<BufReader<S>> {
    pub fn buffered(source: S) -> Self {
        BinaryReader::new(BufReader::new(source))
    }
}

impl<S: Read + Seek> BinaryReader<S> {
    pub fn new(source: S) -> Self {
        BinaryReader::with_byte_order(source, ByteOrder::default())
    }

    pub fn with_byte_order(source: S, byte_order: ByteOrder) -> Self {
        BinaryReader {
            source,
            byte_order,
            version: Version::default(),
            len: None,
        }
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    pub fn set_byte_order(&mut self, byte_order: ByteOrder) {
        self.byte_order = byte_order;
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn set_version(&mut self, version: Version) {
        self.version = version;
    }

    pub fn get_ref(&self) -> &S {
        &self.source
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    pub fn position(&mut self) -> Result<u64> {
        Ok(self.source.seek(SeekFrom::Current(0))?)
    }

    pub fn set_position(&mut self, pos: u64) -> Result<()> {
        self.source.seek(SeekFrom::Start(pos))?;
        Ok(())
    }

    pub fn skip(&mut self, count: u64) -> Result<()> {
        self.ensure(count)?;
        self.source.seek(SeekFrom::Current(count as i64))?;
        Ok(())
    }

    /// Total length of the source. Cached after the first call.
    pub fn length(&mut self) -> Result<u64> {
        if let Some(len) = self.len {
            return Ok(len);
        }
        let pos = self.position()?;
        let len = self.source.seek(SeekFrom::End(0))?;
        self.source.seek(SeekFrom::Start(pos))?;
        self.len = Some(len);
        Ok(len)
    }

    pub fn remaining(&mut self) -> Result<u64> {
        let len = self.length()?;
        Ok(len.saturating_sub(self.position()?))
    }

    fn ensure(&mut self, needed: u64) -> Result<()> {
        let remaining = self.remaining()?;
        if needed > remaining {
            return Err(Error::UnexpectedEnd {
                needed,
                remaining,
                offset: self.position()?,
            });
        }
        Ok(())
    }

    // read_exact with the shortfall reported at the current offset
    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        self.ensure(buf.len() as u64)?;
        self.source.read_exact(buf)?;
        Ok(())
    }

    // count * width bytes, bounds checked before allocating
    fn read_block(&mut self, count: usize, width: usize) -> Result<Vec<u8>> {
        let size = match count.checked_mul(width) {
            Some(size) => size,
            None => {
                return Err(Error::UnexpectedEnd {
                    needed: u64::MAX,
                    remaining: self.remaining()?,
                    offset: self.position()?,
                })
            }
        };
        self.read_bytes(size)
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0; count];
        self.fill(&mut buf)?;
        Ok(buf)
    }

    pub fn read_tag(&mut self) -> Result<ChunkID> {
        let mut id = [0; 4];
        self.fill(&mut id)?;
        Ok(id)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let mut b = [0; 1];
        self.fill(&mut b)?;
        Ok(b[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_i8s(&mut self, count: usize) -> Result<Vec<i8>> {
        Ok(self.read_bytes(count)?.into_iter().map(|b| b as i8).collect())
    }

    read_scalar!(read_u16, read_u16s, u16, 2, get_u16, get_u16_le);
    read_scalar!(read_i16, read_i16s, i16, 2, get_i16, get_i16_le);
    read_scalar!(read_u32, read_u32s, u32, 4, get_u32, get_u32_le);
    read_scalar!(read_i32, read_i32s, i32, 4, get_i32, get_i32_le);
    read_scalar!(read_u64, read_u64s, u64, 8, get_u64, get_u64_le);
    read_scalar!(read_i64, read_i64s, i64, 8, get_i64, get_i64_le);
    read_scalar!(read_f32, read_f32s, f32, 4, get_f32, get_f32_le);
    read_scalar!(read_f64, read_f64s, f64, 8, get_f64, get_f64_le);

    /// Reads one UTF-8 encoded character.
    pub fn read_char(&mut self) -> Result<char> {
        let mut b = [0; 4];
        self.fill(&mut b[..1])?;
        let width = match b[0] {
            0x00..=0x7f => 1,
            0xc0..=0xdf => 2,
            0xe0..=0xef => 3,
            0xf0..=0xf7 => 4,
            _ => {
                let offset = self.position()? - 1;
                return Err(Error::InvalidChar { offset });
            }
        };
        self.fill(&mut b[1..width])?;
        match std::str::from_utf8(&b[..width]).ok().and_then(|s| s.chars().next()) {
            Some(c) => Ok(c),
            None => {
                let offset = self.position()? - width as u64;
                Err(Error::InvalidChar { offset })
            }
        }
    }

    pub fn read_chars(&mut self, count: usize) -> Result<Vec<char>> {
        // a char is at least one byte
        self.ensure(count as u64)?;
        (0..count).map(|_| self.read_char()).collect()
    }

    // little-endian base 128, at most 5 bytes for a u32
    fn read_length_prefix(&mut self) -> Result<u32> {
        let mut value = 0u32;
        for idx in 0..5 {
            let b = self.read_u8()?;
            if idx == 4 && b > 0x0f {
                break;
            }
            value |= u32::from(b & 0x7f) << (7 * idx);
            if b & 0x80 == 0 {
                return Ok(value);
            }
        }
        let offset = self.position()?;
        Err(Error::StringLengthOverflow { offset })
    }

    /// Reads a string prefixed by its 7-bit encoded byte length.
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_length_prefix()?;
        let bytes = self.read_bytes(len as usize)?;
        Ok(String::from_utf8(bytes)?)
    }

    pub fn read_strings(&mut self, count: usize) -> Result<Vec<String>> {
        // a string is at least its one byte prefix
        self.ensure(count as u64)?;
        (0..count).map(|_| self.read_string()).collect()
    }

    /// Reads a fixed-width string field, dropping trailing NUL padding.
    pub fn read_fixed_string(&mut self, len: usize) -> Result<String> {
        let mut bytes = self.read_bytes(len)?;
        while bytes.last() == Some(&0) {
            bytes.pop();
        }
        Ok(String::from_utf8(bytes)?)
    }

    pub fn read_value<T: Readable + Default>(&mut self) -> Result<T> {
        let mut value = T::default();
        value.read(self)?;
        Ok(value)
    }

    /// Reads a `0xFEFF` mark and pins the reader to the order it was written in.
    pub fn read_byte_order_mark(&mut self) -> Result<ByteOrder> {
        let offset = self.position()?;
        let mut b = [0; 2];
        self.fill(&mut b)?;
        let order = match b {
            [0xff, 0xfe] => ByteOrder::Little,
            [0xfe, 0xff] => ByteOrder::Big,
            _ => {
                return Err(Error::InvalidByteOrderMark {
                    mark: u16::from_be_bytes(b),
                    offset,
                })
            }
        };
        self.byte_order = order;
        Ok(order)
    }
}
