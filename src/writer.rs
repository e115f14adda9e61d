use super::{
    byte_order::{ByteOrder, Version},
    error::{Error, Result},
    ids::ChunkID,
};
use bytes::{BufMut, BytesMut};
use std::convert::TryFrom;
use std::io::{Seek, SeekFrom, Write};

/// Something that can append its encoding to a [`BinaryWriter`].
pub trait Writable {
    fn write<W: Write + Seek>(&self, w: &mut BinaryWriter<W>) -> Result<()>;
}

macro_rules! write_scalar {
    ($one:ident, $many:ident, $ty:ty, $width:expr, $put_be:ident, $put_le:ident) => {
        pub fn $one(&mut self, value: $ty) -> Result<()> {
            let b = if self.byte_order.is_big() {
                value.to_be_bytes()
            } else {
                value.to_le_bytes()
            };
            self.sink.write_all(&b)?;
            Ok(())
        }

        pub fn $many(&mut self, values: &[$ty]) -> Result<()> {
            let big = self.byte_order.is_big();
            let mut buf = BytesMut::with_capacity(values.len() * $width);
            for &value in values {
                if big {
                    buf.$put_be(value)
                } else {
                    buf.$put_le(value)
                }
            }
            self.sink.write_all(&buf)?;
            Ok(())
        }
    };
}

/// Byte order aware writer over a seekable sink.
pub struct BinaryWriter<W> {
    sink: W,
    byte_order: ByteOrder,
    version: Version,
}

impl<W: Write + Seek> BinaryWriter<W> {
    pub fn new(sink: W) -> Self {
        BinaryWriter::with_byte_order(sink, ByteOrder::default())
    }

    pub fn with_byte_order(sink: W, byte_order: ByteOrder) -> Self {
        BinaryWriter {
            sink,
            byte_order,
            version: Version::default(),
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

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    pub fn into_inner(mut self) -> Result<W> {
        self.sink.flush()?;
        Ok(self.sink)
    }

    pub fn flush(&mut self) -> Result<()> {
        Ok(self.sink.flush()?)
    }

    pub fn position(&mut self) -> Result<u64> {
        Ok(self.sink.seek(SeekFrom::Current(0))?)
    }

    pub fn set_position(&mut self, pos: u64) -> Result<()> {
        self.sink.seek(SeekFrom::Start(pos))?;
        Ok(())
    }

    pub fn seek_end(&mut self) -> Result<u64> {
        Ok(self.sink.seek(SeekFrom::End(0))?)
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.sink.write_all(bytes)?;
        Ok(())
    }

    pub fn write_tag(&mut self, id: &ChunkID) -> Result<()> {
        self.write_bytes(id)
    }

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write_bytes(&[value])
    }

    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        self.write_u8(value as u8)
    }

    pub fn write_i8s(&mut self, values: &[i8]) -> Result<()> {
        let bytes: Vec<u8> = values.iter().map(|&v| v as u8).collect();
        self.write_bytes(&bytes)
    }

    write_scalar!(write_u16, write_u16s, u16, 2, put_u16, put_u16_le);
    write_scalar!(write_i16, write_i16s, i16, 2, put_i16, put_i16_le);
    write_scalar!(write_u32, write_u32s, u32, 4, put_u32, put_u32_le);
    write_scalar!(write_i32, write_i32s, i32, 4, put_i32, put_i32_le);
    write_scalar!(write_u64, write_u64s, u64, 8, put_u64, put_u64_le);
    write_scalar!(write_i64, write_i64s, i64, 8, put_i64, put_i64_le);
    write_scalar!(write_f32, write_f32s, f32, 4, put_f32, put_f32_le);
    write_scalar!(write_f64, write_f64s, f64, 8, put_f64, put_f64_le);

    pub fn write_char(&mut self, c: char) -> Result<()> {
        let mut b = [0; 4];
        self.write_bytes(c.encode_utf8(&mut b).as_bytes())
    }

    pub fn write_chars(&mut self, chars: &[char]) -> Result<()> {
        let encoded: String = chars.iter().collect();
        self.write_bytes(encoded.as_bytes())
    }

    fn write_length_prefix(&mut self, len: u32) -> Result<()> {
        let mut buf = BytesMut::with_capacity(5);
        let mut len = len;
        while len >= 0x80 {
            buf.put_u8((len as u8 & 0x7f) | 0x80);
            len >>= 7;
        }
        buf.put_u8(len as u8);
        self.write_bytes(&buf)
    }

    /// Writes a `u32` count or length, failing if `len` does not fit.
    pub fn write_len(&mut self, len: usize) -> Result<()> {
        self.write_u32(len_u32(len)?)
    }

    /// Writes a string prefixed by its 7-bit encoded byte length.
    pub fn write_string(&mut self, s: &str) -> Result<()> {
        self.write_length_prefix(len_u32(s.len())?)?;
        self.write_bytes(s.as_bytes())
    }

    pub fn write_strings<T: AsRef<str>>(&mut self, values: &[T]) -> Result<()> {
        for s in values {
            self.write_string(s.as_ref())?;
        }
        Ok(())
    }

    /// Writes `s` into a field of exactly `len` bytes, truncating or NUL padding.
    pub fn write_fixed_string(&mut self, s: &str, len: usize) -> Result<()> {
        let mut field = vec![0; len];
        let n = s.len().min(len);
        field[..n].copy_from_slice(&s.as_bytes()[..n]);
        self.write_bytes(&field)
    }

    pub fn write_value<T: Writable + ?Sized>(&mut self, value: &T) -> Result<()> {
        value.write(self)
    }

    /// Writes `0xFEFF` in the writer's order, pinning a `System` order first
    /// so the recorded mark is never ambiguous.
    pub fn write_byte_order_mark(&mut self) -> Result<ByteOrder> {
        self.byte_order = self.byte_order.resolve();
        self.write_u16(0xfeff)?;
        Ok(self.byte_order)
    }
}

fn len_u32(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::LengthOverflow { len: len as u64 })
}
