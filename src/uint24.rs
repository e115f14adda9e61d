use super::{
    byte_order::ByteOrder,
    error::{Error, Result},
    reader::{BinaryReader, Readable},
    writer::{BinaryWriter, Writable},
};
use std::convert::TryFrom;
use std::fmt;
use std::io::{Read, Seek, Write};

/// Unsigned 24-bit integer stored as exactly three bytes.
///
/// The bytes are kept high-byte-first. Only the wire order depends on the
/// stream: little-endian (and `System`) streams carry them low, middle, high,
/// big-endian streams high, middle, low.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UInt24([u8; 3]);

impl UInt24 {
    pub const MAX: u32 = 0x00ff_ffff;
    pub const MIN: u32 = 0;

    pub fn new(value: u32) -> Result<Self> {
        if value > Self::MAX {
            return Err(Error::OutOfRange {
                value: i64::from(value),
            });
        }
        Ok(UInt24([
            (value >> 16) as u8,
            (value >> 8) as u8,
            value as u8,
        ]))
    }

    pub fn get(self) -> u32 {
        let [high, mid, low] = self.0;
        u32::from(low) | u32::from(mid) << 8 | u32::from(high) << 16
    }

    /// The stored bytes, high byte first.
    pub fn to_bytes(self) -> [u8; 3] {
        self.0
    }
}

impl TryFrom<u32> for UInt24 {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        UInt24::new(value)
    }
}

impl TryFrom<i32> for UInt24 {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        if value < 0 {
            return Err(Error::OutOfRange {
                value: i64::from(value),
            });
        }
        UInt24::new(value as u32)
    }
}

impl From<UInt24> for u32 {
    fn from(value: UInt24) -> u32 {
        value.get()
    }
}

impl From<UInt24> for i32 {
    fn from(value: UInt24) -> i32 {
        value.get() as i32
    }
}

impl fmt::Display for UInt24 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl Readable for UInt24 {
    fn read<S: Read + Seek>(&mut self, r: &mut BinaryReader<S>) -> Result<()> {
        match r.byte_order() {
            ByteOrder::Little | ByteOrder::System => {
                self.0[2] = r.read_u8()?;
                self.0[1] = r.read_u8()?;
                self.0[0] = r.read_u8()?;
            }
            ByteOrder::Big => {
                self.0[0] = r.read_u8()?;
                self.0[1] = r.read_u8()?;
                self.0[2] = r.read_u8()?;
            }
        }
        Ok(())
    }
}

impl Writable for UInt24 {
    fn write<W: Write + Seek>(&self, w: &mut BinaryWriter<W>) -> Result<()> {
        let [high, mid, low] = self.0;
        match w.byte_order() {
            ByteOrder::Little | ByteOrder::System => w.write_bytes(&[low, mid, high]),
            ByteOrder::Big => w.write_bytes(&[high, mid, low]),
        }
    }
}

impl crate::table::Element for UInt24 {}
