use super::{
    byte_order::ByteOrder,
    error::Result,
    reader::{BinaryReader, Readable},
    writer::{BinaryWriter, Writable},
};
use log::debug;
use seek_bufread::BufReader;
use std::fs::File;
use std::io::{BufWriter, Cursor, Read, Seek};
use std::path::Path;

/// A whole file format: readable from and writable to streams, byte slices
/// and paths.
///
/// Readers and writers start out in `DEFAULT_BYTE_ORDER`; formats that record
/// their own order switch it while reading their header.
pub trait IoFile: Readable + Writable + Default {
    const DEFAULT_BYTE_ORDER: ByteOrder = ByteOrder::Little;

    fn from_reader<S: Read + Seek>(source: S) -> Result<Self> {
        let mut r = BinaryReader::with_byte_order(source, Self::DEFAULT_BYTE_ORDER);
        r.read_value()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes))
    }

    fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        debug!("reading {}", path.as_ref().display());
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut w = BinaryWriter::with_byte_order(Cursor::new(vec![]), Self::DEFAULT_BYTE_ORDER);
        self.write(&mut w)?;
        Ok(w.into_inner()?.into_inner())
    }

    /// Writes the file to `path`, replacing whatever is there.
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        debug!("writing {}", path.as_ref().display());
        let sink = BufWriter::new(File::create(path)?);
        let mut w = BinaryWriter::with_byte_order(sink, Self::DEFAULT_BYTE_ORDER);
        self.write(&mut w)?;
        w.flush()
    }

    /// A deep copy made by writing the file out and reading it back.
    fn duplicate(&self) -> Result<Self> {
        Self::from_bytes(&self.to_bytes()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{flags::FlagParameters, table::Table, uint24::UInt24};
    use std::io::Write;

    // a little container: byte order mark, header flags, a 24-bit length
    // table and a list of names
    #[derive(Debug, Default, PartialEq)]
    struct Bank {
        flags: FlagParameters,
        lengths: Table<UInt24>,
        names: Table<String>,
    }

    impl Readable for Bank {
        fn read<S: Read + Seek>(&mut self, r: &mut BinaryReader<S>) -> Result<()> {
            r.read_byte_order_mark()?;
            self.flags.read(r)?;
            self.lengths.read(r)?;
            self.names.read(r)
        }
    }

    impl Writable for Bank {
        fn write<W: Write + Seek>(&self, w: &mut BinaryWriter<W>) -> Result<()> {
            w.write_byte_order_mark()?;
            self.flags.write(w)?;
            self.lengths.write(w)?;
            self.names.write(w)
        }
    }

    impl IoFile for Bank {
        const DEFAULT_BYTE_ORDER: ByteOrder = ByteOrder::Big;
    }

    fn bank() -> Bank {
        let mut flags = FlagParameters::new();
        flags[2] = Some(48_000);
        Bank {
            flags,
            lengths: Table::from_vec(vec![
                UInt24::new(3).unwrap(),
                UInt24::new(UInt24::MAX).unwrap(),
            ]),
            names: Table::from_vec(vec!["kick".into(), "snare".into()]),
        }
    }

    #[test]
    fn bytes_round_trip() {
        let bytes = bank().to_bytes().unwrap();
        assert_eq!(&bytes[..2], &[0xfe, 0xff]);
        assert_eq!(Bank::from_bytes(&bytes).unwrap(), bank());
    }

    #[test]
    fn mark_overrides_default_order() {
        let mut w = BinaryWriter::with_byte_order(Cursor::new(vec![]), ByteOrder::Little);
        bank().write(&mut w).unwrap();
        let bytes = w.into_inner().unwrap().into_inner();
        assert_eq!(&bytes[..2], &[0xff, 0xfe]);
        // read with the big-endian default, pinned to little by the mark
        assert_eq!(Bank::from_bytes(&bytes).unwrap(), bank());
    }

    #[test]
    fn path_round_trip_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.bin");
        std::fs::write(&path, vec![0xaa; 512]).unwrap();

        bank().save(&path).unwrap();
        assert_eq!(
            std::fs::metadata(&path).unwrap().len(),
            bank().to_bytes().unwrap().len() as u64
        );
        assert_eq!(Bank::open(&path).unwrap(), bank());
    }

    #[test]
    fn duplicate_is_independent() {
        let original = bank();
        let mut copy = original.duplicate().unwrap();
        assert_eq!(copy, original);
        copy.names.push("hat".into());
        assert_eq!(original.names.len(), 2);
    }

    #[test]
    fn truncated_file_fails() {
        let bytes = bank().to_bytes().unwrap();
        assert!(Bank::from_bytes(&bytes[..bytes.len() - 1]).is_err());
    }
}
