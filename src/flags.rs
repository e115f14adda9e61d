use super::{
    error::{Error, Result},
    reader::{BinaryReader, Readable},
    writer::{BinaryWriter, Writable},
};
use std::io::{Read, Seek, Write};
use std::ops::{Index, IndexMut};

pub const SLOTS: usize = 32;

/// Optional `u32` parameters enabled by bit flags.
///
/// Encoded as a 32-bit presence mask followed by the value of every present
/// slot in ascending slot order. A slot is addressed only by its bit index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlagParameters {
    slots: [Option<u32>; SLOTS],
}

impl FlagParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// The value in slot `bit`; `None` when absent or when `bit` is not a slot.
    pub fn get(&self, bit: usize) -> Option<u32> {
        self.slots.get(bit).copied().flatten()
    }

    pub fn set(&mut self, bit: usize, value: Option<u32>) -> Result<()> {
        let slot = self.slots.get_mut(bit).ok_or(Error::InvalidSlot { bit })?;
        *slot = value;
        Ok(())
    }

    pub fn mask(&self) -> u32 {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .fold(0, |mask, (bit, _)| mask | 1 << bit)
    }

    /// Present slots as `(bit, value)`, in ascending bit order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(bit, slot)| slot.map(|value| (bit, value)))
    }
}

impl Index<usize> for FlagParameters {
    type Output = Option<u32>;

    fn index(&self, bit: usize) -> &Option<u32> {
        &self.slots[bit]
    }
}

impl IndexMut<usize> for FlagParameters {
    fn index_mut(&mut self, bit: usize) -> &mut Option<u32> {
        &mut self.slots[bit]
    }
}

impl Readable for FlagParameters {
    fn read<S: Read + Seek>(&mut self, r: &mut BinaryReader<S>) -> Result<()> {
        let mask = r.read_u32()?;
        for (bit, slot) in self.slots.iter_mut().enumerate() {
            *slot = if mask & (1 << bit) != 0 {
                Some(r.read_u32()?)
            } else {
                None
            };
        }
        Ok(())
    }
}

impl Writable for FlagParameters {
    fn write<W: Write + Seek>(&self, w: &mut BinaryWriter<W>) -> Result<()> {
        w.write_u32(self.mask())?;
        let values: Vec<u32> = self.iter().map(|(_, value)| value).collect();
        w.write_u32s(&values)
    }
}

impl crate::table::Element for FlagParameters {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::byte_order::ByteOrder;
    use std::io::Cursor;

    fn round_trip(params: &FlagParameters, order: ByteOrder) -> (Vec<u8>, FlagParameters) {
        let mut w = BinaryWriter::with_byte_order(Cursor::new(vec![]), order);
        params.write(&mut w).unwrap();
        let bytes = w.into_inner().unwrap().into_inner();

        let mut r = BinaryReader::with_byte_order(Cursor::new(bytes.clone()), order);
        let back: FlagParameters = r.read_value().unwrap();
        assert_eq!(r.remaining().unwrap(), 0);
        (bytes, back)
    }

    #[test]
    fn empty_block_is_just_the_mask() {
        let (bytes, back) = round_trip(&FlagParameters::new(), ByteOrder::Little);
        assert_eq!(bytes, vec![0, 0, 0, 0]);
        assert_eq!(back.iter().count(), 0);
    }

    #[test]
    fn present_slots_are_written_in_bit_order() {
        let mut params = FlagParameters::new();
        params[5] = Some(0xaa);
        params.set(0, Some(7)).unwrap();
        params[31] = Some(0);
        assert_eq!(params.mask(), 1u32 | 1 << 5 | 1 << 31);

        let (bytes, back) = round_trip(&params, ByteOrder::Big);
        assert_eq!(
            bytes,
            vec![0x80, 0, 0, 0x21, 0, 0, 0, 7, 0, 0, 0, 0xaa, 0, 0, 0, 0]
        );
        assert_eq!(back, params);
        // zero is present, not absent
        assert_eq!(back.get(31), Some(0));
        assert_eq!(back.get(30), None);
    }

    #[test]
    fn slot_index_out_of_range() {
        let mut params = FlagParameters::new();
        assert_eq!(params.get(SLOTS), None);
        assert!(matches!(
            params.set(SLOTS, Some(1)),
            Err(Error::InvalidSlot { bit: 32 })
        ));
        assert_eq!(params, FlagParameters::new());
    }

    #[test]
    fn truncated_values_report_offset() {
        // mask says slot 0 is present, only two of its four bytes follow
        let mut r = BinaryReader::new(Cursor::new(vec![1, 0, 0, 0, 0xaa, 0xbb]));
        match r.read_value::<FlagParameters>() {
            Err(Error::UnexpectedEnd {
                needed,
                remaining,
                offset,
            }) => assert_eq!((needed, remaining, offset), (4, 2, 4)),
            other => panic!("expected UnexpectedEnd, got {:?}", other),
        }
    }

    #[test]
    fn read_clears_stale_slots() {
        let mut stale = FlagParameters::new();
        for bit in 0..SLOTS {
            stale[bit] = Some(bit as u32);
        }
        let mut sparse = FlagParameters::new();
        sparse[3] = Some(33);

        let mut w = BinaryWriter::new(Cursor::new(vec![]));
        sparse.write(&mut w).unwrap();
        let mut r = BinaryReader::new(Cursor::new(w.into_inner().unwrap().into_inner()));
        stale.read(&mut r).unwrap();
        assert_eq!(stale, sparse);
    }

    #[test]
    fn every_subset_shape_round_trips() {
        for &mask in &[0u32, 1, 0x8000_0000, 0xffff_ffff, 0x5555_5555, 0x0f0f_00f0] {
            let mut params = FlagParameters::new();
            for bit in 0..SLOTS {
                if mask & (1 << bit) != 0 {
                    params[bit] = Some(bit as u32 * 1000 + 1);
                }
            }
            let (bytes, back) = round_trip(&params, ByteOrder::Little);
            assert_eq!(bytes.len(), 4 + 4 * mask.count_ones() as usize);
            assert_eq!(back, params);
        }
    }
}
