use super::{AudioEncoding, LoopPoints};
use crate::{
    error::{Error, Result},
    reader::BinaryReader,
    writer::BinaryWriter,
};
use std::io::{Read, Seek, Write};

const SCALE: f32 = i16::MAX as f32;

/// Signed 16-bit linear PCM in the stream's byte order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pcm16 {
    data: Vec<i16>,
}

impl AudioEncoding for Pcm16 {
    type Sample = i16;
    type Coding = ();
    type Properties = ();

    fn from_raw(samples: Vec<i16>) -> Self {
        Pcm16 { data: samples }
    }

    fn raw(&self) -> &[i16] {
        &self.data
    }

    fn sample_count(&self) -> usize {
        self.data.len()
    }

    fn encoded_size(&self) -> usize {
        self.data.len() * 2
    }

    fn samples_for_block_size(&self, block_size: usize) -> usize {
        block_size / 2
    }

    fn read_raw<S: Read + Seek>(
        &mut self,
        r: &mut BinaryReader<S>,
        _sample_count: u32,
        byte_size: u32,
    ) -> Result<()> {
        if byte_size % 2 != 0 {
            return Err(Error::UnalignedBlock {
                size: u64::from(byte_size),
                width: 2,
                offset: r.position()?,
            });
        }
        self.data = r.read_i16s(byte_size as usize / 2)?;
        Ok(())
    }

    fn write_raw<W: Write + Seek>(&self, w: &mut BinaryWriter<W>) -> Result<()> {
        w.write_i16s(&self.data)
    }

    fn from_normalized(&mut self, samples: &[f32], _: &(), _: Option<LoopPoints>) {
        self.data = samples.iter().map(|&s| (s * SCALE) as i16).collect();
    }

    fn to_normalized(&self, _: &()) -> Vec<f32> {
        self.data.iter().map(|&s| f32::from(s) / SCALE).collect()
    }

    fn trim(&mut self, total_samples: usize) {
        self.data.truncate(total_samples);
    }

    fn properties(&self) -> &() {
        &()
    }

    fn set_properties(&mut self, _: ()) {}
}
