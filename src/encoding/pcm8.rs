use super::{AudioEncoding, LoopPoints};
use crate::{error::Result, reader::BinaryReader, writer::BinaryWriter};
use std::io::{Read, Seek, Write};

const SCALE: f32 = i8::MAX as f32;

/// Signed 8-bit linear PCM, one byte per sample.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pcm8Signed {
    data: Vec<i8>,
}

impl AudioEncoding for Pcm8Signed {
    type Sample = i8;
    type Coding = ();
    type Properties = ();

    fn from_raw(samples: Vec<i8>) -> Self {
        Pcm8Signed { data: samples }
    }

    fn raw(&self) -> &[i8] {
        &self.data
    }

    fn sample_count(&self) -> usize {
        self.data.len()
    }

    fn encoded_size(&self) -> usize {
        self.sample_count()
    }

    fn samples_for_block_size(&self, block_size: usize) -> usize {
        block_size
    }

    fn read_raw<S: Read + Seek>(
        &mut self,
        r: &mut BinaryReader<S>,
        _sample_count: u32,
        byte_size: u32,
    ) -> Result<()> {
        self.data = r.read_i8s(byte_size as usize)?;
        Ok(())
    }

    fn write_raw<W: Write + Seek>(&self, w: &mut BinaryWriter<W>) -> Result<()> {
        w.write_i8s(&self.data)
    }

    // `as` truncates toward zero and saturates out of range input
    fn from_normalized(&mut self, samples: &[f32], _: &(), _: Option<LoopPoints>) {
        self.data = samples.iter().map(|&s| (s * SCALE) as i8).collect();
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

/// Unsigned 8-bit linear PCM, biased by 128 (the WAVE convention).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pcm8 {
    data: Vec<u8>,
}

impl AudioEncoding for Pcm8 {
    type Sample = u8;
    type Coding = ();
    type Properties = ();

    fn from_raw(samples: Vec<u8>) -> Self {
        Pcm8 { data: samples }
    }

    fn raw(&self) -> &[u8] {
        &self.data
    }

    fn sample_count(&self) -> usize {
        self.data.len()
    }

    fn encoded_size(&self) -> usize {
        self.sample_count()
    }

    fn samples_for_block_size(&self, block_size: usize) -> usize {
        block_size
    }

    fn read_raw<S: Read + Seek>(
        &mut self,
        r: &mut BinaryReader<S>,
        _sample_count: u32,
        byte_size: u32,
    ) -> Result<()> {
        self.data = r.read_bytes(byte_size as usize)?;
        Ok(())
    }

    fn write_raw<W: Write + Seek>(&self, w: &mut BinaryWriter<W>) -> Result<()> {
        w.write_bytes(&self.data)
    }

    fn from_normalized(&mut self, samples: &[f32], _: &(), _: Option<LoopPoints>) {
        self.data = samples
            .iter()
            .map(|&s| (i16::from((s * SCALE) as i8) + 128) as u8)
            .collect();
    }

    fn to_normalized(&self, _: &()) -> Vec<f32> {
        self.data
            .iter()
            .map(|&s| (f32::from(s) - 128.0) / SCALE)
            .collect()
    }

    fn trim(&mut self, total_samples: usize) {
        self.data.truncate(total_samples);
    }

    fn properties(&self) -> &() {
        &()
    }

    fn set_properties(&mut self, _: ()) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn one_byte_per_sample() {
        let pcm = Pcm8Signed::from_raw(vec![0, -1, 5]);
        assert_eq!(pcm.sample_count(), 3);
        assert_eq!(pcm.encoded_size(), 3);
        assert_eq!(pcm.samples_for_block_size(0x20), 0x20);
    }

    #[test]
    fn raw_bytes_round_trip() {
        let bytes = vec![0x00, 0x7f, 0x80, 0xff];
        let mut r = BinaryReader::new(Cursor::new(bytes.clone()));
        let mut pcm = Pcm8Signed::default();
        pcm.read_raw(&mut r, 4, 4).unwrap();
        assert_eq!(pcm.raw(), &[0, 127, -128, -1]);

        let mut w = BinaryWriter::new(Cursor::new(vec![]));
        pcm.write_raw(&mut w).unwrap();
        assert_eq!(w.into_inner().unwrap().into_inner(), bytes);
    }

    #[test]
    fn full_range_float_round_trip() {
        let original: Vec<i8> = (i8::MIN..=i8::MAX).collect();
        let pcm = Pcm8Signed::from_raw(original.clone());
        let floats = pcm.to_normalized(&());
        assert_eq!(floats[255], 1.0);
        assert_eq!(floats[128], 0.0);

        let mut back = Pcm8Signed::default();
        back.from_normalized(&floats, &(), None);
        assert_eq!(back.sample_count(), 256);
        for (&a, &b) in original.iter().zip(back.raw()) {
            assert!((i16::from(a) - i16::from(b)).abs() <= 1, "{} -> {}", a, b);
        }
        assert_eq!(back.raw()[255], 127);
        assert_eq!(back.raw()[128], 0);
    }

    #[test]
    fn float_conversion_truncates() {
        let mut pcm = Pcm8Signed::default();
        pcm.from_normalized(&[0.999, -0.999, 0.5, 2.0, -2.0], &(), None);
        // 126.873 and 63.5 truncate toward zero, out of range saturates
        assert_eq!(pcm.raw(), &[126, -126, 63, 127, -128]);
    }

    #[test]
    fn trim_and_duplicate() {
        let mut pcm = Pcm8Signed::from_raw(vec![1, 2, 3, 4]);
        let copy = pcm.duplicate();
        pcm.trim(2);
        assert_eq!(pcm.raw(), &[1, 2]);
        assert_eq!(copy.raw(), &[1, 2, 3, 4]);
        pcm.trim(10);
        assert_eq!(pcm.sample_count(), 2);
    }

    #[test]
    fn unsigned_is_biased() {
        let pcm = Pcm8::from_raw(vec![0, 128, 255]);
        assert_eq!(pcm.to_normalized(&()), vec![-128.0 / 127.0, 0.0, 1.0]);

        let mut back = Pcm8::default();
        back.from_normalized(&[0.0, 1.0, -1.0], &(), None);
        assert_eq!(back.raw(), &[128, 255, 1]);
    }
}
