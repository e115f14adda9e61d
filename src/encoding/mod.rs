//! Sample buffers in their native encodings.
//!
//! Every codec keeps its samples in its own representation and converts to
//! and from normalized `f32` samples in `[-1, 1]`.

mod pcm16;
mod pcm8;

pub use self::pcm16::Pcm16;
pub use self::pcm8::{Pcm8, Pcm8Signed};

use super::{error::Result, reader::BinaryReader, writer::BinaryWriter};
use std::io::{Read, Seek, Write};
use std::num::NonZeroUsize;

/// Target size when re-blocking with [`AudioEncoding::change_block_size`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockSize {
    /// Blocks of this many samples; the last one may be shorter.
    Samples(NonZeroUsize),
    /// One block holding everything.
    Whole,
}

impl BlockSize {
    pub fn samples(count: usize) -> Option<Self> {
        NonZeroUsize::new(count).map(BlockSize::Samples)
    }

    /// Maps the raw block size convention, where `-1` means a single block.
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            -1 => Some(BlockSize::Whole),
            n if n > 0 => BlockSize::samples(n as usize),
            _ => None,
        }
    }
}

/// Loop markers, in samples, for codecs that align blocks to the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopPoints {
    pub start: u32,
    pub end: u32,
}

pub trait AudioEncoding: Clone + Default {
    /// Native sample (or raw unit) type of the buffer.
    type Sample: Copy;
    /// Side data some codecs need to convert to and from normalized samples.
    type Coding: Default;
    /// Codec specific metadata carried with the buffer.
    type Properties: Default + Clone;

    fn from_raw(samples: Vec<Self::Sample>) -> Self;

    fn raw(&self) -> &[Self::Sample];

    fn sample_count(&self) -> usize;

    /// Bytes the buffer occupies when written with `write_raw`.
    fn encoded_size(&self) -> usize;

    fn samples_for_block_size(&self, block_size: usize) -> usize;

    fn read_raw<S: Read + Seek>(
        &mut self,
        r: &mut BinaryReader<S>,
        sample_count: u32,
        byte_size: u32,
    ) -> Result<()>;

    fn write_raw<W: Write + Seek>(&self, w: &mut BinaryWriter<W>) -> Result<()>;

    fn from_normalized(
        &mut self,
        samples: &[f32],
        coding: &Self::Coding,
        loop_points: Option<LoopPoints>,
    );

    fn to_normalized(&self, coding: &Self::Coding) -> Vec<f32>;

    /// Keeps the first `total_samples` samples.
    fn trim(&mut self, total_samples: usize);

    fn duplicate(&self) -> Self {
        self.clone()
    }

    fn properties(&self) -> &Self::Properties;

    fn set_properties(&mut self, properties: Self::Properties);

    /// Concatenates `blocks` in order and splits the result into new blocks.
    fn change_block_size(blocks: &[Self], new_block_size: BlockSize) -> Vec<Self> {
        let samples: Vec<Self::Sample> = blocks
            .iter()
            .flat_map(|b| b.raw().iter().copied())
            .collect();
        match new_block_size {
            BlockSize::Whole => vec![Self::from_raw(samples)],
            BlockSize::Samples(per_block) => samples
                .chunks(per_block.get())
                .map(|chunk| Self::from_raw(chunk.to_vec()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_block_size_convention() {
        assert_eq!(BlockSize::from_raw(-1), Some(BlockSize::Whole));
        assert_eq!(BlockSize::from_raw(4), BlockSize::samples(4));
        assert_eq!(BlockSize::from_raw(0), None);
        assert_eq!(BlockSize::from_raw(-2), None);
        assert_eq!(BlockSize::samples(0), None);
    }

    #[test]
    fn re_blocking_splits_and_joins() {
        let blocks = vec![
            Pcm8Signed::from_raw(vec![1, 2, 3]),
            Pcm8Signed::from_raw(vec![4, 5, 6, 7, 8]),
        ];

        let fours = Pcm8Signed::change_block_size(&blocks, BlockSize::samples(4).unwrap());
        let sizes: Vec<_> = fours.iter().map(AudioEncoding::sample_count).collect();
        assert_eq!(sizes, vec![4, 4]);
        assert_eq!(fours[1].raw(), &[5, 6, 7, 8]);

        let whole = Pcm8Signed::change_block_size(&blocks, BlockSize::Whole);
        assert_eq!(whole.len(), 1);
        assert_eq!(whole[0].raw(), &[1, 2, 3, 4, 5, 6, 7, 8]);

        let threes = Pcm8Signed::change_block_size(&blocks, BlockSize::samples(3).unwrap());
        let sizes: Vec<_> = threes.iter().map(AudioEncoding::sample_count).collect();
        assert_eq!(sizes, vec![3, 3, 2]);

        // the source blocks are untouched
        assert_eq!(blocks[0].raw(), &[1, 2, 3]);
    }

    #[test]
    fn re_blocking_nothing() {
        let none: Vec<Pcm16> = vec![];
        assert!(Pcm16::change_block_size(&none, BlockSize::samples(8).unwrap()).is_empty());
        let whole = Pcm16::change_block_size(&none, BlockSize::Whole);
        assert_eq!(whole.len(), 1);
        assert_eq!(whole[0].sample_count(), 0);
    }
}
