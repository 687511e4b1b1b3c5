use std::io;

use clap::ValueEnum;

use crate::error::{Error, Result};

pub mod copy;
pub mod zstd;

/// Input handed to a codec: the bytes of one read plus how many of them
/// the codec has consumed so far.
pub struct InputView<'a> {
    pub src: &'a [u8],
    pub pos: usize,
}

impl<'a> InputView<'a> {
    pub fn new(src: &'a [u8]) -> Self {
        InputView { src, pos: 0 }
    }

    pub fn remaining(&self) -> &'a [u8] {
        &self.src[self.pos..]
    }

    pub fn is_consumed(&self) -> bool {
        self.pos >= self.src.len()
    }
}

/// Output space handed to a codec plus how many bytes it has produced into it.
pub struct OutputView<'a> {
    pub dst: &'a mut [u8],
    pub pos: usize,
}

impl<'a> OutputView<'a> {
    pub fn new(dst: &'a mut [u8]) -> Self {
        OutputView { dst, pos: 0 }
    }

    pub fn produced(&self) -> &[u8] {
        &self.dst[..self.pos]
    }

    pub fn spare(&mut self) -> &mut [u8] {
        &mut self.dst[self.pos..]
    }

    pub fn is_full(&self) -> bool {
        self.pos >= self.dst.len()
    }
}

/// A single-use streaming compression or decompression session.
pub trait Codec {
    fn name(&self) -> &'static str;

    /// Recommended capacity of the input buffer.
    fn input_size(&self) -> usize;

    /// Recommended capacity of the output buffer.
    fn output_size(&self) -> usize;

    /// Consumes some input and produces some output, advancing both cursors.
    /// Returns a hint for the size of the next read; zero means no preference.
    fn transform(
        &mut self,
        input: &mut InputView<'_>,
        output: &mut OutputView<'_>,
    ) -> io::Result<usize>;

    /// Emits whatever the session still holds. Returns the number of bytes
    /// that did not fit into `output`.
    fn finish(&mut self, output: &mut OutputView<'_>) -> io::Result<usize>;
}

#[derive(ValueEnum, Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Algorithm {
    #[default]
    Zstd,
    Copy,
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Zstd => "zstd",
            Algorithm::Copy => "copy",
        }
    }

    pub fn encoder(&self, level: i32) -> Result<Box<dyn Codec>> {
        let init = |source| Error::Init {
            codec: self.name(),
            source,
        };
        Ok(match self {
            Algorithm::Zstd => Box::new(zstd::ZstdEncoder::new(level).map_err(init)?),
            Algorithm::Copy => Box::new(copy::Copy),
        })
    }

    pub fn decoder(&self) -> Result<Box<dyn Codec>> {
        let init = |source| Error::Init {
            codec: self.name(),
            source,
        };
        Ok(match self {
            Algorithm::Zstd => Box::new(zstd::ZstdDecoder::new().map_err(init)?),
            Algorithm::Copy => Box::new(copy::Copy),
        })
    }
}
