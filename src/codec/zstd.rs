use std::io;
use zstd::stream::raw::{self, InBuffer, Operation, OutBuffer};
use zstd::zstd_safe;
use crate::codec::{Codec, InputView, OutputView};

pub struct ZstdEncoder {
    inner: raw::Encoder<'static>,
}

impl ZstdEncoder {
    pub fn new(level: i32) -> io::Result<Self> {
        Ok(ZstdEncoder {
            inner: raw::Encoder::new(level)?,
        })
    }
}

/// Decompression session. Tracks whether the last call left a frame open,
/// so that a stream cut off in the middle of a frame is reported on finish.
pub struct ZstdDecoder {
    inner: raw::Decoder<'static>,
    frame_open: bool,
}

impl ZstdDecoder {
    pub fn new() -> io::Result<Self> {
        Ok(ZstdDecoder {
            inner: raw::Decoder::new()?,
            frame_open: false,
        })
    }
}

fn run(
    op: &mut impl Operation,
    input: &mut InputView<'_>,
    output: &mut OutputView<'_>,
) -> io::Result<usize> {
    let mut src = InBuffer::around(input.remaining());
    let mut dst = OutBuffer::around(output.spare());
    let hint = op.run(&mut src, &mut dst)?;
    let (consumed, produced) = (src.pos(), dst.pos());
    input.pos += consumed;
    output.pos += produced;
    Ok(hint)
}

impl Codec for ZstdEncoder {
    fn name(&self) -> &'static str {
        "zstd"
    }

    fn input_size(&self) -> usize {
        zstd_safe::CCtx::in_size()
    }

    fn output_size(&self) -> usize {
        zstd_safe::CCtx::out_size()
    }

    fn transform(
        &mut self,
        input: &mut InputView<'_>,
        output: &mut OutputView<'_>,
    ) -> io::Result<usize> {
        run(&mut self.inner, input, output)
    }

    fn finish(&mut self, output: &mut OutputView<'_>) -> io::Result<usize> {
        let mut dst = OutBuffer::around(output.spare());
        let remaining = self.inner.finish(&mut dst, true)?;
        let produced = dst.pos();
        output.pos += produced;
        Ok(remaining)
    }
}

impl Codec for ZstdDecoder {
    fn name(&self) -> &'static str {
        "zstd"
    }

    fn input_size(&self) -> usize {
        zstd_safe::DCtx::in_size()
    }

    fn output_size(&self) -> usize {
        zstd_safe::DCtx::out_size()
    }

    fn transform(
        &mut self,
        input: &mut InputView<'_>,
        output: &mut OutputView<'_>,
    ) -> io::Result<usize> {
        let (consumed_before, produced_before) = (input.pos, output.pos);
        let hint = run(&mut self.inner, input, output)?;
        // zero only once a frame is fully decoded and flushed; an idle call
        // after that asks for the next header without opening a frame
        if hint == 0 {
            self.frame_open = false;
        } else if input.pos != consumed_before || output.pos != produced_before {
            self.frame_open = true;
        }
        Ok(hint)
    }

    fn finish(&mut self, output: &mut OutputView<'_>) -> io::Result<usize> {
        let mut dst = OutBuffer::around(output.spare());
        let remaining = self.inner.finish(&mut dst, !self.frame_open)?;
        let produced = dst.pos();
        output.pos += produced;
        Ok(remaining)
    }
}
