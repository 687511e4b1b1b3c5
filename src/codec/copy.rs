use std::io;
use crate::codec::{Codec, InputView, OutputView};

const BUFFER_SIZE: usize = 64 * 1024;

/// Stores the input as is. Handy for measuring the pump itself.
pub struct Copy;

impl Codec for Copy {
    fn name(&self) -> &'static str {
        "copy"
    }

    fn input_size(&self) -> usize {
        BUFFER_SIZE
    }

    fn output_size(&self) -> usize {
        BUFFER_SIZE
    }

    fn transform(
        &mut self,
        input: &mut InputView<'_>,
        output: &mut OutputView<'_>,
    ) -> io::Result<usize> {
        let src = input.remaining();
        let dst = output.spare();
        let len = src.len().min(dst.len());
        dst[..len].copy_from_slice(&src[..len]);
        input.pos += len;
        output.pos += len;
        Ok(0)
    }

    fn finish(&mut self, _output: &mut OutputView<'_>) -> io::Result<usize> {
        Ok(0)
    }
}
