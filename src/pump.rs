use std::io::{ErrorKind, Read, Write};
use std::time::{Duration, Instant};

use human_bytes::human_bytes;
use log::{debug, trace};

use crate::codec::{Codec, InputView, OutputView};
use crate::error::{Error, Result};

/// Buffer capacity overrides. `None` means the size recommended by the codec.
#[derive(Clone, Debug, Default)]
pub struct PumpConfig {
    pub input_capacity: Option<usize>,
    pub output_capacity: Option<usize>,
}

/// What happened during one pump run.
#[derive(Clone, Debug, Default)]
pub struct Transfer {
    pub bytes_read: u64,
    pub bytes_written: u64,
    /// Non-empty reads from the source.
    pub reads: u64,
    /// Codec invocations, not counting the final flush.
    pub rounds: u64,
    pub input_capacity: usize,
    pub output_capacity: usize,
    pub elapsed: Duration,
}

impl Transfer {
    /// Output size relative to input size; zero for an empty input.
    pub fn compression_ratio(&self) -> f64 {
        ratio(self.bytes_written as f64, self.bytes_read as f64)
    }

    pub fn input_throughput(&self) -> f64 {
        ratio(self.bytes_read as f64, self.elapsed.as_secs_f64())
    }

    pub fn output_throughput(&self) -> f64 {
        ratio(self.bytes_written as f64, self.elapsed.as_secs_f64())
    }

    pub fn format_compression(&self) -> String {
        let sizes = format!(
            "{} => {}",
            human_bytes(self.bytes_read as f64),
            human_bytes(self.bytes_written as f64)
        );
        if self.bytes_read == 0 {
            return sizes;
        }
        format!("{} ({:.1} %)", sizes, self.compression_ratio() * 100.0)
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Streams everything from `source` through `codec` into `sink`.
///
/// Memory use is bounded by the two buffers, allocated once up front.
/// Each read is drained completely before the next one is issued: the codec
/// is invoked until it has consumed the whole chunk and stopped filling the
/// output buffer, and every piece of output is written before the buffer is
/// reused. After the source is exhausted the codec is finished exactly once.
pub fn pump<R: Read, W: Write>(
    mut source: R,
    mut sink: W,
    codec: &mut dyn Codec,
    config: &PumpConfig,
) -> Result<Transfer> {
    let start_time = Instant::now();
    let codec_name = codec.name();
    let input_capacity = capacity("input", config.input_capacity, codec.input_size())?;
    let output_capacity = capacity("output", config.output_capacity, codec.output_size())?;
    let mut input_buf = allocate("input buffer", input_capacity)?;
    let mut output_buf = allocate("output buffer", output_capacity)?;

    let mut transfer = Transfer {
        input_capacity,
        output_capacity,
        ..Transfer::default()
    };
    let mut to_read = input_capacity;

    loop {
        let len = read_chunk(&mut source, &mut input_buf[..to_read], transfer.bytes_read)?;
        if len == 0 {
            break;
        }
        transfer.bytes_read += len as u64;
        transfer.reads += 1;
        debug!("{codec_name}: read {len} of {to_read} bytes requested");

        let mut input = InputView::new(&input_buf[..len]);
        loop {
            let consumed_before = input.pos;
            let mut output = OutputView::new(&mut output_buf);
            let hint = codec
                .transform(&mut input, &mut output)
                .map_err(|source| Error::Codec {
                    codec: codec_name,
                    source,
                })?;
            transfer.rounds += 1;
            to_read = next_read_len(hint, input_capacity);

            let output_full = output.is_full();
            let produced = output.pos;
            write_chunk(&mut sink, output.produced(), &mut transfer)?;
            trace!(
                "{codec_name}: consumed {}/{len}, produced {produced}, hint {hint}",
                input.pos
            );

            if input.is_consumed() && !output_full {
                break;
            }
            if input.pos == consumed_before && produced == 0 {
                return Err(Error::Stalled {
                    codec: codec_name,
                    pending: input.remaining().len(),
                });
            }
        }
    }

    let mut output = OutputView::new(&mut output_buf);
    let remaining = codec.finish(&mut output).map_err(|source| Error::Codec {
        codec: codec_name,
        source,
    })?;
    if remaining != 0 {
        return Err(Error::IncompleteFlush {
            codec: codec_name,
            remaining,
        });
    }
    debug!("{codec_name}: end of stream, flushing {} bytes", output.pos);
    write_chunk(&mut sink, output.produced(), &mut transfer)?;
    sink.flush().map_err(|source| Error::Write {
        offset: transfer.bytes_written,
        source,
    })?;

    transfer.elapsed = start_time.elapsed();
    Ok(transfer)
}

fn capacity(what: &str, requested: Option<usize>, recommended: usize) -> Result<usize> {
    match requested {
        Some(0) => Err(Error::Config(format!("{what} buffer capacity must be positive"))),
        Some(len) => Ok(len),
        None => Ok(recommended),
    }
}

fn allocate(what: &'static str, size: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(size)
        .map_err(|_| Error::Alloc { what, size })?;
    buf.resize(size, 0);
    Ok(buf)
}

/// The codec's hint is untrusted: never read more than the buffer holds.
fn next_read_len(hint: usize, capacity: usize) -> usize {
    match hint {
        0 => capacity,
        hint => hint.min(capacity),
    }
}

fn read_chunk<R: Read>(source: &mut R, buf: &mut [u8], offset: u64) -> Result<usize> {
    loop {
        match source.read(buf) {
            Ok(len) => return Ok(len),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(source) => return Err(Error::Read { offset, source }),
        }
    }
}

fn write_chunk<W: Write>(sink: &mut W, bytes: &[u8], transfer: &mut Transfer) -> Result<()> {
    if bytes.is_empty() {
        return Ok(());
    }
    // write_all keeps going after short writes
    sink.write_all(bytes).map_err(|source| Error::Write {
        offset: transfer.bytes_written,
        source,
    })?;
    transfer.bytes_written += bytes.len() as u64;
    Ok(())
}
