use std::io::{Read, Write};

use log::debug;

use crate::codec::Algorithm;
use crate::error::Result;
use crate::pump::{pump, PumpConfig, Transfer};

/// Decompresses the stream read from `source` into `sink`.
///
/// Input that is not a valid frame, or that ends in the middle of one,
/// fails with [`Error::Codec`](crate::Error::Codec). Whatever was decoded
/// before the failure may already have reached the sink.
pub fn decompress<R: Read, W: Write>(
    source: R,
    sink: W,
    algorithm: Algorithm,
    config: &PumpConfig,
) -> Result<Transfer> {
    let mut decoder = algorithm.decoder()?;
    debug!("decompressing {}", algorithm.name());
    pump(source, sink, decoder.as_mut(), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::io::Cursor;

    #[test]
    fn decodes_a_bulk_frame() {
        let data = b"lorem ipsum dolor sit amet ".repeat(500);
        let frame = zstd::encode_all(Cursor::new(&data), 3).unwrap();
        let mut output = Vec::new();
        decompress(Cursor::new(&frame), &mut output, Algorithm::Zstd, &PumpConfig::default()).unwrap();
        assert_eq!(output, data);
    }

    #[test]
    fn concatenated_frames_decode_in_sequence() {
        let mut frames = zstd::encode_all(Cursor::new(b"first "), 1).unwrap();
        frames.extend(zstd::encode_all(Cursor::new(b"second"), 1).unwrap());
        let mut output = Vec::new();
        decompress(Cursor::new(&frames), &mut output, Algorithm::Zstd, &PumpConfig::default()).unwrap();
        assert_eq!(output, b"first second");
    }

    #[test]
    fn garbage_is_rejected() {
        let mut output = Vec::new();
        let err = decompress(
            Cursor::new(b"this is not a compressed stream"),
            &mut output,
            Algorithm::Zstd,
            &PumpConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Codec { codec: "zstd", .. }));
    }

    #[test]
    fn empty_input_decodes_to_nothing() {
        let mut output = Vec::new();
        let transfer =
            decompress(std::io::empty(), &mut output, Algorithm::Zstd, &PumpConfig::default()).unwrap();
        assert!(output.is_empty());
        assert_eq!(transfer.bytes_written, 0);
    }
}
