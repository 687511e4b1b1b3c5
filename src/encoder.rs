use std::io::{Read, Write};

use log::debug;

use crate::codec::Algorithm;
use crate::error::Result;
use crate::pump::{pump, PumpConfig, Transfer};

/// Lowest regular zstd level.
pub const DEFAULT_LEVEL: i32 = 1;

/// Compresses everything readable from `source` into `sink`.
///
/// The compression session lives for the duration of this call and is
/// released on every return path.
pub fn compress<R: Read, W: Write>(
    source: R,
    sink: W,
    algorithm: Algorithm,
    level: i32,
    config: &PumpConfig,
) -> Result<Transfer> {
    let mut encoder = algorithm.encoder(level)?;
    debug!("compressing with {} at level {level}", algorithm.name());
    pump(source, sink, encoder.as_mut(), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn repeated_pattern_shrinks() {
        let data = b"AB".repeat(10_000);
        let mut compressed = Vec::new();
        let transfer = compress(
            Cursor::new(&data),
            &mut compressed,
            Algorithm::Zstd,
            DEFAULT_LEVEL,
            &PumpConfig::default(),
        )
        .unwrap();
        assert_eq!(transfer.bytes_read, 20_000);
        assert_eq!(transfer.bytes_written, compressed.len() as u64);
        assert!(compressed.len() < 20_000);
        assert_eq!(zstd::decode_all(Cursor::new(&compressed)).unwrap(), data);
    }

    #[test]
    fn empty_input_still_produces_a_frame() {
        let mut compressed = Vec::new();
        compress(
            std::io::empty(),
            &mut compressed,
            Algorithm::Zstd,
            DEFAULT_LEVEL,
            &PumpConfig::default(),
        )
        .unwrap();
        assert!(!compressed.is_empty());
        assert!(zstd::decode_all(Cursor::new(&compressed)).unwrap().is_empty());
    }
}
