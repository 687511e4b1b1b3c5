//! Streams bytes through a compressor or decompressor with bounded memory.
//!
//! [`compress`] and [`decompress`] read from any [`Read`](std::io::Read),
//! push the bytes through a [`Codec`] session and write the result to any
//! [`Write`](std::io::Write), one bounded buffer at a time.

pub mod codec;
mod decoder;
mod discard;
mod encoder;
mod error;
pub mod io;
mod pump;

pub use codec::{Algorithm, Codec, InputView, OutputView};
pub use decoder::decompress;
pub use discard::Discard;
pub use encoder::{compress, DEFAULT_LEVEL};
pub use error::{Error, Result};
pub use pump::{pump, PumpConfig, Transfer};
