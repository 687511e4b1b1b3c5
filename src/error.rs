use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not allocate {what} ({size} bytes)")]
    Alloc { what: &'static str, size: usize },

    #[error("could not create {codec} session")]
    Init {
        codec: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("{codec} stream error")]
    Codec {
        codec: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("{codec} not fully flushed: {remaining} bytes left after end of stream")]
    IncompleteFlush { codec: &'static str, remaining: usize },

    #[error("{codec} made no progress on {pending} pending input bytes")]
    Stalled { codec: &'static str, pending: usize },

    #[error("could not open {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("read failed at offset {offset}")]
    Read {
        offset: u64,
        #[source]
        source: io::Error,
    },

    #[error("write failed at offset {offset}")]
    Write {
        offset: u64,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}
