//! Resolution of the byte source and sink.
//!
//! A missing path means the standard stream. Files are opened before any
//! codec state exists, so an open failure never leaves a session behind.

use std::fs::{File, OpenOptions};
use std::io::{stdin, stdout, BufWriter, Read, Write};
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};

/// Permission bits for newly created output files: rw for the owner,
/// read-only for group and others.
pub const OUTPUT_MODE: u32 = 0o644;

pub fn open_input(path: Option<&Path>) -> Result<Box<dyn Read>> {
    match path {
        None => {
            debug!("reading from standard input");
            Ok(Box::new(stdin().lock()))
        }
        Some(path) => {
            let file = File::open(path).map_err(|source| Error::Open {
                path: path.to_owned(),
                source,
            })?;
            debug!("reading from {}", path.display());
            Ok(Box::new(file))
        }
    }
}

/// Opens the sink. An existing file is overwritten from its start but keeps
/// any bytes past the end of the new stream, unless `truncate` is set.
pub fn open_output(path: Option<&Path>, truncate: bool) -> Result<Box<dyn Write>> {
    match path {
        None => {
            debug!("writing to standard output");
            Ok(Box::new(BufWriter::new(stdout().lock())))
        }
        Some(path) => {
            let mut options = OpenOptions::new();
            options.read(true).write(true).create(true).truncate(truncate);
            #[cfg(unix)]
            {
                use std::os::unix::fs::OpenOptionsExt;
                options.mode(OUTPUT_MODE);
            }
            let file = options.open(path).map_err(|source| Error::Open {
                path: path.to_owned(),
                source,
            })?;
            debug!("writing to {} (truncate: {truncate})", path.display());
            Ok(Box::new(file))
        }
    }
}
