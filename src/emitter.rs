#![warn(clippy::pedantic)]
#![deny(unsafe_code)]

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::vectors::rows;

/// Artifact the `gen` subcommand regenerates. Always created or truncated
/// whole; never appended to.
pub const DEFAULT_OUTPUT: &str = "entries.txt";

/// The one failure mode of a table emission: the artifact could not be
/// created or written. Fatal; there is no partial-result handling.
#[derive(Debug, Error)]
#[error("could not produce {0:?}: {1}")]
pub struct EmitError(pub PathBuf, pub io::Error);

/// Writes every registration statement in emission order, one line each.
/// Returns the number of rows written.
pub fn write_table(w: &mut impl Write) -> io::Result<usize> {
    let mut written = 0;
    for row in rows() {
        writeln!(w, "{row}")?;
        written += 1;
    }
    Ok(written)
}

/// Creates or truncates `path` and writes the full table through a
/// buffered writer. The handle is released on scope exit whether or not
/// the emission completed.
pub fn emit(path: &Path) -> Result<usize, EmitError> {
    let fail = |err| EmitError(path.to_owned(), err);
    let file = File::create(path).map_err(fail)?;
    let mut writer = BufWriter::new(file);
    let written = write_table(&mut writer).map_err(fail)?;
    writer.flush().map_err(fail)?;
    Ok(written)
}
