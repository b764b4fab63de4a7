//! Path-level conversion

use std::fs::{self, File};
use std::io::{BufWriter, Read};
use std::path::Path;

use log::{debug, warn};

use crate::{ConversionStats, Converter, Error, Result};

/// Convert the file at `input_path` into a UTF-8 file at `output_path`
///
/// Preconditions are checked in order: encoding name, readable input,
/// non-empty input. The output file is only created once all three hold.
///
/// If writing fails midway the partial output is removed on a best-effort
/// basis. This is not an atomic replace: an existing destination has
/// already been truncated by then.
pub fn convert_file(
    input_path: impl AsRef<Path>,
    encoding_name: &str,
    output_path: impl AsRef<Path>,
) -> Result<ConversionStats> {
    let input_path = input_path.as_ref();
    let output_path = output_path.as_ref();

    let converter = Converter::from_name(encoding_name)?;

    let mut input = File::open(input_path).map_err(Error::InputUnavailable)?;

    // metadata length is unreliable for pipes and special files
    let mut first = [0u8; 1];
    let n = loop {
        match input.read(&mut first) {
            Ok(n) => break n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::InputUnavailable(e)),
        }
    };
    if n == 0 {
        return Err(Error::EmptyInput);
    }

    let output = File::create(output_path).map_err(Error::OutputUnavailable)?;
    debug!(
        "converting {} -> {}",
        input_path.display(),
        output_path.display()
    );

    let result = converter.convert_stream(first.as_slice().chain(input), BufWriter::new(output));
    if let Err(Error::OutputUnavailable(_)) = result {
        if let Err(e) = fs::remove_file(output_path) {
            warn!(
                "could not remove partial output {}: {e}",
                output_path.display()
            );
        }
    }
    result
}
