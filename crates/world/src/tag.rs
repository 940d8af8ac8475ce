//! Gzip tag-tree access shared by the detector and the dimension scanner.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use nbt::{Blob, Value};

use crate::WorldFormatError;

/// Read a gzip-compressed tag tree, or `None` when the file does not exist.
///
/// The file handle lives only for the duration of this call.
pub(crate) fn read_gzip_tags(path: &Path) -> Result<Option<Blob>, WorldFormatError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(WorldFormatError::Open {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let mut decoder = GzDecoder::new(BufReader::new(file));
    let blob = Blob::from_reader(&mut decoder).map_err(|source| WorldFormatError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(blob))
}

/// Interpret an optional tag as a byte leaf.
///
/// Absent tags yield `Ok(None)`; tags of any other type are a schema error.
pub(crate) fn byte_leaf(
    value: Option<&Value>,
    name: &str,
    path: &Path,
) -> Result<Option<i8>, WorldFormatError> {
    match value {
        None => Ok(None),
        Some(Value::Byte(byte)) => Ok(Some(*byte)),
        Some(other) => Err(WorldFormatError::Schema {
            path: path.to_path_buf(),
            detail: format!("`{name}` is a {} tag, expected a byte", tag_kind(other)),
        }),
    }
}

pub(crate) fn tag_kind(value: &Value) -> &'static str {
    match value {
        Value::Byte(_) => "byte",
        Value::Short(_) => "short",
        Value::Int(_) => "int",
        Value::Long(_) => "long",
        Value::Float(_) => "float",
        Value::Double(_) => "double",
        Value::String(_) => "string",
        Value::List(_) => "list",
        Value::Compound(_) => "compound",
        _ => "array",
    }
}
