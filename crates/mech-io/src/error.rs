//! Error types for mech-io

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, IoError>;

#[derive(Error, Debug)]
pub enum IoError {
    #[error("The current build does not support HDF5 files.")]
    Hdf5Unsupported,

    #[error("The file extension provided must be '.h5': {}", .0.display())]
    InvalidExtension(PathBuf),

    #[error("Unsupported mesh file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Unsupported mesh function value type: {0}")]
    UnsupportedValueType(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "hdf5")]
    #[error("HDF5 error: {0}")]
    Hdf5(#[from] hdf5::Error),
}
