// src/error.rs
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed tag line (no '<' ... '>'): {line:?}")]
    MalformedLine { line: String },

    #[error("No partition descriptor referenced in index file {0}")]
    PartitionDescriptorNotFound(PathBuf),

    #[error("Unknown field kind in {0}: neither Scalars nor Vectors declared")]
    UnknownFieldKind(PathBuf),

    #[error("Unexpected shape of {path}: need line {required}, file has {found} lines")]
    UnexpectedFileShape { path: PathBuf, required: usize, found: usize },

    #[error("Point ({x}, {y}, {z}) in {path} is not part of the merged mesh")]
    UnmappedPoint { path: PathBuf, x: f64, y: f64, z: f64 },

    #[error("Field type mismatch: expected {expected}, found {found}")]
    FieldTypeMismatch { expected: String, found: String },

    #[error("Invalid number {token:?} in {path}")]
    InvalidNumber { path: PathBuf, token: String },

    #[error("Payload of {path} holds {count} values, not a multiple of row width {width}")]
    RaggedPayload { path: PathBuf, count: usize, width: usize },

    #[error("Count mismatch in {path}: {what} expected {expected}, found {found}")]
    CountMismatch { path: PathBuf, what: &'static str, expected: usize, found: usize },

    #[error("Cell {cell} in {path} references point {index}, partition has {points} points")]
    ConnectivityOutOfRange { path: PathBuf, cell: usize, index: u32, points: usize },

    #[error("Mesh has {count} points, more than 32-bit point indices can address")]
    TooManyPoints { count: usize },

    #[error("Global point {index} was not written by any partition")]
    UncoveredPoint { index: usize },

    #[error("Invalid base name {0}: expected a name ending in .pvd")]
    InvalidBaseName(PathBuf),

    #[error("Invalid UTF-8 in {0}")]
    InvalidUtf8(PathBuf),

    #[error("Writer closed")]
    WriterClosed,
}

pub type Result<T> = std::result::Result<T, ConvertError>;
