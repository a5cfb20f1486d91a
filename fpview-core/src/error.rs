//! Error types for mesh loading

use std::path::PathBuf;
use thiserror::Error;

/// Result type for mesh loading operations
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors that can occur while loading a mesh.
///
/// Degenerate geometry met while projecting or shading is never reported
/// through this type; those cases are recovered where they happen.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to open mesh file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: malformed `{kind}` record: {text:?}")]
    Malformed {
        line: usize,
        kind: &'static str,
        text: String,
    },

    #[error("face {face} references vertex {index} but the mesh has {vertex_count} vertices")]
    FaceIndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },
}
