//! Construction errors

use core::fmt;

/// A polygon shape could not be built
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeError {
    /// Vertex count outside `(2, max]`
    VertexCountOutOfRange { count: usize, max: usize },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VertexCountOutOfRange { count, max } => write!(
                f,
                "vertex count out of range: {count} (allowed 3..={max})"
            ),
        }
    }
}

impl std::error::Error for ShapeError {}
