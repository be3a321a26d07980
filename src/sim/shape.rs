//! Fixed-capacity polygon outlines in local space

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_VERTEXES;
use crate::error::ShapeError;

/// A polygon outline centered on the origin, unrotated.
///
/// The vertex list is allocated once and never grows. The cap is chosen by
/// the body kind that owns the shape. Deserialized shapes go through the
/// same vertex count check as [`Shape::with_cap`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ShapeRepr")]
pub struct Shape {
    vertices: Box<[Vec2]>,
    max_vertexes: usize,
}

/// Unchecked wire form of a [`Shape`]
#[derive(Deserialize)]
struct ShapeRepr {
    vertices: Vec<Vec2>,
    max_vertexes: usize,
}

impl TryFrom<ShapeRepr> for Shape {
    type Error = ShapeError;

    fn try_from(repr: ShapeRepr) -> Result<Self, Self::Error> {
        Shape::with_cap(repr.vertices, repr.max_vertexes)
    }
}

impl Shape {
    /// Build a shape under the generic vertex cap
    pub fn new(vertices: Vec<Vec2>) -> Result<Self, ShapeError> {
        Self::with_cap(vertices, MAX_VERTEXES)
    }

    /// Build a shape under an explicit vertex cap
    pub fn with_cap(vertices: Vec<Vec2>, max_vertexes: usize) -> Result<Self, ShapeError> {
        let count = vertices.len();
        if count <= 2 || count > max_vertexes {
            return Err(ShapeError::VertexCountOutOfRange {
                count,
                max: max_vertexes,
            });
        }
        Ok(Self {
            vertices: vertices.into_boxed_slice(),
            max_vertexes,
        })
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    #[inline]
    pub fn max_vertexes(&self) -> usize {
        self.max_vertexes
    }

    /// Distance from the origin to the farthest vertex
    pub fn radius(&self) -> f32 {
        self.vertices
            .iter()
            .map(|v| v.length())
            .fold(0.0, f32::max)
    }
}
