//! Contiguous storage for fixed-dimension vectors.

use crate::error::{IndexError, Result};

/// Row-major flat storage: vectors sit back to back in one buffer as
/// `[v0_d0, v0_d1, ..., v1_d0, v1_d1, ...]`. A vector's identifier is
/// its zero-based insertion position, stable until `clear`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct VectorStore {
    dim: usize,
    data: Vec<f32>,
}

impl VectorStore {
    /// Creates an empty store for vectors of length `dim`.
    /// Callers guarantee `dim >= 1`.
    pub fn new(dim: usize) -> VectorStore {
        debug_assert!(dim >= 1);
        VectorStore { dim, data: Vec::new() }
    }

    /// Rebuilds a store from a raw row-major buffer whose length is a
    /// multiple of `dim`.
    pub fn from_flat(dim: usize, data: Vec<f32>) -> VectorStore {
        debug_assert!(dim >= 1);
        debug_assert_eq!(data.len() % dim, 0);
        VectorStore { dim, data }
    }

    /// Appends one vector and returns its identifier (the size before
    /// the append).
    pub fn append(&mut self, vector: &[f32]) -> Result<usize> {
        if vector.len() != self.dim {
            return Err(IndexError::DimensionMismatch {
                expected: self.dim,
                actual: vector.len(),
            });
        }

        let id = self.size();
        self.data.extend_from_slice(vector);
        Ok(id)
    }

    /// Returns the vector stored under `id`.
    pub fn get(&self, id: usize) -> Result<&[f32]> {
        if id >= self.size() {
            return Err(IndexError::OutOfRange { id, size: self.size() });
        }

        let start = id * self.dim;
        Ok(&self.data[start..start + self.dim])
    }

    /// Empties the store. Identifiers restart at 0 on the next append.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Number of vectors currently stored.
    pub fn size(&self) -> usize {
        self.data.len() / self.dim
    }

    /// The raw row-major buffer, in insertion order.
    pub fn as_flat(&self) -> &[f32] {
        &self.data
    }
}
