//! The flat index module
//! Exact k-nearest-neighbor search over fixed-dimension float vectors

use crate::codec;
use crate::distance::squared_l2;
use crate::error::{IndexError, Result};
use crate::store::VectorStore;
use crate::topk::TopK;
use serde::{Serialize, Deserialize};
use std::{
    fs::File,
    io::{
        BufWriter,
        Write,
    }
};

/// One search match: the identifier of a stored vector and its squared
/// L2 distance from the query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub id: usize,
    pub distance: f32,
}

/// An exact L2 index. Every query is compared against every stored
/// vector, so results are never approximate.
///
/// The dimension is fixed at construction. Vectors receive sequential
/// integer identifiers starting at 0, stable until [`reset`](FlatIndex::reset).
pub struct FlatIndex {
    dim: usize,
    store: VectorStore,
}

impl FlatIndex {
    /// Creates an empty index for vectors of length `dim`.
    ///
    /// # Arguments
    ///
    /// * `dim` - Vector dimension, must be at least 1
    ///
    /// # Returns
    ///
    /// * `Ok(FlatIndex)` - An empty index
    /// * `Err(IndexError::InvalidArgument)` - If `dim` is zero
    ///
    /// # Examples
    ///
    /// ```
    /// use flatvec::FlatIndex;
    ///
    /// let index = FlatIndex::new(128).unwrap();
    /// assert_eq!(index.dim(), 128);
    /// assert_eq!(index.ntotal(), 0);
    ///
    /// assert!(FlatIndex::new(0).is_err());
    /// ```
    pub fn new(dim: usize) -> Result<FlatIndex> {
        if dim == 0 {
            return Err(IndexError::InvalidArgument(
                "dimension must be at least 1".to_string(),
            ));
        }

        Ok(FlatIndex { dim, store: VectorStore::new(dim) })
    }

    /// Rebuilds an index from a raw row-major buffer. Used by the codec;
    /// the buffer length must be a multiple of `dim`.
    pub(crate) fn from_parts(dim: usize, data: Vec<f32>) -> FlatIndex {
        FlatIndex { dim, store: VectorStore::from_flat(dim, data) }
    }

    /// The raw row-major float buffer, in insertion order.
    pub(crate) fn flat_data(&self) -> &[f32] {
        self.store.as_flat()
    }

    /// The fixed vector dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The number of stored vectors.
    pub fn ntotal(&self) -> usize {
        self.store.size()
    }

    /// Whether the index is ready for adds and searches. A flat index
    /// has no training step, so this is always true.
    pub fn is_trained(&self) -> bool {
        true
    }

    /// Adds a batch of vectors, assigning sequential identifiers
    /// starting at the current count.
    ///
    /// The whole batch is validated before anything is stored: if any
    /// vector's length differs from the index dimension, the call fails
    /// and the index is left exactly as it was.
    ///
    /// # Arguments
    ///
    /// * `vectors` - Vectors to append, in insertion order
    ///
    /// # Returns
    ///
    /// * `Ok(())` - All vectors stored
    /// * `Err(IndexError::DimensionMismatch)` - A vector has the wrong length
    ///
    /// # Examples
    ///
    /// ```
    /// use flatvec::FlatIndex;
    ///
    /// let mut index = FlatIndex::new(3).unwrap();
    /// index.add(&[
    ///     vec![1.0, 0.0, 0.0],
    ///     vec![0.0, 1.0, 0.0],
    /// ]).unwrap();
    /// assert_eq!(index.ntotal(), 2);
    ///
    /// // One bad vector fails the whole batch, nothing is stored
    /// let result = index.add(&[vec![1.0, 1.0, 1.0], vec![1.0]]);
    /// assert!(result.is_err());
    /// assert_eq!(index.ntotal(), 2);
    /// ```
    pub fn add(&mut self, vectors: &[Vec<f32>]) -> Result<()> {
        // Hard validation pass before any mutation
        for vector in vectors {
            if vector.len() != self.dim {
                return Err(IndexError::DimensionMismatch {
                    expected: self.dim,
                    actual: vector.len(),
                });
            }
        }

        for vector in vectors {
            self.store.append(vector)?;
        }

        Ok(())
    }

    /// Searches for the k nearest stored vectors of each query, by
    /// squared L2 distance.
    ///
    /// Queries are processed independently and results come back in
    /// query order. Each result holds `min(k, ntotal)` matches sorted
    /// ascending by distance, ties broken by lower identifier. An empty
    /// index yields an empty result for every query.
    ///
    /// # Arguments
    ///
    /// * `queries` - Query vectors, each of the index dimension
    /// * `k` - Number of neighbors to return per query (0 is allowed)
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Vec<Neighbor>>)` - One ranked result per query
    /// * `Err(IndexError::DimensionMismatch)` - A query has the wrong length
    ///
    /// # Examples
    ///
    /// ```
    /// use flatvec::FlatIndex;
    ///
    /// let mut index = FlatIndex::new(2).unwrap();
    /// index.add(&[vec![0.0, 0.0], vec![3.0, 4.0]]).unwrap();
    ///
    /// let results = index.search(&[vec![0.0, 0.0]], 2).unwrap();
    /// assert_eq!(results[0][0].id, 0);
    /// assert_eq!(results[0][0].distance, 0.0);
    /// assert_eq!(results[0][1].id, 1);
    /// assert_eq!(results[0][1].distance, 25.0);
    /// ```
    pub fn search(&self, queries: &[Vec<f32>], k: usize) -> Result<Vec<Vec<Neighbor>>> {
        // Validate every query up front so a failing call does no work
        for query in queries {
            if query.len() != self.dim {
                return Err(IndexError::DimensionMismatch {
                    expected: self.dim,
                    actual: query.len(),
                });
            }
        }

        let mut results = Vec::with_capacity(queries.len());
        for query in queries {
            let mut topk = TopK::new(k);
            for id in 0..self.ntotal() {
                let distance = squared_l2(query, self.store.get(id)?);
                topk.offer(distance, id);
            }
            results.push(topk.finalize());
        }

        Ok(results)
    }

    /// Returns the vector stored under `id`.
    ///
    /// # Examples
    ///
    /// ```
    /// use flatvec::FlatIndex;
    ///
    /// let mut index = FlatIndex::new(2).unwrap();
    /// index.add(&[vec![1.5, -2.0]]).unwrap();
    ///
    /// assert_eq!(index.get(0).unwrap(), &[1.5, -2.0]);
    /// assert!(index.get(1).is_err());
    /// ```
    pub fn get(&self, id: usize) -> Result<&[f32]> {
        self.store.get(id)
    }

    /// Removes every stored vector. The dimension is kept; identifiers
    /// restart at 0 on the next add.
    ///
    /// # Examples
    ///
    /// ```
    /// use flatvec::FlatIndex;
    ///
    /// let mut index = FlatIndex::new(2).unwrap();
    /// index.add(&[vec![1.0, 2.0]]).unwrap();
    ///
    /// index.reset();
    /// assert_eq!(index.ntotal(), 0);
    /// ```
    pub fn reset(&mut self) {
        self.store.clear();
    }

    /// Saves the index to a file in the codec's binary layout.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use flatvec::FlatIndex;
    ///
    /// let mut index = FlatIndex::new(128).unwrap();
    /// index.save("flat_l2.index").unwrap();
    /// ```
    pub fn save(&self, path: &str) -> Result<()> {
        let file = File::create(path)?;

        let mut writer = BufWriter::new(file);
        writer.write_all(&codec::to_bytes(self))?;
        writer.flush()?;

        Ok(())
    }

    /// Loads an index from a file previously written with
    /// [`save`](FlatIndex::save).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use flatvec::FlatIndex;
    ///
    /// let index = FlatIndex::load("flat_l2.index").unwrap();
    /// println!("Loaded {} vectors", index.ntotal());
    /// ```
    pub fn load(path: &str) -> Result<FlatIndex> {
        let bytes = std::fs::read(path)?;
        codec::from_bytes(&bytes)
    }
}
