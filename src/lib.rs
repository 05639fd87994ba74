//! # flatvec - An Exact Vector Search Index
//!
//! flatvec implements a brute-force flat index over dense `f32` vectors:
//! every query is compared against every stored vector by squared L2
//! (Euclidean) distance, so results are exact. Vectors receive stable
//! integer identifiers in insertion order, and an index round-trips
//! through a compact little-endian binary format.
//!
//! ## Example
//!
//! ```
//! use flatvec::FlatIndex;
//!
//! let mut index = FlatIndex::new(3).unwrap();
//!
//! // Add vectors; identifiers are assigned in insertion order
//! index.add(&[
//!     vec![1.0, 0.0, 0.0],
//!     vec![0.0, 1.0, 0.0],
//!     vec![0.7, 0.7, 0.0],
//! ]).unwrap();
//!
//! // Search for the nearest neighbors of a query
//! let results = index.search(&[vec![1.0, 0.0, 0.0]], 2).unwrap();
//! assert_eq!(results[0][0].id, 0); // Exact self-match
//! assert_eq!(results[0][0].distance, 0.0);
//! ```

pub mod codec;
pub mod distance;
pub mod error;
pub mod server;
mod index;
mod store;
mod topk;

// Re-export the primary public API
pub use error::{IndexError, Result};
pub use index::{FlatIndex, Neighbor};
