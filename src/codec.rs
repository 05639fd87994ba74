//! Binary serialization of a flat index.
//!
//! Layout, little-endian throughout:
//!
//! ```text
//! [i32 dimension][i64 ntotal][ntotal * dimension * f32 values, row-major by vector]
//! ```
//!
//! There is no magic number or version field. A reader validates that the
//! declared dimension and count are plausible and that the blob length
//! matches them exactly.

use crate::error::{IndexError, Result};
use crate::index::FlatIndex;

/// `i32` dimension plus `i64` vector count.
const HEADER_LEN: usize = 4 + 8;

/// Serializes `index` into the documented byte layout.
pub fn to_bytes(index: &FlatIndex) -> Vec<u8> {
    let data = index.flat_data();

    let mut buf = Vec::with_capacity(HEADER_LEN + data.len() * 4);
    buf.extend_from_slice(&(index.dim() as i32).to_le_bytes());
    buf.extend_from_slice(&(index.ntotal() as i64).to_le_bytes());
    for value in data {
        buf.extend_from_slice(&value.to_le_bytes());
    }

    buf
}

/// Reconstructs an index from bytes produced by [`to_bytes`].
///
/// Fails with `CorruptData` when the blob is shorter than the header,
/// declares a non-positive dimension or negative count, or has a length
/// different from the one its own header implies.
pub fn from_bytes(bytes: &[u8]) -> Result<FlatIndex> {
    if bytes.len() < HEADER_LEN {
        return Err(IndexError::CorruptData(format!(
            "blob of {} bytes is shorter than the {} byte header",
            bytes.len(),
            HEADER_LEN
        )));
    }

    let mut dim_bytes = [0u8; 4];
    dim_bytes.copy_from_slice(&bytes[0..4]);
    let dim = i32::from_le_bytes(dim_bytes);

    let mut ntotal_bytes = [0u8; 8];
    ntotal_bytes.copy_from_slice(&bytes[4..12]);
    let ntotal = i64::from_le_bytes(ntotal_bytes);

    if dim <= 0 {
        return Err(IndexError::CorruptData(format!(
            "declared dimension {} is not positive",
            dim
        )));
    }
    if ntotal < 0 {
        return Err(IndexError::CorruptData(format!(
            "declared vector count {} is negative",
            ntotal
        )));
    }

    let dim = dim as usize;
    let ntotal = ntotal as usize;
    let expected = ntotal
        .checked_mul(dim)
        .and_then(|n| n.checked_mul(4))
        .and_then(|n| n.checked_add(HEADER_LEN))
        .ok_or_else(|| {
            IndexError::CorruptData("declared size overflows".to_string())
        })?;
    if bytes.len() != expected {
        return Err(IndexError::CorruptData(format!(
            "expected {} bytes for dimension {} and {} vectors, got {}",
            expected,
            dim,
            ntotal,
            bytes.len()
        )));
    }

    let mut data = Vec::with_capacity(ntotal * dim);
    for chunk in bytes[HEADER_LEN..].chunks_exact(4) {
        let mut value_bytes = [0u8; 4];
        value_bytes.copy_from_slice(chunk);
        data.push(f32::from_le_bytes(value_bytes));
    }

    Ok(FlatIndex::from_parts(dim, data))
}
