use crate::error::PersistError;

/// Pack heights as little-endian f32 and LZ4 them.
pub fn compress_heights(heights: &[f32]) -> Vec<u8> {
    let raw: Vec<u8> = heights.iter().flat_map(|h| h.to_le_bytes()).collect();
    lz4_flex::compress_prepend_size(&raw)
}

/// Inverse of `compress_heights`, checking the value count and rejecting NaN or infinity.
pub fn decompress_heights(compressed: &[u8], expected: usize) -> Result<Vec<f32>, PersistError> {
    let raw = lz4_flex::decompress_size_prepended(compressed)
        .map_err(|e| PersistError::DecompressError(e.to_string()))?;

    if raw.len() != expected * 4 {
        return Err(PersistError::HeightCountMismatch {
            expected,
            actual: raw.len() / 4,
        });
    }

    let mut heights = Vec::with_capacity(expected);
    for (i, bytes) in raw.chunks_exact(4).enumerate() {
        let h = f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        if !h.is_finite() {
            return Err(PersistError::NonFiniteHeight(i));
        }
        heights.push(h);
    }
    Ok(heights)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compress_decompress() {
        let heights: Vec<f32> = (0..289).map(|i| (i as f32 * 0.37).sin().abs() * 12.0).collect();
        let compressed = compress_heights(&heights);
        let back = decompress_heights(&compressed, heights.len()).expect("decompress should succeed");
        assert_eq!(heights, back);
    }

    #[test]
    fn test_flat_field_compresses_well() {
        let heights = vec![0.0f32; 1025 * 1025];
        let compressed = compress_heights(&heights);
        assert!(
            compressed.len() < heights.len() * 4 / 10,
            "flat field should compress to <10% (got {} bytes)",
            compressed.len()
        );
    }

    #[test]
    fn test_wrong_count_rejected() {
        let compressed = compress_heights(&[1.0, 2.0, 3.0]);
        assert!(matches!(
            decompress_heights(&compressed, 4),
            Err(PersistError::HeightCountMismatch {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_nan_rejected() {
        let compressed = compress_heights(&[1.0, f32::NAN]);
        assert!(matches!(
            decompress_heights(&compressed, 2),
            Err(PersistError::NonFiniteHeight(1))
        ));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(
            decompress_heights(&[16, 0, 0, 0, 0xFF, 0xFF], 4),
            Err(PersistError::DecompressError(_))
        ));
    }
}
