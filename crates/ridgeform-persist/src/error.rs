use ridgeform_core::TerrainError;

/// Errors that can occur during save/load operations.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("invalid magic bytes (expected RDGF)")]
    InvalidMagic,

    #[error("unsupported snapshot format version {0}")]
    UnsupportedVersion(u16),

    #[error("file too small ({0} bytes, minimum {1})")]
    FileTooSmall(usize, usize),

    #[error("truncated file: expected {expected} bytes, got {actual}")]
    TruncatedFile { expected: usize, actual: usize },

    #[error("LZ4 decompression failed: {0}")]
    DecompressError(String),

    #[error("height payload holds {actual} values, expected {expected}")]
    HeightCountMismatch { expected: usize, actual: usize },

    #[error("non-finite height at vertex {0}")]
    NonFiniteHeight(usize),

    #[error("snapshot has {saved} divisions but the running config uses {current}")]
    DivisionsMismatch { saved: u32, current: u32 },

    #[error("snapshot rejected by terrain: {0}")]
    Terrain(#[from] TerrainError),
}
