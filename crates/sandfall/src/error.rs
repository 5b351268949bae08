//! Error types. Only construction can fail; everything else is either
//! normal control flow or a caller bug that panics.

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("grid must contain at least one cell")]
    EmptyGrid,

    #[error("chunk size must be at least 2, got {0}")]
    ChunkTooSmall(usize),

    #[error("grid {width}x{height} is not a multiple of chunk size {chunk_size}")]
    NotChunkAligned {
        width: usize,
        height: usize,
        chunk_size: usize,
    },

    #[error("reawaken chance {0} is outside [0, 1]")]
    InvalidChance(f32),

    #[error("stay awake frames must be at least 1")]
    NoStayAwake,

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown material id {0}")]
pub struct UnknownMaterial(pub u8);
