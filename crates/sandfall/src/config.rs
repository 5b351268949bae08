//! Simulation settings.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_CHUNK_SIZE: usize = 16;

/// Largest row jitter requested by default. The scheduler may clamp it
/// further for small chunks.
pub const DEFAULT_MAX_ROW_JITTER: usize = 2;

/// Chance that a sleeping, non-empty chunk is sampled anyway.
pub const DEFAULT_REAWAKEN_CHANCE: f32 = 0.146;

/// Frames a touched chunk keeps being processed after the frame it was touched.
pub const DEFAULT_STAY_AWAKE_FRAMES: u8 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub width: usize,
    pub height: usize,
    pub chunk_size: usize,
    pub max_row_jitter: usize,
    pub reawaken_chance: f32,
    pub stay_awake_frames: u8,
    /// Fixed seed for reproducible runs. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new(256, 256)
    }
}

impl SimConfig {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_row_jitter: DEFAULT_MAX_ROW_JITTER,
            reawaken_chance: DEFAULT_REAWAKEN_CHANCE,
            stay_awake_frames: DEFAULT_STAY_AWAKE_FRAMES,
            seed: None,
        }
    }

    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_reawaken_chance(mut self, chance: f32) -> Self {
        self.reawaken_chance = chance;
        self
    }

    #[must_use]
    pub fn with_max_row_jitter(mut self, jitter: usize) -> Self {
        self.max_row_jitter = jitter;
        self
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.chunk_size < 2 {
            return Err(ConfigError::ChunkTooSmall(self.chunk_size));
        }
        if self.width % self.chunk_size != 0 || self.height % self.chunk_size != 0 {
            return Err(ConfigError::NotChunkAligned {
                width: self.width,
                height: self.height,
                chunk_size: self.chunk_size,
            });
        }
        if !(0.0..=1.0).contains(&self.reawaken_chance) {
            return Err(ConfigError::InvalidChance(self.reawaken_chance));
        }
        if self.stay_awake_frames == 0 {
            return Err(ConfigError::NoStayAwake);
        }
        Ok(())
    }

    /// Row jitter the stripe scheduler can actually honor for this chunk size.
    ///
    /// A chunk-row's stripe extends `chunk_size / 2` rows past each of its
    /// edges, and a cell may touch one row beyond the row being processed.
    #[must_use]
    pub fn effective_row_jitter(&self) -> usize {
        self.max_row_jitter
            .min((self.chunk_size / 2).saturating_sub(1))
    }
}
