use std::env;

use crate::RopeError;

pub const DEFAULT_CHUNK_SIZE: usize = 512;

/// Environment variable consulted by [`RopeConfig::from_env`].
pub const CHUNK_SIZE_ENV: &str = "TEXT_ROPE_CHUNK_SIZE";

/// Construction options shared by every rope derived from the same source.
///
/// `chunk_size` is the maximum number of chars a leaf built from flat text may hold. Smaller chunks make
/// edits touch less text at the cost of a deeper tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RopeConfig {
    chunk_size: usize,
}

impl Default for RopeConfig {
    fn default() -> Self {
        Self { chunk_size: DEFAULT_CHUNK_SIZE }
    }
}

impl RopeConfig {
    pub fn new(chunk_size: usize) -> Result<Self, RopeError> {
        if chunk_size == 0 {
            return Err(RopeError::InvalidChunkSize(chunk_size));
        }

        Ok(Self { chunk_size })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Reads `TEXT_ROPE_CHUNK_SIZE`, falling back to the default when it is unset.
    pub fn from_env() -> Result<Self, RopeError> {
        Self::from_value(env::var(CHUNK_SIZE_ENV).ok().as_deref())
    }

    fn from_value(value: Option<&str>) -> Result<Self, RopeError> {
        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return Ok(Self::default());
        };

        let chunk_size = value
            .parse::<usize>()
            .map_err(|source| RopeError::ParseChunkSize { value: value.to_string(), source })?;

        Self::new(chunk_size)
    }
}
