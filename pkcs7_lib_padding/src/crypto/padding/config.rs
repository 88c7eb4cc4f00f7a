use super::DEFAULT_BLOCK_SIZE;
use serde::{Deserialize, Serialize};

/// Serialized form of a padder. Range checks happen when it is turned into a
/// [`PaddingPkcs7`](super::PaddingPkcs7).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaddingConfig {
    #[serde(default = "default_block_size")]
    pub block_size: usize,
}

fn default_block_size() -> usize {
    DEFAULT_BLOCK_SIZE
}

impl Default for PaddingConfig {
    fn default() -> Self {
        Self { block_size: DEFAULT_BLOCK_SIZE }
    }
}
