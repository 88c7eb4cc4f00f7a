mod base;
mod config;
mod error;
mod pkcs7;

pub use base::PaddingAlgorithm;
pub use config::PaddingConfig;
pub use error::{PaddingError, Result};
pub use pkcs7::{pad, unpad, PaddingPkcs7};

/// Largest block size whose length fits in a single marker byte.
pub const MAX_BLOCK_SIZE: usize = u8::MAX as usize;
pub const DEFAULT_BLOCK_SIZE: usize = 16;


#[cfg(test)]
mod tests {
    use crate::crypto::padding::base::PaddingAlgorithm;
    use super::*;
    use rand::random;

    #[test]
    fn test_pkcs7() {
        let padder = PaddingPkcs7::with_block_size(8).unwrap();
        let data = vec![
            vec![5u8; 8],
            vec![4u8; 5],
            vec![4u8; 163],
            (0..1024).map(|_| random()).collect(),
        ];
        for d in data {
            let mut r = d.clone();
            padder.apply_padding(&mut r);
            assert_eq!(r.len() % padder.block_size(), 0);
            padder.remove_padding(&mut r).unwrap();
            assert_eq!(d, r);
        }
    }
}
