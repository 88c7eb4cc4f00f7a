use crate::crypto::padding::base::PaddingAlgorithm;
use crate::crypto::padding::{PaddingConfig, PaddingError, Result};
use crate::crypto::padding::{DEFAULT_BLOCK_SIZE, MAX_BLOCK_SIZE};
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

fn check_block_size(block_size: usize) -> Result<u8> {
    match u8::try_from(block_size) {
        Ok(size) if size != 0 => Ok(size),
        _ => {
            warn!("pkcs7: rejected block size {}", block_size);
            Err(PaddingError::InvalidBlockSize(block_size))
        }
    }
}

// `block_size` must already be in 1..=255.
fn append_padding(buf: &mut Vec<u8>, block_size: usize) {
    let pad_len = block_size - buf.len() % block_size;
    trace!(
        "pkcs7: appending {} bytes to {} for block size {}",
        pad_len,
        buf.len(),
        block_size
    );
    buf.resize(buf.len() + pad_len, pad_len as u8);
}

/// Appends PKCS#7 padding to a copy of `source` so that its length becomes a
/// multiple of `block_size`.
///
/// At least one byte is always appended: an already aligned source gains a
/// full block of `block_size` bytes.
///
/// Example: block size 8, source `DE AD BE EF` gives `DE AD BE EF 04 04 04 04`.
pub fn pad(source: &[u8], block_size: usize) -> Result<Vec<u8>> {
    let block_size = check_block_size(block_size)? as usize;
    let pad_len = block_size - source.len() % block_size;

    let mut output = Vec::with_capacity(source.len() + pad_len);
    output.extend_from_slice(source);
    append_padding(&mut output, block_size);
    Ok(output)
}

/// Strips PKCS#7 padding, returning the original bytes as a subslice of
/// `padded`.
///
/// A zero marker, a marker longer than the input and a mismatching padding
/// byte all produce the same [`PaddingError::InvalidPadding`]. The scan always
/// covers the trailing `min(len, 255)` bytes, whatever the marker says.
pub fn unpad(padded: &[u8]) -> Result<&[u8]> {
    let Some(&marker) = padded.last() else {
        debug!("pkcs7: nothing to unpad");
        return Err(PaddingError::EmptyInput);
    };
    let len = padded.len();
    let pad_len = marker as usize;

    let mut diff = 0u8;
    for (i, &byte) in padded.iter().rev().take(MAX_BLOCK_SIZE).enumerate() {
        let in_padding = ((i < pad_len) as u8).wrapping_neg();
        diff |= in_padding & (byte ^ marker);
    }
    let invalid = (marker == 0) as u8 | (pad_len > len) as u8 | (diff != 0) as u8;

    if invalid != 0 {
        debug!("pkcs7: rejected padding on {} bytes", len);
        return Err(PaddingError::InvalidPadding);
    }
    trace!("pkcs7: stripped {} bytes from {}", pad_len, len);
    Ok(&padded[..len - pad_len])
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PaddingConfig", into = "PaddingConfig")]
pub struct PaddingPkcs7 {
    block_size: u8,
}

impl PaddingPkcs7 {
    pub fn pad(&self, source: &[u8]) -> Vec<u8> {
        let block_size = self.block_size();
        let mut output = Vec::with_capacity(source.len() + block_size);
        output.extend_from_slice(source);
        append_padding(&mut output, block_size);
        output
    }

    /// Like [`unpad`], but also rejects input that is not block aligned or
    /// whose marker exceeds this padder's block size.
    pub fn unpad<'a>(&self, padded: &'a [u8]) -> Result<&'a [u8]> {
        let block_size = self.block_size();
        let misaligned = padded.len() % block_size != 0;

        match unpad(padded) {
            Ok(original) if !misaligned && padded.len() - original.len() <= block_size => {
                Ok(original)
            }
            Ok(_) => {
                debug!("pkcs7: rejected padding on {} bytes", padded.len());
                Err(PaddingError::InvalidPadding)
            }
            Err(err) => Err(err),
        }
    }
}

impl Default for PaddingPkcs7 {
    fn default() -> Self {
        Self { block_size: DEFAULT_BLOCK_SIZE as u8 }
    }
}

impl PaddingAlgorithm for PaddingPkcs7 {
    fn block_size(&self) -> usize {
        self.block_size as usize
    }

    fn apply_padding(&self, input: &mut Vec<u8>) {
        append_padding(input, self.block_size());
    }

    fn remove_padding(&self, input: &mut Vec<u8>) -> Result<()> {
        let original_len = self.unpad(input)?.len();
        input.truncate(original_len);
        Ok(())
    }

    fn with_block_size(size: usize) -> Result<Self> {
        Ok(Self { block_size: check_block_size(size)? })
    }
}

impl TryFrom<PaddingConfig> for PaddingPkcs7 {
    type Error = PaddingError;

    fn try_from(config: PaddingConfig) -> Result<Self> {
        Self::with_block_size(config.block_size)
    }
}

impl From<PaddingPkcs7> for PaddingConfig {
    fn from(padder: PaddingPkcs7) -> Self {
        Self { block_size: padder.block_size() }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn round_trip(
            source in proptest::collection::vec(any::<u8>(), 0..600),
            block_size in 1..=MAX_BLOCK_SIZE,
        ) {
            let padded = pad(&source, block_size).unwrap();
            prop_assert_eq!(padded.len() % block_size, 0);
            prop_assert!(padded.len() > source.len());
            prop_assert_eq!(unpad(&padded).unwrap(), &source[..]);
        }

        #[test]
        fn padder_matches_free_functions(
            source in proptest::collection::vec(any::<u8>(), 0..300),
            block_size in 1..=MAX_BLOCK_SIZE,
        ) {
            let padder = PaddingPkcs7::with_block_size(block_size).unwrap();
            let padded = padder.pad(&source);
            prop_assert_eq!(&padded, &pad(&source, block_size).unwrap());
            prop_assert_eq!(padder.unpad(&padded).unwrap(), &source[..]);
        }

        #[test]
        fn tampered_padding_rejected(
            source in proptest::collection::vec(any::<u8>(), 0..64),
            block_size in 2..=MAX_BLOCK_SIZE,
            position in any::<prop::sample::Index>(),
            flip in 1..=u8::MAX,
        ) {
            let mut padded = pad(&source, block_size).unwrap();
            let pad_len = padded[padded.len() - 1] as usize;
            prop_assume!(pad_len >= 2);

            let start = padded.len() - pad_len;
            let i = start + position.index(pad_len - 1);
            padded[i] ^= flip;
            prop_assert_eq!(unpad(&padded), Err(PaddingError::InvalidPadding));
        }
    }
}
