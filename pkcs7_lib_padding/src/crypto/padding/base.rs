use super::Result;

pub trait PaddingAlgorithm
where
    Self: Copy
{
    fn block_size(&self) -> usize;

    fn apply_padding(&self, input: &mut Vec<u8>);

    /// Leaves `input` untouched when the padding is rejected.
    fn remove_padding(&self, input: &mut Vec<u8>) -> Result<()>;

    fn with_block_size(size: usize) -> Result<Self>;
}
