use crate::utils::error::Result;

/// Destination for the finished archive bytes.
pub trait Storage {
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}
