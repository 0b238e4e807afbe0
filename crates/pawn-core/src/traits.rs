use crate::error::Result;

/// Validate structural integrity of a mesh or pixel buffer.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}
