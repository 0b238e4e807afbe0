use thiserror::Error;

#[derive(Debug, Error)]
pub enum PawnError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Degenerate profile: {0}")]
    DegenerateProfile(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Vector graphic error: {0}")]
    Vector(String),

    #[error("Canvas error: {0}")]
    Canvas(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PawnError {
    /// Asset failures the caller may recover from by skipping the texture.
    /// Configuration and shape errors are fatal.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, PawnError::Decode(_) | PawnError::Vector(_))
    }
}

pub type Result<T> = std::result::Result<T, PawnError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_variants() {
        assert!(PawnError::Decode("bad png".into()).is_recoverable());
        assert!(PawnError::Vector("bad svg".into()).is_recoverable());
        assert!(!PawnError::Config("no segments".into()).is_recoverable());
        assert!(!PawnError::DegenerateProfile("flat".into()).is_recoverable());
        assert!(!PawnError::Canvas("size".into()).is_recoverable());
    }

    #[test]
    fn test_display() {
        let err = PawnError::Config("angular divisions must be >= 3, got 0".into());
        assert_eq!(
            err.to_string(),
            "Configuration error: angular divisions must be >= 3, got 0"
        );
    }
}
