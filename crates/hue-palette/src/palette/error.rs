//! Error types for palette operations

use std::fmt;

/// Error type for palette construction.
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteError {
    /// Sweep size is zero or would overflow an 8-bit index
    InvalidSize {
        /// Requested number of sweep entries
        size: usize,
    },
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteError::InvalidSize { size } => {
                write!(
                    f,
                    "invalid palette size {} (expected 1..={} sweep entries)",
                    size,
                    super::DEFAULT_PALETTE_SIZE
                )
            }
        }
    }
}

impl std::error::Error for PaletteError {}
