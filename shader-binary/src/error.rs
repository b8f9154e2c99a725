use core::fmt::{self, Display, Formatter};

/// The error type returned when a record cannot be overlaid on or read from a
/// byte slice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// The slice is shorter than the record.
    TooShort {
        /// The record's size in bytes.
        needed: usize,
        /// The length of the slice.
        available: usize,
    },
    /// The slice is not aligned for a zero-copy overlay of the record.
    Misaligned,
}

impl Display for LayoutError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::TooShort { needed, available } => write!(
                f,
                "record needs {needed} bytes but only {available} are available"
            ),
            Self::Misaligned => write!(f, "bytes are not aligned for the record type"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LayoutError {}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            LayoutError::TooShort {
                needed: 64,
                available: 10
            }
            .to_string(),
            "record needs 64 bytes but only 10 are available",
        );
        assert_eq!(
            LayoutError::Misaligned.to_string(),
            "bytes are not aligned for the record type",
        );
    }
}
