//! Error handling for key generation, recovery and classification.
//!
//! Every fallible operation returns [`NobusError`]. No operation returns a
//! partial result together with an error.

use thiserror::Error;

/// Key exchange or backdoor operation error
#[derive(Debug, Error)]
pub enum NobusError {
    /// The randomness source failed, or representative sampling ran out of
    /// attempts.
    #[error("randomness failure: {0}")]
    RandomnessFailure(String),

    /// A caller-supplied byte string does not have the fixed decode length.
    #[error("invalid input length: expected at least {expected} bytes, got {actual}")]
    InvalidInputLength {
        /// Required length
        expected: usize,
        /// Supplied length
        actual: usize,
    },

    /// Parameters that do not describe the fixed wire format.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
}

impl From<rand_core::Error> for NobusError {
    fn from(err: rand_core::Error) -> Self {
        Self::RandomnessFailure(err.to_string())
    }
}

/// Result type for this crate
pub type Result<T> = std::result::Result<T, NobusError>;

/// Fail with `InvalidInputLength` unless `bytes` holds at least `expected`
/// bytes.
pub(crate) fn ensure_len(bytes: &[u8], expected: usize) -> Result<()> {
    if bytes.len() < expected {
        return Err(NobusError::InvalidInputLength {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_len() {
        assert!(ensure_len(&[0u8; 4], 4).is_ok());
        assert!(ensure_len(&[0u8; 5], 4).is_ok());

        match ensure_len(&[0u8; 3], 4) {
            Err(NobusError::InvalidInputLength { expected, actual }) => {
                assert_eq!(expected, 4);
                assert_eq!(actual, 3);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_display() {
        let err = NobusError::RandomnessFailure("entropy pool closed".into());
        assert_eq!(err.to_string(), "randomness failure: entropy pool closed");
    }
}
