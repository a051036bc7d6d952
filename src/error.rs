use thiserror::Error;

/// Construction-time failures. Circuit building is pure, so every error is
/// detectable before any simulation runs and nothing is retried.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GroverError {
    #[error("invalid register size: expected {expected} qubits, got {actual}")]
    InvalidRegisterSize { expected: usize, actual: usize },

    #[error("invalid marked state {pattern:?} for a {num_of_qbits}-qubit register")]
    InvalidMarkedState {
        pattern: String,
        num_of_qbits: usize,
    },
}
