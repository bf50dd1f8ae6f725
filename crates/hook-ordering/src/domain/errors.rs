//! Error types for Hook Ordering

use thiserror::Error;

/// All errors that can occur while ordering handlers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderingError {
    /// Declared constraints contradict each other.
    ///
    /// `handlers` holds the debug rendering of every handler that lies on
    /// a cycle, in insertion order.
    #[error("Cycle detected between handlers: [{}]", handlers.join(", "))]
    CycleDetected { handlers: Vec<String> },
}

/// Error for the declarative constraint mini-language
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintParseError {
    #[error("line {line}: missing handler name")]
    MissingHandler { line: usize },

    #[error("line {line}: unknown verb '{verb}'")]
    UnknownVerb { line: usize, verb: String },

    #[error("line {line}: '{verb}' needs at least one target")]
    MissingTargets { line: usize, verb: String },
}
