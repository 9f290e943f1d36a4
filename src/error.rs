//! Error types.
//!
//! - `PatternError`: the two conditions the pin engine can raise
//! - `AppError`: what the binary reports, carrying the process exit code
//!
//! Exit codes: 2 = bad input/config, 3 = nothing usable to process,
//! 4 = runtime failure (including groups that could not be assigned).

/// Conditions raised by pattern sequences and the assignment orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternError {
    /// A sequence was requested for fewer than two pins.
    InvalidPinCount { pins: usize },
    /// The sequence has already produced every pair it can.
    SequenceExhausted { pins: usize, drawn: usize },
}

impl std::fmt::Display for PatternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternError::InvalidPinCount { pins } => {
                write!(f, "invalid pin count {pins} (need at least 2 pins for a high/low pair)")
            }
            PatternError::SequenceExhausted { pins, drawn } => {
                write!(f, "insufficient pattern: {pins}-pin sequence exhausted after {drawn} pairs")
            }
        }
    }
}

impl std::error::Error for PatternError {}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<PatternError> for AppError {
    fn from(err: PatternError) -> Self {
        let exit_code = match err {
            PatternError::InvalidPinCount { .. } => 2,
            PatternError::SequenceExhausted { .. } => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_errors_map_to_exit_codes() {
        let invalid: AppError = PatternError::InvalidPinCount { pins: 1 }.into();
        assert_eq!(invalid.exit_code(), 2);

        let exhausted: AppError = PatternError::SequenceExhausted { pins: 2, drawn: 2 }.into();
        assert_eq!(exhausted.exit_code(), 4);
        assert!(exhausted.to_string().contains("insufficient pattern"));
    }
}
