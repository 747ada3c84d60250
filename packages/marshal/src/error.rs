use std::fmt;

/// The step of a conversion that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Resolving a script value into the canonical tree.
    Export,
    /// Writing the tree as JSON.
    Encode,
    /// Reading JSON into the target record.
    Decode,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Export => write!(f, "export"),
            Stage::Encode => write!(f, "encode"),
            Stage::Decode => write!(f, "decode"),
        }
    }
}

/// A failed conversion. The message names the stage that failed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to {stage} value, {message}")]
pub struct MarshalError {
    stage: Stage,
    message: String,
}

impl MarshalError {
    pub fn export(message: impl Into<String>) -> Self {
        Self {
            stage: Stage::Export,
            message: message.into(),
        }
    }

    pub fn encode(message: impl Into<String>) -> Self {
        Self {
            stage: Stage::Encode,
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            stage: Stage::Decode,
            message: message.into(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
