use std::path::PathBuf;

use rhai::{EvalAltResult, ParseError};

/// Failures of the engine itself, as opposed to capability failures, which
/// scripts see as error objects.
#[derive(thiserror::Error, Debug)]
pub enum ScriptError {
    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("{0}")]
    Eval(#[from] Box<EvalAltResult>),

    #[error("can't read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScriptError {
    pub fn is_parse(&self) -> bool {
        matches!(self, ScriptError::Parse(_))
    }
}
