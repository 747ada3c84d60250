//! Process arguments and termination.

use std::sync::Arc;

/// Arguments handed to scripts, usually whatever is left after the host's
/// own flags were parsed.
///
/// Cloning is cheap; every clone shares the same list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args(Arc<[String]>);

impl Args {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(args.into_iter().map(Into::into).collect())
    }

    /// The process's own command line, program name excluded.
    pub fn from_env() -> Self {
        Self::new(std::env::args().skip(1))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Args {
    fn default() -> Self {
        Self::new(Vec::<String>::new())
    }
}

/// Exit the process immediately with `code`, logging `message` first.
///
/// Nothing is unwound, so buffered state that is not already flushed is lost.
pub fn exit(code: i32, message: Option<&str>) -> ! {
    if let Some(message) = message {
        tracing::warn!(code, "{}", message);
    }
    tracing::debug!(code, "process exit requested");
    std::process::exit(code)
}
