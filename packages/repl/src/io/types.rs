//! I/O types for the shell.
//!
//! These types define the interface between the shell core and its host environment.

/// A line of input from the user.
#[derive(Debug, Clone)]
pub struct InputLine {
    pub line: String,
}

/// A signal from the host.
#[derive(Debug, Clone)]
pub enum Signal {
    /// Ctrl+C.
    Interrupt,
    /// Ctrl+D, or the input ran out.
    Eof,
}

/// Output to be written by the shell.
#[derive(Debug, Clone)]
pub struct Output {
    pub text: String,
    pub style: OutputStyle,
}

impl Output {
    pub fn normal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: OutputStyle::Normal,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: OutputStyle::Error,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: OutputStyle::Info,
        }
    }

    pub fn banner(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: OutputStyle::Banner,
        }
    }

    /// The value of an evaluated command.
    pub fn value(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: OutputStyle::Value,
        }
    }
}

/// Style hint for output rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputStyle {
    /// Printed as is.
    #[default]
    Normal,
    /// Compile and evaluation errors.
    Error,
    /// Shell status messages.
    Info,
    /// Startup message.
    Banner,
    /// Result of an evaluation (host may indent and embolden it).
    Value,
}

/// Prompt configuration sent from core to host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptConfig {
    /// Text shown before the cursor, `> ` or `NN: ` while a command spans
    /// several lines.
    pub prompt: String,
    /// Number of lines buffered for the command being entered.
    pub depth: usize,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            depth: 0,
        }
    }
}

/// Reason the shell exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// User typed `.exit`.
    UserExit,
    /// Input ended.
    Eof,
    /// User pressed Ctrl+C.
    Interrupt,
}
