//! Dot-command parsing and the shell's line-buffer state.
//!
//! Commands, checked in this order against a line read while idle:
//! - `.help [object[.function]]` - Show help
//! - `.list` - Print the history file
//! - `.load FILENAME` - Append the lines of FILENAME to the history
//! - `.reset` - Truncate the history
//! - `.save FILENAME` - Copy the history to FILENAME
//! - `.exit` - Leave the shell
//! - `.break` - Discard a partly entered command
//!
//! Anything else is script source.

/// A parsed dot command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaCommand {
    /// `object` empty means the directory.
    Help { object: String, function: String },
    List,
    Load(Option<String>),
    Reset,
    Save(Option<String>),
    Exit,
    Break,
}

impl MetaCommand {
    /// Parse a line typed at the idle prompt. Returns `None` for script
    /// source.
    ///
    /// Commands match on prefix, so `.lists` is `.list`; `.break` must be
    /// the whole line.
    pub fn parse(line: &str) -> Option<MetaCommand> {
        if let Some(topic) = line.strip_prefix(".help") {
            let (object, function) = split_topic(topic.trim());
            return Some(MetaCommand::Help { object, function });
        }
        if line.starts_with(".list") {
            return Some(MetaCommand::List);
        }
        if line.starts_with(".load") {
            return Some(MetaCommand::Load(argument(line)));
        }
        if line.starts_with(".reset") {
            return Some(MetaCommand::Reset);
        }
        if line.starts_with(".save") {
            return Some(MetaCommand::Save(argument(line)));
        }
        if line.starts_with(".exit") {
            return Some(MetaCommand::Exit);
        }
        if line == ".break" {
            return Some(MetaCommand::Break);
        }
        None
    }
}

/// `os.exit` is object `os`, function `exit`.
fn split_topic(topic: &str) -> (String, String) {
    match topic.split_once('.') {
        Some((object, function)) => (object.to_string(), function.to_string()),
        None => (topic.to_string(), String::new()),
    }
}

/// Everything after the first space, if not empty.
fn argument(line: &str) -> Option<String> {
    line.split_once(' ')
        .map(|(_, rest)| rest.trim())
        .filter(|rest| !rest.is_empty())
        .map(str::to_string)
}

/// Whether the shell is between commands or collecting a command that
/// hasn't compiled yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ShellState {
    #[default]
    Idle,
    Continuation { buffer: Vec<String> },
}

impl ShellState {
    /// Lines buffered so far.
    pub fn depth(&self) -> usize {
        match self {
            ShellState::Idle => 0,
            ShellState::Continuation { buffer } => buffer.len(),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, ShellState::Idle)
    }

    /// Add `line` and return the buffered lines, `line` last.
    pub fn push(&mut self, line: &str) -> &[String] {
        let buffer = match std::mem::take(self) {
            ShellState::Idle => vec![line.to_string()],
            ShellState::Continuation { mut buffer } => {
                buffer.push(line.to_string());
                buffer
            }
        };
        *self = ShellState::Continuation { buffer };
        match self {
            ShellState::Continuation { buffer } => buffer,
            ShellState::Idle => &[],
        }
    }

    /// Drop the buffer and go idle, returning what was discarded.
    pub fn clear(&mut self) -> Vec<String> {
        match std::mem::take(self) {
            ShellState::Idle => Vec::new(),
            ShellState::Continuation { buffer } => buffer,
        }
    }

    /// `> ` when idle, `NN: ` with the buffer depth otherwise.
    pub fn prompt<'a>(&self, base: &'a str) -> std::borrow::Cow<'a, str> {
        match self {
            ShellState::Idle => std::borrow::Cow::Borrowed(base),
            ShellState::Continuation { buffer } => {
                std::borrow::Cow::Owned(format!("{:02}: ", buffer.len()))
            }
        }
    }
}
