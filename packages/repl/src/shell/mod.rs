//! Platform-independent shell core.
//!
//! The core owns the script VM and the history file and interacts with the
//! user only through the `IoHost` trait, so the same state machine runs in a
//! terminal or against an in-memory host in tests.

use hostlib_help::CapabilityRegistry;
use hostlib_vm::ScriptVm;

use crate::commands::{MetaCommand, ShellState};
use crate::config::ShellConfig;
use crate::history::HistoryFile;
use crate::io::{ExitReason, IoError, IoHost, Output, PromptConfig, Signal};
use crate::VERSION;

/// What the loop does after handling one line.
enum Step {
    Continue,
    Exit,
}

/// The shell state machine.
pub struct ReplCore<'r> {
    vm: ScriptVm,
    registry: &'r CapabilityRegistry,
    history: HistoryFile,
    config: ShellConfig,
    state: ShellState,
    line_number: usize,
}

impl<'r> ReplCore<'r> {
    pub fn new(config: ShellConfig, vm: ScriptVm, registry: &'r CapabilityRegistry) -> Self {
        Self {
            history: HistoryFile::new(&config.history_path),
            vm,
            registry,
            config,
            state: ShellState::Idle,
            line_number: 0,
        }
    }

    /// Run the loop until `.exit` or the host signals end of input or an
    /// interrupt.
    pub fn run(&mut self, io: &mut impl IoHost) -> Result<ExitReason, IoError> {
        io.write_output(Output::banner(self.banner()))?;

        loop {
            self.update_prompt(io)?;
            io.wait_for_input()?;

            if let Some(signal) = io.read_signal()? {
                io.flush()?;
                return Ok(match signal {
                    Signal::Eof => ExitReason::Eof,
                    Signal::Interrupt => ExitReason::Interrupt,
                });
            }

            let input = match io.read_input()? {
                Some(input) => input,
                None => continue,
            };

            if let Step::Exit = self.handle_line(&input.line, io)? {
                io.flush()?;
                return Ok(ExitReason::UserExit);
            }

            io.flush()?;
        }
    }

    /// Handle one line of input.
    fn handle_line(&mut self, line: &str, io: &mut impl IoHost) -> Result<Step, IoError> {
        self.line_number += 1;

        let command = if self.state.is_idle() {
            MetaCommand::parse(line)
        } else if line == ".break" {
            Some(MetaCommand::Break)
        } else {
            None
        };

        match command {
            Some(command) => self.run_meta(command, io),
            None if self.state.is_idle() && line.trim().is_empty() => Ok(Step::Continue),
            None => {
                self.submit(line, io)?;
                Ok(Step::Continue)
            }
        }
    }

    fn run_meta(&mut self, command: MetaCommand, io: &mut impl IoHost) -> Result<Step, IoError> {
        match command {
            MetaCommand::Help { object, function } => {
                let help = self.registry.lookup(&object, &function).to_string();
                io.write_output(Output::normal(help))?;
            }
            MetaCommand::List => match self.history.contents() {
                Ok(text) => io.write_output(Output::normal(text))?,
                Err(e) => io.write_output(Output::error(format!("history is unreadable, {}", e)))?,
            },
            MetaCommand::Load(None) | MetaCommand::Save(None) => self.write_directory(io)?,
            MetaCommand::Load(Some(file)) => match self.history.load_from(&file) {
                Ok(_) => io.write_output(Output::info(format!("{} loaded", file)))?,
                Err(e) => io.write_output(Output::error(e.to_string()))?,
            },
            MetaCommand::Reset => match self.history.truncate() {
                Ok(()) => io.write_output(Output::info("history truncated"))?,
                Err(e) => io.write_output(Output::error(format!(
                    "could not truncate history, {}",
                    e
                )))?,
            },
            MetaCommand::Save(Some(file)) => match self.history.save_to(&file) {
                Ok(()) => io.write_output(Output::info(format!(".save {} completed", file)))?,
                Err(e) => io.write_output(Output::error(e.to_string()))?,
            },
            MetaCommand::Exit => return Ok(Step::Exit),
            MetaCommand::Break => {
                let discarded = self.state.clear();
                if !discarded.is_empty() {
                    io.write_output(Output::info(format!(
                        "Clearing input {:?}",
                        discarded.join(" ")
                    )))?;
                }
            }
        }
        Ok(Step::Continue)
    }

    /// Add `line` to the buffer and run the buffer once it compiles.
    fn submit(&mut self, line: &str, io: &mut impl IoHost) -> Result<(), IoError> {
        let source = self.state.push(line).join("\n");
        let name = format!("command {}", self.line_number);

        let ast = match self.vm.compile(&source, &name) {
            Ok(ast) => ast,
            Err(e) => {
                tracing::debug!(depth = self.state.depth(), "command incomplete");
                return io.write_output(Output::error(e.to_string()));
            }
        };

        self.state.clear();
        if let Err(e) = self.history.append(&source) {
            tracing::warn!("{}", e);
        }

        match self.vm.eval(&ast) {
            Ok(value) if value.is_unit() => Ok(()),
            Ok(value) => io.write_output(Output::value(value.to_string())),
            Err(e) => io.write_output(Output::error(e.to_string())),
        }
    }

    fn write_directory(&self, io: &mut impl IoHost) -> Result<(), IoError> {
        let help = self.registry.lookup("", "").to_string();
        io.write_output(Output::normal(help))
    }

    fn update_prompt(&self, io: &mut impl IoHost) -> Result<(), IoError> {
        io.write_prompt(PromptConfig {
            prompt: self.state.prompt(&self.config.prompt).into_owned(),
            depth: self.state.depth(),
        })
    }

    fn banner(&self) -> String {
        let objects: Vec<_> = self.registry.object_names().collect();
        let mut banner = format!(
            " Welcome to {}\n\n Type .exit to exit or .help for help information\n (e.g. .help os or .help os.exit)\n",
            self.config.app_name
        );
        if !objects.is_empty() {
            banner.push_str("\n Help is available for the following objects.\n\t");
            banner.push_str(&objects.join("\t"));
            banner.push('\n');
        }
        banner.push_str(" Press tab for auto completion\n");
        banner.push_str(&format!(" repl version {}\n", VERSION));
        banner
    }

    /// Commands recorded so far. The line editor recalls from the same store.
    pub fn history(&self) -> &HistoryFile {
        &self.history
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    pub fn vm(&self) -> &ScriptVm {
        &self.vm
    }

    pub fn vm_mut(&mut self) -> &mut ScriptVm {
        &mut self.vm
    }
}
