//! Terminal host implementation using Reedline.
//!
//! This host provides interactive terminal I/O with:
//! - Readline-style line editing (Vi and Emacs modes)
//! - Tab completion from the capability registry
//! - Syntax highlighting
//! - Arrow-key recall of the commands the shell recorded

use std::borrow::Cow;
use std::io::{self, Write};
use std::path::PathBuf;

use hostlib_help::CapabilityRegistry;
use nu_ansi_term::{Color, Style};
use reedline::{
    default_emacs_keybindings, default_vi_insert_keybindings, default_vi_normal_keybindings,
    ColumnarMenu, EditMode, Emacs, KeyCode, KeyModifiers, MenuBuilder, Prompt, PromptEditMode,
    PromptHistorySearch, PromptHistorySearchStatus, Reedline, ReedlineEvent, ReedlineMenu,
    Signal as ReedlineSignal, Vi,
};

use crate::completer::ReplCompleter;
use crate::highlighter::ReplHighlighter;
use crate::history::EditorHistory;
use crate::io::{InputLine, IoError, IoHost, Output, OutputStyle, PromptConfig, Signal};

/// Environment variable that forces `vi` or `emacs` editing.
pub const EDIT_MODE_VAR: &str = "HOSTLIB_EDIT_MODE";

/// Terminal host using Reedline for interactive I/O.
pub struct TerminalHost {
    line_editor: Reedline,
    pending_input: Option<InputLine>,
    pending_signal: Option<Signal>,
    current_prompt: PromptConfig,
}

impl TerminalHost {
    /// Create a terminal host completing and highlighting what `registry`
    /// documents and recalling from `history`.
    pub fn new(registry: &CapabilityRegistry, history: EditorHistory) -> io::Result<Self> {
        let completer = Box::new(ReplCompleter::new(registry.completion_tree()));
        let highlighter = Box::new(ReplHighlighter::new(
            registry.object_names().map(String::from).collect(),
        ));

        let completion_menu = Box::new(
            ColumnarMenu::default()
                .with_name("completion_menu")
                .with_text_style(Style::new().fg(Color::Cyan))
                .with_selected_text_style(Style::new().fg(Color::Black).on(Color::Cyan).bold()),
        );
        let tab = ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu("completion_menu".to_string()),
            ReedlineEvent::MenuNext,
        ]);

        let edit_mode: Box<dyn EditMode> = if should_use_vi_mode() {
            let mut insert_keybindings = default_vi_insert_keybindings();
            insert_keybindings.add_binding(KeyModifiers::NONE, KeyCode::Tab, tab);
            Box::new(Vi::new(insert_keybindings, default_vi_normal_keybindings()))
        } else {
            let mut keybindings = default_emacs_keybindings();
            keybindings.add_binding(KeyModifiers::NONE, KeyCode::Tab, tab);
            Box::new(Emacs::new(keybindings))
        };

        let line_editor = Reedline::create()
            .with_history(Box::new(history))
            .with_completer(completer)
            .with_highlighter(highlighter)
            .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
            .with_edit_mode(edit_mode);

        Ok(Self {
            line_editor,
            pending_input: None,
            pending_signal: None,
            current_prompt: PromptConfig::default(),
        })
    }
}

impl IoHost for TerminalHost {
    fn wait_for_input(&mut self) -> Result<(), IoError> {
        let prompt = TerminalPrompt::from_config(&self.current_prompt);

        match self.line_editor.read_line(&prompt) {
            Ok(ReedlineSignal::Success(line)) => {
                self.pending_input = Some(InputLine { line });
            }
            Ok(ReedlineSignal::CtrlC) => {
                self.pending_signal = Some(Signal::Interrupt);
            }
            Ok(ReedlineSignal::CtrlD) => {
                self.pending_signal = Some(Signal::Eof);
            }
            Err(e) => {
                return Err(IoError::Io(format!("Reedline error: {}", e)));
            }
        }

        Ok(())
    }

    fn read_input(&mut self) -> Result<Option<InputLine>, IoError> {
        Ok(self.pending_input.take())
    }

    fn read_signal(&mut self) -> Result<Option<Signal>, IoError> {
        Ok(self.pending_signal.take())
    }

    fn write_output(&mut self, output: Output) -> Result<(), IoError> {
        let styled = match output.style {
            OutputStyle::Normal => output.text,
            OutputStyle::Error => Color::Red.paint(&output.text).to_string(),
            OutputStyle::Info => Color::Cyan.paint(&output.text).to_string(),
            OutputStyle::Banner => Style::new().bold().paint(&output.text).to_string(),
            OutputStyle::Value => format!("    {}", Style::new().bold().paint(&output.text)),
        };
        println!("{}", styled);
        Ok(())
    }

    fn write_prompt(&mut self, config: PromptConfig) -> Result<(), IoError> {
        self.current_prompt = config;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), IoError> {
        io::stdout().flush().map_err(IoError::from)
    }
}

struct TerminalPrompt {
    prompt: String,
    continuing: bool,
}

impl TerminalPrompt {
    fn from_config(config: &PromptConfig) -> Self {
        Self {
            prompt: config.prompt.clone(),
            continuing: config.depth > 0,
        }
    }
}

impl Prompt for TerminalPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, edit_mode: PromptEditMode) -> Cow<'_, str> {
        let color = if self.continuing {
            Color::Yellow
        } else {
            Color::Green
        };
        match edit_mode {
            PromptEditMode::Vi(reedline::PromptViMode::Normal) => {
                Cow::Owned(Color::Blue.bold().paint(&self.prompt).to_string())
            }
            _ => Cow::Owned(color.bold().paint(&self.prompt).to_string()),
        }
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed(": ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!(
            "({}reverse-search: {}) ",
            prefix, history_search.term
        ))
    }
}

/// Vi editing when forced by `HOSTLIB_EDIT_MODE`, or when the user's editor
/// or readline configuration asks for it.
fn should_use_vi_mode() -> bool {
    if let Ok(mode) = std::env::var(EDIT_MODE_VAR) {
        let mode = mode.to_lowercase();
        return mode == "vi" || mode == "vim";
    }

    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = std::env::var(var) {
            if is_vi_editor(&editor) {
                return true;
            }
        }
    }

    check_inputrc_vi_mode()
}

fn is_vi_editor(editor: &str) -> bool {
    let name = editor
        .rsplit('/')
        .next()
        .unwrap_or(editor)
        .to_lowercase();
    name.contains("vim") || name == "vi"
}

fn check_inputrc_vi_mode() -> bool {
    let inputrc_paths = [
        std::env::var("INPUTRC").ok().map(PathBuf::from),
        dirs::home_dir().map(|p| p.join(".inputrc")),
        Some(PathBuf::from("/etc/inputrc")),
    ];

    inputrc_paths
        .into_iter()
        .flatten()
        .filter_map(|path| std::fs::read_to_string(path).ok())
        .any(|content| content.lines().any(sets_vi_mode))
}

/// `set editing-mode vi`
fn sets_vi_mode(line: &str) -> bool {
    let words: Vec<_> = line.split_whitespace().collect();
    matches!(words.as_slice(), ["set", "editing-mode", "vi"])
}
