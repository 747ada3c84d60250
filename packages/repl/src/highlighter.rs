use nu_ansi_term::{Color, Style};
use reedline::{Highlighter, StyledText};

use hostlib_help::META_COMMANDS;

const KEYWORDS: &[&str] = &[
    "let", "const", "fn", "if", "else", "switch", "while", "loop", "for", "in", "do", "until",
    "break", "continue", "return", "throw", "try", "catch", "true", "false", "this",
];

/// Syntax highlighting for script input and dot commands.
pub struct ReplHighlighter {
    objects: Vec<String>,
}

impl ReplHighlighter {
    /// `objects` are the capability names to emphasize, e.g. `os`.
    pub fn new(objects: Vec<String>) -> Self {
        Self { objects }
    }
}

impl Highlighter for ReplHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut styled = StyledText::new();

        if line.is_empty() {
            return styled;
        }

        if line.starts_with('.') {
            let (command, rest) = match line.find(char::is_whitespace) {
                Some(pos) => (&line[..pos], &line[pos..]),
                None => (line, ""),
            };
            let style = if META_COMMANDS.iter().any(|meta| meta.name == command) {
                Style::new().bold().fg(Color::Cyan)
            } else {
                Style::new().fg(Color::Red)
            };
            styled.push((style, command.to_string()));
            if !rest.is_empty() {
                styled.push((Style::new().fg(Color::Yellow), rest.to_string()));
            }
            return styled;
        }

        let mut plain = String::new();
        let mut chars = line.char_indices().peekable();
        while let Some((start, c)) = chars.next() {
            if c == '"' || c == '`' {
                let mut end = line.len();
                let mut escaped = false;
                for (i, next) in chars.by_ref() {
                    if escaped {
                        escaped = false;
                    } else if next == '\\' {
                        escaped = true;
                    } else if next == c {
                        end = i + next.len_utf8();
                        break;
                    }
                }
                flush(&mut styled, &mut plain);
                styled.push((Style::new().fg(Color::Green), line[start..end].to_string()));
            } else if c.is_alphabetic() || c == '_' {
                let mut end = start + c.len_utf8();
                while let Some(&(i, next)) = chars.peek() {
                    if !(next.is_alphanumeric() || next == '_') {
                        break;
                    }
                    end = i + next.len_utf8();
                    chars.next();
                }
                let word = &line[start..end];
                let style = if self.objects.iter().any(|object| object == word) {
                    Some(Style::new().bold().fg(Color::Blue))
                } else if KEYWORDS.contains(&word) {
                    Some(Style::new().fg(Color::Magenta))
                } else {
                    None
                };
                match style {
                    Some(style) => {
                        flush(&mut styled, &mut plain);
                        styled.push((style, word.to_string()));
                    }
                    None => plain.push_str(word),
                }
            } else {
                plain.push(c);
            }
        }
        flush(&mut styled, &mut plain);

        styled
    }
}

fn flush(styled: &mut StyledText, plain: &mut String) {
    if !plain.is_empty() {
        styled.push((Style::new(), std::mem::take(plain)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highlighter() -> ReplHighlighter {
        ReplHighlighter::new(vec!["os".to_string(), "xlsx".to_string()])
    }

    fn text(styled: &StyledText) -> String {
        styled.buffer.iter().map(|(_, s)| s.as_str()).collect()
    }

    #[test]
    fn highlight_empty_returns_empty() {
        let styled = highlighter().highlight("", 0);
        assert!(styled.buffer.is_empty());
    }

    #[test]
    fn highlight_known_dot_command() {
        let styled = highlighter().highlight(".help os.exit", 0);
        assert_eq!(styled.buffer.len(), 2);
        assert_eq!(styled.buffer[0].1, ".help");
        assert_eq!(styled.buffer[0].0.foreground, Some(Color::Cyan));
        assert!(styled.buffer[0].0.is_bold);
        assert_eq!(styled.buffer[1].1, " os.exit");
        assert_eq!(styled.buffer[1].0.foreground, Some(Color::Yellow));
    }

    #[test]
    fn highlight_unknown_dot_command() {
        let styled = highlighter().highlight(".nope", 0);
        assert_eq!(styled.buffer.len(), 1);
        assert_eq!(styled.buffer[0].0.foreground, Some(Color::Red));
    }

    #[test]
    fn highlight_script_tokens() {
        let line = r#"let p = os.readFile("a \"b\".txt");"#;
        let styled = highlighter().highlight(line, 0);
        assert_eq!(text(&styled), line);

        let find = |s: &str| styled.buffer.iter().find(|(_, t)| t == s).unwrap().0;
        assert_eq!(find("let").foreground, Some(Color::Magenta));
        assert_eq!(find("os").foreground, Some(Color::Blue));
        assert_eq!(find(r#""a \"b\".txt""#).foreground, Some(Color::Green));
    }

    #[test]
    fn unterminated_string_runs_to_end() {
        let line = "xlsx.read(`half";
        let styled = highlighter().highlight(line, 0);
        assert_eq!(text(&styled), line);
        assert_eq!(styled.buffer.last().unwrap().1, "`half");
    }

    #[test]
    fn object_names_match_whole_words() {
        let styled = highlighter().highlight("cosine", 0);
        assert_eq!(styled.buffer.len(), 1);
        assert_eq!(styled.buffer[0].0.foreground, None);
    }
}
