use hostlib_help::CompletionTree;
use reedline::{Completer, Span, Suggestion};

/// Tab completion over the dot commands and every documented capability.
pub struct ReplCompleter {
    tree: CompletionTree,
}

impl ReplCompleter {
    pub fn new(tree: CompletionTree) -> Self {
        Self { tree }
    }
}

impl Completer for ReplCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let line_to_pos = &line[..pos];
        let start = word_start(line_to_pos);
        let prefix = &line_to_pos[start..];

        self.tree
            .complete(prefix)
            .into_iter()
            .map(|term| Suggestion {
                value: term,
                description: None,
                style: None,
                extra: None,
                span: Span::new(start, pos),
                append_whitespace: false,
                match_indices: None,
            })
            .collect()
    }
}

/// Start of the term under the cursor: after the last space or operator, so
/// `let n = os.ar` completes `os.ar`.
fn word_start(line: &str) -> usize {
    line.rfind(|c: char| c.is_whitespace() || "(){}[],;=+-*/%!&|<>".contains(c))
        .map(|i| i + 1)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completer() -> ReplCompleter {
        let mut tree = CompletionTree::new();
        for term in [".help", ".list", ".load", "os.args()", "os.readFile(filepath string)"] {
            tree.insert(term);
        }
        ReplCompleter::new(tree)
    }

    fn values(suggestions: &[Suggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.value.as_str()).collect()
    }

    #[test]
    fn completes_dot_commands() {
        let mut completer = completer();
        let suggestions = completer.complete(".l", 2);
        assert_eq!(values(&suggestions), vec![".list", ".load"]);
        assert_eq!(suggestions[0].span, Span::new(0, 2));
    }

    #[test]
    fn completes_term_after_assignment() {
        let mut completer = completer();
        let line = "let a = os.re";
        let suggestions = completer.complete(line, line.len());
        assert_eq!(values(&suggestions), vec!["os.readFile(filepath string)"]);
        assert_eq!(suggestions[0].span, Span::new(8, line.len()));
    }

    #[test]
    fn completes_only_up_to_cursor() {
        let mut completer = completer();
        let suggestions = completer.complete("os.a trailing", 4);
        assert_eq!(values(&suggestions), vec!["os.args()"]);
    }

    #[test]
    fn unknown_prefix_has_no_suggestions() {
        let mut completer = completer();
        assert!(completer.complete("zz", 2).is_empty());
    }
}
