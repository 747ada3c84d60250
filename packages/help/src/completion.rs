//! A prefix tree of completion terms.
//!
//! Each node is keyed by one character. Nodes that end a term are marked, so
//! `complete(prefix)` walks to the prefix node and collects every marked
//! descendant.

use std::collections::BTreeMap;

/// A prefix tree over completion terms.
///
/// # Example
///
/// ```rust
/// use hostlib_help::CompletionTree;
///
/// let mut tree = CompletionTree::new();
/// tree.insert("os.readFile(filepath)");
/// tree.insert("os.remove(filepath)");
/// tree.insert(".help");
///
/// assert_eq!(tree.complete("os.re").len(), 2);
/// assert_eq!(tree.complete(".h"), vec![".help".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CompletionTree {
    terminal: bool,
    children: BTreeMap<char, CompletionTree>,
}

impl CompletionTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a term. Inserting the same term twice is harmless.
    pub fn insert(&mut self, term: &str) {
        let mut current = self;
        for ch in term.chars() {
            current = current.children.entry(ch).or_default();
        }
        current.terminal = true;
    }

    fn get_node(&self, prefix: &str) -> Option<&CompletionTree> {
        let mut current = self;
        for ch in prefix.chars() {
            current = current.children.get(&ch)?;
        }
        Some(current)
    }

    /// Every term starting with `prefix`, in lexical order.
    pub fn complete(&self, prefix: &str) -> Vec<String> {
        let mut found = Vec::new();
        if let Some(node) = self.get_node(prefix) {
            let mut buffer = prefix.to_string();
            node.collect(&mut buffer, &mut found);
        }
        found
    }

    fn collect(&self, buffer: &mut String, found: &mut Vec<String>) {
        if self.terminal {
            found.push(buffer.clone());
        }
        for (ch, child) in &self.children {
            buffer.push(*ch);
            child.collect(buffer, found);
            buffer.pop();
        }
    }

    /// Check if `term` was inserted exactly.
    pub fn contains(&self, term: &str) -> bool {
        self.get_node(term).is_some_and(|node| node.terminal)
    }

    /// Count of distinct terms (not nodes).
    pub fn len(&self) -> usize {
        let self_count = usize::from(self.terminal);
        let children_count: usize = self.children.values().map(|child| child.len()).sum();
        self_count + children_count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> FromIterator<&'a str> for CompletionTree {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut tree = CompletionTree::new();
        for term in iter {
            tree.insert(term);
        }
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tree() {
        let tree = CompletionTree::new();
        assert!(tree.is_empty());
        assert!(tree.complete("").is_empty());
    }

    #[test]
    fn complete_empty_prefix_lists_everything() {
        let tree: CompletionTree = ["b", "a", "ab"].into_iter().collect();
        assert_eq!(tree.complete(""), vec!["a", "ab", "b"]);
    }

    #[test]
    fn prefix_that_is_also_a_term() {
        let tree: CompletionTree = [".load", ".list", ".l"].into_iter().collect();
        assert_eq!(tree.complete(".l"), vec![".l", ".list", ".load"]);
        assert!(tree.contains(".l"));
        assert!(!tree.contains(".lo"));
    }

    #[test]
    fn unknown_prefix() {
        let tree: CompletionTree = ["os.args()"].into_iter().collect();
        assert!(tree.complete("http").is_empty());
    }

    #[test]
    fn duplicates_collapse() {
        let tree: CompletionTree = ["os.a()", "os.a()"].into_iter().collect();
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn multibyte_terms() {
        let tree: CompletionTree = ["données.lire()"].into_iter().collect();
        assert_eq!(tree.complete("donn"), vec!["données.lire()"]);
    }
}
