//! The shell's command history.
//!
//! Only commands that compiled are recorded, each flattened onto a single
//! line. Entries live in a reedline [`FileBackedHistory`] over the history
//! file. The line editor browses the same store through [`EditorHistory`]
//! but never writes to it, so arrow-key recall offers what `.list` shows.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use reedline::{
    FileBackedHistory, History, HistoryItem, HistoryItemId, HistorySessionId, ReedlineError,
    ReedlineErrorVariants, SearchDirection, SearchQuery, HISTORY_SIZE,
};

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("can't open history {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: ReedlineError,
    },

    #[error("can't read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("can't write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("history store: {0}")]
    Store(#[from] ReedlineError),
}

type Store = Arc<Mutex<FileBackedHistory>>;

fn lock(store: &Store) -> MutexGuard<'_, FileBackedHistory> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

/// History shared by the shell core and the line editor. Clones share one
/// store.
#[derive(Clone)]
pub struct HistoryFile {
    path: PathBuf,
    store: Store,
}

impl HistoryFile {
    /// Open the history at `path`, creating the file if needed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, HistoryError> {
        let path = path.into();
        let store = FileBackedHistory::with_file(HISTORY_SIZE, path.clone()).map_err(|source| {
            HistoryError::Open {
                path: path.clone(),
                source,
            }
        })?;
        Ok(Self {
            path,
            store: Arc::new(Mutex::new(store)),
        })
    }

    /// Open the history at `path`, keeping it in memory only when the file
    /// can't be used. `.list` then reports the file as unreadable.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::open(path.clone()) {
            Ok(history) => history,
            Err(e) => {
                tracing::warn!("{}, keeping history in memory", e);
                Self {
                    path,
                    store: Arc::new(Mutex::new(FileBackedHistory::default())),
                }
            }
        }
    }

    /// `$HOME/.<program>_history`, or the same name in the current
    /// directory when there is no home directory.
    pub fn default_path(program: &str) -> PathBuf {
        let dir = dirs::home_dir()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        dir.join(format!(".{}_history", program))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The view handed to the line editor.
    pub fn editor_history(&self) -> EditorHistory {
        EditorHistory {
            store: Arc::clone(&self.store),
        }
    }

    /// Record one command and write it out. Newlines become spaces so the
    /// entry stays on one line. Repeating the previous entry is a no-op.
    pub fn append(&self, entry: &str) -> Result<(), HistoryError> {
        let line = entry.replace(['\r', '\n'], " ");
        let mut store = lock(&self.store);
        store.save(HistoryItem::from_command_line(line))?;
        store.sync().map_err(|source| self.write_error(source))
    }

    /// Recallable entries, oldest first.
    pub fn entries(&self) -> Result<Vec<String>, HistoryError> {
        let query = SearchQuery::everything(SearchDirection::Forward, None);
        let items = lock(&self.store).search(query)?;
        Ok(items.into_iter().map(|item| item.command_line).collect())
    }

    /// The history file, verbatim.
    pub fn contents(&self) -> Result<String, HistoryError> {
        lock(&self.store)
            .sync()
            .map_err(|source| self.read_error(source))?;
        fs::read_to_string(&self.path).map_err(|source| self.read_error(source))
    }

    /// Forget every entry and leave an empty file behind.
    pub fn truncate(&self) -> Result<(), HistoryError> {
        let mut store = lock(&self.store);
        store.clear()?;
        store.sync().map_err(|source| self.write_error(source))
    }

    /// Append every line of `source` as an entry. Returns how many were added.
    pub fn load_from(&self, source: impl AsRef<Path>) -> Result<usize, HistoryError> {
        let source = source.as_ref();
        let text = fs::read_to_string(source).map_err(|e| HistoryError::Read {
            path: source.to_path_buf(),
            source: e,
        })?;

        let mut store = lock(&self.store);
        let mut count = 0;
        for line in text.lines() {
            let item = store.save(HistoryItem::from_command_line(line.replace('\r', " ")))?;
            if item.id.is_some() {
                count += 1;
            }
        }
        store.sync().map_err(|source| self.write_error(source))?;

        tracing::debug!(path = %source.display(), count, "history loaded");
        Ok(count)
    }

    /// Copy the history file to `target`.
    pub fn save_to(&self, target: impl AsRef<Path>) -> Result<(), HistoryError> {
        let target = target.as_ref();
        let contents = self.contents()?;
        write_private(target, &contents).map_err(|source| HistoryError::Write {
            path: target.to_path_buf(),
            source,
        })
    }

    fn read_error(&self, source: std::io::Error) -> HistoryError {
        HistoryError::Read {
            path: self.path.clone(),
            source,
        }
    }

    fn write_error(&self, source: std::io::Error) -> HistoryError {
        HistoryError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

/// The line editor's view of a [`HistoryFile`].
///
/// Reedline saves every line it submits, including dot commands and the
/// pieces of a multi-line command. Those saves are dropped here; the shell
/// records whole commands through [`HistoryFile::append`].
pub struct EditorHistory {
    store: Store,
}

fn unsupported(feature: &'static str) -> ReedlineError {
    ReedlineError(ReedlineErrorVariants::HistoryFeatureUnsupported {
        history: "EditorHistory",
        feature,
    })
}

impl History for EditorHistory {
    fn save(&mut self, h: HistoryItem) -> reedline::Result<HistoryItem> {
        Ok(h)
    }

    fn load(&self, id: HistoryItemId) -> reedline::Result<HistoryItem> {
        lock(&self.store).load(id)
    }

    fn count(&self, query: SearchQuery) -> reedline::Result<i64> {
        lock(&self.store).count(query)
    }

    fn search(&self, query: SearchQuery) -> reedline::Result<Vec<HistoryItem>> {
        lock(&self.store).search(query)
    }

    fn update(
        &mut self,
        _id: HistoryItemId,
        _updater: &dyn Fn(HistoryItem) -> HistoryItem,
    ) -> reedline::Result<()> {
        Err(unsupported("updating entries"))
    }

    fn clear(&mut self) -> reedline::Result<()> {
        Err(unsupported("clearing"))
    }

    fn delete(&mut self, _h: HistoryItemId) -> reedline::Result<()> {
        Err(unsupported("removing entries"))
    }

    fn sync(&mut self) -> std::io::Result<()> {
        Ok(())
    }

    fn session(&self) -> Option<HistorySessionId> {
        lock(&self.store).session()
    }
}

#[cfg(unix)]
fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(contents.as_bytes())
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    fs::write(path, contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn recalled(history: &impl History) -> Vec<String> {
        history
            .search(SearchQuery::everything(SearchDirection::Forward, None))
            .unwrap()
            .into_iter()
            .map(|item| item.command_line)
            .collect()
    }

    #[test]
    fn append_flattens_newlines() {
        let dir = tempdir().unwrap();
        let history = HistoryFile::open(dir.path().join(".test_history")).unwrap();

        history.append("let x = 1;").unwrap();
        history.append("fn f() {\n  x\n}").unwrap();

        assert_eq!(history.contents().unwrap(), "let x = 1;\nfn f() {   x }\n");
        assert_eq!(history.entries().unwrap(), vec!["let x = 1;", "fn f() {   x }"]);
    }

    #[test]
    fn entries_survive_reopening() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".test_history");
        HistoryFile::open(&path).unwrap().append("1 + 1").unwrap();

        let reopened = HistoryFile::open(&path).unwrap();
        assert_eq!(reopened.entries().unwrap(), vec!["1 + 1"]);
        assert_eq!(recalled(&reopened.editor_history()), vec!["1 + 1"]);
    }

    #[test]
    fn editor_sees_appends_but_cannot_save() {
        let dir = tempdir().unwrap();
        let history = HistoryFile::open(dir.path().join(".test_history")).unwrap();
        let mut editor = history.editor_history();

        editor.save(HistoryItem::from_command_line("fn add(a, b) {")).unwrap();
        editor.save(HistoryItem::from_command_line(".help")).unwrap();
        assert!(recalled(&editor).is_empty());

        history.append("fn add(a, b) {\n  a + b\n}").unwrap();
        assert_eq!(recalled(&editor), vec!["fn add(a, b) {   a + b }"]);
        assert!(editor.clear().is_err());
    }

    #[test]
    fn truncate_empties_file() {
        let dir = tempdir().unwrap();
        let history = HistoryFile::open(dir.path().join(".test_history")).unwrap();
        history.append("1 + 1").unwrap();

        history.truncate().unwrap();
        assert_eq!(history.contents().unwrap(), "");
        assert!(recalled(&history.editor_history()).is_empty());
    }

    #[test]
    fn unusable_path_keeps_history_in_memory() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            HistoryFile::open(dir.path()).err(),
            Some(HistoryError::Open { .. })
        ));

        let history = HistoryFile::new(dir.path());
        history.append("2 + 2").unwrap();
        assert_eq!(history.entries().unwrap(), vec!["2 + 2"]);
        assert!(matches!(
            history.contents().unwrap_err(),
            HistoryError::Read { .. }
        ));
    }

    #[test]
    fn load_and_save() {
        let dir = tempdir().unwrap();
        let history = HistoryFile::open(dir.path().join(".test_history")).unwrap();
        let input = dir.path().join("input.txt");
        std::fs::write(&input, "a\nb\n").unwrap();

        assert_eq!(history.load_from(&input).unwrap(), 2);
        assert_eq!(recalled(&history.editor_history()), vec!["a", "b"]);

        let output = dir.path().join("output.txt");
        history.save_to(&output).unwrap();
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "a\nb\n");
    }

    #[test]
    fn default_path_names_the_program() {
        let path = HistoryFile::default_path("hostlib");
        assert_eq!(path.file_name().unwrap(), ".hostlib_history");
    }
}
