//! The capability registry.
//!
//! Entries are grouped by owning object. Objects keep the order in which they
//! were first registered, and each object keeps its entries in registration
//! order, so `.help os` lists functions the way they were installed.
//!
//! The registry is populated once at startup and then only read.

use std::collections::HashMap;
use std::fmt;

use crate::completion::CompletionTree;
use crate::entry::HelpEntry;
use crate::meta::META_COMMANDS;

const DIRECTORY_INTRO: &str = "help provides information about objects and functions";
const DIRECTORY_COMMANDS: &str = "Additionally the repl provides the following dot commands";

/// Help entries for one object.
#[derive(Debug, Clone)]
struct ObjectHelp {
    name: String,
    entries: Vec<HelpEntry>,
}

/// Catalog of documented host capabilities.
#[derive(Debug, Clone, Default)]
pub struct CapabilityRegistry {
    objects: Vec<ObjectHelp>,
    index: HashMap<String, usize>,
    terms: Vec<String>,
}

impl CapabilityRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Document `object.function(params...)`.
    ///
    /// An empty `object` is silently ignored so optional registrations need
    /// no guard. An empty `function` records object-level documentation.
    pub fn register(&mut self, object: &str, function: &str, params: &[&str], description: &str) {
        let entry = if function.is_empty() {
            HelpEntry::object(object, description)
        } else {
            HelpEntry::function(object, function, params.iter().copied(), description)
        };
        self.register_entry(entry);
    }

    /// Append a prebuilt entry. Entries with an empty object name are ignored.
    pub fn register_entry(&mut self, entry: HelpEntry) {
        if entry.object_name().is_empty() {
            return;
        }

        self.terms.push(entry.signature());

        let position = match self.index.get(entry.object_name()) {
            Some(&position) => position,
            None => {
                let position = self.objects.len();
                self.index.insert(entry.object_name().to_string(), position);
                self.objects.push(ObjectHelp {
                    name: entry.object_name().to_string(),
                    entries: Vec::new(),
                });
                position
            }
        };
        self.objects[position].entries.push(entry);
    }

    /// Answer a help query.
    ///
    /// - empty `object`: directory of every object plus the dot commands;
    ///   `function` is not consulted.
    /// - `object` only: every signature under that object.
    /// - both: full text of the matching function. A function that does not
    ///   exist under the object yields just the object header.
    pub fn lookup<'a>(&'a self, object: &'a str, function: &str) -> Lookup<'a> {
        if object.is_empty() {
            return Lookup::Directory {
                objects: self.object_names().collect(),
            };
        }

        let entries = self.entries(object);
        if function.is_empty() {
            Lookup::Signatures {
                object,
                entries: entries.iter().collect(),
            }
        } else {
            Lookup::Detail {
                object,
                entries: entries
                    .iter()
                    .filter(|entry| entry.function_name() == Some(function))
                    .collect(),
            }
        }
    }

    /// Entries registered under `object`, in registration order.
    pub fn entries(&self, object: &str) -> &[HelpEntry] {
        self.index
            .get(object)
            .map(|&position| self.objects[position].entries.as_slice())
            .unwrap_or(&[])
    }

    /// Registered object names, in first-registration order.
    pub fn object_names(&self) -> impl Iterator<Item = &str> {
        self.objects.iter().map(|object| object.name.as_str())
    }

    /// One completion term per registered entry, in registration order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Total number of entries across all objects.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Build the completion tree from the dot commands and every term.
    ///
    /// The tree is a snapshot: entries registered afterwards only show up
    /// once this is called again.
    pub fn completion_tree(&self) -> CompletionTree {
        META_COMMANDS
            .iter()
            .map(|command| command.name)
            .chain(self.terms.iter().map(String::as_str))
            .collect()
    }
}

/// The answer to a help query. Render it with `Display`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// Every registered object and the dot commands.
    Directory { objects: Vec<&'a str> },
    /// Every signature under one object.
    Signatures {
        object: &'a str,
        entries: Vec<&'a HelpEntry>,
    },
    /// Full documentation for the matching functions of one object.
    Detail {
        object: &'a str,
        entries: Vec<&'a HelpEntry>,
    },
}

impl fmt::Display for Lookup<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Directory { objects } => {
                write!(f, "{}", DIRECTORY_INTRO)?;
                for object in objects {
                    write!(f, "\n   {}", object)?;
                }
                write!(f, "\n{}", DIRECTORY_COMMANDS)?;
                for command in META_COMMANDS {
                    write!(f, "\n {}\t{}", command.usage(), command.description)?;
                }
                Ok(())
            }
            Lookup::Signatures { object, entries } => {
                write!(f, "{}", object)?;
                for entry in entries {
                    if entry.is_object_level() {
                        write!(f, "\n  {}", entry.description())?;
                    } else {
                        write!(f, "\n  {}", entry.signature())?;
                    }
                }
                Ok(())
            }
            Lookup::Detail { object, entries } => {
                write!(f, "{}", object)?;
                for entry in entries {
                    write!(f, "\n  {}", entry)?;
                }
                Ok(())
            }
        }
    }
}
