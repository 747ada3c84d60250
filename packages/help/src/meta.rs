//! The shell's own dot commands.
//!
//! These are listed by every directory-style help query and always seed the
//! completion tree, whether or not any capability was registered.

/// Documentation for one shell meta-command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetaCommandDoc {
    pub name: &'static str,
    pub argument: Option<&'static str>,
    pub description: &'static str,
}

impl MetaCommandDoc {
    /// `.load FILENAME` style usage text.
    pub fn usage(&self) -> String {
        match self.argument {
            Some(argument) => format!("{} {}", self.name, argument),
            None => self.name.to_string(),
        }
    }
}

pub const META_COMMANDS: &[MetaCommandDoc] = &[
    MetaCommandDoc {
        name: ".help",
        argument: None,
        description: "show help",
    },
    MetaCommandDoc {
        name: ".break",
        argument: None,
        description: "break out of multi-line entry without saving command",
    },
    MetaCommandDoc {
        name: ".exit",
        argument: None,
        description: "exit repl",
    },
    MetaCommandDoc {
        name: ".list",
        argument: None,
        description: "list history",
    },
    MetaCommandDoc {
        name: ".load",
        argument: Some("FILENAME"),
        description: "load history from FILENAME",
    },
    MetaCommandDoc {
        name: ".reset",
        argument: None,
        description: "truncate history",
    },
    MetaCommandDoc {
        name: ".save",
        argument: Some("FILENAME"),
        description: "save history to FILENAME",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seven_dot_commands() {
        let names: Vec<_> = META_COMMANDS.iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            [".help", ".break", ".exit", ".list", ".load", ".reset", ".save"]
        );
    }

    #[test]
    fn usage_includes_argument() {
        let load = META_COMMANDS.iter().find(|c| c.name == ".load").unwrap();
        assert_eq!(load.usage(), ".load FILENAME");
        assert_eq!(META_COMMANDS[0].usage(), ".help");
    }
}
