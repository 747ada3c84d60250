//! Terminal entry point.

use hostlib_help::CapabilityRegistry;
use hostlib_vm::ScriptVm;

use crate::config::ShellConfig;
use crate::host::TerminalHost;
use crate::io::{ExitReason, IoError};
use crate::shell::ReplCore;

/// Run an interactive session on the terminal until the user leaves.
///
/// Failing to set up the line editor is an error; everything that goes
/// wrong inside the session is reported to the user instead.
pub fn run(
    config: ShellConfig,
    vm: ScriptVm,
    registry: &CapabilityRegistry,
) -> Result<ExitReason, IoError> {
    tracing::debug!(history = %config.history_path.display(), "starting shell");
    let mut core = ReplCore::new(config, vm, registry);
    let mut host = TerminalHost::new(registry, core.history().editor_history())?;

    let reason = core.run(&mut host)?;
    tracing::debug!(?reason, "shell finished");
    Ok(reason)
}
