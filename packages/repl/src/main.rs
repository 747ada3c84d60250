use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hostlib_help::CapabilityRegistry;
use hostlib_repl::host::EDIT_MODE_VAR;
use hostlib_repl::{ShellConfig, VERSION};
use hostlib_sys::proc::Args;
use hostlib_vm::ScriptVm;

/// hostlib - run scripts with os, http and xlsx access, or explore them
/// interactively
#[derive(Parser, Debug)]
#[command(name = "hostlib")]
#[command(author, about, long_about = None)]
struct Cli {
    /// Print the version and exit
    #[arg(short = 'v', long = "version")]
    version: bool,

    /// Start the shell after running the script files
    #[arg(short = 'i', long = "interactive")]
    interactive: bool,

    /// Force vi editing mode
    #[arg(long, conflicts_with = "emacs")]
    vi: bool,

    /// Force emacs editing mode
    #[arg(long)]
    emacs: bool,

    /// Script files, run in order
    files: Vec<PathBuf>,

    /// Arguments for the scripts, available as os.args()
    #[arg(last = true)]
    args: Vec<String>,
}

impl Cli {
    /// What `os.args()` returns: the positional arguments when files were
    /// given, otherwise whatever followed `--`.
    fn script_args(&self) -> Args {
        let files = self.files.iter().map(|f| f.to_string_lossy().into_owned());
        Args::new(files.chain(self.args.iter().cloned()))
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.version {
        println!("Version {}", VERSION);
        return ExitCode::SUCCESS;
    }

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if cli.vi {
        std::env::set_var(EDIT_MODE_VAR, "vi");
    } else if cli.emacs {
        std::env::set_var(EDIT_MODE_VAR, "emacs");
    }

    let mut vm = ScriptVm::new();
    let mut registry = CapabilityRegistry::new();
    if let Err(e) = hostlib_vm::install(&mut vm, &mut registry, cli.script_args()) {
        tracing::error!("can't install capabilities: {}", e);
        return ExitCode::FAILURE;
    }

    for file in &cli.files {
        if let Err(e) = vm.run_file(file) {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    }

    if !cli.files.is_empty() && !cli.interactive {
        return ExitCode::SUCCESS;
    }

    match hostlib_repl::run(ShellConfig::from_program(), vm, &registry) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
