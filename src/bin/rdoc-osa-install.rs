//! Installs `rdoc-osa` and its generator support script.
use std::{env, path::PathBuf};

use clap::Parser;
use rdoc_osa::install::InstallPlan;

#[derive(Parser)]
#[command(name = "rdoc-osa-install")]
#[command(about = "Install rdoc-osa and its support files")]
struct Cli {
    /// Installation prefix
    #[arg(long, default_value = "/usr/local")]
    prefix: PathBuf,

    /// Executable directory [default: <prefix>/bin]
    #[arg(long)]
    bindir: Option<PathBuf>,

    /// Data directory [default: <prefix>/share]
    #[arg(long)]
    datadir: Option<PathBuf>,

    /// Executable to install [default: rdoc-osa next to this installer]
    #[arg(long)]
    binary: Option<PathBuf>,

    /// Generator template script, installed under <datadir>/rubyosa
    #[arg(long)]
    support_script: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let binary = match cli.binary {
        Some(binary) => binary,
        None => env::current_exe()?.with_file_name("rdoc-osa"),
    };

    let mut plan = InstallPlan::from_prefix(&cli.prefix, binary);
    if let Some(bindir) = cli.bindir {
        plan.bindir = bindir;
    }
    if let Some(datadir) = cli.datadir {
        plan.datadir = datadir;
    }
    plan.support_script = cli.support_script;

    for path in plan.execute()? {
        println!("installed {}", path.display());
    }

    Ok(())
}
