use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pdbview::options::Options;
use pdbview::Viewer;

#[derive(Parser)]
#[command(
    name = "pdbview",
    about = "Interactive viewer for PDB structures",
    version
)]
struct Cli {
    /// Structure to open at startup: a local .pdb file or a PDB ID
    #[arg(value_name = "STRUCTURE")]
    structure: Option<String>,

    /// TOML options file
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let options = match cli.options.as_deref().map(Options::load) {
        Some(Ok(options)) => options,
        Some(Err(e)) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
        None => Options::default(),
    };

    let mut builder = Viewer::builder().with_options(options);
    if let Some(structure) = cli.structure {
        builder = builder.with_structure(structure);
    }

    match builder.build().run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
