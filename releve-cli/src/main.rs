use anyhow::{Context, Result};
use clap::Parser;
use releve_ingest::{default_output_path, process_statement};
use std::path::PathBuf;

mod config;
mod state;

#[derive(Parser, Debug)]
#[command(name = "releve", version, about = "Desjardins PDF to CSV Converter")]
struct Cli {
    /// Input PDF statement
    pdf: PathBuf,

    /// Output CSV (defaults to the input path with a .csv extension)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let cfg = config::load_config()?;
    log::debug!("parser config: {:?}", cfg.parser);

    let records = process_statement(&cli.pdf, cli.output.as_deref(), &cfg.parser)
        .with_context(|| format!("converting {}", cli.pdf.display()))?;

    let out = cli
        .output
        .unwrap_or_else(|| default_output_path(&cli.pdf));
    println!("Wrote {} transactions to {}", records.len(), out.display());

    Ok(())
}
