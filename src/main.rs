use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

/// Two-pass assembler for SIC/XE source files.
#[derive(Parser)]
#[command(name = "sicxe-asm", version, about)]
struct Cli {
    /// Path to the .asm source file
    input: PathBuf,

    /// Directory to write the listing and object artifacts into
    #[arg(short, long, default_value = "Output")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let source = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;

    let out = sicxe_asm::assemble(&source).with_context(|| {
        format!("assembly failed for {}", cli.input.display())
    })?;

    for warning in &out.warnings {
        log::warn!("{warning}");
    }

    fs::create_dir_all(&cli.output)
        .with_context(|| format!("failed to create {}", cli.output.display()))?;

    write_artifact(&cli.output, "intermediate.txt", &out.intermediate)?;
    write_artifact(&cli.output, "out_pass1.txt", &out.pass1_listing)?;
    write_artifact(&cli.output, "symbTable.txt", &out.symbol_table_listing)?;
    write_artifact(&cli.output, "out_pass2.txt", &out.pass2_listing)?;
    write_artifact(&cli.output, "HTME.txt", &out.htme)?;

    log::info!("assembled {} into {}", cli.input.display(), cli.output.display());
    Ok(())
}

fn write_artifact(dir: &PathBuf, name: &str, contents: &str) -> Result<()> {
    let path = dir.join(name);
    fs::write(&path, contents).with_context(|| format!("failed to write {}", path.display()))
}
