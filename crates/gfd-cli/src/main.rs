//! Command-line runner: evaluate one script, print the renderer export
//! as JSON on stdout. Query results go to stderr so piped output stays
//! clean JSON.

use clap::Parser;
use gfd_eval::{Evaluator, FsLoader};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "gfd")]
#[command(about = "Evaluate a GFD construction script and export the figure")]
struct Cmd {
    /// Path to the script; imports resolve relative to its directory
    script: PathBuf,

    /// RNG seed for the random construction generators
    #[arg(long)]
    seed: Option<u64>,

    /// Compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

fn main() -> ExitCode {
    let cmd = Cmd::parse();
    match run(&cmd) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cmd: &Cmd) -> Result<(), String> {
    let root = match cmd.script.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let entry = cmd
        .script
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| format!("not a script path: {}", cmd.script.display()))?;

    let loader = FsLoader::new(root);
    let evaluator = match cmd.seed {
        Some(seed) => Evaluator::with_seed(loader, seed),
        None => Evaluator::new(loader),
    };
    let eval = evaluator.run(entry).map_err(|e| e.to_string())?;

    for (i, held) in eval.queries.iter().enumerate() {
        eprintln!("query {}: {held}", i + 1);
    }

    let export = eval.export();
    let json = if cmd.compact {
        serde_json::to_string(&export)
    } else {
        serde_json::to_string_pretty(&export)
    }
    .map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}
