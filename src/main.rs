use std::{env, fs, path::PathBuf, process};

use anyhow::Context;

use vrm0to1::migrate;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: vrm0to1 <input.vrm> <output.vrm>");
        process::exit(2);
    }

    let input = PathBuf::from(&args[1]);
    let output = PathBuf::from(&args[2]);

    let input_bytes = fs::read(&input)
        .with_context(|| format!("failed to read input file: {}", input.display()))?;

    let output_bytes = migrate(&input_bytes)?;

    fs::write(&output, &output_bytes)
        .with_context(|| format!("failed to write output: {}", output.display()))?;

    println!(
        "Migrated {} ({} bytes) -> {} ({} bytes)",
        input.display(),
        input_bytes.len(),
        output.display(),
        output_bytes.len()
    );

    Ok(())
}
