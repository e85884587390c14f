use std::fs::File;
use std::io::{Read, Write, stdin};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "cfg-cli",
    about = "Parse, query, and normalize CFG documents",
    version
)]
struct Args {
    /// Print the value of one key, given as SECTION:KEY
    #[arg(long, value_name = "SECTION:KEY")]
    get: Option<String>,

    /// Default printed when --get finds nothing
    #[arg(long, default_value = "")]
    default: String,

    /// Write the normalized document to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Input file (defaults to stdin; includes resolve against its directory)
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = cfg::Config::new();
    let mut buf = String::new();
    match &args.input {
        Some(path) => {
            let mut f =
                File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
            f.read_to_string(&mut buf)?;
            if let Some(parent) = path.parent() {
                config.set_base_dir(parent);
            }
        }
        None => {
            stdin().read_to_string(&mut buf)?;
        }
    }
    config.load_str(&buf);

    if let Some(spec) = &args.get {
        let (section, key) = spec.split_once(':').context("--get expects SECTION:KEY")?;
        println!("{}", config.get_string(section, key, &args.default));
        return Ok(());
    }

    let text = config.to_text();
    match &args.output {
        Some(path) => {
            let mut f = File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            f.write_all(text.as_bytes())?;
        }
        None => print!("{text}"),
    }

    Ok(())
}
