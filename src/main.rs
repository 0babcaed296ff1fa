use std::io::{BufRead, Lines, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use plagcheck::stats::is_blank;
use plagcheck::{Analysis, Config, Session, ThreadRandom};

#[derive(Parser)]
#[command(
    name = "plagcheck",
    about = "Estimate plagiarism and AI-generation scores for text",
    version
)]
struct Cli {
    /// File paths to analyze (reads stdin if none provided)
    files: Vec<PathBuf>,

    /// Read submissions from stdin, one per blank-line-terminated block
    #[arg(short, long, conflicts_with = "files")]
    interactive: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Seed for the random blend
    #[arg(long, env = "PLAGCHECK_SEED")]
    seed: Option<u64>,

    /// Cooldown between accepted submissions in interactive mode
    #[arg(long, env = "PLAGCHECK_COOLDOWN_MS")]
    cooldown_ms: Option<u64>,

    /// JSON config file
    #[arg(long, env = "PLAGCHECK_CONFIG")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_analysis(analysis: &Analysis, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(analysis)?);
    } else {
        println!("{}", analysis.result);
        eprintln!("{}", analysis.provenance.notice());
    }
    Ok(())
}

fn run_batch(cli: &Cli, config: &Config) -> Result<bool> {
    let mut rng = ThreadRandom::from_seed_option(config.seed);
    let mut inputs = Vec::new();

    if cli.files.is_empty() {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("failed to read stdin")?;
        inputs.push(("<stdin>".to_string(), input));
    } else {
        for path in &cli.files {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            inputs.push((path.display().to_string(), text));
        }
    }

    let mut all_ok = true;
    for (name, text) in &inputs {
        if inputs.len() > 1 && !cli.json {
            println!("== {name}");
        }
        match plagcheck::analyze_with(text, &mut rng) {
            Ok(analysis) => print_analysis(&analysis, cli.json)?,
            Err(err) => {
                eprintln!("{name}: {err}");
                all_ok = false;
            }
        }
    }
    Ok(all_ok)
}

fn submit(session: &mut Session, text: &str, json: bool) -> Result<()> {
    match session.submit(text) {
        Ok(analysis) => print_analysis(&analysis, json)?,
        Err(err) => eprintln!("{err}"),
    }
    Ok(())
}

/// Blank-line-terminated submissions; runs of blank lines yield nothing.
struct Blocks<R> {
    lines: Lines<R>,
}

impl<R: BufRead> Blocks<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

impl<R: BufRead> Iterator for Blocks<R> {
    type Item = std::io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut block = String::new();
        for line in self.lines.by_ref() {
            let line = match line {
                Ok(line) => line,
                Err(err) => return Some(Err(err)),
            };
            if !is_blank(&line) {
                block.push_str(&line);
                block.push('\n');
            } else if !block.is_empty() {
                return Some(Ok(block));
            }
        }
        (!block.is_empty()).then_some(Ok(block))
    }
}

fn prompt() -> Result<()> {
    eprint!("> ");
    std::io::stderr().flush()?;
    Ok(())
}

fn run_interactive(cli: &Cli, config: &Config) -> Result<()> {
    let mut session = Session::from_config(config);

    prompt()?;
    for block in Blocks::new(std::io::stdin().lock()) {
        let block = block.context("failed to read stdin")?;
        submit(&mut session, &block, cli.json)?;
        prompt()?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref(), cli.cooldown_ms, cli.seed)?;

    if cli.interactive {
        run_interactive(&cli, &config)
    } else if run_batch(&cli, &config)? {
        Ok(())
    } else {
        std::process::exit(1);
    }
}
