use anyhow::{Context, Result, anyhow};
use clap::Parser;
use ocel_gen::{
    CaseLog, Exportable, GeneratorConfig, Importable, Infoable, ObjectCentricEventLog,
};
use std::{fs::File, io::BufReader, path::PathBuf};
use tracing_subscriber::filter::LevelFilter;

/// Converts a case-centric XES event log into a synthetic object-centric event log (OCEL 1.0 JSON).
#[derive(Parser, Debug)]
#[command(name = "ocel-gen", version, about)]
struct Cli {
    /// The JSON configuration file.
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// The XES log to convert; overrides `xes_log_path` of the configuration.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Where to write the OCEL log; overrides `output_ocel_path` of the configuration.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overrides `global_seed` of the configuration.
    #[arg(short, long)]
    seed: Option<u64>,

    /// The event attribute that holds the activity name.
    #[arg(short, long, value_name = "KEY")]
    activity_key: Option<String>,

    /// Print statistics of the generated log.
    #[arg(long)]
    info: bool,

    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else if cli.quiet {
        LevelFilter::WARN
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    let config = GeneratorConfig::from_path(&cli.config)?;

    let input = cli
        .input
        .or(config.xes_log_path.clone())
        .ok_or_else(|| anyhow!("no input log given, and the configuration has no xes_log_path"))?;
    let output = cli.output.unwrap_or(config.output_ocel_path.clone());
    let seed = cli.seed.unwrap_or(config.global_seed);

    log::info!("loading case log from {}", input.display());
    let file = File::open(&input).with_context(|| format!("cannot open {}", input.display()))?;
    let mut reader = BufReader::new(file);
    let parameter_values = match &cli.activity_key {
        Some(activity_key) => CaseLog::importer_parameter_values(activity_key),
        None => CaseLog::default_importer_parameter_values(),
    };
    let case_log = CaseLog::import(&mut reader, &parameter_values)
        .with_context(|| format!("cannot import {}", input.display()))?;
    log::info!("{}", case_log);

    let ocel: ObjectCentricEventLog =
        (&case_log, &config.ocel_generation_parameters, seed).try_into()?;

    ocel.export_to_path(&output)?;
    log::info!("OCEL log saved to {}", output.display());

    if cli.info {
        ocel.info(&mut std::io::stdout())?;
    }

    Ok(())
}
