//! `brids` - command line front end for Brazilian identifier checks.

use anyhow::{bail, Context, Result};
use brids_cep_range::{CepRangeSource, CepRangeValidator, CorreiosRangeSource, RangeEntry};
use brids_core::AppConfig;
use brids_ids::{cep, cpf, municipio, nupj, pis_pasep};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser)]
#[command(name = "brids")]
#[command(about = "Validate, format and generate Brazilian identifiers")]
#[command(version)]
struct Cli {
    /// Config file path (defaults to the platform config directory)
    #[arg(long, global = true, env = "BRIDS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// CPF commands
    Cpf {
        #[command(subcommand)]
        command: TaxIdCommands,
    },
    /// PIS/PASEP commands
    Pis {
        #[command(subcommand)]
        command: TaxIdCommands,
    },
    /// CEP commands
    Cep {
        #[command(subcommand)]
        command: CepCommands,
    },
    /// IBGE município code commands
    Municipio {
        #[command(subcommand)]
        command: MunicipioCommands,
    },
    /// Unified lawsuit number commands
    Nupj {
        #[command(subcommand)]
        command: NupjCommands,
    },
    /// CEP range lookups against the Correios website
    Ranges {
        #[command(subcommand)]
        command: RangesCommands,
    },
    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum TaxIdCommands {
    /// Check the verification digits
    Validate {
        value: String,
        /// Reject input shorter than 11 digits instead of zero-padding it
        #[arg(long, default_value_t = false)]
        no_autopad: bool,
    },
    /// Print in the usual punctuated notation
    Format { value: String },
    /// Generate random valid numbers
    Generate {
        #[command(flatten)]
        generate: GenerateArgs,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// How many numbers to generate
    #[arg(long, short = 'n', default_value_t = 1)]
    count: usize,
    /// Print punctuated instead of bare digits
    #[arg(long, default_value_t = false)]
    formatted: bool,
}

#[derive(Subcommand)]
enum CepCommands {
    /// Print as 00000-000, zero-padding short forms
    Format { value: String },
    /// Print the geographic prefixes as JSON
    Parse { value: String },
}

#[derive(Subcommand)]
enum MunicipioCommands {
    /// Check the verification digit
    Validate { value: String },
}

#[derive(Subcommand)]
enum NupjCommands {
    /// Check year, segment, court and verification digits
    Validate { value: String },
    /// Print the fields and court names as JSON
    Parse { value: String },
}

#[derive(Subcommand)]
enum RangesCommands {
    /// List the states offered by the Correios site
    States,
    /// List the ranges of a state, or of one of its locations
    List {
        state: String,
        /// Location name, exactly as published (accents included)
        #[arg(long)]
        location: Option<String>,
    },
    /// Check whether a CEP belongs to a state, or to one of its locations
    Check {
        cep: String,
        state: String,
        /// Location name, exactly as published (accents included)
        #[arg(long)]
        location: Option<String>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file path
    Path,
    /// Write the default configuration to the config file path
    Init {
        /// Overwrite an existing file
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

/// Initialize tracing subscriber for logging
fn init_tracing(default_filter: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = AppConfig::load_with_env(cli.config.as_deref());
    let filter = config
        .as_ref()
        .map_or_else(|_| AppConfig::default().logging.filter, |c| c.logging.filter.clone());
    init_tracing(&filter);

    info!("Starting brids v{}", env!("CARGO_PKG_VERSION"));

    let result = config
        .context("failed to load configuration")
        .and_then(|config| run(cli, &config));

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, config: &AppConfig) -> Result<ExitCode> {
    match cli.command {
        Commands::Cpf { command } => tax_id(command, &CPF),
        Commands::Pis { command } => tax_id(command, &PIS_PASEP),
        Commands::Cep { command } => cep_command(command),
        Commands::Municipio {
            command: MunicipioCommands::Validate { value },
        } => Ok(report(municipio::is_valid(&value))),
        Commands::Nupj { command } => nupj_command(command),
        Commands::Ranges { command } => ranges_command(command, config),
        Commands::Config { command } => config_command(command, cli.config, config),
    }
}

/// The operations shared by CPF and PIS/PASEP.
struct TaxId {
    is_valid_with: fn(&str, bool) -> bool,
    format: fn(&str) -> brids_ids::Result<String>,
    random: fn(bool) -> String,
}

const CPF: TaxId = TaxId {
    is_valid_with: cpf::is_valid_with,
    format: cpf::format,
    random: cpf::random,
};

const PIS_PASEP: TaxId = TaxId {
    is_valid_with: pis_pasep::is_valid_with,
    format: pis_pasep::format,
    random: pis_pasep::random,
};

fn tax_id(command: TaxIdCommands, ops: &TaxId) -> Result<ExitCode> {
    match command {
        TaxIdCommands::Validate { value, no_autopad } => {
            Ok(report((ops.is_valid_with)(&value, !no_autopad)))
        }
        TaxIdCommands::Format { value } => {
            println!("{}", (ops.format)(&value)?);
            Ok(ExitCode::SUCCESS)
        }
        TaxIdCommands::Generate { generate } => {
            for _ in 0..generate.count {
                println!("{}", (ops.random)(generate.formatted));
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn cep_command(command: CepCommands) -> Result<ExitCode> {
    match command {
        CepCommands::Format { value } => println!("{}", cep::format(&value)?),
        CepCommands::Parse { value } => {
            let key = cep::parse(&value)?;
            let fields = json!({
                "cep": key.formatted(),
                "region": key.region(),
                "sub_region": key.sub_region(),
                "sector": key.sector(),
                "sub_sector": key.sub_sector(),
                "division": key.division(),
                "suffix": key.suffix(),
            });
            println!("{}", serde_json::to_string_pretty(&fields)?);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn nupj_command(command: NupjCommands) -> Result<ExitCode> {
    match command {
        NupjCommands::Validate { value } => Ok(report(nupj::is_valid(&value))),
        NupjCommands::Parse { value } => {
            let parsed = nupj::parse(&value)?;
            let fields = json!({
                "nupj": parsed.to_string(),
                "fields": parsed,
                "segment_name": parsed.segment_name(),
                "court_name": parsed.court_name().ok(),
                "valid": nupj::is_valid(&value),
            });
            println!("{}", serde_json::to_string_pretty(&fields)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn ranges_command(command: RangesCommands, config: &AppConfig) -> Result<ExitCode> {
    let mut source = CorreiosRangeSource::from_config(&config.correios)
        .context("failed to set up the Correios client")?;

    match command {
        RangesCommands::States => {
            for state in source.valid_states()? {
                println!("{state}");
            }
            Ok(ExitCode::SUCCESS)
        }
        RangesCommands::List { state, location } => {
            let ranges = match location {
                Some(location) => source.ranges_by_location(&state, &location)?,
                None => source.ranges_by_state(&state)?,
            };
            print_ranges(&ranges);
            Ok(ExitCode::SUCCESS)
        }
        RangesCommands::Check {
            cep,
            state,
            location,
        } => {
            let mut validator = CepRangeValidator::new(source);
            let valid = match location {
                Some(location) => validator.is_valid_by_location(&cep, &state, &location)?,
                None => validator.is_valid_by_state(&cep, &state)?,
            };
            Ok(report(valid))
        }
    }
}

fn print_ranges(ranges: &[RangeEntry]) {
    for range in ranges {
        println!("{} a {}", range.low, range.high);
    }
}

fn config_command(
    command: ConfigCommands,
    explicit_path: Option<PathBuf>,
    config: &AppConfig,
) -> Result<ExitCode> {
    let path = match explicit_path {
        Some(path) => path,
        None => AppConfig::config_path()?,
    };

    match command {
        ConfigCommands::Show => print!("{}", toml::to_string_pretty(config)?),
        ConfigCommands::Path => println!("{}", path.display()),
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                bail!(
                    "{} already exists, pass --force to overwrite it",
                    path.display()
                );
            }
            AppConfig::default().save_to(&path)?;
            println!("Wrote {}", path.display());
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Print the verdict of a check and turn it into the exit status.
fn report(valid: bool) -> ExitCode {
    if valid {
        println!("valid");
        ExitCode::SUCCESS
    } else {
        println!("invalid");
        ExitCode::from(1)
    }
}
