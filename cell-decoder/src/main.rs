use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use serde_json::to_string_pretty;
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

use orb_cell_decoder::{band, resolver, Config, RadioType, Snapshot};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(
        long = "config",
        env = "ORB_CELL_DECODER_CONFIG",
        help = "Path to a JSON config file with calibration overrides"
    )]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode captured modem output and print the report as JSON
    Decode {
        #[arg(help = "File with raw AT command output, stdin when absent")]
        file: Option<PathBuf>,
    },
    /// Resolve a channel number to candidate bands and frequencies
    Resolve {
        #[arg(value_enum)]
        radio: Radio,
        #[arg(help = "EARFCN for LTE, NR-ARFCN for NR")]
        channel: u32,
        #[arg(long = "band", help = "Band the modem reported, picks the primary guess")]
        band: Option<u16>,
    },
    /// List the band catalog
    Bands {
        #[arg(value_enum)]
        radio: Radio,
        #[arg(long = "csv", help = "Write CSV instead of JSON")]
        csv: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Radio {
    Lte,
    Nr,
}

impl From<Radio> for RadioType {
    fn from(radio: Radio) -> Self {
        match radio {
            Radio::Lte => RadioType::Lte,
            Radio::Nr => RadioType::Nr,
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let config = match &cli.config {
        Some(path) => Config::from_path(path)
            .wrap_err_with(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };
    debug!(?config, "configuration loaded");

    match cli.command {
        Command::Decode { file } => {
            let raw = read_input(file.as_deref())?;
            let snapshot = Snapshot::decode_bytes(&raw, &config.calibration)
                .wrap_err("modem output could not be decoded")?;
            info!(
                records = snapshot.records.len(),
                warnings = snapshot.warnings.len(),
                "decoded capture"
            );
            println!("{}", to_string_pretty(&snapshot)?);
        }
        Command::Resolve {
            radio,
            channel,
            band,
        } => {
            println!("{}", resolve_report(radio.into(), channel, band)?);
        }
        Command::Bands { radio, csv } => {
            let radio = RadioType::from(radio);
            if csv {
                band::write_csv(radio, io::stdout().lock())
                    .wrap_err("failed to write band catalog")?;
            } else {
                println!("{}", to_string_pretty(band::bands_for(radio))?);
            }
        }
    }

    Ok(())
}

/// A channel no band covers is a normal outcome and prints an empty candidate
/// list.
fn resolve_report(radio: RadioType, channel: u32, band: Option<u16>) -> Result<String> {
    let resolution = resolver::resolve(radio, channel, band);
    match resolution.primary() {
        Some(primary) => info!("{primary}"),
        None => info!("channel {channel} is outside every known {radio} band"),
    }
    Ok(to_string_pretty(&resolution)?)
}

fn read_input(file: Option<&Path>) -> Result<Vec<u8>> {
    if let Some(path) = file {
        return std::fs::read(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()));
    }
    let mut raw = Vec::new();
    io::stdin()
        .read_to_end(&mut raw)
        .wrap_err("failed to read stdin")?;
    Ok(raw)
}
