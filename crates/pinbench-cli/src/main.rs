use anyhow::Context;
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::Parser;
use log::{info, LevelFilter};
use pinbench_core::config::{PositionalArgs, SweepConfig, SweepConfigError, USAGE};
use pinbench_core::sweep::{self, SweepError};
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

/// Exit status for internal consistency faults (EX_SOFTWARE).
const EXIT_INTERNAL_FAULT: u8 = 70;

#[derive(Parser, Debug)]
#[command(
    name = "pinbench",
    version,
    allow_negative_numbers = true,
    about = "Generate random pin placement benchmarks on an N x N grid",
    override_usage = "pinbench N M_min M_max K [S=<seed>] [P=<0|1>] [D=<directory>]"
)]
struct Cli {
    /// Grid size (N > 0)
    n: String,
    /// Minimum number of terminals (M_min > 0)
    m_min: String,
    /// Maximum number of terminals (M_min <= M_max <= N * N)
    m_max: String,
    /// Benchmarks to generate for each M (K > 0)
    k: String,
    /// Optional S=<seed>, P=<0|1>, D=<directory>
    #[arg(num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
    options: Vec<String>,
}

impl Cli {
    fn positional(&self) -> PositionalArgs<'_> {
        PositionalArgs {
            grid_size: &self.n,
            min_pins: &self.m_min,
            max_pins: &self.m_max,
            repetitions: &self.k,
        }
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn init_logging(print: bool) {
    let default_level = if print { "info" } else { "warn" };
    let target = if print {
        env_logger::Target::Stdout
    } else {
        env_logger::Target::Stderr
    };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));
    if print {
        // P=1 progress stays visible whatever RUST_LOG says.
        builder
            .filter_module("pinbench", LevelFilter::Info)
            .filter_module("pinbench_core", LevelFilter::Info);
    }
    builder.target(target).format_timestamp(None).init();
}

fn print_usage_error(message: &str) {
    println!(" !!! ERROR !!!\n{message}\n\n{USAGE}\n");
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = SweepConfig::from_cli(cli.positional(), &cli.options, time_seed())?;
    init_logging(config.print);
    let print = config.print;
    if print {
        info!(
            "Running with: N={} M_min={} M_max={} K={} S={} P=true D={}",
            config.grid_size,
            config.min_pins,
            config.max_pins,
            config.repetitions,
            config.seed,
            config.output_dir.display()
        );
    }

    let summary = sweep::run_to_files(config)?;
    if print {
        let line = serde_json::to_string(&summary).context("serializing sweep summary")?;
        info!("{line}");
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let error = match (e.kind(), e.get(ContextKind::InvalidArg)) {
                (ErrorKind::UnknownArgument, Some(ContextValue::String(raw))) => {
                    SweepConfigError::UnknownOption(raw.clone())
                }
                _ => SweepConfigError::ArgumentCount(std::env::args().count().saturating_sub(1)),
            };
            print_usage_error(&error.to_string());
            return ExitCode::FAILURE;
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let internal = err
                .downcast_ref::<SweepError>()
                .is_some_and(SweepError::is_internal_fault);
            if internal {
                println!(" !!! BUG !!!\n{err}");
                ExitCode::from(EXIT_INTERNAL_FAULT)
            } else {
                print_usage_error(&err.to_string());
                ExitCode::FAILURE
            }
        }
    }
}
