//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::backtest::run_backtest;
use crate::domain::config_validation::{
    parse_optional_date, validate_data_config, validate_strategy_config, KNOWN_STRATEGIES,
};
use crate::domain::error::QuickbtError;
use crate::domain::strategy::{
    generate, StrategyConfig, DEFAULT_LONG_WINDOW, DEFAULT_SHORT_WINDOW,
    DEFAULT_STOP_LOSS_FRACTION,
};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::{ReportPort, RunSummary};

#[derive(Parser, Debug)]
#[command(name = "quickbt", about = "Moving-average strategy backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List symbols available in the configured data directory
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show the data range for a symbol
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            symbol,
            output,
            dry_run,
        } => {
            if dry_run {
                run_dry_run(&config)
            } else {
                run_backtest_command(&config, symbol.as_deref(), output.as_ref())
            }
        }
        Command::Validate { config } => run_validate(&config),
        Command::ListSymbols { config } => run_list_symbols(&config),
        Command::Info { config, symbol } => run_info(&config, symbol.as_deref()),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = QuickbtError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Parse `[strategy] name` plus its parameters into a `StrategyConfig`.
/// This is the one place an unknown strategy tag can surface, and the
/// returned config is already validated.
pub fn build_strategy_config(config: &dyn ConfigPort) -> Result<StrategyConfig, QuickbtError> {
    let name =
        config
            .get_string("strategy", "name")
            .ok_or_else(|| QuickbtError::ConfigMissing {
                section: "strategy".into(),
                key: "name".into(),
            })?;

    let strategy = match name.as_str() {
        "moving_average_crossover" => {
            let short = config.get_int("strategy", "short_window", DEFAULT_SHORT_WINDOW as i64);
            let long = config.get_int("strategy", "long_window", DEFAULT_LONG_WINDOW as i64);
            // Bounds-check the raw i64s: a negative INI value must surface
            // here, not wrap through the usize cast.
            if short <= 0 || long <= 0 {
                return Err(QuickbtError::InvalidConfig {
                    reason: format!(
                        "window lengths must be positive (short_window = {}, long_window = {})",
                        short, long
                    ),
                });
            }
            StrategyConfig::MaCrossover {
                short_window: short as usize,
                long_window: long as usize,
            }
        }
        "stop_loss" => StrategyConfig::StopLoss {
            fraction: config.get_double("strategy", "stop_loss", DEFAULT_STOP_LOSS_FRACTION),
        },
        _ => return Err(QuickbtError::UnknownStrategy { name }),
    };

    strategy.validate()?;
    Ok(strategy)
}

fn resolve_symbol(symbol_override: Option<&str>, config: &dyn ConfigPort) -> Option<String> {
    if let Some(s) = symbol_override {
        return Some(s.to_uppercase());
    }
    config
        .get_string("data", "symbol")
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
}

fn run_backtest_command(
    config_path: &PathBuf,
    symbol_override: Option<&str>,
    output_path: Option<&PathBuf>,
) -> ExitCode {
    // Stage 1: Load and validate config
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_data_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = validate_strategy_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    // Stage 2: Build strategy
    let strategy = match build_strategy_config(&adapter) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!("Strategy: {}", strategy.name());

    // Stage 3: Resolve symbol and date range
    let symbol = match resolve_symbol(symbol_override, &adapter) {
        Some(s) => s,
        None => {
            eprintln!("error: no symbol configured");
            return ExitCode::from(2);
        }
    };

    let (start_date, end_date) = match (
        parse_optional_date(&adapter, "start_date"),
        parse_optional_date(&adapter, "end_date"),
    ) {
        (Ok(s), Ok(e)) => (s, e),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 4: Load bars
    let csv_dir = adapter
        .get_string("data", "csv_dir")
        .unwrap_or_default();
    let data_port = CsvAdapter::new(PathBuf::from(csv_dir));

    let bars = match data_port.fetch_series(&symbol, start_date, end_date) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!("Loaded {} bars for {}", bars.len(), symbol);

    // Stage 5: Generate signals and simulate
    let output = match generate(&bars, &strategy) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let result = match run_backtest(&bars, &output.signals) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 6: Console summary
    eprintln!("\n=== Results ===");
    eprintln!("Total Profit:    {:.4}", result.total_profit);
    eprintln!("Trades:          {}", result.trades);
    eprintln!("Winning Trades:  {}", result.winning_trades);
    eprintln!("Losing Trades:   {}", result.losing_trades);
    eprintln!("Breakeven:       {}", result.breakeven_trades);

    // Stage 7: Write report
    let output_file = output_path
        .cloned()
        .unwrap_or_else(|| PathBuf::from("report.txt"));

    let summary = RunSummary {
        symbol: &symbol,
        strategy: &strategy,
        result: &result,
        output: &output,
    };

    match TextReportAdapter.write(&summary, &output_file) {
        Ok(()) => {
            eprintln!("\nReport written to: {}", output_file.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to write report: {e}");
            (&e).into()
        }
    }
}

fn run_dry_run(config_path: &PathBuf) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_data_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = validate_strategy_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let strategy = match build_strategy_config(&adapter) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("\nStrategy: {:?}", strategy);
    match resolve_symbol(None, &adapter) {
        Some(symbol) => eprintln!("Symbol:   {}", symbol),
        None => {
            eprintln!("error: no symbol configured");
            return ExitCode::from(2);
        }
    }

    eprintln!("\nDry run complete: configuration is valid");
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_data_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    match validate_strategy_config(&adapter) {
        Ok(()) => {
            eprintln!("Configuration is valid.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            if matches!(&e, QuickbtError::UnknownStrategy { .. }) {
                eprintln!("known strategies: {}", KNOWN_STRATEGIES.join(", "));
            }
            (&e).into()
        }
    }
}

fn run_list_symbols(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let csv_dir = match adapter.get_string("data", "csv_dir") {
        Some(d) => d,
        None => {
            eprintln!("error: missing config key [data] csv_dir");
            return ExitCode::from(2);
        }
    };

    let data_port = CsvAdapter::new(PathBuf::from(csv_dir));
    match data_port.list_symbols() {
        Ok(symbols) => {
            if symbols.is_empty() {
                eprintln!("No symbols found");
            } else {
                for symbol in &symbols {
                    println!("{}", symbol);
                }
                eprintln!("{} symbols found", symbols.len());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_info(config_path: &PathBuf, symbol_override: Option<&str>) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let symbol = match resolve_symbol(symbol_override, &adapter) {
        Some(s) => s,
        None => {
            eprintln!("error: no symbol configured (use --symbol or set in config)");
            return ExitCode::from(2);
        }
    };

    let csv_dir = adapter
        .get_string("data", "csv_dir")
        .unwrap_or_default();
    let data_port = CsvAdapter::new(PathBuf::from(csv_dir));

    match data_port.data_range(&symbol) {
        Ok(Some((min_date, max_date, count))) => {
            println!("{}: {} bars, {} to {}", symbol, count, min_date, max_date);
            ExitCode::SUCCESS
        }
        Ok(None) => {
            eprintln!("{}: no data found", symbol);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
