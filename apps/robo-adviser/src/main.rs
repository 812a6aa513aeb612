mod infra;
mod obs;
mod prompt;

use clap::{Parser, ValueEnum};
use robo_application::advise::advise;
use robo_application::config::{self, Config};
use robo_application::reporting::{render_report, request_notice};
use robo_application::validation::validate_symbol;
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "robo-adviser")]
#[command(about = "Fetch daily prices for a stock symbol and print a trend recommendation.", version)]
#[command(
    after_help = "Examples:\n  robo-adviser\n  robo-adviser --symbol NFLX\n  robo-adviser --symbol MSFT --config configs/robo.toml --out db/msft.csv\n\nThe API key is read from env ALPHAVANTAGE_API_KEY (a .env file is loaded if present).\nThe recommendation is a fixed heuristic, not investment advice.\n"
)]
struct Cli {
    /// Symbol to analyse. Prompts on stdin when omitted.
    #[arg(long)]
    symbol: Option<String>,

    /// Config file path (TOML). If omitted, uses env ROBO_CONFIG, then built-in defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the fetched prices (overrides paths.prices_csv).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Log output format (overrides log.format).
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn as_str(self) -> &'static str {
        match self {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
        }
    }
}

fn main() {
    // Missing .env is the common case.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let config = resolve_config(cli.config)?;
    let log_format = cli
        .log_format
        .map(LogFormat::as_str)
        .unwrap_or(config.log.format.as_str());
    obs::init_tracing(&config.log.level, log_format)?;

    let prices_csv = cli
        .out
        .unwrap_or_else(|| config.paths.prices_csv.clone());
    tracing::debug!(
        base_url = %config.provider.base_url,
        prices_csv = %prices_csv.display(),
        "configuration resolved"
    );
    let deps = infra::build_advise_deps(&config, prices_csv)?;

    let raw_symbol = match cli.symbol {
        Some(symbol) => symbol,
        None => prompt::read_symbol(&mut io::stdin().lock(), &mut io::stdout())?,
    };
    let symbol = validate_symbol(&raw_symbol).map_err(|err| err.to_string())?;

    eprintln!("{}", request_notice(&symbol));
    let advice =
        advise(deps.source.as_ref(), deps.store.as_ref(), &symbol).map_err(|err| err.to_string())?;
    print!(
        "{}",
        render_report(&advice, chrono::Local::now().naive_local())
    );
    Ok(())
}

fn resolve_config(path: Option<PathBuf>) -> Result<Config, String> {
    let path = path.or_else(|| {
        std::env::var("ROBO_CONFIG")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
    });
    match path {
        Some(path) => config::load_config(&path).map_err(|err| err.to_string()),
        None => Ok(Config::default()),
    }
}
