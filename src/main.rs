use std::collections::HashMap;
use std::io::Read;
use std::process::ExitCode;

use coin_bonus::logging::{init_tracing, log_level_from_env};
use coin_bonus::{
    simulate_payouts, BonusConfig, BonusError, BonusLottery, OutcomeTally, Result, TrialRecord,
};

const USAGE: &str = "usage: coin-bonus [--simulate DRAWS] [PATH]";

#[derive(Debug, Default, PartialEq)]
struct Args {
    help: bool,
    simulate: Option<usize>,
    path: Option<String>,
}

fn parse_args<I>(args: I) -> Result<Args>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--simulate" => {
                let draws = args
                    .next()
                    .and_then(|value| value.parse::<usize>().ok())
                    .ok_or_else(|| BonusError::InvalidConfig(USAGE.to_string()))?;
                parsed.simulate = Some(draws);
            }
            "-h" | "--help" => {
                parsed.help = true;
                return Ok(parsed);
            }
            _ if parsed.path.is_none() => parsed.path = Some(arg.clone()),
            _ => return Err(BonusError::InvalidConfig(USAGE.to_string())),
        }
    }
    Ok(parsed)
}

/// Accepts keyed counts (`{"1": 40}`) or a trial log (`[{"outcome": 1}]`)
fn read_tally(path: Option<&str>) -> Result<OutcomeTally> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let value: serde_json::Value = serde_json::from_str(&raw)?;
    if value.is_array() {
        let records: Vec<TrialRecord> = serde_json::from_value(value)?;
        Ok(OutcomeTally::from_records(&records))
    } else {
        let counts: HashMap<String, u64> = serde_json::from_value(value)?;
        OutcomeTally::from_keyed_counts(&counts)
    }
}

fn load_config() -> Result<BonusConfig> {
    match std::env::var("BONUS_CONFIG_FILE") {
        Ok(path) => BonusConfig::from_json_file(path),
        Err(_) => {
            let config = BonusConfig::from_env();
            config.validate()?;
            Ok(config)
        }
    }
}

fn run() -> Result<()> {
    let args = parse_args(std::env::args().skip(1))?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }
    let config = load_config()?;
    let tally = read_tally(args.path.as_deref())?;
    tracing::info!(
        total = tally.total(),
        coin_count = config.coin_count,
        min_pounds = config.min_pounds,
        max_pounds = config.max_pounds,
        "loaded outcome tally"
    );

    let output = match args.simulate {
        Some(draws) => {
            let seed = config.seed.unwrap_or(0);
            let summary = simulate_payouts(&tally, &config, draws, seed)?;
            tracing::info!(draws, mean_pence = summary.mean_pence, "simulated payouts");
            serde_json::to_string_pretty(&summary)?
        }
        None => {
            let mut lottery = BonusLottery::new(config)?;
            let bonus = lottery.draw(&tally)?;
            tracing::info!(payable_pence = bonus.payable_pence, "drew bonus");
            serde_json::to_string_pretty(&bonus)?
        }
    };
    println!("{output}");
    Ok(())
}

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    init_tracing(&log_level_from_env());

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "bonus draw failed");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
