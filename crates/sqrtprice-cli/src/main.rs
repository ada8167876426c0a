use clap::{ArgAction, Args, Parser, Subcommand};
use color_eyre::eyre::{eyre, Context, Result};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use indicatif::{ProgressBar, ProgressStyle};
use sqrtprice_math::format::{bit_length, hex_0x, underscore_grouped};
use sqrtprice_math::verify::{check_tick, CheckOutcome, DEFAULT_TICKS};
use sqrtprice_math::{
    sqrt_price_x96_checked, sqrt_price_x96_with_precision, Precision,
};
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sqrtprice")]
#[command(about = "Tick to sqrtPriceX96 conversion and verification toolkit")]
#[command(version)]
struct Cli {
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    verbose: u8,

    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a single tick to sqrtPriceX96.
    Convert(ConvertArgs),
    /// Convert a batch of ticks and compare against the cross-check table.
    Verify(VerifyArgs),
    /// Convert a contiguous tick range.
    Sweep(SweepArgs),
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Tick to convert.
    #[arg(long, allow_negative_numbers = true)]
    tick: i32,

    /// Guard bits carried beyond the 96-bit output scale.
    #[arg(long, default_value_t = Precision::DEFAULT_GUARD_BITS)]
    guard_bits: u32,

    /// Skip the widened-precision stability check.
    #[arg(long)]
    no_check: bool,

    /// Output format: table (default), json, or csv.
    #[arg(long, default_value = "table")]
    output: String,
}

#[derive(Args, Debug)]
struct VerifyArgs {
    /// Tick to include (repeatable). Defaults to the deployment-script set.
    #[arg(long, allow_negative_numbers = true)]
    tick: Vec<i32>,

    /// Guard bits carried beyond the 96-bit output scale.
    #[arg(long, default_value_t = Precision::DEFAULT_GUARD_BITS)]
    guard_bits: u32,

    /// Output format: table (default) or json.
    #[arg(long, default_value = "table")]
    output: String,
}

#[derive(Args, Debug)]
struct SweepArgs {
    /// First tick of the range.
    #[arg(long, allow_negative_numbers = true)]
    start: i32,

    /// Last tick of the range (inclusive).
    #[arg(long, allow_negative_numbers = true)]
    end: i32,

    /// Stride between ticks.
    #[arg(long, default_value_t = 1)]
    step: u32,

    /// Guard bits carried beyond the 96-bit output scale.
    #[arg(long, default_value_t = Precision::DEFAULT_GUARD_BITS)]
    guard_bits: u32,

    /// Output format: table (default) or csv.
    #[arg(long, default_value = "table")]
    output: String,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet)?;

    match cli.command {
        Commands::Convert(args) => handle_convert(args),
        Commands::Verify(args) => handle_verify(args),
        Commands::Sweep(args) => handle_sweep(args),
    }
}

fn init_tracing(verbose: u8, quiet: bool) -> Result<()> {
    let level = if quiet {
        Level::WARN
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.as_str()))
        .wrap_err("failed to initialize tracing filter")?;

    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

fn handle_convert(args: ConvertArgs) -> Result<()> {
    let precision = Precision::with_guard_bits(args.guard_bits);

    let value = if args.no_check {
        sqrt_price_x96_with_precision(args.tick, precision)?
    } else {
        sqrt_price_x96_checked(args.tick, precision)?
    };

    match args.output.to_lowercase().as_str() {
        "table" => {
            let mut table = Table::new();
            table.load_preset(UTF8_BORDERS_ONLY);
            table.set_header(vec!["Field", "Value"]);
            table.add_row(vec!["Tick", &format!("{}", args.tick)]);
            table.add_row(vec!["Decimal", &value.to_string()]);
            table.add_row(vec!["Grouped", &underscore_grouped(&value)]);
            table.add_row(vec!["Hex", &hex_0x(&value)]);
            table.add_row(vec!["Bit length", &format!("{}", bit_length(&value))]);
            table.add_row(vec!["Guard bits", &format!("{}", precision.guard_bits())]);
            println!("\n{table}\n");
        }
        "json" => {
            use serde::Serialize;

            #[derive(Serialize)]
            struct JsonConversion {
                tick: i32,
                sqrt_price_x96: String,
                grouped: String,
                hex: String,
                bit_length: u64,
                guard_bits: u32,
            }

            let output = JsonConversion {
                tick: args.tick,
                sqrt_price_x96: value.to_string(),
                grouped: underscore_grouped(&value),
                hex: hex_0x(&value),
                bit_length: bit_length(&value),
                guard_bits: precision.guard_bits(),
            };
            let json_str =
                serde_json::to_string_pretty(&output).wrap_err("failed to serialize JSON")?;
            println!("{json_str}");
        }
        "csv" => {
            println!("tick,sqrt_price_x96,hex,bit_length");
            println!(
                "{},{},{},{}",
                args.tick,
                value,
                hex_0x(&value),
                bit_length(&value)
            );
        }
        _ => {
            return Err(eyre!(
                "unknown output format '{}'; use 'table', 'json', or 'csv'",
                args.output
            ))
        }
    }

    info!(
        tick = args.tick,
        bit_length = bit_length(&value),
        checked = !args.no_check,
        "convert command completed"
    );

    Ok(())
}

fn status_color(matched: Option<bool>) -> &'static str {
    match matched {
        Some(true) => "\x1b[32m",  // Green
        Some(false) => "\x1b[31m", // Red
        None => "\x1b[33m",        // Yellow
    }
}

const COLOR_RESET: &str = "\x1b[0m";

fn status_label(matched: Option<bool>) -> &'static str {
    match matched {
        Some(true) => "MATCH",
        Some(false) => "MISMATCH",
        None => "NO REFERENCE",
    }
}

fn handle_verify(args: VerifyArgs) -> Result<()> {
    let precision = Precision::with_guard_bits(args.guard_bits);
    let ticks: Vec<i32> = if args.tick.is_empty() {
        DEFAULT_TICKS.to_vec()
    } else {
        args.tick.clone()
    };

    let pb = ProgressBar::new(ticks.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ticks")
            .wrap_err("failed to create progress style")?
            .progress_chars("#>-"),
    );

    let mut outcomes: Vec<CheckOutcome> = Vec::with_capacity(ticks.len());
    for &tick in &ticks {
        let outcome = check_tick(tick, precision)
            .wrap_err_with(|| format!("failed to convert tick {tick}"))?;
        outcomes.push(outcome);
        pb.inc(1);
    }
    pb.finish_and_clear();

    let mismatches = outcomes
        .iter()
        .filter(|outcome| outcome.matched() == Some(false))
        .count();

    match args.output.to_lowercase().as_str() {
        "json" => {
            use serde::Serialize;

            #[derive(Serialize)]
            struct JsonOutcome {
                tick: i32,
                computed: String,
                expected: Option<String>,
                difference: Option<String>,
                status: &'static str,
            }

            #[derive(Serialize)]
            struct JsonReport {
                outcomes: Vec<JsonOutcome>,
                ticks_checked: usize,
                mismatches: usize,
            }

            let report = JsonReport {
                outcomes: outcomes
                    .iter()
                    .map(|outcome| JsonOutcome {
                        tick: outcome.tick,
                        computed: outcome.computed.to_string(),
                        expected: outcome.expected.as_ref().map(ToString::to_string),
                        difference: outcome.difference.as_ref().map(ToString::to_string),
                        status: status_label(outcome.matched()),
                    })
                    .collect(),
                ticks_checked: outcomes.len(),
                mismatches,
            };
            let json_str =
                serde_json::to_string_pretty(&report).wrap_err("failed to serialize JSON")?;
            println!("{json_str}");
        }
        "table" => {
            let mut table = Table::new();
            table.load_preset(UTF8_BORDERS_ONLY);
            table.set_header(vec!["Tick", "Computed", "Cross-check", "Diff", "Status"]);

            for outcome in &outcomes {
                let color = status_color(outcome.matched());
                let status = format!("{}{}{}", color, status_label(outcome.matched()), COLOR_RESET);

                table.add_row(vec![
                    format!("{}", outcome.tick),
                    outcome.computed.to_string(),
                    outcome
                        .expected
                        .as_ref()
                        .map(ToString::to_string)
                        .unwrap_or_else(|| "-".to_string()),
                    outcome
                        .difference
                        .as_ref()
                        .map(ToString::to_string)
                        .unwrap_or_else(|| "-".to_string()),
                    status,
                ]);
            }

            println!("\n{table}\n");

            if mismatches > 0 {
                warn!(mismatches, "some cross-check values do not match");
            } else {
                println!("All cross-check values match.");
            }
        }
        _ => {
            return Err(eyre!(
                "unknown output format '{}'; use 'table' or 'json'",
                args.output
            ))
        }
    }

    info!(
        ticks_checked = outcomes.len(),
        mismatches,
        guard_bits = precision.guard_bits(),
        "verify command completed"
    );

    Ok(())
}

fn handle_sweep(args: SweepArgs) -> Result<()> {
    if args.start > args.end {
        return Err(eyre!(
            "invalid range: start {} is greater than end {}",
            args.start,
            args.end
        ));
    }
    if args.step == 0 {
        return Err(eyre!("step must be at least 1"));
    }

    let precision = Precision::with_guard_bits(args.guard_bits);
    let ticks: Vec<i32> = (args.start..=args.end)
        .step_by(args.step as usize)
        .collect();

    let mut rows: Vec<(i32, String, String, u64)> = Vec::with_capacity(ticks.len());
    for &tick in &ticks {
        let value = sqrt_price_x96_with_precision(tick, precision)
            .wrap_err_with(|| format!("failed to convert tick {tick}"))?;
        rows.push((tick, value.to_string(), hex_0x(&value), bit_length(&value)));
    }

    match args.output.to_lowercase().as_str() {
        "table" => {
            let mut table = Table::new();
            table.load_preset(UTF8_BORDERS_ONLY);
            table.set_header(vec!["Tick", "sqrtPriceX96", "Hex", "Bits"]);
            for (tick, decimal, hex, bits) in &rows {
                table.add_row(vec![
                    format!("{tick}"),
                    decimal.clone(),
                    hex.clone(),
                    format!("{bits}"),
                ]);
            }
            println!("\n{table}\n");
        }
        "csv" => {
            println!("tick,sqrt_price_x96,hex,bit_length");
            for (tick, decimal, hex, bits) in &rows {
                println!("{tick},{decimal},{hex},{bits}");
            }
        }
        _ => {
            return Err(eyre!(
                "unknown output format '{}'; use 'table' or 'csv'",
                args.output
            ))
        }
    }

    info!(
        start = args.start,
        end = args.end,
        step = args.step,
        rows = rows.len(),
        "sweep command completed"
    );

    Ok(())
}
