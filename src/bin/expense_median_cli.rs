use std::{
    env,
    io::{self, Write},
    path::PathBuf,
    process,
};

use colored::Colorize;
use expense_median::{
    config::{Config, ConfigManager},
    init,
    ledger::{first_sunday, flatten_with_stats},
    median::{MedianStrategy, Strategy},
    report::{self, fixtures, BenchmarkReport, Comparison},
    utils::{build_info, persistence},
    workload::{self, Distribution},
    LedgerError,
};
use rand::{rngs::StdRng, SeedableRng};

fn main() {
    init();

    match run() {
        Ok(true) => {}
        Ok(false) => process::exit(2),
        Err(err) => {
            eprintln!("{} {err}", "Error:".red().bold());
            process::exit(1);
        }
    }
}

/// Runs one command; `Ok(false)` signals that the strategies disagreed.
fn run() -> Result<bool, Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let Some(command) = args.next() else {
        print_usage();
        process::exit(1);
    };

    let config = ConfigManager::from_env().load()?;

    match command.as_str() {
        "median" => {
            let path = next_path(&mut args);
            let ledger = persistence::load_ledger_from_file(&path)?;
            let flattened = flatten_with_stats(&ledger);
            let strategies = match args.next().as_deref() {
                None => vec![config.strategy],
                Some("both") => Strategy::ALL.to_vec(),
                Some(name) => vec![name.parse::<Strategy>()?],
            };
            for strategy in strategies {
                let median = strategy.median(&flattened.amounts);
                println!("{}: {}", strategy.to_string().bold(), format_median(median));
            }
            println!(
                "amounts: {} kept, {} dropped",
                flattened.stats.entries_kept, flattened.stats.entries_dropped
            );
        }
        "compare" => {
            let path = next_path(&mut args);
            let ledger = persistence::load_ledger_from_file(&path)?;
            let comparison = report::compare(&ledger, config.tolerance);
            print_comparison(&comparison);
            return Ok(comparison.agree);
        }
        "cutoff" => {
            let year: i32 = next_arg(&mut args).parse()?;
            let month: u32 = next_arg(&mut args).parse()?;
            let day = first_sunday(year, month)
                .ok_or_else(|| LedgerError::InvalidKey(format!("{year}-{month:02}")))?;
            println!("{day}");
        }
        "generate" => {
            let size: usize = next_arg(&mut args).parse()?;
            let distribution: Distribution = next_arg(&mut args).parse()?;
            let seed = args.next().map(|raw| raw.parse::<u64>()).transpose()?;
            let mut rng = match seed.or(config.seed) {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let ledger = workload::generate_ledger(size, distribution, &mut rng);
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            serde_json::to_writer(&mut handle, &ledger)?;
            writeln!(handle)?;
        }
        "bench" => {
            let mut plan = config.bench_plan();
            let sizes = args
                .map(|raw| raw.parse::<usize>())
                .collect::<Result<Vec<_>, _>>()?;
            if !sizes.is_empty() {
                plan.sizes = sizes;
            }
            let report = report::run_benchmark(&plan);
            print_benchmark(&report);
            return Ok(report.all_agree());
        }
        "fixtures" => return Ok(run_fixtures(&config)),
        "version" => println!("{}", build_info::current()),
        _ => {
            print_usage();
            process::exit(1);
        }
    }

    Ok(true)
}

fn next_arg(args: &mut impl Iterator<Item = String>) -> String {
    args.next().unwrap_or_else(|| {
        print_usage();
        process::exit(1);
    })
}

fn next_path(args: &mut impl Iterator<Item = String>) -> PathBuf {
    PathBuf::from(next_arg(args))
}

fn format_median(value: Option<f64>) -> String {
    value.map_or_else(|| "none".to_string(), |median| median.to_string())
}

fn agreement_label(agree: bool) -> colored::ColoredString {
    if agree {
        "MATCH".green()
    } else {
        "DIFFERENT".red()
    }
}

fn print_comparison(comparison: &Comparison) {
    for measurement in [comparison.sort, comparison.quickselect] {
        println!(
            "{}: {} ({:.4}ms)",
            measurement.strategy.to_string().bold(),
            format_median(measurement.result),
            measurement.millis()
        );
    }
    println!("agreement: {}", agreement_label(comparison.agree));
    if let Some(speedup) = comparison.speedup() {
        println!("speedup: {speedup:.2}x");
    }
}

fn run_fixtures(config: &Config) -> bool {
    println!("{}", "=== Accuracy ===".bold());
    let mut all_agree = true;
    for fixture in fixtures::named_fixtures() {
        let comparison = report::compare(&fixture.ledger, config.tolerance);
        all_agree &= comparison.agree;
        println!(
            "{}: {} (sort: {}, quickselect: {})",
            fixture.name,
            agreement_label(comparison.agree),
            format_median(comparison.sort.result),
            format_median(comparison.quickselect.result)
        );
    }
    all_agree
}

fn print_benchmark(report: &BenchmarkReport) {
    println!("{}", "=== Benchmark ===".bold());
    println!(
        "{:>8}  {:<15} {:>12} {:>14} {:>8}  result",
        "size", "distribution", "sort ms", "quickselect ms", "speedup"
    );
    for row in &report.rows {
        let speedup = row
            .speedup()
            .map_or_else(|| "-".to_string(), |value| format!("{value:.2}x"));
        println!(
            "{:>8}  {:<15} {:>12.4} {:>14.4} {:>8}  {}",
            row.size,
            row.distribution.to_string(),
            row.comparison.sort.millis(),
            row.comparison.quickselect.millis(),
            speedup,
            agreement_label(row.comparison.agree)
        );
    }

    println!("\n{}", "Average speedup by size:".bold());
    for (size, speedup) in report.average_speedup_by_size() {
        println!("- {size:>8} elements: {speedup:.2}x");
    }
    println!("{}", "Average speedup by distribution:".bold());
    for (distribution, speedup) in report.average_speedup_by_distribution() {
        println!("- {:<15}: {speedup:.2}x", distribution.to_string());
    }
    if let (Some(best), Some(worst)) = (report.best(), report.worst()) {
        println!(
            "best: {} elements, {} | worst: {} elements, {}",
            best.size, best.distribution, worst.size, worst.distribution
        );
    }
    if let Some(overall) = report.overall_average() {
        println!("overall: {overall:.2}x");
    }
    println!("agreement: {}", agreement_label(report.all_agree()));
}

fn print_usage() {
    eprintln!(
        "Usage: expense_median_cli <command>\n\
         Commands:\n  \
         median <ledger.json> [sort|quickselect|both]\n  \
         compare <ledger.json>\n  \
         cutoff <year> <month>\n  \
         generate <size> <random|normal|sorted|reverse-sorted|almost-sorted> [seed]\n  \
         bench [sizes...]\n  \
         fixtures\n  \
         version"
    );
}
