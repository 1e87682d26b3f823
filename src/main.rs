use anyhow::Context;
use clap::Parser;
use idf_extract::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let result = commands::run(args).context("idf-extract failed");

    match result {
        Ok(summary) if summary.has_failures() => {
            // Partial results were written; signal the failed files
            process::exit(2);
        }
        Ok(_) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("IDF Extract - EnergyPlus Model Data Extractor");
    println!("=============================================");
    println!();
    println!("Stream EnergyPlus IDF building models and extract simulation settings,");
    println!("compact schedules and per-zone load data for report generation.");
    println!();
    println!("USAGE:");
    println!("    idf-extract <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    extract     Extract settings, schedules and zone loads (main command)");
    println!("    expand      Expand Until/value pairs into a day vector");
    println!("    validate    Read models and report reader statistics");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config     Path to configuration file (TOML)");
    println!("    -v, --verbose    Increase logging verbosity");
    println!("    -q, --quiet      Suppress output except errors");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Extract everything from one model:");
    println!("    idf-extract extract model.idf");
    println!();
    println!("    # Zone loads of every model in a directory, as JSON:");
    println!("    idf-extract extract models/ --section zone-loads --format json -o loads.json");
    println!();
    println!("    # Expand an occupancy day at 15-minute resolution:");
    println!("    idf-extract expand --pair 08:00=0.1 --pair 18:00=0.9 --pair 24:00=0.1 \\");
    println!("                       --slot-minutes 15");
    println!();
    println!("For detailed help on any command, use:");
    println!("    idf-extract <COMMAND> --help");
}
