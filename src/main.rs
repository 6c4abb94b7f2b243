use boatrace_processor::cli::{args::Args, commands};
use clap::Parser;
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(_stats) => {
            // Success - the command already reported its summary
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Boatrace Processor - Race Text Dump Converter");
    println!("=============================================");
    println!();
    println!("Convert the official boatrace program and result text dumps into");
    println!("normalized per-race CSV rows for analytics pipelines.");
    println!();
    println!("USAGE:");
    println!("    boatrace-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    process     Convert one race day's documents to CSV rows (main command)");
    println!("    tracks      Print the track registry (venue codes and names)");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Convert both documents for 9 July 2025:");
    println!("    boatrace-processor process 2025 7 9");
    println!();
    println!("    # Convert only results, with custom paths:");
    println!("    boatrace-processor process 2025 7 9 --kind result \\");
    println!("                               --input /path/to/raw --output /path/to/csv");
    println!();
    println!("    # Print the venue table as JSON:");
    println!("    boatrace-processor tracks --format json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    boatrace-processor <COMMAND> --help");
}
