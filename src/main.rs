use clap::Parser;
use statement_importer::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        let shutdown_signal = async {
            if tokio::signal::ctrl_c().await.is_err() {
                // No signal handler available; never resolve
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            result = commands::run(args) => result,
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(anyhow::Error::new(statement_importer::Error::processing_interrupted(
                    "Import interrupted by user",
                )))
            }
        }
    });

    match result {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Statement Importer - Bank Statement CSV Converter");
    println!("=================================================");
    println!();
    println!("Convert delimited bank-statement exports into normalized transactions");
    println!("using declarative per-institution templates.");
    println!();
    println!("USAGE:");
    println!("    statement-importer <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    import      Import a statement file using a stored template");
    println!("    templates   List, show, upsert or seed stored templates");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <FILE>  Configuration file (JSON)");
    println!("        --store <FILE>   Template store file");
    println!("    -h, --help           Show help information");
    println!("    -V, --version        Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Seed the store from a directory of template documents:");
    println!("    statement-importer templates seed ./templates");
    println!();
    println!("    # Import a statement and print a summary:");
    println!("    statement-importer import umsaetze.csv --template ing --account giro-1");
    println!();
    println!("    # Emit InfluxDB line protocol, keeping rows that parse:");
    println!(
        "    statement-importer import umsaetze.csv -t ing -a giro-1 -f line-protocol --collect-errors"
    );
    println!();
    println!("For detailed help on any command, use:");
    println!("    statement-importer <COMMAND> --help");
}
