//! Command-line argument definitions for the statement importer
//!
//! This module defines the complete CLI interface using the clap derive API.

use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// Marker for reading the statement from standard input
pub const STDIN_MARKER: &str = "-";

/// CLI arguments for the statement importer
///
/// Converts delimited bank-statement exports into normalized transactions
/// using per-institution templates.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "statement-importer",
    version,
    about = "Import bank-statement CSV exports into normalized transactions",
    long_about = "Reads delimited bank-statement exports using declarative per-institution \
                  templates and emits normalized transactions with deterministic ids, as JSON, \
                  InfluxDB line protocol or a human-readable summary. Re-importing the same \
                  file yields identical output."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    ///
    /// JSON configuration file. If not specified, looks for
    /// <config dir>/statement-importer/config.json
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        global = true,
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Template store file, overriding configuration and environment
    #[arg(
        long = "store",
        value_name = "FILE",
        global = true,
        help = "Template store file"
    )]
    pub store_path: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Only log errors"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Import a statement file using a stored template
    Import(ImportArgs),
    /// Manage stored templates
    #[command(subcommand)]
    Templates(TemplatesCommand),
}

/// Arguments for the import command
#[derive(Debug, Clone, Parser)]
pub struct ImportArgs {
    /// Statement file to import, or `-` for standard input
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Id of the stored template describing the export
    #[arg(short = 't', long = "template", value_name = "ID")]
    pub template: String,

    /// Account the statement belongs to
    #[arg(short = 'a', long = "account", value_name = "ID")]
    pub account: String,

    /// Bank id (defaults to the configured bank, then `unknown`)
    #[arg(short = 'b', long = "bank", value_name = "ID")]
    pub bank: Option<String>,

    /// Tenant id (defaults to the configured tenant)
    #[arg(long = "tenant", value_name = "ID")]
    pub tenant: Option<String>,

    /// Output format
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value_t = OutputFormat::Summary
    )]
    pub format: OutputFormat,

    /// Write output to a file instead of standard output
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Convert every row that parses and report the rest instead of aborting
    #[arg(long = "collect-errors")]
    pub collect_errors: bool,
}

/// Template management subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum TemplatesCommand {
    /// List stored templates
    List,
    /// Print one stored template as JSON
    Show {
        /// Template id
        id: String,
    },
    /// Insert or replace a template from a JSON document
    Upsert {
        /// Template document
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Seed templates from a directory, keeping existing ids
    Seed {
        /// Directory of template documents (defaults to the configured one)
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,
    },
}

/// Output formats for imported transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON array of transactions (or the full report with --collect-errors)
    Json,
    /// InfluxDB line protocol, one point per transaction
    LineProtocol,
    /// Human-readable table and totals
    Summary,
}

impl Args {
    /// Logging level from the verbosity flags, or `configured` when none is given
    pub fn get_log_level<'a>(&self, configured: &'a str) -> &'a str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => configured,
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}

impl ImportArgs {
    /// Validate the import arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if self.template.trim().is_empty() {
            return Err(Error::configuration("template id must not be empty"));
        }

        if self.account.trim().is_empty() {
            return Err(Error::configuration("account id must not be empty"));
        }

        if !self.reads_stdin() && !self.input.exists() {
            return Err(Error::configuration(format!(
                "Statement file does not exist: {}",
                self.input.display()
            )));
        }

        Ok(())
    }

    /// True when the statement is read from standard input
    pub fn reads_stdin(&self) -> bool {
        self.input == Path::new(STDIN_MARKER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_import_command_parsing() {
        let args = Args::try_parse_from([
            "statement-importer",
            "import",
            "statement.csv",
            "--template",
            "ing",
            "--account",
            "giro-1",
            "--format",
            "line-protocol",
            "--collect-errors",
            "-vv",
        ])
        .unwrap();

        assert_eq!(args.verbose, 2);
        match args.command {
            Some(Commands::Import(import)) => {
                assert_eq!(import.input, PathBuf::from("statement.csv"));
                assert_eq!(import.template, "ing");
                assert_eq!(import.account, "giro-1");
                assert_eq!(import.bank, None);
                assert_eq!(import.format, OutputFormat::LineProtocol);
                assert!(import.collect_errors);
            }
            other => panic!("expected import command, got {:?}", other),
        }
    }

    #[test]
    fn test_import_requires_template_and_account() {
        assert!(
            Args::try_parse_from(["statement-importer", "import", "a.csv", "--account", "x"])
                .is_err()
        );
        assert!(
            Args::try_parse_from(["statement-importer", "import", "a.csv", "--template", "x"])
                .is_err()
        );
    }

    #[test]
    fn test_templates_subcommands() {
        let args =
            Args::try_parse_from(["statement-importer", "--store", "s.json", "templates", "list"])
                .unwrap();
        assert_eq!(args.store_path, Some(PathBuf::from("s.json")));
        assert!(matches!(
            args.command,
            Some(Commands::Templates(TemplatesCommand::List))
        ));

        let args = Args::try_parse_from(["statement-importer", "templates", "seed"]).unwrap();
        assert!(matches!(
            args.command,
            Some(Commands::Templates(TemplatesCommand::Seed { dir: None }))
        ));
    }

    #[test]
    fn test_log_level() {
        let mut args = Args::try_parse_from(["statement-importer"]).unwrap();
        assert!(args.command.is_none());

        // Default level comes from configuration
        assert_eq!(args.get_log_level("warn"), "warn");

        args.verbose = 1;
        assert_eq!(args.get_log_level("warn"), "info");

        args.verbose = 3;
        assert_eq!(args.get_log_level("warn"), "trace");

        args.quiet = true;
        assert_eq!(args.get_log_level("warn"), "error");
    }

    #[test]
    fn test_import_args_validation() {
        let statement = NamedTempFile::new().unwrap();
        let args = ImportArgs {
            input: statement.path().to_path_buf(),
            template: "ing".to_string(),
            account: "giro-1".to_string(),
            bank: None,
            tenant: None,
            format: OutputFormat::Summary,
            output: None,
            collect_errors: false,
        };
        assert!(args.validate().is_ok());

        let mut stdin = args.clone();
        stdin.input = PathBuf::from("-");
        assert!(stdin.reads_stdin());
        assert!(stdin.validate().is_ok());

        let mut missing = args.clone();
        missing.input = PathBuf::from("/nonexistent/statement.csv");
        assert!(missing.validate().is_err());

        let mut blank = args;
        blank.account = " ".to_string();
        assert!(blank.validate().is_err());
    }
}
