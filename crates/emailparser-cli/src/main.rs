//! Command-line email address checker.

mod config;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser as _, Subcommand, ValueEnum};
use emailparser::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::FlagArgs;

#[derive(clap::Parser, Debug)]
#[command(name = "emailparser", author, version, about, long_about = None)]
struct Cli {
    /// JSON file with parser options
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(flatten)]
    flags: FlagArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print whether each address is valid (reads stdin lines if none given)
    Check {
        /// Addresses to check
        addresses: Vec<String>,
    },
    /// Print the parse tree of an address
    Parse {
        /// Address to parse
        address: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Pretty-printed JSON
    Json,
    /// S-expression
    Sexp,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "emailparser=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let options = config::load(cli.config.as_deref(), cli.flags)?;
    let parser = Parser::new(options).context("Invalid parser options")?;
    info!(?options, "Parser ready");

    match cli.command {
        Command::Check { addresses } => check(&parser, addresses),
        Command::Parse { address, format } => parse(&parser, &address, format),
    }
}

fn check(parser: &Parser, addresses: Vec<String>) -> Result<ExitCode> {
    let addresses = if addresses.is_empty() {
        io::stdin()
            .lock()
            .lines()
            .collect::<io::Result<Vec<_>>>()
            .context("Failed to read addresses from stdin")?
    } else {
        addresses
    };

    let mut stdout = io::stdout().lock();
    let mut invalid = 0usize;
    for address in &addresses {
        let verdict = if parser.is_valid(address) {
            "valid"
        } else {
            invalid += 1;
            "invalid"
        };
        writeln!(stdout, "{address}\t{verdict}")?;
    }

    info!(total = addresses.len(), invalid, "Checked addresses");
    Ok(if invalid == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn parse(parser: &Parser, address: &str, format: Format) -> Result<ExitCode> {
    let mailbox = parser
        .parse(address)
        .with_context(|| format!("'{address}' is not a valid address"))?;
    let node = mailbox.to_node();

    let output = match format {
        Format::Json => serde_json::to_string_pretty(&node)?,
        Format::Sexp => node.to_string(),
    };
    println!("{output}");
    Ok(ExitCode::SUCCESS)
}
