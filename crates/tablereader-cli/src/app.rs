//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{debug, warn, Level};
use tracing_subscriber::EnvFilter;

use tablereader::{OffsetTableReader, ReaderOptions, Record, TableFormat, TableInput, TableReader};

/// Config files looked up in the working directory when `--config` is not given
const CONFIG_CANDIDATES: [&str; 2] = ["tablereader.toml", ".tablereader.toml"];

type Records = Box<dyn Iterator<Item = tablereader::Result<Record>>>;

/// Output format for records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per record and line
    #[default]
    Json,
    /// Tab-separated values with a header line
    Text,
}

#[derive(Parser)]
#[command(name = "tablereader")]
#[command(author, version, about = "Read csv, xls and xlsx tables as uniform records", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the records of a table
    Read(ReadArgs),

    /// List the sheets of a workbook
    Sheets {
        /// Input workbook
        input: PathBuf,

        /// Format tag overriding the file extension (xls or xlsx)
        #[arg(short, long)]
        format: Option<String>,
    },
}

/// Arguments of the `read` command
#[derive(Debug, Clone, Default, Args)]
pub struct ReadArgs {
    /// Input table, `-` reads stdin (requires --format)
    pub input: PathBuf,

    /// Sheet to read (defaults to the first sheet)
    #[arg(short, long)]
    pub sheet: Option<String>,

    /// Comma-separated column names; the first row is used otherwise
    #[arg(long, value_delimiter = ',')]
    pub fieldnames: Vec<String>,

    /// Trim whitespace around every value
    #[arg(long)]
    pub strip: bool,

    /// Format tag overriding the file extension (csv, unicodecsv, xls, xlsx)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Field delimiter for delimited text
    #[arg(short, long)]
    pub delimiter: Option<char>,

    /// Quote character for delimited text
    #[arg(short, long)]
    pub quotechar: Option<char>,

    /// Use the first row containing this exact value as header
    #[arg(long)]
    pub header_marker: Option<String>,

    /// Output format (json or text)
    #[arg(short, long, value_enum, default_value = "json")]
    pub output: OutputFormat,

    /// Stop after this many records
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Read(args) => {
            let count = read_command(&args, &mut out)?;
            debug!(count, "records written");
        }
        Commands::Sheets { input, format } => {
            sheets_command(&input, format.as_deref(), &mut out)?;
        }
    }

    Ok(())
}

/// Install the stderr log subscriber; `RUST_LOG` refines the default level
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(io::stderr)
        .init();
}

/// Execute the read command, returning the number of records written
pub fn read_command<W: Write>(args: &ReadArgs, out: &mut W) -> Result<usize> {
    let options = reader_options(args)?;
    let input = open_input(&args.input)?;

    let (fieldnames, records): (Vec<String>, Records) = match &args.header_marker {
        Some(marker) => {
            let mut reader = OffsetTableReader::open(input, marker.as_str(), options)
                .with_context(|| format!("Failed to open table: {}", args.input.display()))?;
            let names = reader.fieldnames()?.map(<[String]>::to_vec).unwrap_or_default();
            (names, Box::new(reader) as Records)
        }
        None => {
            let mut reader = TableReader::open(input, options)
                .with_context(|| format!("Failed to open table: {}", args.input.display()))?;
            let names = reader.fieldnames()?.map(<[String]>::to_vec).unwrap_or_default();
            (names, Box::new(reader) as Records)
        }
    };

    if args.output == OutputFormat::Text && !fieldnames.is_empty() {
        writeln!(out, "{}", fieldnames.join("\t"))?;
    }

    let mut count = 0;
    for record in records.take(args.limit.unwrap_or(usize::MAX)) {
        let record = record.with_context(|| {
            format!("Failed to read record {} of {}", count + 1, args.input.display())
        })?;

        match args.output {
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, &record)?;
                writeln!(out)?;
            }
            OutputFormat::Text => {
                let line: Vec<&str> = fieldnames
                    .iter()
                    .map(|name| record.get(name).unwrap_or(""))
                    .collect();
                writeln!(out, "{}", line.join("\t"))?;
            }
        }
        count += 1;
    }

    Ok(count)
}

/// Execute the sheets command
pub fn sheets_command<W: Write>(input: &Path, format: Option<&str>, out: &mut W) -> Result<()> {
    let names = match format {
        Some(tag) => {
            let format: TableFormat = tag.parse()?;
            TableReader::sheet_names_as(input, format)
        }
        None => TableReader::sheet_names(input),
    }
    .with_context(|| format!("Failed to list sheets: {}", input.display()))?;

    for name in names {
        writeln!(out, "{}", name)?;
    }

    Ok(())
}

/// Merge config file options with command-line flags; flags win
fn reader_options(args: &ReadArgs) -> Result<ReaderOptions> {
    let mut options = load_options(args.config.as_deref())?;

    if let Some(sheet) = &args.sheet {
        options.sheet = Some(sheet.clone());
    }
    if !args.fieldnames.is_empty() {
        options.fieldnames = Some(args.fieldnames.clone());
    }
    if args.strip {
        options.strip_whitespace = true;
    }
    if let Some(format) = &args.format {
        options.format = Some(format.clone());
    }
    if let Some(delimiter) = args.delimiter {
        options.delimiter = delimiter;
    }
    if let Some(quotechar) = args.quotechar {
        options.quotechar = quotechar;
    }

    Ok(options)
}

/// Load reader options from a config file or use defaults
fn load_options(config_path: Option<&Path>) -> Result<ReaderOptions> {
    match config_path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            ReaderOptions::from_toml_str(&content)
                .with_context(|| format!("Failed to parse config: {}", path.display()))
        }
        None => {
            load_default_options(Path::new("."))
        }
    }
}

/// Look for a config file in `dir`; a file that does not parse is skipped
/// with a warning
fn load_default_options(dir: &Path) -> Result<ReaderOptions> {
    for candidate in CONFIG_CANDIDATES {
        let path = dir.join(candidate);
        if !path.exists() {
            continue;
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        match ReaderOptions::from_toml_str(&content) {
            Ok(options) => {
                debug!(config = %path.display(), "loaded reader options");
                return Ok(options);
            }
            Err(e) => warn!(config = %path.display(), error = %e, "ignoring malformed config"),
        }
    }
    Ok(ReaderOptions::default())
}

/// `-` means stdin, read fully into memory
fn open_input(input: &Path) -> Result<TableInput> {
    if input == Path::new("-") {
        let mut buffer = Vec::new();
        io::stdin()
            .read_to_end(&mut buffer)
            .context("Failed to read stdin")?;
        Ok(TableInput::bytes(buffer))
    } else {
        Ok(TableInput::from(input))
    }
}
