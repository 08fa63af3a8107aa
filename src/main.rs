use chart_oxide::calendar::build_calendar;
use chart_oxide::constants::config::CHART_CONFIG_FILE;
use chart_oxide::data::{ColumnHints, DataSource};
use chart_oxide::series::{build_series, classify};
use chart_oxide::state::{CalendarConfig, ChartConfig};
use chart_oxide::{Result, logging};
use clap::{Args, Parser, Subcommand};
use polars::prelude::{CsvWriter, SerWriter};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "chart-oxide")]
#[command(about = "Aggregate database rows into chart series and calendar streaks")]
#[command(version)]
struct Cli {
    #[arg(long, short, global = true, help = "Log debug events to stderr")]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Source {
    #[arg(long, help = "CSV or Parquet file holding the rows")]
    data: PathBuf,
    #[arg(long, value_name = "COLUMN", help = "Treat a text column as a status column")]
    status: Vec<String>,
    #[arg(long, value_name = "COLUMN", help = "Treat a text column as ';'-separated multi-select labels")]
    multi_select: Vec<String>,
}

impl Source {
    fn load(&self) -> Result<(DataSource, ColumnHints)> {
        let hints = ColumnHints {
            status: self.status.clone(),
            multi_select: self.multi_select.clone(),
        };
        Ok((DataSource::load(&self.data)?, hints))
    }
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "List the columns usable as X and Y axes")]
    Axes {
        #[command(flatten)]
        source: Source,
    },
    #[command(about = "Compute the series matrix for one chart")]
    Series {
        #[command(flatten)]
        source: Source,
        #[arg(long, default_value = CHART_CONFIG_FILE, help = "Chart configuration (JSON)")]
        config: PathBuf,
        #[arg(long, value_name = "PATH", help = "Also write the matrix as CSV")]
        csv_out: Option<PathBuf>,
    },
    #[command(about = "Compute the calendar grid, streaks and totals")]
    Calendar {
        #[arg(long, help = "CSV or Parquet file holding the observations")]
        data: PathBuf,
        #[arg(long, help = "Column holding the observation dates")]
        date_column: String,
        #[arg(long, help = "Column holding the counts (each row counts one if omitted)")]
        count_column: Option<String>,
        #[arg(long, help = "Calendar configuration (JSON)")]
        config: Option<PathBuf>,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Axes { source } => {
            let (ds, hints) = source.load()?;
            print_json(&classify(&ds.schema(&hints)))
        }
        Commands::Series {
            source,
            config,
            csv_out,
        } => {
            let (ds, hints) = source.load()?;
            let config = ChartConfig::from_json_file(&config)?;
            let schema = ds.schema(&hints);
            let rows = ds.rows(&schema)?;
            let output = build_series(&schema, &rows, &config)?;
            for diagnostic in &output.diagnostics {
                eprintln!("{}: {}", diagnostic.title(), diagnostic.user_message());
            }
            if let Some(path) = csv_out {
                let mut df = output.matrix.to_dataframe()?;
                let mut file = std::fs::File::create(&path)?;
                CsvWriter::new(&mut file).finish(&mut df)?;
            }
            print_json(&output)
        }
        Commands::Calendar {
            data,
            date_column,
            count_column,
            config,
        } => {
            let config = match config {
                Some(path) => CalendarConfig::from_json_file(&path)?,
                None => CalendarConfig::default(),
            };
            let ds = DataSource::load(&data)?;
            let observations = ds.observations(&date_column, count_column.as_deref())?;
            print_json(&build_calendar(&observations, &config))
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    #[cfg(feature = "profile-with-puffin")]
    let _puffin_server = {
        puffin::set_scopes_on(true);
        puffin_http::Server::new(&format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT)).ok()
    };

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("{}: {}", err.title(), err.user_message());
            if err.is_configuration_error() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

