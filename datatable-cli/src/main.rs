mod error;
mod output;

use std::collections::BTreeSet;
use std::fs;
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Parser;
use datatable_lib::schema::FilterField;
use datatable_lib::{
    Column, Direction, FilterKind, Record, Tab, TableConfig, TableController, TableSchema,
};
use log::LevelFilter;
use log::info;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode, WriteLogger};

use crate::error::CliError;

/// Filter, sort, page and select the rows of a JSON array
#[derive(Parser, Debug)]
#[command(name = "datatable")]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file holding an array of objects
    #[arg(long, short)]
    input: PathBuf,

    /// Field that identifies a record
    #[arg(long, default_value = "id")]
    key: String,

    /// Columns to show, comma separated (default: every field)
    #[arg(long, value_delimiter = ',')]
    columns: Vec<String>,

    /// Free-text search over the shown columns
    #[arg(long, short)]
    search: Option<String>,

    /// Filter as FIELD=VALUE; comma separate VALUE to match any of several
    #[arg(long = "filter", short = 'f', value_name = "FIELD=VALUE")]
    filters: Vec<String>,

    /// Only show records whose FIELD equals VALUE
    #[arg(long, value_name = "FIELD=VALUE")]
    tab: Option<String>,

    /// Column to sort by
    #[arg(long)]
    sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    desc: bool,

    /// Page to show (1-based, clamped)
    #[arg(long, short, default_value_t = 1)]
    page: usize,

    /// Rows per page (overrides the config file)
    #[arg(long)]
    page_size: Option<usize>,

    /// JSON table config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Select a record by key (repeatable)
    #[arg(long = "select", value_name = "KEY")]
    selected: Vec<String>,

    /// Select every matching record
    #[arg(long)]
    select_all_matching: bool,

    /// Write debug logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(rendered) => {
            print!("{}", rendered);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<String, CliError> {
    init_logging(&args)?;

    let raw = fs::read_to_string(&args.input).map_err(|source| CliError::Read {
        path: args.input.clone(),
        source,
    })?;
    let records: Vec<Record> = serde_json::from_str(&raw)?;
    info!("Loaded {} records from {}", records.len(), args.input.display());

    let config = load_config(&args)?;
    let schema = build_schema(&args, &records)?;
    let mut table = TableController::new(schema, config)?;
    table.replace_records(records)?;

    if let Some(text) = &args.search {
        table.set_search_text(text.as_str());
    }
    for pair in &args.filters {
        let (key, value) = split_pair(pair)?;
        let parsed = match table.schema().filter_field(key) {
            Some(field) => field.kind.parse_value(key, value)?,
            None => value.into(),
        };
        table.set_filter(key, parsed);
    }
    table.apply_filters();
    if let Some(tab) = &args.tab {
        table.set_tab(tab);
    }
    if let Some(column) = &args.sort {
        let direction = if args.desc { Direction::Desc } else { Direction::Asc };
        table.sort_by(column, direction);
    }
    table.set_page(args.page);

    for key in &args.selected {
        table.toggle_selection(key);
    }
    if args.select_all_matching {
        table.select_all_matching();
    }

    Ok(output::render(&table))
}

fn init_logging(args: &Args) -> Result<(), CliError> {
    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    match &args.log_file {
        Some(path) => {
            let file = File::create(path).map_err(|source| CliError::LogFile {
                path: path.clone(),
                source,
            })?;
            WriteLogger::init(level.max(LevelFilter::Debug), Config::default(), file)?;
        }
        None => {
            TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)?;
        }
    }
    Ok(())
}

fn load_config(args: &Args) -> Result<TableConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.clone(),
                source,
            })?;
            TableConfig::from_json(&json)?
        }
        None => TableConfig::default(),
    };
    if let Some(page_size) = args.page_size {
        config = config.with_page_size(page_size);
    }
    if !args.selected.is_empty() || args.select_all_matching {
        config = config.with_selectable(true);
    }
    config.validate()?;
    Ok(config)
}

/// Every field becomes a filter; the shown columns are sortable and searchable.
fn build_schema(args: &Args, records: &[Record]) -> Result<TableSchema<Record>, CliError> {
    let fields: BTreeSet<&str> = records.iter().flat_map(|r| r.field_names()).collect();
    let columns: Vec<String> = if args.columns.is_empty() {
        fields.iter().map(|f| f.to_string()).collect()
    } else {
        args.columns.clone()
    };

    let mut builder = TableSchema::<Record>::keyed_by_field(args.key.as_str())
        .columns(columns.iter().map(|c| Column::field(c.as_str(), c.as_str()).sortable()))
        .filter_fields(fields.iter().map(|f| {
            FilterField::on_field(*f, *f, FilterKind::Select { options: vec![] }, *f)
        }))
        .tab(Tab::all("all", "All"));

    if let Some(tab) = &args.tab {
        let (field, value) = split_pair(tab)?;
        let (field, value) = (field.to_string(), value.to_string());
        builder = builder.tab(Tab::new(tab.as_str(), tab.as_str(), move |r: &Record| {
            r.value(&field).to_string() == value
        }));
    }

    Ok(builder.build()?)
}

fn split_pair(pair: &str) -> Result<(&str, &str), CliError> {
    pair.split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| CliError::InvalidPair(pair.to_string()))
}
