// Command line front end for MRZ intake

use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};

use travelscan::config::InputMode;
use travelscan::export::{form, JsonLinesStore, RecordStore};
use travelscan::models::TravelRecord;
use travelscan::{DateOrder, IntakeConfig, PassportError, ScanPipeline};

#[derive(Parser)]
#[command(name = "travelscan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Decode travel document MRZ text and prepare form fields", long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Rendered date order: month_first or day_first
    #[arg(long, global = true)]
    date_order: Option<DateOrder>,

    /// How to split the OCR text: lines or fixed44
    #[arg(long, global = true)]
    input_mode: Option<InputMode>,

    /// Correct common OCR character confusions
    #[arg(long, global = true)]
    correct: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode MRZ text and print the scan report as JSON
    Decode {
        /// File with the OCR text (stdin when omitted)
        input: Option<PathBuf>,
    },

    /// Render a compact YYMMDD date
    Normalize {
        date: String,

        /// Treat the date as an expiry date
        #[arg(long)]
        expiry: bool,
    },

    /// Decode MRZ text and print the form field values as JSON
    Form {
        input: Option<PathBuf>,

        /// JSON file with travel, contact and emergency details
        #[arg(short, long)]
        travel: Option<PathBuf>,
    },

    /// Decode MRZ text and append the record to a store
    Store {
        input: Option<PathBuf>,

        #[arg(short, long)]
        travel: Option<PathBuf>,

        /// JSON-lines store file (overrides the configured path)
        #[arg(short, long)]
        store: Option<PathBuf>,
    },

    /// List stored records
    History {
        #[arg(short, long)]
        store: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(err) = run(cli) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), PassportError> {
    let mut config = match &cli.config {
        Some(path) => IntakeConfig::load(path)?,
        None => IntakeConfig::default(),
    };
    if let Some(order) = cli.date_order {
        config.date_order = order;
    }
    if let Some(mode) = cli.input_mode {
        config.input_mode = mode;
    }
    config.correct_ocr |= cli.correct;

    match cli.command {
        Commands::Decode { input } => {
            let raw = read_input(input.as_deref())?;
            let report = ScanPipeline::new(config).scan(&raw)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Normalize { date, expiry } => {
            println!("{}", config.normalizer().normalize(date.trim(), expiry));
        }
        Commands::Form { input, travel } => {
            let raw = read_input(input.as_deref())?;
            let pipeline = ScanPipeline::new(config);
            let record = build_record(&pipeline, &raw, travel.as_deref())?;
            let fields = form::form_fields(&record, pipeline.normalizer());
            println!("{}", serde_json::to_string_pretty(&fields)?);
        }
        Commands::Store {
            input,
            travel,
            store,
        } => {
            let path = store_path(store, &config)?;
            let raw = read_input(input.as_deref())?;
            let pipeline = ScanPipeline::new(config);
            let record = build_record(&pipeline, &raw, travel.as_deref())?;
            let mut store = JsonLinesStore::open(&path)?;
            store.save(&record)?;
            println!("Saved {} to {}", record.document.document_number, path.display());
        }
        Commands::History { store } => {
            let path = store_path(store, &config)?;
            let normalizer = config.normalizer();
            for record in JsonLinesStore::open_existing(&path)?.load_all()? {
                let doc = &record.document;
                println!(
                    "{}  {:<10} {}, {}  born {}  expires {}",
                    record.scanned_at,
                    doc.document_number,
                    doc.surname,
                    doc.given_names(),
                    normalizer.normalize(&doc.date_of_birth, false),
                    normalizer.normalize(&doc.expiry_date, true),
                );
            }
        }
    }

    Ok(())
}

fn read_input(input: Option<&Path>) -> Result<String, PassportError> {
    match input {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn build_record(
    pipeline: &ScanPipeline,
    raw: &str,
    travel: Option<&Path>,
) -> Result<TravelRecord, PassportError> {
    let report = pipeline.scan(raw)?;
    let mut record = match travel {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => TravelRecord::default(),
    };
    let scanned = TravelRecord::from_document(report.document, raw);
    record.document = scanned.document;
    record.raw_mrz = scanned.raw_mrz;
    record.scanned_at = scanned.scanned_at;
    Ok(record)
}

fn store_path(flag: Option<PathBuf>, config: &IntakeConfig) -> Result<PathBuf, PassportError> {
    flag.or_else(|| config.store_path.clone()).ok_or_else(|| {
        PassportError::Config("no store path given; use --store or store_path".to_string())
    })
}
