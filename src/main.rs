use anyhow::Result;
use chrono::NaiveDate;
use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use neo_explorer::config::{CAD_FILE_ENV, DEFAULT_CAD_FILE, DEFAULT_NEO_FILE, NEO_FILE_ENV};
use neo_explorer::{
    create_filters, limit, load_database, save, temporal, Criteria, DataPaths, NeoDatabase,
};

/// Results printed to the terminal when no --limit is given
const DEFAULT_PRINT_LIMIT: usize = 10;

#[derive(Parser, Debug)]
#[command(version, about = "Explore past and future close approaches of near-Earth objects")]
struct Opts {
    /// Path to the CSV file of near-Earth objects
    #[arg(long, global = true, env = NEO_FILE_ENV, default_value = DEFAULT_NEO_FILE)]
    neofile: PathBuf,

    /// Path to the JSON file of close approaches
    #[arg(long, global = true, env = CAD_FILE_ENV, default_value = DEFAULT_CAD_FILE)]
    cadfile: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Inspect a single NEO by designation or name
    Inspect(InspectArgs),

    /// Query close approaches with filters
    Query(QueryArgs),
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("object").required(true).args(["pdes", "name"])))]
struct InspectArgs {
    /// Primary designation of the NEO
    #[arg(short, long)]
    pdes: Option<String>,

    /// IAU name of the NEO (exact, case-sensitive)
    #[arg(short, long)]
    name: Option<String>,

    /// Also print the NEO's close approaches
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Args, Debug)]
struct QueryArgs {
    /// Only approaches on this date (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_date_arg)]
    date: Option<NaiveDate>,

    /// Only approaches on or after this date (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_date_arg)]
    start_date: Option<NaiveDate>,

    /// Only approaches on or before this date (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_date_arg)]
    end_date: Option<NaiveDate>,

    /// Minimum approach distance in au
    #[arg(long)]
    min_distance: Option<f64>,

    /// Maximum approach distance in au
    #[arg(long)]
    max_distance: Option<f64>,

    /// Minimum approach velocity in km/s
    #[arg(long)]
    min_velocity: Option<f64>,

    /// Maximum approach velocity in km/s
    #[arg(long)]
    max_velocity: Option<f64>,

    /// Minimum NEO diameter in km
    #[arg(long)]
    min_diameter: Option<f64>,

    /// Maximum NEO diameter in km
    #[arg(long)]
    max_diameter: Option<f64>,

    /// Only potentially hazardous NEOs
    #[arg(long, conflicts_with = "not_hazardous")]
    hazardous: bool,

    /// Only NEOs that are not potentially hazardous
    #[arg(long)]
    not_hazardous: bool,

    /// Maximum number of results (0 = unlimited)
    #[arg(short, long)]
    limit: Option<usize>,

    /// Write results to a .csv or .json file instead of printing them
    #[arg(short, long)]
    outfile: Option<PathBuf>,
}

impl QueryArgs {
    fn criteria(&self) -> Criteria {
        let hazardous = match (self.hazardous, self.not_hazardous) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };

        Criteria {
            date: self.date,
            start_date: self.start_date,
            end_date: self.end_date,
            distance_min: self.min_distance,
            distance_max: self.max_distance,
            velocity_min: self.min_velocity,
            velocity_max: self.max_velocity,
            diameter_min: self.min_diameter,
            diameter_max: self.max_diameter,
            hazardous,
        }
    }
}

fn parse_date_arg(raw: &str) -> Result<NaiveDate, String> {
    temporal::parse_date(raw).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let opts = Opts::parse();

    let paths = DataPaths::new(opts.neofile, opts.cadfile);
    let db = load_database(&paths)?;

    match opts.command {
        Command::Inspect(args) => run_inspect(&db, &args),
        Command::Query(args) => run_query(&db, &args),
    }
}

fn run_inspect(db: &NeoDatabase, args: &InspectArgs) -> Result<()> {
    let neo = match (&args.pdes, &args.name) {
        (Some(pdes), _) => db.get_neo_by_designation(pdes),
        (None, Some(name)) => db.get_neo_by_name(name),
        (None, None) => None,
    };

    let Some(neo) = neo else {
        println!("No matching NEOs exist in the database.");
        return Ok(());
    };

    println!("{}", neo);

    if args.verbose {
        for approach in db.approaches_for(neo) {
            println!("- {}", approach);
        }
    }

    Ok(())
}

fn run_query(db: &NeoDatabase, args: &QueryArgs) -> Result<()> {
    let filters = create_filters(&args.criteria());
    for filter in &filters {
        debug!(%filter, "query filter");
    }

    let results = db.query(&filters);

    match &args.outfile {
        Some(path) => {
            let count = save(limit(results, args.limit), path)?;
            println!("✓ Wrote {} close approaches to {}", count, path.display());
        }
        None => {
            let n = args.limit.unwrap_or(DEFAULT_PRINT_LIMIT);
            let mut printed = 0;
            for approach in limit(results, Some(n)) {
                println!("{}", approach);
                printed += 1;
            }
            if printed == 0 {
                println!("No matching close approaches.");
            }
        }
    }

    Ok(())
}
