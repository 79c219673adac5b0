//! # towngraph
//!
//! Command-line interface for the towngraph library. Loads a single
//! route graph and answers route queries against it.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use log::{error, info, LevelFilter};
use serde_json::{Map, Value};
use towngraph::api::{Request, Response};
use towngraph::{parse_path, Graph, Town, Weight};
use towngraph_io::io::Reader;

mod batch;

/// Command-line interface for towngraph
#[derive(Parser)]
#[command(name = "towngraph", version)]
#[command(about = "Route queries over a graph of towns connected by one-way routes")]
#[command(long_about = "Route queries over a graph of towns connected by one-way routes.

Without --routes, the reference graph AB5, BC4, CD8, DC8, DE6, AD5, CE2, EB3, AE7 is used:
  towngraph distance A-B-C                 # 9
  towngraph trips C C --max-stops 3        # 2
  towngraph trips A C --exact-stops 4      # 3
  towngraph shortest B B                   # 9 (round trip)
  towngraph routes C C --max-distance 30   # 7")]
struct Cli {
    /// Route list to load instead of the reference graph
    #[arg(short, long, env = "TOWNGRAPH_ROUTES", global = true)]
    routes: Option<PathBuf>,

    /// Print responses as JSON objects
    #[arg(long, global = true)]
    json: bool,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Distance along a dash-separated path, e.g. A-B-C
    Distance { path: String },

    /// Number of trips with a bounded number of stops
    Trips {
        start: String,
        end: String,

        /// Count trips with exactly this many stops
        #[arg(long)]
        exact_stops: Option<usize>,

        /// Count trips with at most this many stops
        #[arg(long)]
        max_stops: Option<usize>,
    },

    /// Length of the shortest route, a round trip when START equals END
    Shortest { start: String, end: String },

    /// Number of routes shorter than a distance
    Routes {
        start: String,
        end: String,

        /// Exclusive upper bound on the route length
        #[arg(long, visible_alias = "threshold")]
        max_distance: Weight,
    },

    /// Answer newline-delimited JSON requests read from standard input
    Batch,

    /// List the towns and the routes departing from them
    Towns,
}

impl Command {
    /// The request for a single-query command.
    fn request(&self) -> Option<Request> {
        let request = match self {
            Command::Distance { path } => Request::Distance {
                path: parse_path(path),
            },
            Command::Trips {
                start,
                end,
                exact_stops,
                max_stops,
            } => Request::TripsByStops {
                start: town(start),
                end: town(end),
                exact_stops: *exact_stops,
                max_stops: *max_stops,
            },
            Command::Shortest { start, end } => Request::Shortest {
                start: town(start),
                end: town(end),
            },
            Command::Routes {
                start,
                end,
                max_distance,
            } => Request::RoutesByMaxDistance {
                start: town(start),
                end: town(end),
                max_distance: *max_distance,
            },
            Command::Batch | Command::Towns => return None,
        };

        Some(request)
    }
}

fn main() {
    if let Err(err) = run() {
        error!("{:#}", err);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging to stderr, RUST_LOG overrides the verbosity flag.
    env_logger::Builder::new()
        .filter_level(verbosity(cli.verbose))
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    let graph = load_graph(cli.routes.as_deref())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Command::Batch => {
            let stdin = io::stdin();
            let answered = batch::answer_requests(&graph, stdin.lock(), &mut out)?;
            info!("Answered {} requests", answered);
        }
        Command::Towns => write_towns(&graph, cli.json, &mut out)?,
        command => {
            if let Some(request) = command.request() {
                let response = graph.answer(&request)?;
                write_response(response, cli.json, &mut out)?;
            }
        }
    }

    out.flush().context("cannot write to standard output")
}

fn verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Town labels on the command line are case-insensitive.
fn town(label: &str) -> Town {
    Town::new(label.trim().to_uppercase())
}

fn load_graph(routes: Option<&Path>) -> Result<Graph> {
    let path = match routes {
        Some(path) => path,
        None => {
            info!("Using the reference graph");
            return Ok(Graph::kiwiland());
        }
    };

    let file = File::open(path)
        .with_context(|| format!("cannot open route list {}", path.display()))?;
    let graph = Reader::new(BufReader::new(file))
        .read_graph()
        .with_context(|| format!("cannot load route list {}", path.display()))?;

    info!(
        "Loaded {} towns and {} routes from {}",
        graph.town_count(),
        graph.route_count(),
        path.display()
    );

    Ok(graph)
}

fn write_response(response: Response, json: bool, out: &mut impl Write) -> Result<()> {
    if json {
        serde_json::to_writer(&mut *out, &response)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", response)?;
    }

    Ok(())
}

fn write_towns(graph: &Graph, json: bool, out: &mut impl Write) -> Result<()> {
    let mut listing = Vec::new();
    for town in graph.towns() {
        let mut destinations = graph.destinations(town.label()).collect::<Vec<_>>();
        destinations.sort();
        listing.push((town, destinations));
    }
    listing.sort();

    if json {
        let map = listing
            .into_iter()
            .map(|(town, destinations)| {
                let destinations = destinations
                    .into_iter()
                    .map(|(to, weight)| (to.to_string(), Value::from(weight)))
                    .collect::<Map<_, _>>();
                (town.to_string(), Value::Object(destinations))
            })
            .collect::<Map<_, _>>();
        serde_json::to_writer(&mut *out, &map)?;
        writeln!(out)?;
    } else {
        for (town, destinations) in listing {
            write!(out, "{}:", town)?;
            for (to, weight) in destinations {
                write!(out, " {}{}", to, weight)?;
            }
            writeln!(out)?;
        }
    }

    Ok(())
}
