use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use gtfs_structures::GtfsReader;

use metro::network::{Minutes, StationIndex};
use metro::{GtfsImportOptions, Network, Route};

/// Find the fewest-transfers and fastest routes between two stops of a GTFS feed.
#[derive(Parser)]
struct Args {
    /// Path to a GTFS zip file or directory.
    gtfs: PathBuf,
    /// Name of the stop to start from.
    from: String,
    /// Name of the stop to travel to.
    to: String,
    /// Only use services running on this date (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,
    /// Minutes needed to change lines at a shared stop.
    #[arg(long, default_value_t = 3)]
    transfer_time: Minutes,
}

fn parse_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
}

fn get_stations_from_name(network: &Network, name: &str) -> Result<Vec<StationIndex>, Box<dyn std::error::Error>> {
    let stations: Vec<_> = network.get_station_indices_from_name(name).collect();
    if stations.is_empty() {
        return Err(format!("No stop named {name}.").into());
    }
    Ok(stations)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let gtfs = GtfsReader::default().read_shapes(false).read(&args.gtfs.to_string_lossy())?;
    gtfs.print_stats();
    println!();

    let options = GtfsImportOptions { date: args.date, transfer_time: args.transfer_time, ..Default::default() };
    let network = Network::from_gtfs(&gtfs, &options)?;
    network.print_stats();
    println!();

    // A stop served by several lines has one station per line, so try every pairing.
    let starts = get_stations_from_name(&network, &args.from)?;
    let ends = get_stations_from_name(&network, &args.to)?;

    let mut fewest: Option<Route> = None;
    let mut fastest: Option<(Route, Minutes)> = None;
    for &start in &starts {
        for &end in &ends {
            let start_id = &network.get_station(start).id;
            let end_id = &network.get_station(end).id;

            if let Some(route) = network.fewest_transfers(start_id, end_id)? {
                if fewest.as_ref().map_or(true, |best| route.num_connections() < best.num_connections()) {
                    fewest = Some(route);
                }
            }
            if let Some((route, duration)) = network.fastest_route(start_id, end_id)? {
                if fastest.as_ref().map_or(true, |(_, best)| duration < *best) {
                    fastest = Some((route, duration));
                }
            }
        }
    }

    println!("Fewest transfers:");
    match fewest {
        Some(route) => println!("{route}"),
        None => println!("No route found."),
    }
    println!("Fastest:");
    match fastest {
        Some((route, duration)) => {
            println!("{route}");
            println!("Total travel time: {}.", metro::utils::get_duration_str(duration));
        }
        None => println!("No route found."),
    }

    Ok(())
}
