use std::collections::HashMap;

use chrono::NaiveDate;
use gtfs_structures::{Gtfs, Trip};

use crate::network::{Minutes, Network, NetworkError, StationIndex};
use crate::utils;

pub struct GtfsImportOptions {
    // Only keep trips running on this date, or every trip if `None`.
    pub date: Option<NaiveDate>,
    // Time to change between lines at a shared stop.
    pub transfer_time: Minutes,
    // Per stop overrides of `transfer_time`, keyed by GTFS stop id.
    pub stop_transfer_times: HashMap<String, Minutes>,
}

impl Default for GtfsImportOptions {
    fn default() -> Self {
        Self { date: None, transfer_time: 3, stop_transfer_times: HashMap::new() }
    }
}

impl GtfsImportOptions {
    pub fn set_transfer_time_for_stop(&mut self, stop_id: &str, transfer_time: Minutes) {
        self.stop_transfer_times.insert(stop_id.to_owned(), transfer_time);
    }

    pub fn get_transfer_time(&self, stop_id: &str) -> Minutes {
        self.stop_transfer_times.get(stop_id).copied().unwrap_or(self.transfer_time)
    }
}

// The parts of a GTFS trip the network is built from.
pub(crate) struct TripStops<'a> {
    pub line: &'a str,
    pub stops: Vec<TripStop<'a>>,
}

pub(crate) struct TripStop<'a> {
    pub stop_id: &'a str,
    pub name: &'a str,
    pub arrival_time: Option<u32>,
    pub departure_time: Option<u32>,
}

fn get_line_name<'a>(gtfs: &'a Gtfs, trip: &'a Trip) -> &'a str {
    gtfs.routes
        .get(trip.route_id.as_str())
        .and_then(|route| {
            route.short_name.as_deref().filter(|name| !name.is_empty()).or(route.long_name.as_deref().filter(|name| !name.is_empty()))
        })
        .unwrap_or(trip.route_id.as_str())
}

// Trips sorted by id, as HashMap order is random and stations and connections should be registered deterministically.
fn get_running_trips(gtfs: &Gtfs, date: Option<NaiveDate>) -> Vec<&Trip> {
    let mut trips: Vec<&Trip> = gtfs.trips.values().filter(|trip| date.map_or(true, |date| utils::does_trip_run(gtfs, trip, date))).collect();
    trips.sort_unstable_by(|a, b| a.id.cmp(&b.id));
    trips
}

// `"{line}:{stop_id}"`, with a `#n` suffix when another (line, stop) pair already formats to the same id.
fn get_unused_station_id(network: &Network, line: &str, stop_id: &str) -> String {
    let station_id = format!("{line}:{stop_id}");
    if !network.contains(&station_id) {
        return station_id;
    }
    (2..).map(|n| format!("{station_id}#{n}")).find(|id| !network.contains(id)).unwrap_or(station_id)
}

impl Network {
    /// Build a network from a GTFS feed.
    ///
    /// Every (line, stop) pair becomes a station with id `"{line}:{stop_id}"` (suffixed with `#n` if two
    /// pairs format to the same id), consecutive stops of a trip are connected by their scheduled running
    /// time, and stations sharing a stop are connected to each other with that stop's transfer time.
    pub fn from_gtfs(gtfs: &Gtfs, options: &GtfsImportOptions) -> Result<Self, NetworkError> {
        let trips = get_running_trips(gtfs, options.date);
        log::info!("Building network from {} of {} GTFS trips.", trips.len(), gtfs.trips.len());

        let trip_stops = trips.iter().map(|&trip| TripStops {
            line: get_line_name(gtfs, trip),
            stops: trip
                .stop_times
                .iter()
                .map(|stop_time| TripStop {
                    stop_id: stop_time.stop.id.as_str(),
                    name: stop_time.stop.name.as_deref().filter(|name| !name.is_empty()).unwrap_or(stop_time.stop.id.as_str()),
                    arrival_time: stop_time.arrival_time,
                    departure_time: stop_time.departure_time,
                })
                .collect(),
        });

        let network = Self::from_trip_stops(trip_stops, options)?;
        log::info!("Built network with {} stations, {} lines, and {} connections.", network.num_stations(), network.num_lines(), network.num_connections());
        Ok(network)
    }

    pub(crate) fn from_trip_stops<'a>(trips: impl IntoIterator<Item = TripStops<'a>>, options: &GtfsImportOptions) -> Result<Self, NetworkError> {
        let mut network = Network::new();

        // Segments shared by many trips are connected once, with the fastest running time.
        let mut segments: HashMap<(StationIndex, StationIndex), Minutes> = HashMap::new();
        let mut segment_order = Vec::new();
        let mut line_stop_stations: HashMap<(&str, &str), StationIndex> = HashMap::new();
        let mut stop_stations: HashMap<&str, Vec<StationIndex>> = HashMap::new();
        let mut stop_order = Vec::new();
        let mut num_untimed_segments = 0;

        for trip in trips {
            let mut previous: Option<(StationIndex, Option<u32>)> = None;
            for stop in trip.stops {
                let station = match line_stop_stations.get(&(trip.line, stop.stop_id)).copied() {
                    Some(station) => station,
                    None => {
                        let station_id = get_unused_station_id(&network, trip.line, stop.stop_id);
                        network.add_station(&station_id, stop.name, trip.line)?;
                        let station = network.get_station_idx(&station_id)?;
                        line_stop_stations.insert((trip.line, stop.stop_id), station);
                        stop_stations
                            .entry(stop.stop_id)
                            .or_insert_with(|| {
                                stop_order.push(stop.stop_id);
                                Vec::new()
                            })
                            .push(station);
                        station
                    }
                };

                if let Some((previous_station, previous_departure)) = previous {
                    if previous_station != station {
                        match (previous_departure, stop.arrival_time.or(stop.departure_time)) {
                            (Some(departure), Some(arrival)) => {
                                let duration = utils::seconds_to_minutes(arrival.saturating_sub(departure));
                                let key = (previous_station.min(station), previous_station.max(station));
                                segments
                                    .entry(key)
                                    .and_modify(|fastest| *fastest = (*fastest).min(duration))
                                    .or_insert_with(|| {
                                        segment_order.push(key);
                                        duration
                                    });
                            }
                            _ => num_untimed_segments += 1,
                        }
                    }
                }
                previous = Some((station, stop.departure_time.or(stop.arrival_time)));
            }
        }

        if num_untimed_segments > 0 {
            log::warn!("Skipped {num_untimed_segments} segments without stop times.");
        }

        for key in segment_order {
            network.connect(key.0, key.1, segments[&key]);
        }

        for stop_id in stop_order {
            let stations = &stop_stations[stop_id];
            let transfer_time = options.get_transfer_time(stop_id);
            for (i, &station_a) in stations.iter().enumerate() {
                for &station_b in &stations[i + 1..] {
                    network.connect(station_a, station_b, transfer_time);
                }
            }
        }

        Ok(network)
    }
}

#[cfg(test)]
mod tests {
    use gtfs_structures::{Calendar, CalendarDate, Exception, Route};

    use super::*;

    fn stop<'a>(stop_id: &'a str, name: &'a str, arrival_time: u32, departure_time: u32) -> TripStop<'a> {
        TripStop { stop_id, name, arrival_time: Some(arrival_time), departure_time: Some(departure_time) }
    }

    fn example_trips() -> Vec<TripStops<'static>> {
        vec![
            TripStops {
                line: "Red",
                stops: vec![stop("1", "Alpha", 0, 0), stop("2", "Bravo", 240, 270), stop("3", "Charlie", 600, 600)],
            },
            // A slower service over the same segment.
            TripStops {
                line: "Red",
                stops: vec![stop("1", "Alpha", 3600, 3600), stop("2", "Bravo", 3900, 3900)],
            },
            TripStops {
                line: "Blue",
                stops: vec![stop("4", "Delta", 0, 0), stop("2", "Bravo", 61, 61)],
            },
        ]
    }

    #[test]
    fn stations_are_per_line_and_stop() {
        let network = Network::from_trip_stops(example_trips(), &GtfsImportOptions::default()).unwrap();

        assert_eq!(network.num_stations(), 5);
        assert_eq!(network.num_lines(), 2);
        let red_bravo = network.get_station_by_id("Red:2").unwrap();
        assert_eq!(&*red_bravo.name, "Bravo");
        assert_eq!(&*red_bravo.line, "Red");
        assert!(network.contains("Blue:2"));
        assert_eq!(network.get_station_indices_from_name("Bravo").count(), 2);
    }

    #[test]
    fn shared_segments_keep_fastest_time() {
        let network = Network::from_trip_stops(example_trips(), &GtfsImportOptions::default()).unwrap();

        let alpha = network.get_station_idx("Red:1").unwrap();
        let red_bravo = network.get_station_idx("Red:2").unwrap();
        let charlie = network.get_station_idx("Red:3").unwrap();
        let delta = network.get_station_idx("Blue:4").unwrap();
        let blue_bravo = network.get_station_idx("Blue:2").unwrap();

        assert_eq!(network.connection_duration(alpha, red_bravo), Some(4));
        assert_eq!(network.get_connections(alpha).len(), 1);
        // Departs Bravo at 270s, arrives Charlie at 600s.
        assert_eq!(network.connection_duration(red_bravo, charlie), Some(6));
        // 61 seconds rounds up.
        assert_eq!(network.connection_duration(delta, blue_bravo), Some(2));
        assert_eq!(network.connection_duration(red_bravo, blue_bravo), Some(3));
        assert_eq!(network.num_connections(), 4);
    }

    #[test]
    fn transfers_join_lines() {
        let options = GtfsImportOptions { transfer_time: 5, ..Default::default() };
        let network = Network::from_trip_stops(example_trips(), &options).unwrap();
        let (route, duration) = network.fastest_route("Red:1", "Blue:4").unwrap().unwrap();
        assert_eq!(route.ids(), vec!["Red:1", "Red:2", "Blue:2", "Blue:4"]);
        assert_eq!(duration, 4 + 5 + 2);
        assert_eq!(route.num_line_changes(), 1);
    }

    #[test]
    fn untimed_segments_are_skipped() {
        let trips = vec![TripStops {
            line: "Green",
            stops: vec![
                stop("1", "Alpha", 0, 0),
                TripStop { stop_id: "2", name: "Bravo", arrival_time: None, departure_time: None },
                stop("3", "Charlie", 600, 600),
            ],
        }];
        let network = Network::from_trip_stops(trips, &GtfsImportOptions::default()).unwrap();
        assert_eq!(network.num_stations(), 3);
        assert_eq!(network.num_connections(), 0);
    }

    #[test]
    fn default_options() {
        let options = GtfsImportOptions::default();
        assert_eq!(options.date, None);
        assert_eq!(options.transfer_time, 3);
        assert_eq!(options.get_transfer_time("2"), 3);
    }

    #[test]
    fn stop_transfer_time_overrides_default() {
        let mut options = GtfsImportOptions::default();
        options.set_transfer_time_for_stop("2", 7);
        assert_eq!(options.get_transfer_time("2"), 7);
        assert_eq!(options.get_transfer_time("1"), 3);

        let network = Network::from_trip_stops(example_trips(), &options).unwrap();
        let red_bravo = network.get_station_idx("Red:2").unwrap();
        let blue_bravo = network.get_station_idx("Blue:2").unwrap();
        assert_eq!(network.connection_duration(red_bravo, blue_bravo), Some(7));
    }

    #[test]
    fn colliding_station_ids_stay_separate() {
        // Line "R" at stop "1:2" and line "R:1" at stop "2" both format to "R:1:2".
        let trips = vec![
            TripStops { line: "R", stops: vec![stop("1:2", "X", 0, 0), stop("9", "Nine", 60, 60)] },
            TripStops { line: "R:1", stops: vec![stop("2", "Y", 0, 0), stop("8", "Eight", 120, 120)] },
        ];
        let network = Network::from_trip_stops(trips, &GtfsImportOptions::default()).unwrap();

        assert_eq!(network.num_stations(), 4);
        let first = network.get_station_by_id("R:1:2").unwrap();
        assert_eq!((&*first.name, &*first.line), ("X", "R"));
        let second = network.get_station_by_id("R:1:2#2").unwrap();
        assert_eq!((&*second.name, &*second.line), ("Y", "R:1"));

        let line: Vec<_> = network.get_line("R:1").unwrap().stations.iter().map(|&station| &*network.get_station(station).id).collect();
        assert_eq!(line, vec!["R:1:2#2", "R:1:8"]);
        // Different stops, so the two lines are not joined.
        assert!(network.fewest_transfers("R:9", "R:1:8").unwrap().is_none());
        let (route, duration) = network.fastest_route("R:1:2#2", "R:1:8").unwrap().unwrap();
        assert_eq!(route.ids(), vec!["R:1:2#2", "R:1:8"]);
        assert_eq!(duration, 2);
    }

    fn example_gtfs() -> Gtfs {
        let mut gtfs = Gtfs::default();
        let weekday = |id: &str| Calendar {
            id: id.to_owned(),
            monday: true,
            tuesday: true,
            wednesday: true,
            thursday: true,
            friday: true,
            saturday: false,
            sunday: false,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        };
        gtfs.calendar.insert("weekday".to_owned(), weekday("weekday"));
        gtfs.calendar_dates.insert(
            "special".to_owned(),
            vec![CalendarDate {
                service_id: "special".to_owned(),
                date: NaiveDate::from_ymd_opt(2024, 5, 11).unwrap(),
                exception_type: Exception::Added,
            }],
        );
        for (trip_id, service_id) in [("t2", "weekday"), ("t1", "weekday"), ("t3", "special")] {
            let trip = Trip { id: trip_id.to_owned(), service_id: service_id.to_owned(), route_id: "r1".to_owned(), ..Default::default() };
            gtfs.trips.insert(trip_id.to_owned(), trip);
        }
        gtfs
    }

    fn trip_ids(trips: &[&Trip]) -> Vec<String> {
        trips.iter().map(|trip| trip.id.clone()).collect()
    }

    #[test]
    fn running_trips_are_filtered_by_date() {
        let gtfs = example_gtfs();
        // Friday.
        let friday = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        assert_eq!(trip_ids(&get_running_trips(&gtfs, Some(friday))), vec!["t1", "t2"]);
        // Saturday, only the special service runs.
        let saturday = NaiveDate::from_ymd_opt(2024, 5, 11).unwrap();
        assert_eq!(trip_ids(&get_running_trips(&gtfs, Some(saturday))), vec!["t3"]);
        // No date keeps every trip, in id order.
        assert_eq!(trip_ids(&get_running_trips(&gtfs, None)), vec!["t1", "t2", "t3"]);
    }

    #[test]
    fn line_name_falls_back_to_long_name_then_route_id() {
        let mut gtfs = Gtfs::default();
        gtfs.routes.insert("r1".to_owned(), Route { id: "r1".to_owned(), short_name: Some("1".to_owned()), long_name: Some("One".to_owned()), ..Default::default() });
        gtfs.routes.insert("r2".to_owned(), Route { id: "r2".to_owned(), short_name: Some(String::new()), long_name: Some("Two".to_owned()), ..Default::default() });
        gtfs.routes.insert("r3".to_owned(), Route { id: "r3".to_owned(), short_name: None, long_name: None, ..Default::default() });

        let trip = |route_id: &str| Trip { route_id: route_id.to_owned(), ..Default::default() };
        assert_eq!(get_line_name(&gtfs, &trip("r1")), "1");
        assert_eq!(get_line_name(&gtfs, &trip("r2")), "Two");
        assert_eq!(get_line_name(&gtfs, &trip("r3")), "r3");
        assert_eq!(get_line_name(&gtfs, &trip("missing")), "missing");
    }

    #[test]
    fn empty_feed_builds_empty_network() {
        let network = Network::from_gtfs(&Gtfs::default(), &GtfsImportOptions::default()).unwrap();
        assert_eq!(network.num_stations(), 0);
    }
}
