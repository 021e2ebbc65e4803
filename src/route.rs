use std::fmt::{Debug, Display};

use crate::network::{Minutes, Network, Station, StationIndex};
use crate::utils;

/// An ordered sequence of stations from a start to a target, both inclusive.
///
/// Consecutive stations are always directly connected in `network`. Routes are only built by the
/// searches, so a route is never empty:
///
/// ```compile_fail
/// let network = metro::Network::new();
/// let route = metro::Route::from(Vec::new(), &network);
/// ```
#[derive(Clone)]
pub struct Route<'a> {
    stations: Vec<StationIndex>,
    network: &'a Network,
}

impl<'a> Route<'a> {
    pub(crate) fn from(stations: Vec<StationIndex>, network: &'a Network) -> Self {
        debug_assert!(!stations.is_empty(), "A route always contains its start station.");
        Self { stations, network }
    }

    // Walk parent pointers back from the target. `parents[start]` must be `None`.
    pub(crate) fn from_parents(parents: &[Option<StationIndex>], network: &'a Network, start: StationIndex, target: StationIndex) -> Self {
        let mut stations = vec![target];
        let mut current = target;
        while current != start {
            match parents[current as usize] {
                Some(parent) => {
                    stations.push(parent);
                    current = parent;
                }
                None => {
                    debug_assert!(false, "Station {current} has no parent but is not the start.");
                    break;
                }
            }
            // A search tree cannot be deeper than the network.
            debug_assert!(stations.len() <= network.num_stations(), "Cycle in route reconstruction.");
        }
        stations.reverse();
        Self::from(stations, network)
    }

    pub fn stations(&self) -> impl Iterator<Item = &'a Station> + '_ {
        self.stations.iter().map(move |&station| self.network.get_station(station))
    }

    pub fn station_indices(&self) -> &[StationIndex] { &self.stations }

    pub fn network(&self) -> &'a Network { self.network }

    pub fn ids(&self) -> Vec<&'a str> { self.stations().map(|station| &*station.id).collect() }

    pub fn names(&self) -> Vec<&'a str> { self.stations().map(|station| &*station.name).collect() }

    pub fn start(&self) -> &'a Station { self.network.get_station(self.stations[0]) }

    pub fn end(&self) -> &'a Station { self.network.get_station(self.stations[self.stations.len() - 1]) }

    pub fn len(&self) -> usize { self.stations.len() }

    pub fn is_empty(&self) -> bool { self.stations.is_empty() }

    pub fn num_connections(&self) -> usize { self.stations.len().saturating_sub(1) }

    // Number of hops between stations on different lines.
    pub fn num_line_changes(&self) -> usize {
        self.stations.windows(2).filter(|pair| self.network.get_station(pair[0]).line != self.network.get_station(pair[1]).line).count()
    }

    // Total time using the cheapest connection for every hop, `None` if two consecutive stations are not adjacent.
    pub fn travel_time(&self) -> Option<Minutes> {
        self.stations.windows(2).try_fold(0 as Minutes, |total, pair| {
            self.network.connection_duration(pair[0], pair[1]).map(|duration| total.saturating_add(duration))
        })
    }
}

impl Debug for Route<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.ids()).finish()
    }
}

impl Display for Route<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "-----------------------------------------------")?;
        let mut previous: Option<&Station> = None;
        for station in self.stations() {
            if let Some(previous) = previous {
                if previous.line != station.line {
                    writeln!(f, "  Change to the {} line at {}.", station.line, station.name)?;
                }
            }
            writeln!(f, "{} ({} line)", station.name, station.line)?;
            previous = Some(station);
        }
        writeln!(f)?;
        write!(f, "{} stops, {} line changes", self.num_connections(), self.num_line_changes())?;
        if let Some(travel_time) = self.travel_time() {
            write!(f, ", {}", utils::get_duration_str(travel_time))?;
        }
        writeln!(f, ".")?;
        writeln!(f, "-----------------------------------------------")?;
        Ok(())
    }
}
