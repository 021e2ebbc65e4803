use std::collections::HashMap;
use std::sync::Arc;

use crate::fastest::{fastest_route, fastest_route_with, SearchPreferences};
use crate::transfers::fewest_transfers;
use crate::Route;

pub type StationIndex = u32;
pub type LineIndex = usize;

// Travel times are whole minutes.
pub type Minutes = u32;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("station id must not be empty")]
    EmptyId,
    #[error("station {0} has an empty name")]
    EmptyName(String),
    #[error("station {0} has an empty line")]
    EmptyLine(String),
    #[error("duration {0} is negative")]
    NegativeDuration(i64),
    #[error("duration {0} does not fit in a connection")]
    DurationTooLarge(i64),
    #[error("station {0} cannot be connected to itself")]
    SelfLoop(String),
    #[error("too many stations (we currently use a {}-bit index for stations)", crate::utils::get_size_bits::<StationIndex>())]
    TooManyStations,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("Station {0} not found.")]
    NotFound(String),
    #[error("Invalid input: {0}.")]
    InvalidInput(#[from] InvalidInput),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub id: Box<str>,
    pub name: Box<str>,
    pub line: Arc<str>,
}

// One half of an undirected connection, stored on the station it leaves from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub station: StationIndex,
    pub duration: Minutes,
}

#[derive(Debug, Clone)]
pub struct Line {
    pub id: Arc<str>,
    pub stations: Vec<StationIndex>,
}

/// A transit network: stations grouped by line, joined by undirected weighted connections.
///
/// Stations live in an arena indexed by [`StationIndex`]; `connections[i]` is the
/// adjacency list of station `i`, in the order connections were added.
#[derive(Debug, Default, Clone)]
pub struct Network {
    pub(crate) stations: Vec<Station>,
    pub(crate) station_index: HashMap<String, StationIndex>,
    pub(crate) connections: Vec<Vec<Connection>>,
    pub(crate) lines: Vec<Line>,
    pub(crate) line_index: HashMap<Arc<str>, LineIndex>,
}

impl Network {
    pub fn new() -> Self { Self::default() }

    // Registering an id twice keeps the first station and ignores the rest.
    pub fn add_station(&mut self, id: &str, name: &str, line: &str) -> Result<(), NetworkError> {
        if id.is_empty() {
            return Err(InvalidInput::EmptyId.into());
        }
        if name.is_empty() {
            return Err(InvalidInput::EmptyName(id.to_owned()).into());
        }
        if line.is_empty() {
            return Err(InvalidInput::EmptyLine(id.to_owned()).into());
        }
        if self.station_index.contains_key(id) {
            log::warn!("Station {id} is already registered, ignoring {name} ({line}).");
            return Ok(());
        }

        let station_idx = StationIndex::try_from(self.stations.len()).map_err(|_| InvalidInput::TooManyStations)?;

        let line_idx = match self.line_index.get(line) {
            Some(&line_idx) => line_idx,
            None => {
                let line_id: Arc<str> = Arc::from(line);
                self.lines.push(Line { id: line_id.clone(), stations: Vec::new() });
                self.line_index.insert(line_id, self.lines.len() - 1);
                self.lines.len() - 1
            }
        };
        self.lines[line_idx].stations.push(station_idx);

        self.stations.push(Station {
            id: id.into(),
            name: name.into(),
            line: self.lines[line_idx].id.clone(),
        });
        self.connections.push(Vec::new());
        self.station_index.insert(id.to_owned(), station_idx);
        log::trace!("Added station {id} ({name}) on line {line}.");
        Ok(())
    }

    pub fn add_connection(&mut self, id_a: &str, id_b: &str, duration: i64) -> Result<(), NetworkError> {
        let station_a = self.get_station_idx(id_a)?;
        let station_b = self.get_station_idx(id_b)?;
        let duration = Minutes::try_from(duration).map_err(|_| {
            if duration < 0 {
                InvalidInput::NegativeDuration(duration)
            } else {
                InvalidInput::DurationTooLarge(duration)
            }
        })?;
        if station_a == station_b {
            return Err(InvalidInput::SelfLoop(id_a.to_owned()).into());
        }

        self.connect(station_a, station_b, duration);
        log::trace!("Connected {id_a} and {id_b} ({duration} min).");
        Ok(())
    }

    // Both stations must exist and differ.
    pub(crate) fn connect(&mut self, station_a: StationIndex, station_b: StationIndex, duration: Minutes) {
        debug_assert_ne!(station_a, station_b);
        self.connections[station_a as usize].push(Connection { station: station_b, duration });
        self.connections[station_b as usize].push(Connection { station: station_a, duration });
    }

    pub fn neighbors(&self, id: &str) -> Result<impl Iterator<Item = (&Station, Minutes)> + '_, NetworkError> {
        let station_idx = self.get_station_idx(id)?;
        Ok(self.get_connections(station_idx).iter().map(move |connection| (self.get_station(connection.station), connection.duration)))
    }

    pub fn fewest_transfers(&self, start_id: &str, target_id: &str) -> Result<Option<Route<'_>>, NetworkError> {
        fewest_transfers(self, start_id, target_id)
    }

    pub fn fastest_route(&self, start_id: &str, target_id: &str) -> Result<Option<(Route<'_>, Minutes)>, NetworkError> {
        fastest_route(self, start_id, target_id)
    }

    pub fn fastest_route_with(&self, start_id: &str, target_id: &str, preferences: &SearchPreferences) -> Result<Option<(Route<'_>, Minutes)>, NetworkError> {
        fastest_route_with(self, start_id, target_id, preferences)
    }

    pub fn get_station(&self, station: StationIndex) -> &Station { &self.stations[station as usize] }

    pub fn get_connections(&self, station: StationIndex) -> &[Connection] { &self.connections[station as usize] }

    pub fn get_station_idx(&self, id: &str) -> Result<StationIndex, NetworkError> {
        self.station_index.get(id).copied().ok_or_else(|| NetworkError::NotFound(id.to_owned()))
    }

    pub fn get_station_by_id(&self, id: &str) -> Option<&Station> {
        self.station_index.get(id).map(|&station_idx| self.get_station(station_idx))
    }

    // Several stations can share a display name (one per line at an interchange), this returns the first registered.
    pub fn get_station_idx_from_name(&self, name: &str) -> Option<StationIndex> {
        self.get_station_indices_from_name(name).next()
    }

    pub fn get_station_indices_from_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = StationIndex> + 'a {
        self.stations.iter().enumerate().filter(move |(_, station)| &*station.name == name).map(|(i, _)| i as StationIndex)
    }

    // Cheapest direct connection between two stations, if they are adjacent.
    pub fn connection_duration(&self, from: StationIndex, to: StationIndex) -> Option<Minutes> {
        self.get_connections(from).iter().filter(|connection| connection.station == to).map(|connection| connection.duration).min()
    }

    pub fn get_line(&self, line: &str) -> Option<&Line> { self.line_index.get(line).map(|&line_idx| &self.lines[line_idx]) }

    pub fn lines(&self) -> &[Line] { &self.lines }

    pub fn stations(&self) -> &[Station] { &self.stations }

    pub fn contains(&self, id: &str) -> bool { self.station_index.contains_key(id) }

    pub fn num_stations(&self) -> usize { self.stations.len() }

    pub fn num_lines(&self) -> usize { self.lines.len() }

    // Each connection is stored on both of its stations.
    pub fn num_connections(&self) -> usize { self.connections.iter().map(Vec::len).sum::<usize>() / 2 }

    pub fn print_stats(&self) {
        println!("Network with {} stations, {} lines, and {} connections.", self.num_stations(), self.num_lines(), self.num_connections());
    }
}
