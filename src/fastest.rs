use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::network::{Minutes, Network, NetworkError, Station, StationIndex};
use crate::Route;

// Search preferences for a minimum-time query.
#[derive(Clone, Copy)]
pub struct SearchPreferences {
    // Estimated remaining time from a station to the target. Must never be negative, and must be
    // consistent (never drop by more than the connection it crosses) for the returned time to be minimal.
    pub heuristic: fn(&Station, &Station) -> Minutes,
}

impl Default for SearchPreferences {
    fn default() -> Self {
        // The same estimate for every station, so the ordering is that of Dijkstra's algorithm.
        SearchPreferences { heuristic: |_, _| 1 }
    }
}

#[derive(PartialEq, Eq)]
struct QueueEntry {
    priority: Minutes,
    // Push order, earlier entries win ties.
    order: usize,
    station: StationIndex,
    parent: Option<StationIndex>,
    cost: Minutes,
}

// BinaryHeap is a max-heap, so reverse to pop the lowest priority first.
impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.priority.cmp(&self.priority).then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub fn fastest_route<'a>(network: &'a Network, start_id: &str, target_id: &str) -> Result<Option<(Route<'a>, Minutes)>, NetworkError> {
    fastest_route_with(network, start_id, target_id, &SearchPreferences::default())
}

// Best-first search ordered by time so far plus the heuristic estimate to the target.
pub fn fastest_route_with<'a>(
    network: &'a Network,
    start_id: &str,
    target_id: &str,
    preferences: &SearchPreferences,
) -> Result<Option<(Route<'a>, Minutes)>, NetworkError> {
    let start = network.get_station_idx(start_id)?;
    let target = network.get_station_idx(target_id)?;
    let target_station = network.get_station(target);
    let estimate = |station: StationIndex| (preferences.heuristic)(network.get_station(station), target_station);

    let num_stations = network.num_stations();
    let mut visited = vec![false; num_stations];
    let mut parents = vec![None; num_stations];
    let mut queue = BinaryHeap::new();
    let mut num_pushed = 0;

    queue.push(QueueEntry { priority: estimate(start), order: num_pushed, station: start, parent: None, cost: 0 });
    num_pushed += 1;

    while let Some(entry) = queue.pop() {
        if entry.station == target {
            parents[target as usize] = entry.parent;
            let route = Route::from_parents(&parents, network, start, target);
            log::debug!(
                "Fastest route {start_id} -> {target_id}: {} minutes over {} connections, {num_pushed} queue entries.",
                entry.cost,
                route.num_connections()
            );
            return Ok(Some((route, entry.cost)));
        }

        let station = entry.station as usize;
        if visited[station] {
            continue;
        }
        visited[station] = true;
        parents[station] = entry.parent;
        log::trace!("Expanding {} at {} minutes.", network.get_station(entry.station).id, entry.cost);

        for connection in network.get_connections(entry.station) {
            if visited[connection.station as usize] {
                continue;
            }
            let cost = entry.cost.saturating_add(connection.duration);
            queue.push(QueueEntry {
                priority: cost.saturating_add(estimate(connection.station)),
                order: num_pushed,
                station: connection.station,
                parent: Some(entry.station),
                cost,
            });
            num_pushed += 1;
        }
    }

    log::debug!("No route from {start_id} to {target_id} ({num_pushed} queue entries).");
    Ok(None)
}
