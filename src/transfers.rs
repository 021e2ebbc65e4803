use std::collections::VecDeque;

use crate::network::{Network, NetworkError};
use crate::Route;

// Breadth-first search for the route with the fewest connections, ignoring travel time.
// Ties between equally short routes go to whichever was discovered first, which follows the
// order connections were added to the network.
pub fn fewest_transfers<'a>(network: &'a Network, start_id: &str, target_id: &str) -> Result<Option<Route<'a>>, NetworkError> {
    let start = network.get_station_idx(start_id)?;
    let target = network.get_station_idx(target_id)?;

    let num_stations = network.num_stations();
    let mut visited = vec![false; num_stations];
    let mut parents = vec![None; num_stations];
    let mut frontier = VecDeque::new();

    visited[start as usize] = true;
    frontier.push_back(start);

    let mut num_expanded = 0;
    while let Some(station) = frontier.pop_front() {
        if station == target {
            let route = Route::from_parents(&parents, network, start, target);
            log::debug!("Fewest transfers {start_id} -> {target_id}: {} connections, {num_expanded} stations expanded.", route.num_connections());
            return Ok(Some(route));
        }
        num_expanded += 1;

        for connection in network.get_connections(station) {
            let neighbor = connection.station as usize;
            if !visited[neighbor] {
                visited[neighbor] = true;
                parents[neighbor] = Some(station);
                frontier.push_back(connection.station);
            }
        }
    }

    log::debug!("No route from {start_id} to {target_id} ({num_expanded} stations expanded).");
    Ok(None)
}
