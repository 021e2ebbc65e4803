use metro::network::{Minutes, StationIndex};
use metro::Network;

// Common example data for the demos, tests and benchmarks.

// A three line metro with interchanges at Kızılay, Demetevler and Gar.
pub fn build_example_network() -> Network {
    let mut network = Network::new();

    let stations = [
        ("K1", "Kızılay", "Red"),
        ("K2", "Ulus", "Red"),
        ("K3", "Demetevler", "Red"),
        ("K4", "OSB", "Red"),
        ("M1", "AŞTİ", "Blue"),
        ("M2", "Kızılay", "Blue"),
        ("M3", "Sıhhiye", "Blue"),
        ("M4", "Gar", "Blue"),
        ("T1", "Batıkent", "Orange"),
        ("T2", "Demetevler", "Orange"),
        ("T3", "Gar", "Orange"),
        ("T4", "Keçiören", "Orange"),
    ];
    for (id, name, line) in stations {
        network.add_station(id, name, line).unwrap();
    }

    let connections = [
        ("K1", "K2", 4),
        ("K2", "K3", 6),
        ("K3", "K4", 8),
        ("M1", "M2", 5),
        ("M2", "M3", 3),
        ("M3", "M4", 4),
        ("T1", "T2", 7),
        ("T2", "T3", 9),
        ("T3", "T4", 5),
        // Transfers.
        ("K1", "M2", 2),
        ("K3", "T2", 3),
        ("M4", "T3", 2),
    ];
    for (id_a, id_b, duration) in connections {
        network.add_connection(id_a, id_b, duration).unwrap();
    }

    network
}

// (start, end) station ids for the example network.
pub fn get_example_queries() -> [(&'static str, &'static str); 3] {
    [("M1", "K4"), ("T1", "T4"), ("T4", "M1")]
}

// Stations `S{i}` spread over `num_lines` lines, each line a chain, plus random extra connections between any stations.
pub fn build_random_network(seed: u64, num_stations: usize, num_lines: usize, num_extra_connections: usize) -> Network {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut network = Network::new();

    for i in 0..num_stations {
        network.add_station(&format!("S{i}"), &format!("Station {i}"), &format!("L{}", i % num_lines)).unwrap();
    }
    for i in num_lines..num_stations {
        network.add_connection(&format!("S{}", i - num_lines), &format!("S{i}"), rng.i64(1..=10)).unwrap();
    }
    if num_stations > 1 {
        for _ in 0..num_extra_connections {
            let a = rng.usize(..num_stations);
            let b = rng.usize(..num_stations);
            if a != b {
                network.add_connection(&format!("S{a}"), &format!("S{b}"), rng.i64(0..=15)).unwrap();
            }
        }
    }

    network
}

pub fn get_example_scenario() -> (Network, String, String) {
    let network = build_random_network(7, 2000, 20, 400);
    (network, "S0".to_string(), "S1999".to_string())
}

// Every simple path from start to target with its total time, by exhaustive depth-first search.
// Parallel connections give one path per connection. Only usable on small networks.
pub fn enumerate_simple_paths(network: &Network, start: StationIndex, target: StationIndex) -> Vec<(Vec<StationIndex>, Minutes)> {
    let mut paths = Vec::new();
    let mut on_path = vec![false; network.num_stations()];
    let mut path = vec![start];
    on_path[start as usize] = true;
    visit(network, target, &mut path, &mut on_path, 0, &mut paths);
    paths
}

fn visit(
    network: &Network,
    target: StationIndex,
    path: &mut Vec<StationIndex>,
    on_path: &mut [bool],
    cost: Minutes,
    paths: &mut Vec<(Vec<StationIndex>, Minutes)>,
) {
    let current = path[path.len() - 1];
    if current == target {
        paths.push((path.clone(), cost));
        return;
    }
    for connection in network.get_connections(current) {
        let next = connection.station as usize;
        if on_path[next] {
            continue;
        }
        on_path[next] = true;
        path.push(connection.station);
        visit(network, target, path, on_path, cost + connection.duration, paths);
        path.pop();
        on_path[next] = false;
    }
}
