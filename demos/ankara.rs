use metro::utils;

use dev_utils::{build_example_network, get_example_queries};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let network = build_example_network();
    network.print_stats();

    for (start, end) in get_example_queries() {
        println!();
        println!("{} -> {}", network.get_station_by_id(start).unwrap().name, network.get_station_by_id(end).unwrap().name);

        match network.fewest_transfers(start, end)? {
            Some(route) => println!("Fewest transfers: {}", route.names().join(" -> ")),
            None => println!("No route found."),
        }
        match network.fastest_route(start, end)? {
            Some((route, duration)) => println!("Fastest ({}): {}", utils::get_duration_str(duration), route.names().join(" -> ")),
            None => println!("No route found."),
        }
    }

    Ok(())
}
