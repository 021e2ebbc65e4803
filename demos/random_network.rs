use dev_utils::get_example_scenario;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (network, start, end) = get_example_scenario();
    network.print_stats();

    let query_start = std::time::Instant::now();
    let route = network.fewest_transfers(&start, &end)?;
    println!("Fewest transfers query took {:?}", query_start.elapsed());
    match route {
        Some(route) => println!("{route}"),
        None => println!("No route found."),
    }

    let query_start = std::time::Instant::now();
    let route = network.fastest_route(&start, &end)?;
    println!("Fastest route query took {:?}", query_start.elapsed());
    match route {
        Some((route, _)) => println!("{route}"),
        None => println!("No route found."),
    }

    Ok(())
}
